#![forbid(unsafe_code)]

//! Path configuration and the load-with-archive-fallback entry point.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{ResourceError, ResourceResult};
use crate::fs::path::{is_absolute, path_slash};
use crate::fs::{copy_file, try_load_file, LoadedBuffer};
use crate::pak;

/// Directory roots used to resolve tool paths. Directory strings keep their
/// trailing separator so they can be prefixed directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceConfig {
    pub qdir: String,
    pub gamedir: String,
    pub moddir: String,
    pub basedir: String,
    /// Root of the `pak<N>.pak` chain.
    pub archive_root: PathBuf,
    /// When set, [`ResourceLayer::expand_path_and_archive`] copies every
    /// expanded file here.
    pub archive_dir: Option<PathBuf>,
}

fn current_dir() -> ResourceResult<String> {
    let cwd = std::env::current_dir().map_err(ResourceError::Cwd)?;
    Ok(path_slash(&cwd.to_string_lossy()))
}

impl ResourceConfig {
    /// Derives the roots from a source file path, which is assumed to sit one
    /// level below the mod directory (e.g. `<mod>/maps/start.map`).
    pub fn from_source_path(path: &str) -> ResourceResult<Self> {
        let dir = match path.rfind(['/', '\\']) {
            Some(i) => path[..=i].to_string(),
            None => current_dir()?,
        };

        let moddir = format!("{dir}../");
        let gamedir = format!("{moddir}../");
        let qdir = format!("{gamedir}../");
        debug!("moddir {moddir} gamedir {gamedir} qdir {qdir}");

        Ok(Self {
            archive_root: PathBuf::from(&gamedir),
            basedir: moddir.clone(),
            qdir,
            gamedir,
            moddir,
            archive_dir: None,
        })
    }

    pub fn with_archive_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.archive_dir = Some(dir.into());
        self
    }

    pub fn with_archive_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.archive_root = root.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct ResourceLayer {
    config: ResourceConfig,
}

impl ResourceLayer {
    pub fn new(config: ResourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Makes a command line path absolute against the current directory.
    pub fn expand_arg(&self, path: &str) -> ResourceResult<String> {
        if is_absolute(path) {
            return Ok(path.to_string());
        }
        Ok(format!("{}{path}", current_dir()?))
    }

    pub fn expand_path(&self, path: &str) -> ResourceResult<String> {
        if self.config.qdir.is_empty() {
            return Err(ResourceError::NoQdir);
        }
        if is_absolute(path) {
            return Ok(path.to_string());
        }
        Ok(format!("{}{path}", self.config.qdir))
    }

    /// [`expand_path`](Self::expand_path), also copying the file into the
    /// archive directory when one is configured.
    pub fn expand_path_and_archive(&self, path: &str) -> ResourceResult<String> {
        let expanded = self.expand_path(path)?;
        if let Some(dir) = &self.config.archive_dir {
            let dest = dir.join(path);
            debug!("archiving {expanded} -> {}", dest.display());
            copy_file(&expanded, &dest)?;
        }
        Ok(expanded)
    }

    /// Loads `basedir + relative` (plain concatenation, so a leading slash on
    /// `relative` does not escape the base), falling back to the archive
    /// chain when `archive_fallback` is set.
    pub fn load(
        &self,
        relative: &str,
        archive_fallback: bool,
    ) -> ResourceResult<Option<LoadedBuffer>> {
        let direct = PathBuf::from(format!("{}{relative}", self.config.basedir));
        if let Some(buf) = try_load_file(&direct, false)? {
            return Ok(Some(buf));
        }
        if !archive_fallback {
            return Ok(None);
        }
        debug!(
            "{} not on disk, searching paks in {}",
            direct.display(),
            self.config.archive_root.display()
        );
        pak::lookup(&self.config.archive_root, relative)
    }
}
