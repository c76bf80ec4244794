#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ResourceError, ResourceResult};
use crate::fs::{file_length, safe_read, LoadedBuffer};
use crate::pak::format::Entry;
use crate::pak::path::{names_match, normalize_name};
use crate::pak::read::read_directory;

/// `<root>/pak<index>.pak`
pub fn archive_path(root: &Path, index: u32) -> PathBuf {
    root.join(format!("pak{index}.pak"))
}

/// Outcome of probing one archive of the chain.
#[derive(Debug)]
pub enum Probe {
    /// The archive could not be opened. Ends the whole chain.
    OpenFailed,
    /// Opened, but malformed or without the name. Try the next index.
    NoMatch,
    Found(LoadedBuffer),
}

/// Reads the payload of an entry that matched. A range that does not fit in
/// the archive is reported as an error rather than treated as absent.
fn read_entry<R: Read + Seek>(
    r: &mut R,
    path: &Path,
    entry: &Entry,
) -> ResourceResult<LoadedBuffer> {
    let io_err = |source| ResourceError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file_len = file_length(r).map_err(io_err)?;
    if u64::from(entry.offset) + u64::from(entry.size) > file_len {
        return Err(ResourceError::InvalidEntry {
            path: path.to_path_buf(),
            name: entry.name_str(),
            reason: format!(
                "data {}+{} lies past end of file ({file_len})",
                entry.offset, entry.size
            ),
        });
    }

    r.seek(SeekFrom::Start(u64::from(entry.offset)))
        .map_err(io_err)?;
    let mut buf = LoadedBuffer::zeroed(entry.size as usize);
    safe_read(r, path, buf.payload_mut())?;
    Ok(buf)
}

/// Searches one already opened archive for `name` (slash-normalized).
pub fn search_archive<R: Read + Seek>(
    r: &mut R,
    path: &Path,
    name: &str,
) -> ResourceResult<Option<LoadedBuffer>> {
    let entries = match read_directory(r, path) {
        Ok((_, entries)) => entries,
        Err(e) => {
            warn!("skipping {}: {e}", path.display());
            return Ok(None);
        }
    };

    // first match in directory order wins
    match entries
        .iter()
        .find(|e| names_match(&e.name, name.as_bytes()))
    {
        Some(entry) => read_entry(r, path, entry).map(Some),
        None => Ok(None),
    }
}

pub fn probe(root: &Path, index: u32, name: &str) -> ResourceResult<Probe> {
    let path = archive_path(root, index);
    let mut f = match File::open(&path) {
        Ok(f) => f,
        Err(e) => {
            debug!("{}: {e}", path.display());
            return Ok(Probe::OpenFailed);
        }
    };

    Ok(match search_archive(&mut f, &path, name)? {
        Some(buf) => Probe::Found(buf),
        None => Probe::NoMatch,
    })
}

/// Looks `name` up across `pak0.pak`, `pak1.pak`, ... under `root`.
///
/// Archives are probed in ascending order until one fails to open, so a
/// missing `pak0.pak` ends the search before anything else is tried. Each
/// archive is opened and closed within the call.
pub fn lookup(root: impl AsRef<Path>, name: &str) -> ResourceResult<Option<LoadedBuffer>> {
    let root = root.as_ref();
    let name = normalize_name(name);

    for index in 0u32.. {
        match probe(root, index, &name)? {
            Probe::OpenFailed => break,
            Probe::NoMatch => continue,
            Probe::Found(buf) => {
                debug!("found {name} in pak{index}.pak ({} bytes)", buf.len());
                return Ok(Some(buf));
            }
        }
    }
    Ok(None)
}
