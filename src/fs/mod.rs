#![forbid(unsafe_code)]

//! Whole-file load/save and the "safe" open/read/write primitives.
//!
//! Every failure here is returned as a [`ResourceError`]; whether that stops
//! the process is up to the caller. The only soft-failing entry points are
//! [`try_load_file`], [`file_exists`] and [`file_time`].

pub mod path;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::UNIX_EPOCH;

use tracing::{debug, warn};

use crate::error::{ResourceError, ResourceResult};

/// Owned file contents with one extra zero byte past the end, so the data can
/// always be handed to text consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBuffer {
    // invariant: non-empty, last byte is 0 and not part of the payload
    data: Vec<u8>,
}

impl LoadedBuffer {
    pub fn from_vec(mut data: Vec<u8>) -> Self {
        data.push(0);
        Self { data }
    }

    /// Allocates `len + 1` zeroed bytes.
    pub(crate) fn zeroed(len: usize) -> Self {
        Self {
            data: vec![0u8; len + 1],
        }
    }

    pub(crate) fn payload_mut(&mut self) -> &mut [u8] {
        let len = self.len();
        &mut self.data[..len]
    }

    pub fn len(&self) -> usize {
        self.data.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.data
    }

    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.pop();
        self.data
    }
}

impl AsRef<[u8]> for LoadedBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

pub fn safe_open_read(path: &Path) -> ResourceResult<File> {
    File::open(path).map_err(|source| ResourceError::Open {
        path: path.to_path_buf(),
        source,
    })
}

pub fn safe_open_write(path: &Path) -> ResourceResult<File> {
    File::create(path).map_err(|source| ResourceError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Fills `buf` completely or fails. `path` is only used for diagnostics.
pub fn safe_read(r: &mut dyn Read, path: &Path, buf: &mut [u8]) -> ResourceResult<()> {
    let mut got = 0;
    while got < buf.len() {
        match r.read(&mut buf[got..]) {
            Ok(0) => break,
            Ok(n) => got += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(source) => {
                return Err(ResourceError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
    if got != buf.len() {
        return Err(ResourceError::ShortRead {
            path: path.to_path_buf(),
            wanted: buf.len(),
            got,
        });
    }
    Ok(())
}

pub fn safe_write(w: &mut dyn Write, path: &Path, buf: &[u8]) -> ResourceResult<()> {
    w.write_all(buf).map_err(|source| ResourceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Length of a seekable stream; the current position is restored.
pub fn file_length<S: Seek>(s: &mut S) -> std::io::Result<u64> {
    let pos = s.stream_position()?;
    let end = s.seek(SeekFrom::End(0))?;
    s.seek(SeekFrom::Start(pos))?;
    Ok(end)
}

fn read_whole(f: &mut File, path: &Path) -> ResourceResult<LoadedBuffer> {
    let len = file_length(f).map_err(|source| ResourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = LoadedBuffer::zeroed(len as usize);
    safe_read(f, path, buf.payload_mut())?;
    Ok(buf)
}

pub fn load_file(path: impl AsRef<Path>) -> ResourceResult<LoadedBuffer> {
    let path = path.as_ref();
    let mut f = safe_open_read(path)?;
    let buf = read_whole(&mut f, path)?;
    debug!("loaded {} ({} bytes)", path.display(), buf.len());
    Ok(buf)
}

/// Like [`load_file`], but a file that cannot be opened yields `Ok(None)`.
/// A file that opens but then fails to read is still an error.
pub fn try_load_file(
    path: impl AsRef<Path>,
    print_error: bool,
) -> ResourceResult<Option<LoadedBuffer>> {
    let path = path.as_ref();
    let mut f = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            if print_error {
                warn!("File {} failed to open: {e}", path.display());
            }
            return Ok(None);
        }
    };
    read_whole(&mut f, path).map(Some)
}

pub fn save_file(path: impl AsRef<Path>, data: &[u8]) -> ResourceResult<()> {
    let path = path.as_ref();
    let mut f = safe_open_write(path)?;
    safe_write(&mut f, path, data)?;
    f.flush().map_err(|source| ResourceError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("saved {} ({} bytes)", path.display(), data.len());
    Ok(())
}

pub fn file_exists(path: impl AsRef<Path>) -> bool {
    File::open(path).is_ok()
}

/// Modification time in seconds since the unix epoch, `None` if the file is
/// not present.
pub fn file_time(path: impl AsRef<Path>) -> Option<i64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let secs = match modified.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    };
    Some(secs)
}

fn mkdir(path: &Path) -> ResourceResult<()> {
    match std::fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(ResourceError::CreateDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> ResourceResult<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Ok(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> ResourceResult<&[u8]> {
    path.to_str()
        .map(str::as_bytes)
        .ok_or_else(|| ResourceError::CreateDir {
            path: path.to_path_buf(),
            source: std::io::Error::new(ErrorKind::InvalidInput, "path is not valid unicode"),
        })
}

#[cfg(unix)]
fn path_prefix(bytes: &[u8]) -> &Path {
    use std::os::unix::ffi::OsStrExt;
    Path::new(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_prefix(bytes: &[u8]) -> &Path {
    // only reached with bytes cut at an ASCII separator of a valid str
    Path::new(OsStr::new(std::str::from_utf8(bytes).unwrap_or_default()))
}

/// Creates every directory leading up to the last separator in `path`. The
/// final component is treated as a file name and is not created. Names are
/// taken byte for byte, so non-UTF-8 components survive unchanged.
pub fn create_path(path: impl AsRef<Path>) -> ResourceResult<()> {
    let bytes = path_bytes(path.as_ref())?;
    let start = if bytes.len() >= 2 && bytes[1] == b':' { 2 } else { 0 };

    for (i, &c) in bytes.iter().enumerate().skip(start + 1) {
        if c == b'/' || c == b'\\' {
            mkdir(path_prefix(&bytes[..i]))?;
        }
    }
    Ok(())
}

pub fn copy_file(from: impl AsRef<Path>, to: impl AsRef<Path>) -> ResourceResult<()> {
    let buf = load_file(from)?;
    create_path(to.as_ref())?;
    save_file(to, buf.as_bytes())
}
