#![forbid(unsafe_code)]

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::error::{ResourceError, ResourceResult};
use crate::fs::{file_length, safe_read};
use crate::pak::format::{Entry, Header, ENTRY_LEN, HEADER_FIELDS_LEN, MAGIC, NAME_LEN};
use crate::pak::io::{read_array, read_u32};
use crate::pak::path::normalize_slashes;

fn invalid(path: &Path, reason: impl Into<String>) -> ResourceError {
    ResourceError::InvalidArchive {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

pub fn parse_header(buf: &[u8], path: &Path) -> ResourceResult<Header> {
    let (Some(magic), Some(dir_offset), Some(dir_size)) =
        (read_array::<4>(buf, 0), read_u32(buf, 4), read_u32(buf, 8))
    else {
        return Err(invalid(path, "file too small for header"));
    };
    if magic != MAGIC {
        debug!("{}: unexpected magic {:?}", path.display(), magic);
    }
    Ok(Header {
        magic,
        dir_offset,
        dir_size,
    })
}

/// Splits a raw directory into entries and normalizes their names in place.
pub fn parse_directory(mut dir: Vec<u8>, path: &Path) -> ResourceResult<Vec<Entry>> {
    if dir.len() % ENTRY_LEN != 0 {
        return Err(invalid(
            path,
            format!("directory size {} is not a multiple of {ENTRY_LEN}", dir.len()),
        ));
    }

    let mut out = Vec::with_capacity(dir.len() / ENTRY_LEN);
    for rec in dir.chunks_exact_mut(ENTRY_LEN) {
        normalize_slashes(&mut rec[..NAME_LEN]);
        let (Some(name), Some(offset), Some(size)) = (
            read_array::<NAME_LEN>(rec, 0),
            read_u32(rec, NAME_LEN),
            read_u32(rec, NAME_LEN + 4),
        ) else {
            return Err(invalid(path, "truncated directory entry"));
        };
        out.push(Entry { name, offset, size });
    }
    Ok(out)
}

/// Reads the header and the whole directory of an open archive.
pub fn read_directory<R: Read + Seek>(
    r: &mut R,
    path: &Path,
) -> ResourceResult<(Header, Vec<Entry>)> {
    let io_err = |source| ResourceError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file_len = file_length(r).map_err(io_err)?;

    let mut head = [0u8; HEADER_FIELDS_LEN];
    safe_read(r, path, &mut head)?;
    let header = parse_header(&head, path)?;

    if header.dir_size as usize % ENTRY_LEN != 0 {
        return Err(invalid(
            path,
            format!(
                "directory size {} is not a multiple of {ENTRY_LEN}",
                header.dir_size
            ),
        ));
    }
    if u64::from(header.dir_offset) + u64::from(header.dir_size) > file_len {
        return Err(invalid(path, "directory outside file"));
    }

    r.seek(SeekFrom::Start(u64::from(header.dir_offset)))
        .map_err(io_err)?;
    let mut dir = vec![0u8; header.dir_size as usize];
    safe_read(r, path, &mut dir)?;

    let entries = parse_directory(dir, path)?;
    debug!(
        "{}: {} entries at offset {}",
        path.display(),
        entries.len(),
        header.dir_offset
    );
    Ok((header, entries))
}
