#![allow(dead_code)]

use std::path::Path;

use pakres::pak::{ENTRY_LEN, HEADER_LEN, MAGIC, NAME_LEN};

/// Builds a pak image: header, payloads, then the directory.
pub fn pak_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut out = vec![0u8; HEADER_LEN];
    let mut dir = Vec::new();

    for (name, data) in files {
        let offset = out.len() as u32;
        out.extend_from_slice(data.as_bytes());

        let mut rec = [0u8; NAME_LEN];
        rec[..name.len()].copy_from_slice(name.as_bytes());
        dir.extend_from_slice(&rec);
        dir.extend_from_slice(&offset.to_le_bytes());
        dir.extend_from_slice(&(data.len() as u32).to_le_bytes());
    }
    assert_eq!(dir.len(), files.len() * ENTRY_LEN);

    let dir_offset = out.len() as u32;
    out.extend_from_slice(&dir);
    out[..4].copy_from_slice(&MAGIC);
    out[4..8].copy_from_slice(&dir_offset.to_le_bytes());
    out[8..12].copy_from_slice(&(dir.len() as u32).to_le_bytes());
    out
}

pub fn write_pak(root: &Path, index: u32, files: &[(&str, &str)]) {
    std::fs::write(root.join(format!("pak{index}.pak")), pak_bytes(files)).unwrap();
}
