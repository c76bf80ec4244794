mod common;

use std::io::Cursor;
use std::path::Path;

use common::{pak_bytes, write_pak};
use pakres::pak::{self, Probe};
use pakres::ResourceError;

#[test]
fn finds_entry_bytes() {
    let dir = tempfile::tempdir().unwrap();
    write_pak(
        dir.path(),
        0,
        &[("gfx/palette.lmp", "\x01\x02\x03"), ("progs.dat", "code")],
    );

    let buf = pak::lookup(dir.path(), "progs.dat").unwrap().unwrap();
    assert_eq!(buf.as_bytes(), b"code");
    assert_eq!(buf.as_bytes_with_nul(), b"code\0");
}

#[test]
fn name_match_ignores_case_and_slash_direction() {
    let dir = tempfile::tempdir().unwrap();
    write_pak(dir.path(), 0, &[("maps\\E1M1.bsp", "bsp")]);

    for name in ["maps/e1m1.bsp", "MAPS\\e1m1.BSP", "Maps/E1M1.bsp"] {
        let buf = pak::lookup(dir.path(), name).unwrap();
        assert_eq!(buf.unwrap().as_bytes(), b"bsp", "{name}");
    }
}

#[test]
fn absent_name_is_none() {
    let dir = tempfile::tempdir().unwrap();
    write_pak(dir.path(), 0, &[("a.txt", "a")]);
    assert!(pak::lookup(dir.path(), "b.txt").unwrap().is_none());
    assert!(pak::lookup(dir.path(), "a.tx").unwrap().is_none());
}

#[test]
fn first_entry_in_directory_order_wins() {
    let dir = tempfile::tempdir().unwrap();
    write_pak(dir.path(), 0, &[("dup.txt", "first"), ("DUP.TXT", "second")]);
    let buf = pak::lookup(dir.path(), "dup.txt").unwrap().unwrap();
    assert_eq!(buf.as_bytes(), b"first");
}

#[test]
fn empty_entry() {
    let dir = tempfile::tempdir().unwrap();
    write_pak(dir.path(), 0, &[("empty", "")]);
    let buf = pak::lookup(dir.path(), "empty").unwrap().unwrap();
    assert!(buf.is_empty());
    assert_eq!(buf.as_bytes_with_nul(), b"\0");
}

#[test]
fn missing_pak0_stops_before_pak1() {
    let dir = tempfile::tempdir().unwrap();
    write_pak(dir.path(), 1, &[("a.txt", "a")]);

    assert!(matches!(
        pak::probe(dir.path(), 0, "a.txt").unwrap(),
        Probe::OpenFailed
    ));
    assert!(pak::lookup(dir.path(), "a.txt").unwrap().is_none());
}

#[test]
fn falls_through_to_later_archives() {
    let dir = tempfile::tempdir().unwrap();
    write_pak(dir.path(), 0, &[("a.txt", "a")]);
    write_pak(dir.path(), 1, &[("b.txt", "bee")]);

    let buf = pak::lookup(dir.path(), "b.txt").unwrap().unwrap();
    assert_eq!(buf.as_bytes(), b"bee");
}

#[test]
fn earlier_archive_shadows_later() {
    let dir = tempfile::tempdir().unwrap();
    write_pak(dir.path(), 0, &[("a.txt", "zero")]);
    write_pak(dir.path(), 1, &[("a.txt", "one")]);
    let buf = pak::lookup(dir.path(), "a.txt").unwrap().unwrap();
    assert_eq!(buf.as_bytes(), b"zero");
}

#[test]
fn gap_in_chain_ends_search() {
    let dir = tempfile::tempdir().unwrap();
    write_pak(dir.path(), 0, &[("a.txt", "a")]);
    write_pak(dir.path(), 2, &[("c.txt", "c")]);
    assert!(pak::lookup(dir.path(), "c.txt").unwrap().is_none());
}

#[test]
fn malformed_archive_is_skipped() {
    let dir = tempfile::tempdir().unwrap();

    let mut bad = pak_bytes(&[("a.txt", "a")]);
    let ragged = 64u32 + 3;
    bad[8..12].copy_from_slice(&ragged.to_le_bytes());
    bad.extend_from_slice(&[0u8; 3]);
    std::fs::write(dir.path().join("pak0.pak"), bad).unwrap();
    write_pak(dir.path(), 1, &[("a.txt", "from pak1")]);

    let buf = pak::lookup(dir.path(), "a.txt").unwrap().unwrap();
    assert_eq!(buf.as_bytes(), b"from pak1");
}

#[test]
fn truncated_archive_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pak0.pak"), b"PACK").unwrap();
    write_pak(dir.path(), 1, &[("x", "x")]);
    assert_eq!(pak::lookup(dir.path(), "x").unwrap().unwrap().as_bytes(), b"x");
}

#[test]
fn entry_past_end_is_an_error() {
    let mut image = pak_bytes(&[("a.txt", "abc")]);
    // entry size field sits after the 56 byte name and 4 byte offset
    let dir_offset = u32::from_le_bytes(image[4..8].try_into().unwrap()) as usize;
    let size_at = dir_offset + 56 + 4;
    image[size_at..size_at + 4].copy_from_slice(&10_000u32.to_le_bytes());

    let err = pak::search_archive(&mut Cursor::new(image), Path::new("mem.pak"), "a.txt")
        .unwrap_err();
    assert!(matches!(err, ResourceError::InvalidEntry { .. }));
}

#[test]
fn search_in_memory_archive() {
    let image = pak_bytes(&[("sound/ambience/wind2.wav", "RIFF")]);
    let got = pak::search_archive(
        &mut Cursor::new(image),
        Path::new("mem.pak"),
        "sound/ambience/wind2.wav",
    )
    .unwrap();
    assert_eq!(got.unwrap().as_bytes(), b"RIFF");
}
