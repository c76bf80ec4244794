#![forbid(unsafe_code)]

use crate::pak::format::NAME_LEN;

pub fn normalize_name(name: &str) -> String {
    name.replace('\\', "/")
}

pub(crate) fn normalize_slashes(bytes: &mut [u8]) {
    for b in bytes.iter_mut().take_while(|b| **b != 0) {
        if *b == b'\\' {
            *b = b'/';
        }
    }
}

/// ASCII case-insensitive compare of a NUL-padded directory name against a
/// lookup name, bounded to the name field. Bytes past the end of `wanted`
/// read as NUL.
pub fn names_match(field: &[u8; NAME_LEN], wanted: &[u8]) -> bool {
    for (i, &a) in field.iter().enumerate() {
        let b = wanted.get(i).copied().unwrap_or(0);
        if !a.eq_ignore_ascii_case(&b) {
            return false;
        }
        if a == 0 {
            return true;
        }
    }
    true
}
