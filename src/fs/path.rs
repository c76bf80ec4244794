#![forbid(unsafe_code)]

//! Pure string helpers for tool-style paths. Both `/` and `\` count as
//! separators; nothing here touches the filesystem.

#[inline]
fn is_sep(c: u8) -> bool {
    c == b'/' || c == b'\\'
}

/// `/foo`, `\foo` and `C:foo` are absolute.
pub fn is_absolute(path: &str) -> bool {
    let b = path.as_bytes();
    matches!(b.first(), Some(b'/' | b'\\')) || b.get(1) == Some(&b':')
}

/// Appends `extension` (which should include the dot) unless the last path
/// component already has one.
pub fn default_extension(path: &str, extension: &str) -> String {
    let b = path.as_bytes();
    for i in (1..b.len()).rev() {
        if is_sep(b[i]) {
            break;
        }
        if b[i] == b'.' {
            return path.to_string();
        }
    }
    format!("{path}{extension}")
}

pub fn default_path(path: &str, basepath: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }
    format!("{basepath}{path}")
}

/// Drops the last component and its separator: `a/b/c.txt` -> `a/b`.
pub fn strip_filename(path: &str) -> &str {
    let b = path.as_bytes();
    let mut len = b.len().saturating_sub(1);
    while len > 0 && !is_sep(b[len]) {
        len -= 1;
    }
    &path[..len]
}

/// Removes a trailing `.ext`. Never looks past a separator, so `a.d/file`
/// comes back unchanged.
pub fn strip_extension(path: &str) -> &str {
    let b = path.as_bytes();
    if b.is_empty() {
        return path;
    }
    let mut len = b.len() - 1;
    while len > 0 && b[len] != b'.' {
        len -= 1;
        if is_sep(b[len]) {
            return path;
        }
    }
    if len > 0 {
        &path[..len]
    } else {
        path
    }
}

/// Directory part including the trailing separator: `a/b/c.txt` -> `a/b/`.
pub fn extract_file_path(path: &str) -> &str {
    let b = path.as_bytes();
    let mut src = b.len().saturating_sub(1);
    while src > 0 && !is_sep(b[src - 1]) {
        src -= 1;
    }
    &path[..src]
}

/// File name without directory or extension: `a/b/c.txt` -> `c`.
pub fn extract_file_base(path: &str) -> &str {
    let b = path.as_bytes();
    let mut src = b.len().saturating_sub(1);
    while src > 0 && !is_sep(b[src - 1]) {
        src -= 1;
    }
    let rest = &path[src..];
    match rest.find('.') {
        Some(dot) => &rest[..dot],
        None => rest,
    }
}

/// Extension of the last component including its dot, or `""`.
pub fn extract_file_extension(path: &str) -> &str {
    let name_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) => &path[name_start + dot..],
        None => "",
    }
}

/// Ensures a non-empty path ends with a separator.
pub fn path_slash(path: &str) -> String {
    if path.is_empty() || path.ends_with(['/', '\\']) {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
