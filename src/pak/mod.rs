#![forbid(unsafe_code)]

mod format;
mod io;
mod lookup;
mod path;
mod read;

pub use format::{Entry, Header, ENTRY_LEN, HEADER_LEN, MAGIC, NAME_LEN};
pub use lookup::{archive_path, lookup, probe, search_archive, Probe};
pub use path::{names_match, normalize_name};
pub use read::{parse_directory, parse_header, read_directory};
