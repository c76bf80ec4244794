#![forbid(unsafe_code)]

/// Conventional magic of id-style pak files. Not enforced on read.
pub const MAGIC: [u8; 4] = *b"PACK";

/// On-disk header length: magic, dir offset, dir size, 50 reserved bytes.
pub const HEADER_LEN: usize = 4 + 4 + 4 + 50;

/// Bytes of the header that carry data; the reserved tail is never read.
pub(crate) const HEADER_FIELDS_LEN: usize = 12;

pub const NAME_LEN: usize = 56;

/// name[56] + offset u32 + size u32
pub const ENTRY_LEN: usize = NAME_LEN + 4 + 4;

/// Pak header. All integers are little-endian on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub dir_offset: u32,
    pub dir_size: u32,
}

impl Header {
    pub fn entry_count(&self) -> usize {
        self.dir_size as usize / ENTRY_LEN
    }
}

/// One directory record. `name` has already been slash-normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: [u8; NAME_LEN],
    pub offset: u32,
    pub size: u32,
}

impl Entry {
    /// Name up to the first NUL, lossily decoded.
    pub fn name_str(&self) -> String {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }
}
