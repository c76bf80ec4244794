#![forbid(unsafe_code)]

//! Fixed little-endian field decoding for pak records, independent of host
//! byte order.

use crate::endian::Endian;

pub fn read_array<const N: usize>(buf: &[u8], at: usize) -> Option<[u8; N]> {
    buf.get(at..at + N)?.try_into().ok()
}

pub fn read_u32(buf: &[u8], at: usize) -> Option<u32> {
    read_array::<4>(buf, at).map(|b| u32::from_ne_bytes(b).from_little())
}

#[cfg(test)]
pub fn write_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_little().to_ne_bytes());
}
