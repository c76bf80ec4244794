#![forbid(unsafe_code)]

//! Resource access for offline content tools: whole-file load/save, lookup in
//! numbered `pak<N>.pak` archive chains, a flat text tokenizer, and the
//! byte-order and CRC-16 primitives binary readers build on.

pub mod crc;
pub mod endian;
pub mod error;
pub mod fs;
pub mod lex;
pub mod pak;
pub mod resource;

pub use crc::Crc16;
pub use error::{ResourceError, ResourceResult};
pub use fs::LoadedBuffer;
pub use lex::Lexer;
pub use resource::{ResourceConfig, ResourceLayer};
