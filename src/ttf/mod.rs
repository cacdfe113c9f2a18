//! Decoder for readsb heatmap (ttf) files.
//!
//! The [open] function reads a gzip compressed heatmap file from disk,
//! [decode_file] decodes an already decompressed buffer and [Decoder]
//! works on any [std::io::Read] source.

mod classify;
pub mod consts;
mod decode;
mod emit;
mod raw;
mod read;

pub use classify::*;
pub use decode::*;
pub use emit::*;
pub use raw::*;
pub use read::*;
