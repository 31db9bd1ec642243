//! ILDA image data transfer format decoding and rasterization
//!
//! Decodes the laser show frames of an ILDA stream and rasterizes each
//! frame's point path into an RGBA pixel buffer.

pub mod error;
mod palette;
mod parser;
mod render;
mod types;
mod utils;

pub use palette::{Palette, DEFAULT_PALETTE};
pub use render::{project, BACKGROUND};
pub use types::*;
pub use utils::{decode, decode_file, decode_with_palette};
