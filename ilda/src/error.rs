use crate::types::Format;

#[derive(Debug, thiserror::Error)]
pub enum IldaError {
    #[error("File header does not start with ILDA: {magic:?}")]
    MalformedHeader { magic: [u8; 4] },
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: Format },
    #[error("Stream ends in the middle of a {context}")]
    TruncatedStream { context: &'static str },
    #[error("Color index ({index}) is greater than the palette size ({palette_len})")]
    ColorIndexOutOfRange { index: usize, palette_len: usize },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
