use std::io;

use thiserror::Error;

/// Constants
pub mod constants;
pub mod decoder;
pub mod encoder;
/// Special constants used in subquery specification
pub mod special_values;
pub mod types;
pub mod utils;


/// Errors from packing or unpacking [types::native::AxiomV2CircuitMetadata].
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("unsupported circuit shape: {0}")]
    UnsupportedShape(String),

    #[error("unsupported circuit metadata version {0}")]
    UnsupportedVersion(u8),

    #[error("invalid circuit metadata encoding: {0}")]
    InvalidEncoding(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
