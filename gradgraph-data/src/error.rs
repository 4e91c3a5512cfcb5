use gradgraph_core::GraphError;
use thiserror::Error;

/// Errors raised while reading datasets or building samples from them.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid magic number in {what} file: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagic {
        what: &'static str,
        expected: u32,
        found: u32,
    },

    #[error("Invalid {what} header: {detail}")]
    InvalidHeader { what: &'static str, detail: String },

    #[error("Unexpected end of {what} data: {detail}")]
    Truncated { what: &'static str, detail: String },

    #[error("Dataset has {images} images but {labels} labels")]
    CountMismatch { images: usize, labels: usize },

    #[error("Label {label} is out of range for {classes} classes")]
    LabelOutOfRange { label: u8, classes: usize },

    #[error("Index {index} out of bounds for dataset of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Tensor error: {0}")]
    Tensor(#[from] GraphError),
}
