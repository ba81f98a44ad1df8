use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    #[error("card {key}: dimensions must be positive (w={width}, h={height})")]
    InvalidDimensions { key: String, width: f64, height: f64 },
    #[error("card {key}: padding cannot be negative (padding={padding})")]
    NegativePadding { key: String, padding: f64 },
    #[error("invalid space: {0}")]
    InvalidSpace(String),
    #[error(
        "pinned card {key} out of bounds: effective box at ({x}, {y}) size {w}x{h} must lie within x in [{left}, {right}], y >= {top}"
    )]
    PinnedOutOfBounds {
        key: String,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        left: f64,
        right: f64,
        top: f64,
    },
}

pub type Result<T> = std::result::Result<T, PackError>;
