use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the pointer gesture state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GestureError {
    /// A release arrived while no press was being tracked
    #[error("pointer released at ({x}, {y}) without a matching press")]
    ReleaseWithoutPress { x: i32, y: i32 },
}

/// Errors raised when navigating the snapshot history
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no snapshot available to {0}")]
    Empty(&'static str),
}

/// Errors raised when a color picker value cannot be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),
}

/// Errors that can occur while writing the canvas to disk.
///
/// None of these alter the canvas or its history.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("export path {0} has no file extension")]
    MissingExtension(PathBuf),
    #[error("unsupported export format {extension:?} for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to build pdf document: {0}")]
    Pdf(#[from] lopdf::Error),
}
