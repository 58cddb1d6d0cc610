//! Error types for image allocation and render setup.

use thiserror::Error;

/// Errors that can occur while preparing or running a render.
///
/// Misses and depth exhaustion are ordinary values of the integrator and
/// never show up here.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Failed to allocate {bytes} bytes for the image buffer")]
    AllocationFailed { bytes: usize },

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
