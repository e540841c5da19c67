//! Error types shared by the sampler, the lifecycle guard and the host hooks.

use thiserror::Error;

/// Errors surfaced by the visualization.
///
/// `initialize` failures are caught by [`crate::lifecycle::Visualization::init`]
/// and reported on the status sink; they never panic the host.
#[derive(Debug, Error)]
pub enum Error {
    /// The 3D graphics backend is not available in this environment.
    #[error("graphics backend unavailable: {0}")]
    DependencyMissing(String),

    /// The mount point is missing or already hosts a render surface.
    #[error("render container unavailable: {0}")]
    ContainerUnavailable(String),

    /// A visualization instance is already initializing or ready.
    #[error("visualization is already initialized")]
    AlreadyInitialized,

    /// A caller contract violation, e.g. a negative sampling radius.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A host step failed while the instance was initializing.
    #[error("visualization setup failed: {0:#}")]
    Setup(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
