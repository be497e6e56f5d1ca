//! Station catalog error types.

/// Errors that can occur when listing stations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Neither the live source nor the fallback produced a station
    #[error("station catalog is empty")]
    Empty,
}
