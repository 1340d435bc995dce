//! Tower middleware for the transport.
//!
//! Layers wrap the boxed transport service built by
//! [`HyperClientBuilder`](crate::HyperClientBuilder). The first layer added is
//! the outermost one and sees each request first.
//!
//! - [`LoggingLayer`] - logs each exchange with `tracing`, redacting
//!   `Authorization`
//!
//! Any other `tower::Layer` over [`BoxedService`](crate::BoxedService) can be
//! added with [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer).

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower's layer trait for custom middleware
pub use tower::Layer;
