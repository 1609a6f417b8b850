//! eit-core: stable foundation for the EIT forward simulator.
//!
//! Contains:
//! - ids (stable compact IDs for graph objects)
//! - numeric (Real + vector helpers)
//! - error (shared error type and the error-kind taxonomy)
//! - cancel (cooperative cancellation / timeout token)
//! - timing (wall-clock stage timer)

pub mod cancel;
pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use cancel::CancelToken;
pub use error::{CoreError, CoreResult, ErrorKind};
pub use ids::*;
pub use numeric::*;
pub use timing::Timer;
