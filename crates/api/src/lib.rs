#![forbid(unsafe_code)]

pub mod error;
pub mod handlers;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use router::{AppState, router, serve};
