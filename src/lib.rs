//! This file is the root of the `nimble_encoder` crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring the top-level modules (`encoder`, `streams`, `frame`, etc.).
//! 2.  Re-exporting the handful of types a caller needs to encode a value.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod config;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod kernels;
pub mod logging;
pub mod payload;
pub mod streams;
pub mod traits;

// `log_metric!` expands to `$crate::__log::debug!`.
#[doc(hidden)]
pub use log as __log;

//==================================================================================
// 2. Public API
//==================================================================================
pub use config::{EncoderConfig, FrameLayout};
pub use encoder::Encoder;
pub use error::NimbleError;
pub use frame::{FrameAssembler, FrameView, FramedBuffer, StreamKind};
pub use payload::{encode_stream_item, serialize, NimbleWrite, StreamPayload};
pub use traits::{IntoChunk, WriteSink};
