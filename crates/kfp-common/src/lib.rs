//! Common plumbing for the kfp client crates.
//!
//! Generated endpoint modules only know how to write themselves onto a
//! [`request::ClientRequest`]. Everything else they need lives here: the
//! transport trait, the concrete request builder, the response and error types.

#![warn(missing_docs)]
pub use smol_str;
pub use smol_str::SmolStr;
pub use tokio_util::sync::CancellationToken;
pub use url;

#[cfg(feature = "reqwest-client")]
pub use reqwest;

pub mod error;
/// Type-format registry handed to parameter writers.
pub mod formats;
/// HTTP client abstraction used by kfp crates.
pub mod http_client;
pub mod operation;
pub mod params;
pub mod request;
/// `google.rpc.Status` payload returned by the API on failure.
pub mod status;

pub use error::{ApiResult, ClientError};
pub use formats::Registry;
pub use operation::{ApiOperation, CallOptions};
pub use params::WriteToRequest;
pub use request::{ClientRequest, DEFAULT_TIMEOUT, HttpRequest};
