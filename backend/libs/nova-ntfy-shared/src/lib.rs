//! Nova ntfy Shared Library
//!
//! This library provides a client for publishing notifications to an
//! ntfy-style relay, where each topic is a URL path on the relay host.
//!
//! It handles:
//! - Bearer token authentication
//! - Title, priority, tags and attachment headers
//! - Cancellation and deadlines through [`SendContext`]
//! - Pluggable HTTP transport (reqwest by default)
//! - Configuration from `NTFY_*` environment variables
//!
//! One call sends exactly one request. Retries are left to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use nova_ntfy_shared::{Level, NtfyClient, SendContext};
//!
//! # async fn run() -> Result<(), nova_ntfy_shared::NtfyError> {
//! let client = NtfyClient::new("https://ntfy.example.com", "tk_secret");
//! client
//!     .send(&SendContext::background(), "alerts", Level::High, "Deploy", "v2 is live")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod errors;
pub mod models;
pub mod transport;

pub use client::{join_topic_url, NtfyClient};
pub use config::NtfyConfig;
pub use context::SendContext;
pub use errors::{ConfigError, NtfyError, TransportError};
pub use models::{Level, Message};
pub use transport::{HttpTransport, RelayRequest, RelayResponse, ReqwestTransport};
