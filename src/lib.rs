//! # Capture Tool
//!
//! Client library and CLI for the Capture API: screenshots, PDFs, animated
//! recordings, content and metadata extraction for any web page.
//!
//! Every request is a single signed GET. The signature is the MD5 of the API
//! secret followed by the canonical query string, so the same options always
//! produce the same URL, whatever order they were added in.
//!
//! ## Signing pipeline
//!
//! | Step | Function | Notes |
//! |------|----------|-------|
//! | Options | [`Options`], [`parse_options`] | Typed values, `key=value` parsing for the CLI |
//! | Canonical query | [`canonical_query`] | Drops `format` and unset values, sorts, escapes |
//! | Token | [`derive_token`] | Lowercase hex MD5 over `secret + query` |
//! | URL | [`CaptureClient::build_url`] | `{host}/{key}/{token}/{kind}?{query}` |
//! | Dispatch | [`CaptureClient::fetch_bytes`] | One attempt, non-2xx is an error |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use capture_tool::{CaptureClient, Options};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CaptureClient::new("my_key", "my_secret")?.edge();
//!
//!     let options = Options::new().with("vw", 1920).with("fullPage", true);
//!     let png = client.fetch_image("https://example.com", &options).await?;
//!     println!("Screenshot captured: {} bytes", png.len());
//!
//!     let content = client.fetch_content("https://example.com", &Options::new()).await?;
//!     println!("{}", content.markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! export CAPTURE_KEY=... CAPTURE_SECRET=...
//! capture screenshot https://example.com -X vw=1920 -X fullPage=true -o full.png
//! capture pdf https://example.com -X landscape=true -o page.pdf
//! capture content https://example.com --format markdown
//! capture metadata https://example.com --pretty
//! capture animated https://example.com -X duration=5 -o recording.gif
//! capture screenshot https://example.com --dry-run
//! ```

/// Client configuration and credentials
pub mod config;

/// Error types
pub mod error;

/// Typed request options and `key=value` parsing
pub mod options;

/// Canonical query string serialization
pub mod query;

/// Request token derivation
pub mod token;

/// Request kinds and service response types
pub mod types;

/// HTTP transport abstraction
pub mod transport;

/// Signed URL builder and request dispatch
pub mod client;

/// Request metrics
pub mod metrics;

/// Command-line interface implementation
pub mod cli;

/// Result shaping and output writing
pub mod output;

/// Utility functions and helpers
pub mod utils;


pub use cli::*;
pub use client::*;
pub use config::*;
pub use error::*;
pub use options::*;
pub use output::*;
pub use query::*;
pub use token::*;
pub use transport::*;
pub use types::*;
pub use utils::*;
