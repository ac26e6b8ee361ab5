//! Typed client SDK for the Datura search API.
//!
//! One method per remote endpoint: AI search, web/Twitter link search,
//! filtered tweet search, plain web search, and tweet lookup by URL or id.
//! Request payloads omit unset optional fields, responses decode into the
//! typed structures in [`types`], and every failure surfaces as one of the
//! five [`DaturaError`] kinds. No retries happen internally.
//!
//! ```no_run
//! use datura_sdk::types::{AiSearchRequest, Model, Tool};
//! use datura_sdk::Datura;
//!
//! # async fn demo() -> datura_sdk::Result<()> {
//! let client = Datura::new("dt-your-key")?;
//! let result = client
//!     .ai_search(AiSearchRequest::new(
//!         "Whats going on with Bittensor",
//!         vec![Tool::Web, Tool::Twitter],
//!         Model::Nova,
//!     ))
//!     .await?;
//! # let _ = result;
//! # Ok(()) }
//! ```

pub mod client;
pub mod config;
pub mod types;

pub use client::{Datura, BASE_URL};
pub use config::ClientConfig;
pub use datura_common::{DaturaError, Result};
