//! Client for the repository valuation service.
//!
//! Turns free-form repository input into a normalized [`AnalysisResult`]:
//!
//! 1. [`RepositoryReference::parse`] accepts `owner/repo` or a GitHub URL;
//! 2. [`Protocol::select`] picks the calling convention;
//! 3. the chosen protocol fetches the raw payload over HTTP;
//! 4. [`valuation_normalizer::normalize`] maps it to the canonical shape.
//!
//! ```no_run
//! # async fn run() -> Result<(), valuation_client::ValuationError> {
//! use valuation_client::{ValuationConfig, analyze};
//!
//! let result = analyze(ValuationConfig::default(), "facebook/react", true).await?;
//! println!("{} ({})", result.score, result.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
mod errors;
pub mod health;
pub mod protocols;
pub mod repo_ref;
pub mod telemetry;

pub use client::{ValuationClient, analyze};
pub use config::ValuationConfig;
pub use errors::{ConfigError, ProbeFailure, ValuationError, ValuationResult};
pub use health::RemoteHealth;
pub use protocols::Protocol;
pub use repo_ref::RepositoryReference;
pub use valuation_normalizer::AnalysisResult;
