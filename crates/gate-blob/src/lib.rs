//! # gate-blob
//!
//! Fetches the single gated file from blob storage (e.g., Vercel Blob).
//!
//! ```rust,ignore
//! use gate_blob::{BlobConfig, BlobFileSource};
//! use gate_core::FileSource;
//!
//! let source = BlobFileSource::new(BlobConfig::from_env()?)?;
//! let artifact = source.fetch().await?;
//! ```

pub mod config;
pub mod source;

pub use config::BlobConfig;
pub use source::BlobFileSource;
