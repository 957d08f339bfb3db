//! Core types and configuration for the gridmix system.
//!
//! This crate provides shared types used across all other crates:
//! - Canonical telemetry types (fuel categories, production mixes, records)
//! - Configuration structures for the upstream providers
//! - Common error types
//! - Transport and clock collaborator seams

pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use config::{CammesaConfig, CepsConfig};
pub use error::{Error, Result};
pub use transport::{Clock, FixedClock, Response, SystemClock, Transport};
pub use types::*;
