//! Core types and shared functionality for pagenav.
//!
//! This crate provides:
//! - The in-memory page cache
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{PageCache, PageEntry};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
