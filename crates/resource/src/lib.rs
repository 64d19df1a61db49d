//! Font sources for the casedoc renderers.
//!
//! This crate provides platform-specific implementations of the
//! `FontSource` trait from casedoc-traits.
//!
//! ## Available Sources
//!
//! - [`FilesystemFontSource`]: Loads fonts from a static asset directory
//! - [`HttpFontSource`]: Fetches fonts from a static asset URL (feature `http`)
//!
//! ## Re-exports
//!
//! For convenience, we also re-export the in-memory source from casedoc-traits:
//! - [`InMemoryFontSource`]: Pre-populated in-memory storage

mod filesystem;
#[cfg(feature = "http")]
mod http;

pub use filesystem::FilesystemFontSource;
#[cfg(feature = "http")]
pub use http::HttpFontSource;

pub use casedoc_traits::InMemoryFontSource;
