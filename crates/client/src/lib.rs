//! Client code for pagenav.
//!
//! This crate provides the fragment fetch protocol, same-origin URL
//! resolution, and fragment parsing shared by the navigator and CLI.

pub mod extract;
pub mod fetch;

pub use extract::{Link, extract_dynamic_links, is_index_content, parse_fragment};

pub use fetch::{FetchClient, FetchConfig, FetchResponse, PageFetcher, StatusCode, UrlError, resolve_path};
