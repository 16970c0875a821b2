//! API Layer
//!
//! HTTP client for the LeetBro REST API.

pub mod client;

pub use client::*;
