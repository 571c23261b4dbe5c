//! Gateway transport over HTTP.

pub mod client;

pub use client::{KeyInfo, OpenRouterClient};
