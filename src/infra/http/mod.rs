//! HTTP adapters for the external Post Fetch API.

mod client;

pub use client::PostsClient;
