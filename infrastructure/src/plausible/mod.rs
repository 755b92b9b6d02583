//! Analytics API adapter

mod client;

pub use client::PlausibleClient;
