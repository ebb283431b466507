//! Outgoing HTTP.

pub mod client;

pub use client::ReqwestHttpClient;
