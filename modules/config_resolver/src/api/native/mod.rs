//! Native (in-process) access to resolved settings

pub mod client;

pub use client::AppConfig;
