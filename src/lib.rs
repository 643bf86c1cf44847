//! Spotlight News - a web client for a pre-aggregated news feed
//!
//! This crate serves a single page built from a JSON feed fetched from an
//! upstream aggregation backend: trending topics, categorized news cards,
//! and loading/error states.

pub mod client;
pub mod config;
pub mod feed;
pub mod routes;
