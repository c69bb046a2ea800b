//! Configuration for the scrape service
//!
//! `ScrapeConfig` holds every tunable of a running server. Values come from
//! defaults, then the process environment ([`env`]), then `with_*` setters in
//! tests.

pub mod env;
pub mod getters;
pub mod types;

pub use types::ScrapeConfig;
