//! postscan: a terminal client for a social media content analysis service.
//!
//! Files are validated locally, uploaded to the configured `/analyze` endpoint, and the answer is
//! shown as titled sections in result panels.
#![allow(clippy::multiple_crate_versions)]

pub mod analysis;
pub mod app_state;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod section;
pub mod telemetry;
pub mod ui;
pub mod validate;
