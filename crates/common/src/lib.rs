//! Common utilities shared by destination crates.
//!
//! - **Configuration**: layered file + environment settings and partner credentials (`config`).
//! - **Telemetry**: tracing subscriber setup (`telemetry`).
//! - **Scrubbing**: PII redaction for messages surfaced to operators (`scrubber`).
pub mod config;
pub mod scrubber;
pub mod telemetry;
