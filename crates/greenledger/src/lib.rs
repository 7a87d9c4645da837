//! Carbon accounting and sustainability scoring engine.
//!
//! The `scoring` module holds the pure computation pipeline (line-item
//! classification, carbon impact, ESG sub-scores, green score composition)
//! plus the service facade and HTTP router that deliver it. The `invoice`
//! module turns raw scan payloads into line items, falling back to a
//! documented sample document when extraction is unavailable.

pub mod config;
pub mod error;
pub mod invoice;
pub mod scoring;
pub mod telemetry;
