//! Optional external advisory oracle integration.

mod http_oracle;
mod null_oracle;
mod service;

pub use http_oracle::HttpOracle;
pub use null_oracle::NullOracle;
pub use service::{AdvisoryAssessment, AdvisoryOracle};

#[cfg(test)]
pub use service::MockAdvisoryOracle;
