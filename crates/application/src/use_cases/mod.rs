//! Application use cases (normalization orchestration).

mod normalize_profile;
mod report;

pub use normalize_profile::*;
pub use report::*;
