//! External collaborator adapters
//!
//! The pipeline consumes the translation and sentiment-scoring capabilities
//! through the narrow trait interfaces defined here. Production
//! implementations live alongside the traits; tests substitute in-process
//! fakes.

pub mod scorer;
pub mod translator;
