//! Priority-fee bundle assembly.
//!
//! Computes the tip from a congestion signal, assembles signed
//! transaction payloads plus the tip transaction into a bundle, and
//! provides the submission seam to the block-builder fast lane.

pub mod bundle;
pub mod error;
pub mod sender;
pub mod tip;

pub use bundle::{build_bundle, Bundle, SOFT_BUNDLE_LIMIT};
pub use error::{JitoError, JitoResult};
pub use sender::{parse_submit_response, BundleSender, MockBundleSender};
pub use tip::{calculate_tip, Congestion};
