//! Claim metadata and claim batch loading

mod data;
pub mod loader;

pub use data::{Claim, ClaimOutcome, ClaimResult};
pub use loader::{load_claims, load_claims_from_reader};
