//! Cost allocation between patient and insurer
//!
//! The allocation applies, in order:
//! 1. **Deductible**: bounded by both the remaining deductible and the bill itself
//! 2. **Coinsurance**: percentage of the cost left after the deductible
//! 3. **Copay**: fixed fee added on top
//! 4. **OOP max**: caps total patient liability, the excess shifts to the insurer
//!
//! Allocation is a pure function of its inputs. Nothing is validated here; see
//! [`crate::validation`] for the optional checks.

mod allocator;
mod rounding;

pub use allocator::{compute, AllocationBreakdown, CostAllocator, CostShare};
pub use rounding::RoundingMode;
