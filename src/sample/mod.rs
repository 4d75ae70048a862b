//! In-memory sample data behind the Dashboard and AML/KYC pages.
//!
//! Nothing here reads from or writes to anywhere else in the crate: the
//! tables are rebuilt from literals (and, for the performance series, from
//! the supplied random source) every time a page is rendered.

pub mod compliance;
pub mod dashboard;

use rand::SeedableRng;
use rand::rngs::StdRng;

pub use compliance::{ComplianceOverview, KycApplication, RiskLevel};
pub use dashboard::{DashboardData, DashboardMetrics, Fund, Investor, PerformanceTable, generate};

/// Build the random source used for performance jitter.
///
/// With no seed the generator is seeded from OS entropy, so each process
/// (and each render) produces different series. A fixed seed makes the
/// sequence of renders reproducible.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
