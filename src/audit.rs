use rand::Rng;
use serde::{Deserialize, Serialize};

/// Simulated audit outcome. There is no crawler behind this: the numbers are
/// fabricated to stand in for a real audit engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeoAuditResult {
    pub score: u32,
    pub broken_links: u32,
    pub missing_alts: u32,
    pub slow_pages: u32,
}

pub fn simulate_audit() -> SeoAuditResult {
    let mut rng = rand::rng();
    SeoAuditResult {
        score: rng.random_range(50..100),
        broken_links: rng.random_range(0..10),
        missing_alts: rng.random_range(0..30),
        slow_pages: rng.random_range(0..5),
    }
}
