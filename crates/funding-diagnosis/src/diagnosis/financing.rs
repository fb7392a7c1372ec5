use super::tables::{rating_row, CompanyProfile, Rating};
use serde::{Deserialize, Serialize};

/// Hard ceiling on any venture-debt loan regardless of rating.
pub const GLOBAL_CEILING: f64 = 1_500_000.0;

/// Rating, profile and optional capital override chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingRequest {
    pub rating: Rating,
    pub profile: CompanyProfile,
    /// Replaces the computable equity of year -1 plus last raise when set.
    pub capital: Option<f64>,
}

impl Default for FinancingRequest {
    fn default() -> Self {
        Self {
            rating: Rating::B1,
            profile: CompanyProfile::WithoutHistory,
            capital: None,
        }
    }
}

/// Per-tier contributions behind a financing figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancingBreakdown {
    pub rating: Rating,
    pub profile: CompanyProfile,
    pub capital: f64,
    pub tiers: [f64; 3],
    pub leveraged: f64,
    pub absolute_cap: f64,
    pub amount: u64,
}

/// Tiered-leverage calculation. Returns `None` when the rating has no row.
pub fn financing_breakdown(
    capital: f64,
    rating: Rating,
    profile: CompanyProfile,
) -> Option<FinancingBreakdown> {
    let row = rating_row(profile, rating)?;
    let (first_bound, second_bound) = profile.tier_bounds();
    let capital = capital.max(0.0);

    let tiers = [
        capital.min(first_bound) * row.leverage[0],
        (capital.min(second_bound) - first_bound).max(0.0) * row.leverage[1],
        (capital - second_bound).max(0.0) * row.leverage[2],
    ];
    let leveraged: f64 = tiers.iter().sum();
    let capped = GLOBAL_CEILING.min(row.absolute_cap).min(leveraged);

    Some(FinancingBreakdown {
        rating,
        profile,
        capital,
        tiers,
        leveraged,
        absolute_cap: row.absolute_cap,
        amount: capped.round() as u64,
    })
}

/// Maximum venture-debt amount for `capital`; eligibility is the caller's concern.
pub fn max_financing(capital: f64, rating: Rating, profile: CompanyProfile) -> u64 {
    financing_breakdown(capital, rating, profile)
        .map(|breakdown| breakdown.amount)
        .unwrap_or(0)
}

/// Same as [`max_financing`] for a raw rating code; unknown codes yield 0.
pub fn max_financing_for_code(capital: f64, rating_code: &str, profile: CompanyProfile) -> u64 {
    rating_code
        .parse::<Rating>()
        .map(|rating| max_financing(capital, rating, profile))
        .unwrap_or(0)
}
