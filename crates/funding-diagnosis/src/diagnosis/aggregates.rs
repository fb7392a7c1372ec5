use super::domain::{BalanceYear, FormData};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Elapsed months reported for a missing date, so date-gated rules are never satisfied.
pub const UNKNOWN_ELAPSED_MONTHS: f64 = f64::INFINITY;

const DAYS_PER_MONTH: f64 = 30.5;

// Strictly above one half: a ratio of exactly 0.5 is still a crisis.
const LENDER_SOLVENCY_RATIO: f64 = 0.5001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solvency {
    Solvent,
    InCrisis,
}

impl Solvency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Solvent => "Solvent",
            Self::InCrisis => "In crisis",
        }
    }

    pub const fn is_solvent(self) -> bool {
        matches!(self, Self::Solvent)
    }
}

pub fn net_equity(balance: &BalanceYear) -> f64 {
    balance.share_capital
        + balance.share_premium
        + balance.reserves
        + balance.treasury_shares
        + balance.prior_results
        + balance.other_contributions
        + balance.other_equity_instruments
        - balance.interim_dividend
        + balance.current_result
}

/// Months of cash left at the current burn, unless the caller supplied a positive override.
pub fn runway(data: &FormData) -> f64 {
    if let Some(months) = data.runway_override.filter(|months| *months > 0.0) {
        return months;
    }
    if data.monthly_burn <= 0.0 {
        return 0.0;
    }
    round_to_cents(data.cash / data.monthly_burn)
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Half-capital test used by the venture-debt program.
///
/// The interim dividend is counted as a loss contributor alongside the other
/// equity components.
pub fn crisis_directive(balance: &BalanceYear) -> Solvency {
    let half_capital = balance.paid_in_capital() / 2.0;
    let accumulated_losses = -(balance.reserves
        + balance.treasury_shares
        + balance.prior_results
        + balance.other_contributions
        + balance.current_result
        + balance.interim_dividend
        + balance.other_equity_instruments);

    if half_capital < accumulated_losses {
        Solvency::InCrisis
    } else {
        Solvency::Solvent
    }
}

/// Equity-to-capital ratio test used by the innovation lender.
pub fn crisis_lender(balance: &BalanceYear) -> Solvency {
    let paid_in = balance.paid_in_capital();
    if paid_in == 0.0 {
        return Solvency::InCrisis;
    }

    let ratio = net_equity(balance) / paid_in;
    if ratio < LENDER_SOLVENCY_RATIO {
        Solvency::InCrisis
    } else {
        Solvency::Solvent
    }
}

/// Absolute distance in 30.5-day months between `date` and `today`.
pub fn months_since(date: Option<NaiveDate>, today: NaiveDate) -> f64 {
    match date {
        Some(date) => (today - date).num_days().abs() as f64 / DAYS_PER_MONTH,
        None => UNKNOWN_ELAPSED_MONTHS,
    }
}

/// Default capital figure for the financing calculator: year -1 equity plus the last raise.
pub fn computable_equity(data: &FormData) -> f64 {
    net_equity(&data.balance_minus_1) + data.last_raise_amount
}

/// Derived scalars computed once per diagnosis and shared by the evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialAggregates {
    pub net_equity_minus_1: f64,
    pub net_equity_minus_2: f64,
    pub runway_months: f64,
    pub directive_minus_1: Solvency,
    pub lender_minus_1: Solvency,
    pub lender_minus_2: Solvency,
    pub computable_equity: f64,
}

impl FinancialAggregates {
    pub fn from_form(data: &FormData) -> Self {
        Self {
            net_equity_minus_1: net_equity(&data.balance_minus_1),
            net_equity_minus_2: net_equity(&data.balance_minus_2),
            runway_months: runway(data),
            directive_minus_1: crisis_directive(&data.balance_minus_1),
            lender_minus_1: crisis_lender(&data.balance_minus_1),
            lender_minus_2: crisis_lender(&data.balance_minus_2),
            computable_equity: computable_equity(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::domain::BalanceField;
    use proptest::prelude::*;

    fn balance(share_capital: f64, share_premium: f64, reserves: f64) -> BalanceYear {
        BalanceYear {
            share_capital,
            share_premium,
            reserves,
            ..BalanceYear::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn net_equity_subtracts_only_the_dividend() {
        let b = BalanceYear {
            share_capital: 10.0,
            share_premium: 20.0,
            reserves: 30.0,
            treasury_shares: -5.0,
            prior_results: -15.0,
            other_contributions: 1.0,
            current_result: 4.0,
            interim_dividend: 3.0,
            other_equity_instruments: 2.0,
        };
        assert_eq!(net_equity(&b), 44.0);
    }

    #[test]
    fn runway_prefers_positive_override_without_rounding() {
        let data = FormData {
            cash: 100.0,
            monthly_burn: 10.0,
            runway_override: Some(7.125),
            ..FormData::default()
        };
        assert_eq!(runway(&data), 7.125);

        let ignored = FormData {
            runway_override: Some(0.0),
            ..data.clone()
        };
        assert_eq!(runway(&ignored), 10.0);
    }

    #[test]
    fn runway_guards_zero_burn_and_rounds_to_cents() {
        let idle = FormData {
            cash: 50_000.0,
            monthly_burn: 0.0,
            ..FormData::default()
        };
        assert_eq!(runway(&idle), 0.0);

        let burning = FormData {
            cash: 100_000.0,
            monthly_burn: 30_000.0,
            ..FormData::default()
        };
        assert_eq!(runway(&burning), 3.33);
    }

    #[test]
    fn directive_adds_dividend_into_loss_sum() {
        let mut b = balance(100.0, 0.0, -60.0);
        assert_eq!(crisis_directive(&b), Solvency::InCrisis);

        // losses become -(-60 + 20) = 40 against a half capital of 50
        b.interim_dividend = 20.0;
        assert_eq!(crisis_directive(&b), Solvency::Solvent);
    }

    #[test]
    fn directive_boundary_is_solvent() {
        let b = balance(100.0, 0.0, -50.0);
        assert_eq!(crisis_directive(&b), Solvency::Solvent);
    }

    #[test]
    fn lender_treats_exact_half_as_crisis() {
        let b = balance(100.0, 0.0, -50.0);
        assert_eq!(net_equity(&b) / b.paid_in_capital(), 0.5);
        assert_eq!(crisis_lender(&b), Solvency::InCrisis);

        let above = balance(100.0, 0.0, -49.0);
        assert_eq!(crisis_lender(&above), Solvency::Solvent);
    }

    #[test]
    fn lender_without_paid_in_capital_is_in_crisis() {
        let b = balance(0.0, 0.0, 1_000_000.0);
        assert_eq!(crisis_lender(&b), Solvency::InCrisis);
    }

    #[test]
    fn months_since_is_absolute_and_missing_dates_are_infinite() {
        let today = date(2026, 10, 19);
        assert_eq!(months_since(None, today), UNKNOWN_ELAPSED_MONTHS);
        assert_eq!(months_since(Some(today), today), 0.0);

        let past = months_since(Some(date(2026, 7, 19)), today);
        let future = months_since(Some(date(2027, 1, 19)), today);
        assert!((past - 92.0 / 30.5).abs() < 1e-9);
        assert!((future - 92.0 / 30.5).abs() < 1e-9);
    }

    #[test]
    fn computable_equity_adds_last_raise() {
        let data = FormData {
            balance_minus_1: balance(10_000.0, 5_000.0, 20_000.0),
            last_raise_amount: 150_000.0,
            ..FormData::default()
        };
        assert_eq!(computable_equity(&data), 185_000.0);
    }

    proptest! {
        #[test]
        fn net_equity_is_order_independent(
            values in prop::collection::vec(-1.0e7f64..1.0e7, 9),
            rotation in 0usize..9,
        ) {
            let mut b = BalanceYear::default();
            for (field, value) in BalanceField::ordered().into_iter().zip(&values) {
                b.set(field, *value);
            }

            let mut terms = vec![
                b.share_capital,
                b.share_premium,
                b.reserves,
                b.treasury_shares,
                b.prior_results,
                b.other_contributions,
                b.current_result,
                -b.interim_dividend,
                b.other_equity_instruments,
            ];
            terms.rotate_left(rotation);
            let permuted: f64 = terms.iter().rev().sum();

            prop_assert!((net_equity(&b) - permuted).abs() < 1e-6);
        }

        #[test]
        fn runway_is_zero_for_non_positive_burn(cash in 0.0f64..1.0e9, burn in -1.0e6f64..=0.0) {
            let data = FormData { cash, monthly_burn: burn, ..FormData::default() };
            prop_assert_eq!(runway(&data), 0.0);
        }

        #[test]
        fn runway_rounds_ratio_to_two_decimals(cash in 0.0f64..1.0e9, burn in 1.0f64..1.0e6) {
            let data = FormData { cash, monthly_burn: burn, ..FormData::default() };
            let expected = ((cash / burn) * 100.0).round() / 100.0;
            prop_assert_eq!(runway(&data), expected);
        }
    }
}
