use chrono::{Duration, NaiveDate};

use crate::diagnosis::domain::{
    Answer, BalanceYear, ChecklistBlock, CriterionKind, FormData,
};
use crate::diagnosis::tables::Region;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
}

pub(super) fn months_ago(months: i64) -> NaiveDate {
    today() - Duration::days(months * 31)
}

pub(super) fn healthy_balance() -> BalanceYear {
    BalanceYear {
        share_capital: 10_000.0,
        share_premium: 5_000.0,
        reserves: 20_000.0,
        ..BalanceYear::default()
    }
}

/// Madrid company that qualifies for the venture-debt program through a recent raise.
pub(super) fn venture_ready_form() -> FormData {
    FormData {
        region: Some(Region::Madrid),
        audited_accounts: Some(Answer::Yes),
        runway_override: Some(15.0),
        balance_minus_1: healthy_balance(),
        balance_minus_2: healthy_balance(),
        last_raise_date: Some(months_ago(3)),
        last_raise_amount: 150_000.0,
        revenue_history: Some(Answer::Yes),
        tax_lease: Some(Answer::No),
        ..FormData::default()
    }
}

/// Company with enough R&D spend for both the lender and the deduction program.
pub(super) fn research_heavy_form() -> FormData {
    FormData {
        region: Some(Region::Catalonia),
        balance_minus_1: healthy_balance(),
        balance_minus_2: healthy_balance(),
        rd_spend_n1: 600_000.0,
        rd_spend_n: 700_000.0,
        in_house_rd_n1: 300_000.0,
        in_house_rd_n: 320_000.0,
        deduction_rd_n2: 550_000.0,
        ip_held_domestically: Some(Answer::Yes),
        innovative_sme_seal: Some(Answer::Yes),
        ..FormData::default()
    }
}

pub(super) fn kind_of(block: &ChecklistBlock, code: &str) -> CriterionKind {
    block
        .criterion(&format!("{code} -"))
        .unwrap_or_else(|| panic!("criterion {code} present in {}", block.title))
        .kind
}
