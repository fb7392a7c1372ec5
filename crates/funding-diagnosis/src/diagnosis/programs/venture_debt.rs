use super::super::aggregates::{months_since, FinancialAggregates};
use super::super::domain::{
    Answer, ChecklistBlock, CriterionKind, CriterionResult, FormData, Program, STATUS_NOT_MET,
    STATUS_UNSET,
};
use chrono::NaiveDate;

const MAX_CONVERTIBLE_NOTES: f64 = 100_000.0;
const NOTE_CONVERSION_WINDOW_MONTHS: f64 = 6.0;

const DOMICILE: &str = "E1 - Tax domicile";
const AUDIT: &str = "E2 - Audited accounts";
const RUNWAY: &str = "E3 - Minimum runway";
const POSITIVE_EQUITY: &str = "E4 - Positive equity";
const RAISE_DATE: &str = "E5 - Last capital raise date";
const RAISE_AMOUNT: &str = "E6 - Capital raise amount";
const NOTE_CONVERSION: &str = "E7 - Note conversion date";
const NOTE_AMOUNT: &str = "E8 - Convertible note amount";
const REVENUE: &str = "E9 - Six months of accrued revenue";
const TAX_LEASE: &str = "E10 - Tax lease";
const CONCLUSION: &str = "ENISA conclusion";

pub(crate) fn checklist(
    data: &FormData,
    aggregates: &FinancialAggregates,
    today: NaiveDate,
) -> ChecklistBlock {
    let thresholds = data.region.map(|region| region.thresholds());

    let domicile = CriterionResult::check(
        DOMICILE,
        data.region
            .is_some_and(|region| region.is_eligible_domicile()),
    );

    let audit = match data.audited_accounts {
        Some(Answer::Yes) => CriterionResult::new(AUDIT, Answer::Yes.label(), CriterionKind::Ok),
        Some(Answer::No) => CriterionResult::new(AUDIT, Answer::No.label(), CriterionKind::Fail),
        None => CriterionResult::info(AUDIT, STATUS_UNSET),
    };

    let runway = CriterionResult::check(
        RUNWAY,
        thresholds.is_some_and(|limits| aggregates.runway_months > limits.min_runway_months),
    );

    let positive_equity = CriterionResult::check(
        POSITIVE_EQUITY,
        aggregates.net_equity_minus_1 > 0.0 && aggregates.directive_minus_1.is_solvent(),
    );

    let raise_age = months_since(data.last_raise_date, today);
    let raise_date = CriterionResult::check(
        RAISE_DATE,
        thresholds.is_some_and(|limits| raise_age < limits.max_raise_age_months),
    );

    let raise_amount = CriterionResult::check(
        RAISE_AMOUNT,
        thresholds.is_some_and(|limits| data.last_raise_amount >= limits.min_raise_amount),
    );

    let note_conversion = CriterionResult::check(NOTE_CONVERSION, note_conversion_ok(data, today));

    let note_amount =
        CriterionResult::check(NOTE_AMOUNT, data.convertible_notes <= MAX_CONVERTIBLE_NOTES);

    let revenue = CriterionResult::check(REVENUE, data.revenue_history == Some(Answer::Yes));
    let tax_lease = CriterionResult::check(TAX_LEASE, data.tax_lease == Some(Answer::No));

    // Either funding event satisfies the structural-funding requirement.
    let via_raise = raise_date.is_ok() && raise_amount.is_ok();
    let via_notes = note_conversion.is_ok() && note_amount.is_ok();

    let eligible = domicile.is_ok()
        && runway.is_ok()
        && positive_equity.is_ok()
        && (via_raise || via_notes)
        && revenue.is_ok()
        && tax_lease.is_ok();

    let conclusion = if eligible {
        CriterionResult::new(CONCLUSION, "YES", CriterionKind::Ok)
    } else {
        CriterionResult::new(CONCLUSION, STATUS_NOT_MET, CriterionKind::Fail)
    };

    ChecklistBlock::new(
        Program::VentureDebt,
        vec![
            domicile,
            audit,
            runway,
            positive_equity,
            raise_date,
            raise_amount,
            note_conversion,
            note_amount,
            revenue,
            tax_lease,
        ],
        Some(conclusion),
    )
}

fn note_conversion_ok(data: &FormData, today: NaiveDate) -> bool {
    if data.convertible_notes == 0.0 || data.note_conversion_date.is_none() {
        return true;
    }

    let months = months_since(data.note_conversion_date, today);
    months > 0.0 && months < NOTE_CONVERSION_WINDOW_MONTHS
}
