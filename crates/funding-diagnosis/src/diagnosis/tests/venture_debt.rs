use super::common::*;
use crate::diagnosis::domain::{Answer, CriterionKind, STATUS_UNSET};
use crate::diagnosis::programs::evaluate_venture_debt;
use crate::diagnosis::tables::Region;
use chrono::Duration;

#[test]
fn madrid_company_with_recent_raise_is_eligible() {
    let block = evaluate_venture_debt(&venture_ready_form(), today());

    assert_eq!(block.criteria.len(), 10);
    assert!(block
        .criteria
        .iter()
        .all(|criterion| criterion.kind == CriterionKind::Ok));
    let conclusion = block.conclusion.as_ref().expect("conclusion present");
    assert_eq!(conclusion.kind, CriterionKind::Ok);
    assert_eq!(conclusion.status, "YES");
}

#[test]
fn galicia_runway_below_threshold_fails() {
    let form = crate::diagnosis::domain::FormData {
        region: Some(Region::Galicia),
        runway_override: Some(4.0),
        ..venture_ready_form()
    };

    let block = evaluate_venture_debt(&form, today());

    assert_eq!(kind_of(&block, "E3"), CriterionKind::Fail);
    assert!(!block.is_eligible());
}

#[test]
fn runway_must_strictly_exceed_threshold() {
    let mut form = venture_ready_form();
    form.runway_override = Some(12.0);
    assert_eq!(
        kind_of(&evaluate_venture_debt(&form, today()), "E3"),
        CriterionKind::Fail
    );

    form.runway_override = Some(12.01);
    assert_eq!(
        kind_of(&evaluate_venture_debt(&form, today()), "E3"),
        CriterionKind::Ok
    );
}

#[test]
fn audit_answer_is_informational_only() {
    let mut form = venture_ready_form();
    form.audited_accounts = None;
    let block = evaluate_venture_debt(&form, today());
    let audit = block.criterion("E2 -").expect("audit line");
    assert_eq!(audit.kind, CriterionKind::Info);
    assert_eq!(audit.status, STATUS_UNSET);
    assert!(block.is_eligible());

    form.audited_accounts = Some(Answer::No);
    let block = evaluate_venture_debt(&form, today());
    assert_eq!(kind_of(&block, "E2"), CriterionKind::Fail);
    assert!(block.is_eligible());
}

#[test]
fn raise_path_and_note_path_both_qualify() {
    let mut raise_path = venture_ready_form();
    raise_path.convertible_notes = 50_000.0;
    raise_path.note_conversion_date = Some(today() + Duration::days(270));

    let mut note_path = raise_path.clone();
    note_path.last_raise_date = Some(months_ago(10));
    note_path.note_conversion_date = Some(today() + Duration::days(61));

    let via_raise = evaluate_venture_debt(&raise_path, today());
    let via_notes = evaluate_venture_debt(&note_path, today());

    assert_eq!(kind_of(&via_raise, "E7"), CriterionKind::Fail);
    assert_eq!(kind_of(&via_raise, "E5"), CriterionKind::Ok);
    assert_eq!(kind_of(&via_notes, "E5"), CriterionKind::Fail);
    assert_eq!(kind_of(&via_notes, "E7"), CriterionKind::Ok);
    assert_eq!(via_raise.conclusion, via_notes.conclusion);
    assert!(via_raise.is_eligible());
}

#[test]
fn neither_funding_path_fails_the_conclusion() {
    let mut form = venture_ready_form();
    form.last_raise_date = Some(months_ago(10));
    form.convertible_notes = 50_000.0;
    form.note_conversion_date = Some(today() + Duration::days(270));

    assert!(!evaluate_venture_debt(&form, today()).is_eligible());
}

#[test]
fn no_notes_satisfies_the_note_path_by_default() {
    let mut form = venture_ready_form();
    form.last_raise_date = None;
    form.last_raise_amount = 0.0;

    let block = evaluate_venture_debt(&form, today());

    assert_eq!(kind_of(&block, "E5"), CriterionKind::Fail);
    assert_eq!(kind_of(&block, "E6"), CriterionKind::Fail);
    assert_eq!(kind_of(&block, "E7"), CriterionKind::Ok);
    assert!(block.is_eligible());
}

#[test]
fn undated_notes_satisfy_the_note_path() {
    let mut form = venture_ready_form();
    form.last_raise_date = Some(months_ago(10));
    form.convertible_notes = 50_000.0;
    form.note_conversion_date = None;

    let block = evaluate_venture_debt(&form, today());

    assert_eq!(kind_of(&block, "E5"), CriterionKind::Fail);
    assert_eq!(kind_of(&block, "E7"), CriterionKind::Ok);
    assert_eq!(kind_of(&block, "E8"), CriterionKind::Ok);
    assert!(block.is_eligible());
}

#[test]
fn note_conversion_today_is_outside_the_window() {
    let mut form = venture_ready_form();
    form.convertible_notes = 20_000.0;
    form.note_conversion_date = Some(today());

    assert_eq!(
        kind_of(&evaluate_venture_debt(&form, today()), "E7"),
        CriterionKind::Fail
    );
}

#[test]
fn oversized_notes_fail_e8() {
    let mut form = venture_ready_form();
    form.convertible_notes = 100_000.0;
    assert_eq!(
        kind_of(&evaluate_venture_debt(&form, today()), "E8"),
        CriterionKind::Ok
    );

    form.convertible_notes = 100_000.01;
    assert_eq!(
        kind_of(&evaluate_venture_debt(&form, today()), "E8"),
        CriterionKind::Fail
    );
}

#[test]
fn missing_region_fails_every_threshold_rule() {
    let mut form = venture_ready_form();
    form.region = None;

    let block = evaluate_venture_debt(&form, today());

    for code in ["E1", "E3", "E5", "E6"] {
        assert_eq!(kind_of(&block, code), CriterionKind::Fail, "{code}");
    }
    assert!(!block.is_eligible());
}

#[test]
fn catch_all_region_fails_domicile_only() {
    let mut form = venture_ready_form();
    form.region = Some(Region::Other);

    let block = evaluate_venture_debt(&form, today());

    assert_eq!(kind_of(&block, "E1"), CriterionKind::Fail);
    assert_eq!(kind_of(&block, "E3"), CriterionKind::Ok);
    assert!(!block.is_eligible());
}

#[test]
fn company_in_crisis_fails_positive_equity() {
    let mut form = venture_ready_form();
    form.balance_minus_1.reserves = 0.0;
    form.balance_minus_1.prior_results = -9_000.0;

    let block = evaluate_venture_debt(&form, today());

    assert_eq!(kind_of(&block, "E4"), CriterionKind::Fail);
    assert!(!block.is_eligible());
}

#[test]
fn revenue_and_tax_lease_must_be_answered() {
    let mut form = venture_ready_form();
    form.revenue_history = None;
    form.tax_lease = None;

    let block = evaluate_venture_debt(&form, today());

    assert_eq!(kind_of(&block, "E9"), CriterionKind::Fail);
    assert_eq!(kind_of(&block, "E10"), CriterionKind::Fail);

    form.revenue_history = Some(Answer::Yes);
    form.tax_lease = Some(Answer::Yes);
    assert_eq!(
        kind_of(&evaluate_venture_debt(&form, today()), "E10"),
        CriterionKind::Fail
    );
}
