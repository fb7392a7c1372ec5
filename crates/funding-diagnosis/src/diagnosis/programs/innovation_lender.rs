use super::super::aggregates::FinancialAggregates;
use super::super::domain::{
    ChecklistBlock, CriterionKind, CriterionResult, FormData, Program, STATUS_NOT_MET, STATUS_OK,
};

const DOMICILE: &str = "C1 - Tax domicile";
const NOT_IN_CRISIS: &str = "C2 - Company not in crisis";
const TWO_YEAR_HISTORY: &str = "C3 - Two years of history";
const IN_HOUSE_RD: &str = "C4 - In-house R&D spend";
const CONCLUSION: &str = "CDTI conclusion";

pub(crate) fn checklist(data: &FormData, aggregates: &FinancialAggregates) -> ChecklistBlock {
    let thresholds = data.region.map(|region| region.thresholds());

    let domicile = CriterionResult::check(
        DOMICILE,
        data.region
            .is_some_and(|region| region.is_eligible_domicile()),
    );

    let not_in_crisis = CriterionResult::check(
        NOT_IN_CRISIS,
        aggregates.lender_minus_1.is_solvent() && aggregates.lender_minus_2.is_solvent(),
    );

    // Same outcome as C2, rendered as its own line.
    let two_year_history = CriterionResult {
        label: TWO_YEAR_HISTORY.to_string(),
        ..not_in_crisis.clone()
    };

    let in_house_rd = CriterionResult::check(
        IN_HOUSE_RD,
        thresholds.is_some_and(|limits| data.in_house_rd_n1 > limits.min_in_house_rd_lender),
    );

    let eligible = domicile.is_ok()
        && not_in_crisis.is_ok()
        && two_year_history.is_ok()
        && in_house_rd.is_ok();

    let conclusion = if eligible {
        CriterionResult::new(CONCLUSION, STATUS_OK, CriterionKind::Ok)
    } else {
        CriterionResult::new(CONCLUSION, STATUS_NOT_MET, CriterionKind::Fail)
    };

    ChecklistBlock::new(
        Program::InnovationLender,
        vec![domicile, not_in_crisis, two_year_history, in_house_rd],
        Some(conclusion),
    )
}
