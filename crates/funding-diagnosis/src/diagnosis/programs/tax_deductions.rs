use super::super::domain::{
    Answer, ChecklistBlock, CriterionKind, CriterionResult, FormData, Program, STATUS_NOT_MET,
    STATUS_OK, STATUS_UNSET,
};
use super::super::tables::DEFAULT_THRESHOLDS;
use serde::Serialize;

const DOMICILE: &str = "DF1 - Tax domicile";
const DOMESTIC_IP: &str = "DF2 - IP held in Spain";
const SPEND_N: &str = "DF3 - R&D spend (N)";
const SPEND_N1: &str = "DF4 - R&D spend (N-1)";
const SPEND_N2: &str = "DF5 - R&D spend (N-2)";
const SME_SEAL: &str = "DF6 - Innovative SME seal";
const CONCLUSION: &str = "Deductions conclusion";
const NEEDS_SEAL: &str = "Needs it";

/// Net deductible R&D spend per fiscal year, with overrides already applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedDeductionSpend {
    pub year_n: f64,
    pub year_n1: f64,
    pub year_n2: f64,
}

impl ResolvedDeductionSpend {
    pub fn from_form(data: &FormData) -> Self {
        let gross_n = data.deduction_rd_n.unwrap_or(data.rd_spend_n);
        let gross_n1 = data.deduction_rd_n1.unwrap_or(data.rd_spend_n1);

        Self {
            year_n: gross_n - data.subsidized_n,
            year_n1: gross_n1 - data.subsidized_n1,
            year_n2: data.deduction_rd_n2 - data.subsidized_n2,
        }
    }
}

pub(crate) fn checklist(data: &FormData, spend: &ResolvedDeductionSpend) -> ChecklistBlock {
    let minimum = data
        .region
        .map(|region| region.thresholds())
        .unwrap_or(DEFAULT_THRESHOLDS)
        .min_rd_deductions;

    let domicile = CriterionResult::check(
        DOMICILE,
        data.region
            .is_some_and(|region| region.is_eligible_domicile()),
    );
    let domestic_ip =
        CriterionResult::check(DOMESTIC_IP, data.ip_held_domestically == Some(Answer::Yes));
    let spend_n = CriterionResult::check(SPEND_N, spend.year_n >= minimum);
    let spend_n1 = CriterionResult::check(SPEND_N1, spend.year_n1 >= minimum);
    let spend_n2 = CriterionResult::check(SPEND_N2, spend.year_n2 >= minimum);

    let seal = if data.innovative_sme_seal == Some(Answer::Yes) {
        CriterionResult::ok(SME_SEAL)
    } else if data.social_security_rebate == Some(Answer::Yes) {
        CriterionResult::warning(SME_SEAL, NEEDS_SEAL)
    } else if !spend_n.is_ok() {
        CriterionResult::fail(SME_SEAL)
    } else {
        CriterionResult::info(SME_SEAL, STATUS_UNSET)
    };

    // A pending seal is a to-do, not a blocker.
    let seal_satisfied = matches!(seal.kind, CriterionKind::Ok | CriterionKind::Warning);

    let eligible = domicile.is_ok()
        && domestic_ip.is_ok()
        && spend_n.is_ok()
        && spend_n1.is_ok()
        && spend_n2.is_ok()
        && seal_satisfied;

    let conclusion = if eligible {
        CriterionResult::new(CONCLUSION, STATUS_OK, CriterionKind::Ok)
    } else {
        CriterionResult::new(CONCLUSION, STATUS_NOT_MET, CriterionKind::Fail)
    };

    ChecklistBlock::new(
        Program::TaxDeductions,
        vec![domicile, domestic_ip, spend_n, spend_n1, spend_n2, seal],
        Some(conclusion),
    )
}
