use super::aggregates::FinancialAggregates;
use super::domain::{ChecklistBlock, FormData};
use super::financing::{financing_breakdown, FinancingBreakdown, FinancingRequest};
use super::programs::{
    innovation_lender_checklist, national_grants_checklist, regional_checklist,
    tax_deductions_checklist, venture_debt_checklist, ResolvedDeductionSpend,
};
use super::tables::{CompanyProfile, Rating};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

pub const DISCLAIMER: &str = "This diagnosis is provided for general information only. \
The calculations are made in good faith but carry no representation or warranty of any kind \
as to their accuracy, validity or completeness, and they are not financial advice. Consult the \
appropriate professionals before acting on them; any reliance on this output is at your own risk.";

/// Financing figure shown next to the venture-debt checklist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancingOutcome {
    pub rating: Rating,
    pub profile: CompanyProfile,
    pub capital: f64,
    pub capital_overridden: bool,
    /// Zero whenever the venture-debt conclusion is not ok.
    pub amount: u64,
    pub forced_to_zero: bool,
    pub breakdown: Option<FinancingBreakdown>,
}

/// All program checklists and the financing figure for one questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisReport {
    pub evaluated_on: NaiveDate,
    pub aggregates: FinancialAggregates,
    pub deduction_spend: ResolvedDeductionSpend,
    pub venture_debt: ChecklistBlock,
    pub innovation_lender: ChecklistBlock,
    pub regional_funds: ChecklistBlock,
    pub national_grants: ChecklistBlock,
    pub tax_deductions: ChecklistBlock,
    pub financing: FinancingOutcome,
    pub disclaimer: &'static str,
}

impl DiagnosisReport {
    /// Checklists in display order.
    pub fn checklists(&self) -> [&ChecklistBlock; 5] {
        [
            &self.venture_debt,
            &self.innovation_lender,
            &self.regional_funds,
            &self.national_grants,
            &self.tax_deductions,
        ]
    }

    pub fn eligible_programs(&self) -> Vec<&str> {
        self.checklists()
            .into_iter()
            .filter(|block| block.is_eligible())
            .map(|block| block.title.as_str())
            .collect()
    }
}

/// Stateless entry point running every evaluator over one snapshot.
pub struct Diagnosis;

impl Diagnosis {
    pub fn run(data: &FormData, request: &FinancingRequest, today: NaiveDate) -> DiagnosisReport {
        let aggregates = FinancialAggregates::from_form(data);
        let deduction_spend = ResolvedDeductionSpend::from_form(data);

        let venture_debt = venture_debt_checklist(data, &aggregates, today);
        let innovation_lender = innovation_lender_checklist(data, &aggregates);
        let regional_funds = regional_checklist(&venture_debt);
        let national_grants = national_grants_checklist(data);
        let tax_deductions = tax_deductions_checklist(data, &deduction_spend);

        for block in [
            &venture_debt,
            &innovation_lender,
            &regional_funds,
            &tax_deductions,
        ] {
            debug!(
                program = block.title.as_str(),
                eligible = block.is_eligible(),
                failed = block
                    .criteria
                    .iter()
                    .filter(|criterion| !criterion.is_ok())
                    .count(),
                "program evaluated"
            );
        }

        let financing = financing_outcome(&aggregates, request, venture_debt.is_eligible());

        let report = DiagnosisReport {
            evaluated_on: today,
            aggregates,
            deduction_spend,
            venture_debt,
            innovation_lender,
            regional_funds,
            national_grants,
            tax_deductions,
            financing,
            disclaimer: DISCLAIMER,
        };

        info!(
            region = data.region.map(|region| region.label()).unwrap_or("unset"),
            eligible = ?report.eligible_programs(),
            financing = report.financing.amount,
            "diagnosis completed"
        );

        report
    }
}

fn financing_outcome(
    aggregates: &FinancialAggregates,
    request: &FinancingRequest,
    venture_debt_eligible: bool,
) -> FinancingOutcome {
    let capital = request.capital.unwrap_or(aggregates.computable_equity);
    let breakdown = financing_breakdown(capital, request.rating, request.profile);
    let computed = breakdown.map(|breakdown| breakdown.amount).unwrap_or(0);

    FinancingOutcome {
        rating: request.rating,
        profile: request.profile,
        capital,
        capital_overridden: request.capital.is_some(),
        amount: if venture_debt_eligible { computed } else { 0 },
        forced_to_zero: !venture_debt_eligible,
        breakdown,
    }
}
