//! One evaluator per funding program. Each turns a questionnaire snapshot
//! into a [`ChecklistBlock`]; none of them share mutable state.

mod innovation_lender;
mod national_grants;
mod regional;
mod tax_deductions;
mod venture_debt;

pub use tax_deductions::ResolvedDeductionSpend;

use super::aggregates::FinancialAggregates;
use super::domain::{ChecklistBlock, FormData};
use chrono::NaiveDate;

pub fn evaluate_venture_debt(data: &FormData, today: NaiveDate) -> ChecklistBlock {
    venture_debt::checklist(data, &FinancialAggregates::from_form(data), today)
}

pub fn evaluate_innovation_lender(data: &FormData) -> ChecklistBlock {
    innovation_lender::checklist(data, &FinancialAggregates::from_form(data))
}

pub fn evaluate_regional_funds(data: &FormData, today: NaiveDate) -> ChecklistBlock {
    regional::checklist(&evaluate_venture_debt(data, today))
}

pub fn evaluate_national_grants(data: &FormData) -> ChecklistBlock {
    national_grants::checklist(data)
}

pub fn evaluate_tax_deductions(data: &FormData) -> ChecklistBlock {
    tax_deductions::checklist(data, &ResolvedDeductionSpend::from_form(data))
}

pub(crate) use innovation_lender::checklist as innovation_lender_checklist;
pub(crate) use national_grants::checklist as national_grants_checklist;
pub(crate) use regional::checklist as regional_checklist;
pub(crate) use tax_deductions::checklist as tax_deductions_checklist;
pub(crate) use venture_debt::checklist as venture_debt_checklist;
