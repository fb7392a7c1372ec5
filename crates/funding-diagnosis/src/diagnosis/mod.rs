//! Eligibility rule engine: financial aggregates, policy tables, one
//! evaluator per program and the venture-debt financing calculator.

pub mod aggregates;
pub mod domain;
pub mod financing;
pub mod programs;
pub mod report;
pub mod tables;

#[cfg(test)]
mod tests;

pub use aggregates::{
    computable_equity, crisis_directive, crisis_lender, months_since, net_equity, runway,
    FinancialAggregates, Solvency,
};
pub use domain::{
    Answer, BalanceField, BalanceYear, ChecklistBlock, CriterionKind, CriterionResult, FormData,
    Program, UnknownCode,
};
pub use financing::{
    financing_breakdown, max_financing, max_financing_for_code, FinancingBreakdown,
    FinancingRequest, GLOBAL_CEILING,
};
pub use programs::{
    evaluate_innovation_lender, evaluate_national_grants, evaluate_regional_funds,
    evaluate_tax_deductions, evaluate_venture_debt, ResolvedDeductionSpend,
};
pub use report::{Diagnosis, DiagnosisReport, FinancingOutcome, DISCLAIMER};
pub use tables::{rating_row, CompanyProfile, Rating, RatingRow, Region, RegionThresholds};
