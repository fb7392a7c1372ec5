use super::super::domain::{ChecklistBlock, CriterionKind, CriterionResult, Program};

const SCHEMES: [&str; 3] = ["ICF", "IVF", "Avansa"];
const CONCLUSION: &str = "Regional conclusion";

/// Regional schemes follow the venture-debt outcome line for line.
pub(crate) fn checklist(venture_debt: &ChecklistBlock) -> ChecklistBlock {
    let (status, kind) = match &venture_debt.conclusion {
        Some(conclusion) => (conclusion.status.clone(), conclusion.kind),
        None => (String::new(), CriterionKind::Fail),
    };

    let criteria = SCHEMES
        .iter()
        .map(|scheme| CriterionResult::new(*scheme, status.clone(), kind))
        .collect();

    ChecklistBlock::new(
        Program::RegionalFunds,
        criteria,
        Some(CriterionResult::new(CONCLUSION, status, kind)),
    )
}
