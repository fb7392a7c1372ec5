use super::super::domain::{Answer, ChecklistBlock, CriterionResult, FormData, Program};

const INDUSTRIAL_CAPEX: &str = "FAIIP";
const DOCTORATE_HIRING: &str = "Torres Quevedo";
const INTERNATIONALIZATION: &str = "Cofides";

pub(crate) fn checklist(data: &FormData) -> ChecklistBlock {
    let criteria = [
        (INDUSTRIAL_CAPEX, data.industrial_capex),
        (DOCTORATE_HIRING, data.hire_doctorates),
        (INTERNATIONALIZATION, data.internationalize),
    ]
    .into_iter()
    .map(|(label, answer)| CriterionResult::check(label, answer == Some(Answer::Yes)))
    .collect();

    ChecklistBlock::new(Program::NationalGrants, criteria, None)
}
