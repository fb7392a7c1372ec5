use crate::labels::normalize_label;
use crate::diagnosis::BalanceField;
use std::sync::OnceLock;

static FIELD_PATTERNS: OnceLock<Vec<(BalanceField, Vec<String>)>> = OnceLock::new();

/// First field whose pattern appears inside `normalized_label`. Order matters.
pub(crate) fn field_for_normalized(normalized_label: &str) -> Option<BalanceField> {
    field_patterns()
        .iter()
        .find(|(_, patterns)| {
            patterns
                .iter()
                .any(|pattern| normalized_label.contains(pattern.as_str()))
        })
        .map(|(field, _)| *field)
}

fn field_patterns() -> &'static Vec<(BalanceField, Vec<String>)> {
    FIELD_PATTERNS.get_or_init(|| {
        const LABEL_PATTERNS: &[(BalanceField, &[&str])] = &[
            (BalanceField::ShareCapital, &["capital"]),
            (
                BalanceField::SharePremium,
                &[
                    "prima de emisión",
                    "prima de emision",
                    "prima emisión",
                    "prima emision",
                ],
            ),
            (BalanceField::Reserves, &["reservas"]),
            (
                BalanceField::TreasuryShares,
                &[
                    "acciones y participaciones en patrimonio propias",
                    "acciones y participaciones propias",
                    "acciones propias",
                    "participaciones propias",
                ],
            ),
            (
                BalanceField::PriorResults,
                &[
                    "resultados de ejercicios anteriores",
                    "resultados ejercicios anteriores",
                    "resultados anteriores",
                ],
            ),
            (
                BalanceField::OtherContributions,
                &["otras aportaciones de socios", "otras aportaciones"],
            ),
            (
                BalanceField::CurrentResult,
                &["resultado del ejercicio", "resultado ejercicio"],
            ),
            (
                BalanceField::InterimDividend,
                &["dividendo a cuenta", "dividendo"],
            ),
            (
                BalanceField::OtherEquityInstruments,
                &["otros instrumentos de patrimonio", "otros instrumentos"],
            ),
        ];

        LABEL_PATTERNS
            .iter()
            .map(|(field, patterns)| {
                (
                    *field,
                    patterns.iter().map(|pattern| normalize_label(pattern)).collect(),
                )
            })
            .collect()
    })
}

#[cfg(test)]
pub(crate) fn lookup_for_tests(label: &str) -> Option<BalanceField> {
    field_for_normalized(&normalize_label(label))
}
