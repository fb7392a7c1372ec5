//! Pre-fills the two balance years from a spreadsheet export whose first
//! column names the equity line item and whose next two columns hold the
//! year -1 and year -2 figures.

mod mapping;
mod parser;

use crate::diagnosis::{BalanceField, BalanceYear};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BalanceImportError {
    #[error("failed to read balance sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid balance sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("no balance-sheet line items found; the first column must hold the item names")]
    NoLineItems,
}

/// Both balance years as read from the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedBalances {
    pub year_minus_1: BalanceYear,
    pub year_minus_2: BalanceYear,
    /// Rows whose label matched a line item.
    pub matched: usize,
    /// Distinct line items that received a value.
    pub fields: Vec<BalanceField>,
}

pub struct BalanceSheetImporter;

impl BalanceSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportedBalances, BalanceImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ImportedBalances, BalanceImportError> {
        let mut year_minus_1 = BalanceYear::default();
        let mut year_minus_2 = BalanceYear::default();
        let mut matched = 0;
        let mut seen: HashSet<BalanceField> = HashSet::new();

        for row in parser::parse_rows(reader)? {
            let Some(field) = mapping::field_for_normalized(&row.normalized_label) else {
                debug!(label = row.raw_label.as_str(), "skipping unrecognised balance row");
                continue;
            };

            matched += 1;
            seen.insert(field);
            if let Some(amount) = row.year_minus_1 {
                year_minus_1.set(field, amount);
            }
            if let Some(amount) = row.year_minus_2 {
                year_minus_2.set(field, amount);
            }
        }

        if matched == 0 {
            return Err(BalanceImportError::NoLineItems);
        }

        let fields = BalanceField::ordered()
            .into_iter()
            .filter(|field| seen.contains(field))
            .collect();

        Ok(ImportedBalances {
            year_minus_1,
            year_minus_2,
            matched,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn amounts_accept_spanish_formatting() {
        assert_eq!(parser::parse_amount_for_tests("1.234.567,89 €"), 1_234_567.89);
        assert_eq!(parser::parse_amount_for_tests("-2.500"), -2_500.0);
        assert_eq!(parser::parse_amount_for_tests("12500"), 12_500.0);
        assert_eq!(parser::parse_amount_for_tests(""), 0.0);
        assert_eq!(parser::parse_amount_for_tests("n/a"), 0.0);
        assert_eq!(parser::parse_amount_for_tests("NaN"), 0.0);
        assert_eq!(parser::parse_amount_for_tests("inf"), 0.0);
        assert_eq!(parser::parse_amount_for_tests("-infinity"), 0.0);
    }

    #[test]
    fn amounts_ignore_trailing_text() {
        assert_eq!(parser::parse_amount_for_tests("10.000 EUR"), 10_000.0);
        assert_eq!(parser::parse_amount_for_tests("1.500,5 euros"), 1_500.5);
        assert_eq!(parser::parse_amount_for_tests("-"), 0.0);
        assert_eq!(parser::parse_amount_for_tests("EUR 100"), 0.0);
    }

    #[test]
    fn mapping_recognizes_line_items() {
        assert_eq!(
            mapping::lookup_for_tests("I. Capital escriturado"),
            Some(BalanceField::ShareCapital)
        );
        assert_eq!(
            mapping::lookup_for_tests("II. Prima de emisión"),
            Some(BalanceField::SharePremium)
        );
        assert_eq!(
            mapping::lookup_for_tests("(Acciones propias)"),
            Some(BalanceField::TreasuryShares)
        );
        assert_eq!(
            mapping::lookup_for_tests("Resultados ejercicios anteriores"),
            Some(BalanceField::PriorResults)
        );
        assert_eq!(
            mapping::lookup_for_tests("V. Resultados de ejercicios anteriores"),
            Some(BalanceField::PriorResults)
        );
        assert_eq!(
            mapping::lookup_for_tests("IV. (Acciones y participaciones en patrimonio propias)"),
            Some(BalanceField::TreasuryShares)
        );
        assert_eq!(
            mapping::lookup_for_tests("VII. Resultado del ejercicio"),
            Some(BalanceField::CurrentResult)
        );
        assert_eq!(
            mapping::lookup_for_tests("VIII. (Dividendo a cuenta)"),
            Some(BalanceField::InterimDividend)
        );
        assert_eq!(mapping::lookup_for_tests("Total activo"), None);
    }

    #[test]
    fn importer_fills_both_years() {
        let csv = "Partida,Año -1,Año -2\n\
Capital,10000,10000\n\
Prima de emisión,5000,5000\n\
Reservas,20000,12000\n\
Resultado del ejercicio,-3000,\n";

        let imported = BalanceSheetImporter::from_reader(Cursor::new(csv)).expect("import");

        assert_eq!(imported.matched, 4);
        assert_eq!(imported.year_minus_1.share_capital, 10_000.0);
        assert_eq!(imported.year_minus_1.share_premium, 5_000.0);
        assert_eq!(imported.year_minus_2.reserves, 12_000.0);
        assert_eq!(imported.year_minus_1.current_result, -3_000.0);
        assert_eq!(imported.year_minus_2.current_result, 0.0);
        assert_eq!(
            imported.fields,
            [
                BalanceField::ShareCapital,
                BalanceField::SharePremium,
                BalanceField::Reserves,
                BalanceField::CurrentResult,
            ]
        );
    }

    #[test]
    fn importer_reads_semicolon_exports_with_decimal_commas() {
        let csv = "Capital social;12.000,50;9.000\nReservas;-1.500,25;0\n";

        let imported = BalanceSheetImporter::from_reader(Cursor::new(csv)).expect("import");

        assert_eq!(imported.year_minus_1.share_capital, 12_000.5);
        assert_eq!(imported.year_minus_2.share_capital, 9_000.0);
        assert_eq!(imported.year_minus_1.reserves, -1_500.25);
    }

    #[test]
    fn short_rows_leave_missing_years_untouched() {
        let csv = "Capital,10000\nReservas\n";

        let imported = BalanceSheetImporter::from_reader(Cursor::new(csv)).expect("import");

        assert_eq!(imported.matched, 2);
        assert_eq!(imported.year_minus_1.share_capital, 10_000.0);
        assert_eq!(imported.year_minus_2.share_capital, 0.0);
        assert_eq!(imported.year_minus_1.reserves, 0.0);
    }

    #[test]
    fn non_numeric_cells_import_as_zero() {
        let csv = "Capital,10000,10000\nReservas,NaN,-9000\nResultados anteriores,-9500,0\n";

        let imported = BalanceSheetImporter::from_reader(Cursor::new(csv)).expect("import");

        assert_eq!(imported.year_minus_1.reserves, 0.0);
        assert_eq!(imported.year_minus_2.reserves, -9_000.0);
        assert_eq!(
            crate::diagnosis::crisis_lender(&imported.year_minus_1),
            crate::diagnosis::Solvency::InCrisis
        );

        let json = serde_json::to_string(&imported).expect("serializes");
        let round_trip: ImportedBalances = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(round_trip, imported);
    }

    #[test]
    fn importer_rejects_files_without_line_items() {
        let csv = "Total activo,100\nTotal pasivo,100\n";

        let error = BalanceSheetImporter::from_reader(Cursor::new(csv)).expect_err("no items");

        assert!(matches!(error, BalanceImportError::NoLineItems));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = BalanceSheetImporter::from_path("./does-not-exist.csv")
            .expect_err("expected io error");

        match error {
            BalanceImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
