use super::BalanceImportError;
use crate::labels::normalize_label;
use std::io::Read;

#[derive(Debug)]
pub(crate) struct BalanceRow {
    pub(crate) raw_label: String,
    pub(crate) normalized_label: String,
    pub(crate) year_minus_1: Option<f64>,
    pub(crate) year_minus_2: Option<f64>,
}

/// Reads label/amount rows. The delimiter is `;` when the first non-empty
/// line contains one (spreadsheet exports with decimal commas), `,` otherwise.
pub(crate) fn parse_rows<R: Read>(
    mut reader: R,
) -> Result<Vec<BalanceRow>, BalanceImportError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;

    let delimiter = sniff_delimiter(&contents);
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(contents.as_bytes());

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let Some(label) = record.get(0).filter(|label| !label.trim().is_empty()) else {
            continue;
        };

        rows.push(BalanceRow {
            raw_label: label.to_string(),
            normalized_label: normalize_label(label),
            year_minus_1: record.get(1).map(parse_amount),
            year_minus_2: record.get(2).map(parse_amount),
        });
    }

    Ok(rows)
}

fn sniff_delimiter(contents: &str) -> u8 {
    let first_line = contents
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();
    if first_line.contains(';') {
        b';'
    } else {
        b','
    }
}

/// Spanish-formatted amount: `1.234.567,89 €` reads as 1234567.89.
/// Only the leading number counts (`10.000 EUR` is 10000); anything without
/// one, including `NaN` and `inf`, counts as zero.
fn parse_amount(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|ch| !matches!(ch, '€' | '.') && !ch.is_whitespace())
        .collect();
    let decimal = cleaned.replacen(',', ".", 1);

    leading_number(&decimal)
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .unwrap_or(0.0)
}

/// Longest `[+-]digits[.digits]` prefix of `value`.
fn leading_number(value: &str) -> &str {
    let bytes = value.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut seen_point = false;

    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_point => {
                seen_point = true;
                end += 1;
            }
            _ => break,
        }
    }

    &value[..end]
}

#[cfg(test)]
pub(crate) fn parse_amount_for_tests(value: &str) -> f64 {
    parse_amount(value)
}
