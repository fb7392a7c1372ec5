/// Lower-cases, strips accents and punctuation, and collapses whitespace so
/// that spreadsheet labels can be compared by substring.
pub(crate) fn normalize_label(value: &str) -> String {
    let folded: String = value
        .chars()
        .filter(|ch| !matches!(ch, '\u{feff}' | '\u{200b}'))
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .filter(|ch| ch.is_ascii_alphanumeric() || ch.is_whitespace())
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}
