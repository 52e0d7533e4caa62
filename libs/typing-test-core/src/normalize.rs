//! Folding of visually equivalent characters before answers are compared.

/// Fold typographic quotes, dashes and space variants to their ASCII forms,
/// then trim. Case and punctuation are otherwise left alone.
pub fn normalize(text: &str) -> String {
    text.chars().map(fold_char).collect::<String>().trim().to_string()
}

fn fold_char(c: char) -> char {
    match c {
        // Apostrophes, single quotes and primes
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{2035}'
        | '\u{02BC}' | '\u{FF07}' => '\'',
        // Double quotes and double primes
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{2036}'
        | '\u{FF02}' => '"',
        // Figure dash, en dash, em dash, horizontal bar
        '\u{2012}'..='\u{2015}' => '-',
        // No-break, typographic-width, zero-width and ideographic spaces
        '\u{00A0}' | '\u{2000}'..='\u{200B}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => ' ',
        other => other,
    }
}

/// Trim and collapse runs of whitespace to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split into words on whitespace, dropping empty pieces.
pub fn tokenize(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}
