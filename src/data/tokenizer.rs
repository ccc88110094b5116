// ---------------------------------------------------------------------------
// Line splitting and quote-aware row tokenization
// ---------------------------------------------------------------------------

/// The field delimiter used by listing tables.
pub const DELIMITER: char = ',';

/// Split raw source text into logical lines, dropping lines that are empty
/// after trimming. Order is preserved; the first surviving line is the
/// header. Blank physical lines ahead of the header are skipped here, which
/// promotes the next non-blank line; [`leading_blank_lines`] reports how
/// often that happened so callers can surface it.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// How many blank physical lines precede the first non-blank line.
pub fn leading_blank_lines(text: &str) -> usize {
    text.lines()
        .take_while(|line| line.trim().is_empty())
        .count()
}

/// Tokenize one row with the standard comma delimiter.
pub fn tokenize_row(line: &str) -> Vec<String> {
    tokenize_row_with(line, DELIMITER)
}

/// Split `line` on `delimiter`, except where the delimiter sits inside a
/// quoted span. The scan tracks quote parity left to right: a delimiter
/// separates fields only when the number of `"` seen so far is even. Each
/// field then has every literal `"` stripped and surrounding whitespace
/// trimmed, so `"79,990"` comes out as `79,990` and `""` collapses to
/// nothing.
pub fn tokenize_row_with(line: &str, delimiter: char) -> Vec<String> {
    let mut raw_fields = Vec::new();
    let mut current = String::new();
    let mut quotes_seen: usize = 0;

    for ch in line.chars() {
        if ch == delimiter && quotes_seen % 2 == 0 {
            raw_fields.push(std::mem::take(&mut current));
        } else {
            if ch == '"' {
                quotes_seen += 1;
            }
            current.push(ch);
        }
    }
    raw_fields.push(current);

    raw_fields
        .into_iter()
        .map(|field| field.replace('"', "").trim().to_string())
        .collect()
}
