/// One keyword per non-blank line, trimmed. Order and duplicates are kept.
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
