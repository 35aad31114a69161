/// Collapse every run of whitespace (line breaks included) to a single space and trim the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Split `s` on `sep`, normalizing each piece and dropping the ones left empty.
pub fn split_normalized(s: &str, sep: &str) -> Vec<String> {
    s.split(sep)
        .map(normalize_ws)
        .filter(|piece| !piece.is_empty())
        .collect()
}

pub(crate) fn escape_braces(s: &str) -> String {
    s.replace('{', "\\{").replace('}', "\\}")
}
