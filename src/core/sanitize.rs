// src/core/sanitize.rs

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Collapsed cell text, or `None` when nothing visible is left.
pub fn cell_value<'a, I>(fragments: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let joined: String = fragments.into_iter().collect();
    let v = normalize_ws(&joined);
    if v.is_empty() { None } else { Some(v) }
}
