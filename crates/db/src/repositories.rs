pub mod artist;
pub mod genre;
pub mod show;
pub mod venue;

/// Builds an `ILIKE` pattern matching `term` anywhere, with `%`, `_` and the
/// escape character itself taken literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
