//! Slug generation matching the Simple Icons title-to-slug convention

/// Derive a slug from a display title
///
/// Lowercases, spells out `+`, `.` and `&` as `plus`, `dot` and `and`, then
/// drops everything outside `[a-z0-9]`. Words are concatenated without a
/// separator, so `"Node.js"` becomes `"nodedotjs"`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for c in title.to_lowercase().chars() {
        match c {
            '+' => slug.push_str("plus"),
            '.' => slug.push_str("dot"),
            '&' => slug.push_str("and"),
            'a'..='z' | '0'..='9' => slug.push(c),
            _ => {}
        }
    }

    slug
}
