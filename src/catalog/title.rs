use std::path::is_separator;

/// Derive a display title from a track path.
///
/// Drops everything up to and including the last path separator, then cuts at
/// the first `.` of what remains: `"resources/weird.name.mod"` gives `"weird"`.
/// A separator in final position is kept as part of the name. Returns `None`
/// when nothing is left.
pub fn trim_title(path: &str) -> Option<String> {
    let last = path.char_indices().last().map_or(0, |(i, _)| i);
    let start = path[..last]
        .char_indices()
        .filter(|&(_, c)| is_separator(c))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    let name = &path[start..];
    let name = name.split('.').next().unwrap_or(name);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
