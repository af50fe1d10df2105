/// Strips characters that are not safe in a file or directory name across
/// the platforms we target (path separators plus the Windows-reserved set).
pub fn sanitize_component(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| {
            !matches!(c, '/' | '\\' | '*' | '?' | '<' | '>' | '|' | '"' | ':') && !c.is_control()
        })
        .collect();

    let cleaned = cleaned.trim().to_string();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}
