//! Vault-relative path handling.
//!
//! Documents are addressed by forward-slash separated paths relative to the
//! vault root. Everything that builds or compares such paths goes through
//! [`normalize`] first.

/// Normalizes a vault-relative path.
///
/// Backslashes become `/`, runs of separators collapse to one, leading and
/// trailing separators are stripped and non-breaking spaces become plain
/// spaces. An input made only of separators normalizes to `"/"` (the root).
///
/// ```
/// use daily_notes_tweaks::vault_path::normalize;
///
/// assert_eq!(normalize("/Daily//2024-01-05.md"), "Daily/2024-01-05.md");
/// assert_eq!(normalize("Daily\\Archive\\"), "Daily/Archive");
/// assert_eq!(normalize("//"), "/");
/// ```
pub fn normalize(path: &str) -> String {
    let cleaned: String = path
        .chars()
        .map(|c| match c {
            '\\' => '/',
            '\u{00A0}' | '\u{202F}' => ' ',
            other => other,
        })
        .collect();

    let joined = cleaned
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Returns true when `folder` designates the vault root (unset, empty or `/`).
pub fn is_root(folder: &str) -> bool {
    let trimmed = folder.trim();
    trimmed.is_empty() || normalize(trimmed) == "/"
}

/// Joins a folder and a file name the way daily-note paths are built.
pub fn join(folder: &str, name: &str) -> String {
    if is_root(folder) {
        normalize(name)
    } else {
        normalize(&format!("{}/{}", folder, name))
    }
}

/// The final path segment.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Strips the last extension from the final segment, if any.
///
/// A leading dot (hidden file) is not treated as an extension separator.
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}
