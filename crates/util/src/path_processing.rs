use std::path::PathBuf;

use dirs_next::home_dir;

/// Separator accepted between paths typed into a single input line.
pub const PATH_LIST_SEPARATOR: char = ';';

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Splits a `;`-separated list of paths, skipping blanks and expanding `~`.
pub fn split_path_list(input: &str) -> Vec<PathBuf> {
    input
        .split(PATH_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(expand_tilde)
        .collect()
}
