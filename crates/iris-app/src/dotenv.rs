//! Minimal `.env` support so the API key can live next to the project.

use std::path::{Path, PathBuf};

/// Candidate `.env` files, most specific first.
pub(crate) fn candidates() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".env")];
    if let Ok(dir) = iris_config::toml_loader::config_dir() {
        paths.push(dir.join(".env"));
    }
    paths
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped;
/// surrounding quotes are stripped from values.
pub(crate) fn parse(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim().trim_start_matches("export ").trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.to_string(), value.to_string())
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Load the first readable `.env` among `paths`. Variables already set in
/// the environment win. Must run before any other thread starts.
pub(crate) fn load_dotenv(paths: &[PathBuf]) -> Option<&Path> {
    for path in paths {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in parse(&contents) {
                if std::env::var_os(&key).is_none() {
                    std::env::set_var(key, value);
                }
            }
            return Some(path.as_path());
        }
    }
    None
}
