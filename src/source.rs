//! Loading documents from disk and the web.
//!
//! Loading never fails as a whole: a target that cannot be read becomes a
//! [`Source`] carrying the error, so the caller can report it next to the
//! results of the targets that did load.

use anyhow::{anyhow, bail, Context, Result};
use rayon::prelude::*;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::fs;
use std::path::Path;
use std::time::Duration;
use walkdir::WalkDir;

const DOCUMENT_EXTENSIONS: &[&str] = &["html", "htm", "md", "markdown"];
const FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    pub path: String,
    pub content: String,
    /// Declared MIME type, when the origin reports one
    pub media_type: Option<String>,
    pub error: Option<String>,
}

impl Source {
    fn failed(path: &str, error: anyhow::Error) -> Self {
        log::warn!("failed to load {}: {:#}", path, error);
        Self {
            path: path.to_string(),
            error: Some(format!("{:#}", error)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct SourceLoader {
    targets: Vec<String>,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target: impl Into<String>) {
        self.targets.push(target.into());
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Load every target, in the order added, with directories expanded in place
    pub fn load(&self) -> Vec<Source> {
        let expanded: Vec<String> = self.targets.iter().flat_map(|t| expand(t)).collect();
        log::debug!("loading {} sources", expanded.len());

        let client = expanded
            .iter()
            .any(|t| is_url(t))
            .then(|| build_client().map_err(|e| format!("{:#}", e)));

        expanded
            .par_iter()
            .map(|target| {
                if !is_url(target) {
                    return load_file(target);
                }
                let fetched = match &client {
                    Some(Ok(client)) => fetch(client, target),
                    Some(Err(message)) => Err(anyhow!("{}", message)),
                    None => Err(anyhow!("HTTP client unavailable")),
                };
                fetched.unwrap_or_else(|e| Source::failed(target, e))
            })
            .collect()
    }
}

/// Read a list of targets, one per non-empty line
pub fn read_file_list(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file list: {}", path.display()))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

fn is_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOCUMENT_EXTENSIONS.iter().any(|d| e.eq_ignore_ascii_case(d)))
}

fn expand(target: &str) -> Vec<String> {
    if is_url(target) || !Path::new(target).is_dir() {
        return vec![target.to_string()];
    }

    let mut files: Vec<String> = WalkDir::new(target)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_document(entry.path()))
        .map(|entry| entry.path().display().to_string())
        .collect();
    files.sort();
    files
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")
}

fn fetch(client: &Client, url: &str) -> Result<Source> {
    let response = client
        .get(url)
        .header(USER_AGENT, concat!("proofreader/", env!("CARGO_PKG_VERSION")))
        .header(ACCEPT, "text/html,application/xhtml+xml,text/markdown;q=0.9,*/*;q=0.8")
        .send()
        .with_context(|| format!("Failed to fetch {}", url))?;

    if !response.status().is_success() {
        bail!("Failed to fetch {}: HTTP {}", url, response.status());
    }

    let media_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let content = response
        .text()
        .with_context(|| format!("Failed to read response body from {}", url))?;

    Ok(Source {
        path: url.to_string(),
        content,
        media_type,
        error: None,
    })
}

fn load_file(path: &str) -> Source {
    match fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path)) {
        Ok(content) => Source {
            path: path.to_string(),
            content,
            media_type: None,
            error: None,
        },
        Err(e) => Source::failed(path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.html");
        let notes = dir.path().join("notes.md");
        fs::write(&page, "<p>Hello</p>").unwrap();
        fs::write(&notes, "# Notes").unwrap();

        let mut loader = SourceLoader::new();
        loader.add(notes.display().to_string());
        loader.add(page.display().to_string());
        let sources = loader.load();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].content, "# Notes");
        assert_eq!(sources[1].content, "<p>Hello</p>");
        assert!(sources.iter().all(|s| s.error.is_none()));
    }

    #[test]
    fn test_missing_file_is_captured() {
        let mut loader = SourceLoader::new();
        loader.add("/nonexistent/proofreader/page.html");
        let sources = loader.load();

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, "/nonexistent/proofreader/page.html");
        assert!(sources[0].error.as_deref().unwrap_or("").contains("Failed to read file"));
    }

    #[test]
    fn test_directory_expansion() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("guide")).unwrap();
        fs::write(dir.path().join("b.html"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("guide").join("c.markdown"), "c").unwrap();
        fs::write(dir.path().join("style.css"), "css").unwrap();

        let mut loader = SourceLoader::new();
        loader.add(dir.path().display().to_string());
        let contents: Vec<String> = loader.load().into_iter().map(|s| s.content).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_read_file_list() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("files.txt");
        fs::write(&list, "docs/a.md\n\n  docs/b.html  \n").unwrap();

        let targets = read_file_list(&list).unwrap();
        assert_eq!(targets, vec!["docs/a.md".to_string(), "docs/b.html".to_string()]);
        assert!(read_file_list(&dir.path().join("missing.txt")).is_err());
    }
}
