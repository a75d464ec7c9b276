use std::cmp::Reverse;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use walkdir::WalkDir;

use super::document::{Category, Document};
use super::error::BrainError;
use super::links::{extract_links, generate_excerpt};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Frontmatter {
    title: Option<String>,
    #[serde(rename = "type")]
    category: Option<String>,
    date: Option<String>,
    tags: Option<Tags>,
    excerpt: Option<String>,
}

/// `tags: rust` and `tags: [rust, ml]` are both accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Tags {
    One(String),
    Many(Vec<String>),
}

impl Tags {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(tag) if tag.trim().is_empty() => Vec::new(),
            Self::One(tag) => vec![tag.trim().to_owned()],
            Self::Many(tags) => tags,
        }
    }
}

/// Loads every `*.md` file below `root`, newest first. A missing root is an
/// empty brain; documents that fail to parse are logged and skipped.
pub fn load_documents(root: &Path) -> Result<Vec<Document>, BrainError> {
    if !root.exists() {
        tracing::info!(path = %root.display(), "brain directory does not exist; nothing to load");
        return Ok(Vec::new());
    }

    let mut documents = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| BrainError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }

        match read_document(root, entry.path()) {
            Ok(document) => documents.push(document),
            Err(error) => tracing::warn!(%error, "skipping document"),
        }
    }

    documents.sort_by_key(|document| Reverse(parse_date(&document.date)));
    tracing::info!(count = documents.len(), path = %root.display(), "loaded brain documents");
    Ok(documents)
}

pub fn read_document(root: &Path, path: &Path) -> Result<Document, BrainError> {
    let raw = fs::read_to_string(path).map_err(|source| BrainError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (yaml, content) = split_frontmatter(&raw)
        .ok_or_else(|| BrainError::UnterminatedFrontmatter(path.to_path_buf()))?;

    let frontmatter = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => {
            serde_yaml::from_str::<Frontmatter>(yaml).map_err(|source| {
                BrainError::Frontmatter {
                    path: path.to_path_buf(),
                    source,
                }
            })?
        }
        _ => Frontmatter::default(),
    };

    let date = match frontmatter.date {
        Some(date) => date,
        None => modified_date(path)?,
    };
    let category = frontmatter
        .category
        .and_then(|value| value.parse::<Category>().ok())
        .unwrap_or_default();
    let title = frontmatter.title.unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().replace('-', " "))
            .unwrap_or_default()
    });

    Ok(Document {
        slug: slug_for(root, path),
        title,
        category,
        date,
        tags: frontmatter.tags.map(Tags::into_vec).unwrap_or_default(),
        excerpt: frontmatter
            .excerpt
            .unwrap_or_else(|| generate_excerpt(content)),
        links: extract_links(content),
    })
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "md")
}

fn slug_for(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    relative
        .strip_suffix(".md")
        .map(str::to_owned)
        .unwrap_or(relative)
}

/// Splits a leading `---` YAML block from the body. `None` when the block is
/// opened but never closed.
fn split_frontmatter(raw: &str) -> Option<(Option<&str>, &str)> {
    let Some(after_open) = raw
        .strip_prefix("---\n")
        .or_else(|| raw.strip_prefix("---\r\n"))
    else {
        return Some((None, raw));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Some((Some(yaml), body));
        }
        offset += line.len();
    }
    None
}

fn modified_date(path: &Path) -> Result<String, BrainError> {
    let read_error = |source| BrainError::Read {
        path: PathBuf::from(path),
        source,
    };
    let modified = fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(read_error)?;
    Ok(DateTime::<Utc>::from(modified)
        .format("%Y-%m-%d")
        .to_string())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
