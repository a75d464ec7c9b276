use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrainError {
    #[error("failed to walk brain directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unterminated frontmatter block in {0}")]
    UnterminatedFrontmatter(PathBuf),
}
