//! Pipeline error types.
//!
//! Every variant is fatal: the run aborts at the first error and already
//! renamed files stay renamed.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Step of a hash-rename that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOp {
    Read,
    Write,
    Delete,
    Prune,
}

impl fmt::Display for RenameOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Prune => "prune",
        })
    }
}

/// Errors raised while sealing a build.
#[derive(Debug, Error)]
pub enum SealError {
    #[error("failed to load template `{path}`")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template `{path}`: {message}")]
    TemplateParse { path: PathBuf, message: String },

    #[error("failed to list output directory `{path}`")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {op} `{path}` while hashing")]
    HashRename {
        path: PathBuf,
        op: RenameOp,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{path}`")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SealError {
    pub(crate) fn hash_rename(path: impl Into<PathBuf>, op: RenameOp, source: std::io::Error) -> Self {
        Self::HashRename {
            path: path.into(),
            op,
            source,
        }
    }
}
