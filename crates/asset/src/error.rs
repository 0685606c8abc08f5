//! Errors produced while importing a mesh file.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Raw table a face corner points into.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Table {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Table::Position => "position",
            Table::TexCoord => "texture coordinate",
            Table::Normal => "normal",
        })
    }
}

/// Coarse classification of [`MeshImportError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MeshErrorKind {
    /// File missing or unreadable.
    NotFound,
    /// A line doesn't have the expected shape or a token fails to parse.
    Malformed,
    /// A face references past the end of a raw table.
    DanglingReference,
}

#[derive(Debug, Error)]
pub enum MeshImportError {
    #[error("Failed to open mesh file {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read line {line}: {source}")]
    Unreadable {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Malformed mesh data on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// `index` is the 1-based reference as written in the file.
    #[error("Dangling {table} reference {index} on line {line} (table has {len} entries)")]
    DanglingReference {
        line: usize,
        table: Table,
        index: usize,
        len: usize,
    },

    #[error("Requested {requested} vertices from a mesh with {available}")]
    VertexCountOutOfRange { requested: usize, available: usize },
}

impl MeshImportError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> MeshErrorKind {
        match self {
            Self::NotFound { .. } | Self::Unreadable { .. } => MeshErrorKind::NotFound,
            Self::Malformed { .. } | Self::VertexCountOutOfRange { .. } => {
                MeshErrorKind::Malformed
            }
            Self::DanglingReference { .. } => MeshErrorKind::DanglingReference,
        }
    }
}

pub type MeshResult<T> = Result<T, MeshImportError>;
