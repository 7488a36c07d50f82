//! Declarative file trees.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::operation::{OperationError, validate_filename};

/// A file or folder to be written to disk, with its children.
///
/// ```json
/// { "type": "folder", "name": "site", "children": [
///     { "type": "file", "name": "index.html", "contents": "<h1>hi</h1>" }
/// ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Blueprint {
    File {
        name: String,
        #[serde(default)]
        contents: String,
    },
    Folder {
        name: String,
        #[serde(default)]
        children: Vec<Blueprint>,
    },
}

impl Blueprint {
    pub fn file(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::File {
            name: name.into(),
            contents: contents.into(),
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<Blueprint>) -> Self {
        Self::Folder {
            name: name.into(),
            children,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Folder { name, .. } => name,
        }
    }

    /// Number of files and folders in this tree, itself included.
    pub fn item_count(&self) -> usize {
        match self {
            Self::File { .. } => 1,
            Self::Folder { children, .. } => 1 + children.iter().map(Self::item_count).sum::<usize>(),
        }
    }

    /// Write the tree into `directory` and return the path of its top item.
    ///
    /// Files are overwritten and folders merged with existing contents, so a
    /// later sibling file replaces an earlier one of the same name.
    pub fn write_to(&self, directory: impl AsRef<Path>) -> Result<PathBuf, OperationError> {
        let path = directory.as_ref().join(self.name());
        validate_filename(self.name())?;

        match self {
            Self::File { contents, .. } => {
                fs::write(&path, contents).map_err(|e| OperationError::io(&path, e))?;
            }
            Self::Folder { children, .. } => {
                fs::create_dir_all(&path).map_err(|e| OperationError::io(&path, e))?;
                for child in children {
                    child.write_to(&path)?;
                }
            }
        }

        debug!(path = %path.display(), "wrote blueprint item");
        Ok(path)
    }
}
