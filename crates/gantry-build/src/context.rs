use std::io::Write;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Prefix matched against the root-relative path *as a string*, so
/// `.git/`, `.gitignore`, and `.github/` are all excluded while a nested
/// `vendor/.git` is not.
const VCS_EXCLUDE_PREFIX: &str = ".git";

/// Package `root` into an in-memory tar archive.
///
/// Convenience wrapper over [`package_into`] for callers that ship the
/// whole context as one body, the way the engine's image-build endpoint
/// consumes it.
pub fn package(root: &Path) -> Result<Vec<u8>, ContextError> {
    package_into(root, Vec::new())
}

/// Stream a tar archive of `root` into `sink`, returning the sink.
///
/// Files are appended in sorted walk order with root-relative names.
/// Directories, symlinks, and anything under the `.git` string prefix are
/// skipped.
///
/// # Errors
///
/// The first failure wins: an unreadable file, an unwalkable directory,
/// or a sink write error aborts the whole archive.
pub fn package_into<W: Write>(root: &Path, sink: W) -> Result<W, ContextError> {
    let mut builder = tar::Builder::new(sink);

    let walker = WalkDir::new(root).min_depth(1).sort_by_file_name();
    for entry in walker.into_iter().filter_entry(|e| !excluded(root, e.path())) {
        let entry = entry.map_err(|e| ContextError::Walk {
            root: root.to_owned(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|_| ContextError::OutsideRoot {
                path: entry.path().to_owned(),
            })?;
        builder
            .append_path_with_name(entry.path(), relative)
            .map_err(|e| ContextError::Append {
                path: relative.to_owned(),
                source: e,
            })?;
        tracing::debug!(path = %relative.display(), "added to build context");
    }

    builder
        .into_inner()
        .map_err(|e| ContextError::Finish { source: e })
}

/// True when the entry's root-relative path falls under the VCS prefix.
fn excluded(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root)
        .is_ok_and(|rel| rel.to_string_lossy().starts_with(VCS_EXCLUDE_PREFIX))
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("failed to walk project tree under {root}")]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },

    #[error("path {path} is not inside the project root")]
    OutsideRoot { path: PathBuf },

    #[error("failed to add {path} to the build context")]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to finish the build context archive")]
    Finish { source: std::io::Error },
}
