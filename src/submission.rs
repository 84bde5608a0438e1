#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{FatalError, StudentError};

/// A validated allow-list of file suffixes, matched case-insensitively
/// against submitted file names.
#[derive(Debug, Clone)]
pub struct ExtensionSet {
    /// Lowercased, deduplicated suffixes, each beginning with a dot.
    suffixes: Vec<String>,
}

impl ExtensionSet {
    /// Builds an extension set from the given entries.
    ///
    /// Every entry must start with a dot and name at least one character
    /// after it; an empty list or an ill-formed entry fails the run before
    /// any grading starts.
    pub fn new<I, S>(entries: I) -> Result<Self, FatalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suffixes = Vec::new();
        for entry in entries {
            let entry = entry.as_ref().trim();
            if !entry.starts_with('.') || entry.len() < 2 {
                return Err(FatalError::InvalidExtension(entry.to_string()));
            }
            let lowered = entry.to_lowercase();
            if !suffixes.contains(&lowered) {
                suffixes.push(lowered);
            }
        }
        if suffixes.is_empty() {
            return Err(FatalError::EmptyExtensionSet);
        }
        Ok(Self { suffixes })
    }

    /// Returns true when the file name ends with one of the allowed
    /// suffixes, ignoring case.
    pub fn matches(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        self.suffixes.iter().any(|suffix| lowered.ends_with(suffix))
    }

    /// Returns the normalized suffixes in this set.
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

/// Reads and concatenates every allowed file in a student's folder, each
/// followed by two newlines, in sorted directory-listing order.
///
/// Files outside the allow-list are skipped without being read. Files that
/// cannot be read or are not valid UTF-8 are logged and skipped so the
/// student is graded on whatever could be read. An empty string is a valid
/// result and means "no submission".
pub fn combine_student_files(
    folder: &Path,
    allowed: &ExtensionSet,
) -> Result<String, StudentError> {
    let mut entries = std::fs::read_dir(folder)
        .map_err(|source| StudentError::FolderUnreadable {
            path: folder.to_path_buf(),
            source,
        })?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .collect::<Vec<_>>();
    entries.sort();

    let mut combined = String::new();
    for path in entries {
        if !path.is_file() {
            debug!("Skipping {} as it is not a regular file", path.display());
            continue;
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !allowed.matches(&file_name) {
            debug!("Skipping {file_name} as it's not a recognized submission file");
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                combined.push_str(&content);
                combined.push_str("\n\n");
            }
            Err(err) => {
                warn!("Could not read {file_name}, skipping: {err}");
            }
        }
    }

    Ok(combined)
}
