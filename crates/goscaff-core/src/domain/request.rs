//! Immutable request values built once from parsed CLI input.
//!
//! These replace any notion of process-wide flag state: the CLI constructs
//! exactly one request per invocation and passes it down explicitly. Enum-ish
//! fields (kind, license, vcs) stay raw strings here so that validation —
//! and its error reporting — happens in the tag resolver, before any I/O.

/// Everything needed to generate a brand-new project.
#[derive(Debug, Clone)]
pub struct NewRequest {
    /// Display form, e.g. `"My-Tool"`. The project root directory is the
    /// lower-cased form of this.
    pub project_name: String,
    /// Explicit package name; derived from the project name when `None`.
    pub package_name: Option<String>,
    pub kind: String,
    pub license: String,
    pub vcs: String,
    pub author: String,
    pub author_email: String,
    /// The author is an organization rather than a person.
    pub author_is_org: bool,
}

/// Requested attribute changes for an existing project. `None` means
/// "keep the stored value".
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub project_name: Option<String>,
    pub package_name: Option<String>,
    pub license: Option<String>,
}

impl UpdateRequest {
    /// True when the caller requested nothing at all.
    pub fn is_empty(&self) -> bool {
        self.project_name.is_none() && self.package_name.is_none() && self.license.is_none()
    }
}
