//! Change sets: which identity attributes an update invocation touches.
//!
//! A [`ChangeSet`] is ephemeral — computed by the tag resolver for one run,
//! consumed by the synchronizer, never persisted.

use crate::domain::metadata::ProjectMetadata;

/// An old/new value pair for one changed attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub old: String,
    pub new: String,
}

impl Change {
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
        }
    }
}

/// The set of identity attributes whose requested value differs from the
/// stored value in one update invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub project_name: Option<Change>,
    pub package_name: Option<Change>,
    pub license: Option<Change>,
}

impl ChangeSet {
    /// True when nothing changed: the update is a no-op and must perform
    /// zero file writes and zero renames.
    pub fn is_empty(&self) -> bool {
        self.project_name.is_none() && self.package_name.is_none() && self.license.is_none()
    }

    /// Source files carry the package name in code and the license in their
    /// header, so either change forces the in-code rewrite pass.
    pub fn package_in_code(&self) -> bool {
        self.package_name.is_some() || self.license.is_some()
    }

    /// Documentation files carry the display name and the license name.
    pub fn docs_affected(&self) -> bool {
        self.project_name.is_some() || self.license.is_some()
    }

    /// The stored record with this change set applied.
    pub fn applied_to(&self, old: &ProjectMetadata) -> ProjectMetadata {
        let mut updated = old.clone();
        if let Some(change) = &self.project_name {
            updated.project_name = change.new.clone();
        }
        if let Some(change) = &self.package_name {
            updated.package_name = change.new.clone();
        }
        if let Some(change) = &self.license {
            // The resolver only builds a license change from a parsed
            // License, so this parse cannot fail in practice.
            if let Ok(license) = change.new.parse() {
                updated.license = license;
            }
        }
        updated
    }

    /// One line per changed attribute, for verbose output.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(c) = &self.project_name {
            lines.push(format!("project name: {:?} -> {:?}", c.old, c.new));
        }
        if let Some(c) = &self.package_name {
            lines.push(format!("package name: {:?} -> {:?}", c.old, c.new));
        }
        if let Some(c) = &self.license {
            lines.push(format!("license: {:?} -> {:?}", c.old, c.new));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{License, ProjectKind, Vcs};

    fn stored() -> ProjectMetadata {
        ProjectMetadata {
            kind: ProjectKind::Pkg,
            project_name: "Go-Tool".into(),
            package_name: "tool".into(),
            license: License::Bsd2,
            vcs: Vcs::Git,
            author: "A".into(),
            author_email: "a@b.c".into(),
            version: String::new(),
            summary: String::new(),
            download_url: String::new(),
            home_page: String::new(),
            keywords: String::new(),
        }
    }

    #[test]
    fn empty_changeset_reports_empty() {
        let cs = ChangeSet::default();
        assert!(cs.is_empty());
        assert!(!cs.package_in_code());
        assert!(!cs.docs_affected());
    }

    #[test]
    fn license_change_forces_code_and_docs_passes() {
        let cs = ChangeSet {
            license: Some(Change::new("bsd-2", "cc0")),
            ..Default::default()
        };
        assert!(cs.package_in_code());
        assert!(cs.docs_affected());
    }

    #[test]
    fn package_change_forces_code_pass_only() {
        let cs = ChangeSet {
            package_name: Some(Change::new("tool", "kit")),
            ..Default::default()
        };
        assert!(cs.package_in_code());
        assert!(!cs.docs_affected());
    }

    #[test]
    fn applied_to_mutates_only_changed_fields() {
        let cs = ChangeSet {
            license: Some(Change::new("bsd-2", "cc0")),
            ..Default::default()
        };
        let updated = cs.applied_to(&stored());
        assert_eq!(updated.license, License::Cc0);
        assert_eq!(updated.project_name, "Go-Tool");
        assert_eq!(updated.package_name, "tool");
        assert_eq!(updated.vcs, Vcs::Git);
    }

    #[test]
    fn describe_lists_each_change() {
        let cs = ChangeSet {
            project_name: Some(Change::new("Go-Tool", "Go-Kit")),
            package_name: Some(Change::new("tool", "kit")),
            ..Default::default()
        };
        let lines = cs.describe();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Go-Kit"));
    }
}
