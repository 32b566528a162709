//! Tag sets and the tag resolver.
//!
//! A [`TagSet`] maps template placeholder names to substitution strings.
//! The resolver is a pure function: it never touches the metadata store —
//! it only merges requested values with stored ones and reports what
//! changed.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

use crate::domain::changeset::{Change, ChangeSet};
use crate::domain::error::DomainError;
use crate::domain::metadata::ProjectMetadata;
use crate::domain::request::{NewRequest, UpdateRequest};
use crate::domain::value_objects::{License, LicenseFamily, ProjectKind, Vcs};

/// Matches any placeholder left after substitution. Substitution is total:
/// a leftover placeholder is a template error, never an empty string.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([a-z_]+)\}\}").expect("placeholder pattern is valid"));

/// The current local calendar year.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

// ── TagSet ────────────────────────────────────────────────────────────────────

/// Placeholder name → substitution string.
///
/// Backed by a `BTreeMap` so iteration (and the `--debug` dump) is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    vars: BTreeMap<&'static str, String>,
}

impl TagSet {
    /// Derive the full tag set from a metadata record plus the environment.
    ///
    /// `comment` defaults to the Go line-comment marker; renders against
    /// other file kinds (Makefile) override it per call via [`TagSet::with`].
    pub fn from_metadata(meta: &ProjectMetadata, year: i32) -> Self {
        let gnu_extra = match meta.license.family() {
            LicenseFamily::Gnu(extra) => extra,
            _ => "",
        };

        let mut vars = BTreeMap::new();
        vars.insert("project_name", meta.project_name.clone());
        vars.insert("package_name", meta.package_name.clone());
        vars.insert("license", meta.license.full_name().to_string());
        vars.insert("license_id", meta.license.as_str().to_string());
        vars.insert("author", meta.author.clone());
        vars.insert("author_email", meta.author_email.clone());
        vars.insert("vcs", meta.vcs.as_str().to_string());
        vars.insert("year", year.to_string());
        vars.insert("comment", "//".to_string());
        vars.insert("gnu_extra", gnu_extra.to_string());

        Self { vars }
    }

    /// Copy of this tag set with one tag overridden.
    pub fn with(&self, key: &'static str, value: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.vars.insert(key, value.into());
        copy
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Stable (name, value) iteration, for the `--debug` dump.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.vars.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Render a template by substituting every `{{name}}` placeholder.
    ///
    /// Any placeholder without a corresponding tag is a fatal
    /// [`DomainError::UnresolvedPlaceholder`].
    pub fn render(&self, template_name: &'static str, template: &str) -> Result<String, DomainError> {
        let mut out = template.to_string();
        for (key, value) in &self.vars {
            out = out.replace(&format!("{{{{{key}}}}}"), value);
        }

        if let Some(caps) = PLACEHOLDER_RE.captures(&out) {
            return Err(DomainError::UnresolvedPlaceholder {
                template: template_name,
                placeholder: caps[1].to_string(),
            });
        }
        Ok(out)
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Build the tag set and initial metadata record for a brand-new project.
///
/// Package-name derivation only runs here — the update path never derives,
/// it requires an explicit package name to trigger a rename.
pub fn resolve_new(req: &NewRequest) -> Result<(TagSet, ProjectMetadata), DomainError> {
    if req.project_name.is_empty() {
        return Err(DomainError::MissingProjectName);
    }

    let kind: ProjectKind = req.kind.parse()?;
    let license: License = req.license.parse()?;
    let vcs: Vcs = req.vcs.parse()?;

    let package_name = match &req.package_name {
        Some(explicit) => validate_package_name(explicit)?,
        None => derive_package_name(&req.project_name),
    };

    let meta = ProjectMetadata {
        kind,
        project_name: req.project_name.clone(),
        package_name,
        license,
        vcs,
        author: req.author.clone(),
        author_email: req.author_email.clone(),
        version: String::new(),
        summary: String::new(),
        download_url: String::new(),
        home_page: String::new(),
        keywords: String::new(),
    };

    let tags = TagSet::from_metadata(&meta, current_year());
    Ok((tags, meta))
}

/// Merge requested changes with the stored record.
///
/// For each mutable attribute: an explicit new value different from the
/// stored one marks it changed; otherwise the stored value is kept.
pub fn resolve_update(
    old: &ProjectMetadata,
    req: &UpdateRequest,
) -> Result<(TagSet, ChangeSet), DomainError> {
    let mut changes = ChangeSet::default();

    if let Some(name) = &req.project_name {
        if name.is_empty() {
            return Err(DomainError::MissingProjectName);
        }
        if *name != old.project_name {
            changes.project_name = Some(Change::new(&old.project_name, name));
        }
    }

    if let Some(package) = &req.package_name {
        let package = validate_package_name(package)?;
        if package != old.package_name {
            changes.package_name = Some(Change::new(&old.package_name, package));
        }
    }

    if let Some(license) = &req.license {
        let license: License = license.parse()?;
        if license != old.license {
            changes.license = Some(Change::new(old.license.as_str(), license.as_str()));
        }
    }

    let updated = changes.applied_to(old);
    let tags = TagSet::from_metadata(&updated, current_year());
    Ok((tags, changes))
}

/// Derive a package name from a project name: take the part after the last
/// `-`, strip a leading `go` token, and lower-case the result.
pub fn derive_package_name(project_name: &str) -> String {
    let tail = match project_name.rsplit_once('-') {
        Some((_, tail)) => tail,
        None => project_name,
    };
    let tail = tail.to_ascii_lowercase();

    match tail.strip_prefix("go") {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => tail,
    }
}

/// Package names name a directory and a Go identifier: lower-case, no path
/// separators, no whitespace.
fn validate_package_name(name: &str) -> Result<String, DomainError> {
    if name.is_empty() {
        return Err(DomainError::InvalidPackageName {
            name: name.to_string(),
            reason: "name is empty".into(),
        });
    }
    if name.contains('/') || name.contains('\\') {
        return Err(DomainError::InvalidPackageName {
            name: name.to_string(),
            reason: "name contains a path separator".into(),
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidPackageName {
            name: name.to_string(),
            reason: "name contains whitespace".into(),
        });
    }
    Ok(name.to_ascii_lowercase())
}
