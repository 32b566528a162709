//! The persisted project identity record.
//!
//! One record per project, stored as `Metadata.toml` at the project root.
//! The file is TOML with three tables — `[core]` identity, `[main]` primary
//! attributes, `[optional]` extras — preceded by a fixed header comment.
//!
//! The (field, section) mapping is declared statically through the serde
//! derives on the section structs below; there is no runtime introspection.
//! `[core]` fields are required on load; everything else defaults to the
//! empty string.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::value_objects::{License, ProjectKind, Vcs};

/// Fixed filename of the metadata record, relative to the project root.
pub const METADATA_FILE: &str = "Metadata.toml";

/// Comment written above the TOML body. `toml` ignores it on read.
const HEADER_COMMENT: &str = "# Generated by goscaff. Do not rename fields.\n\n";

/// A project's persisted identity.
///
/// Created at first generation, read back in full on every update, and
/// rewritten after every successful update (callers back the file up first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMetadata {
    pub kind: ProjectKind,
    pub project_name: String,
    pub package_name: String,
    pub license: License,
    pub vcs: Vcs,

    pub author: String,
    pub author_email: String,
    pub version: String,
    pub summary: String,
    pub download_url: String,

    pub home_page: String,
    pub keywords: String,
}

impl ProjectMetadata {
    /// Serialize to the on-disk TOML form, header comment included.
    pub fn to_toml_string(&self) -> Result<String, DomainError> {
        let raw = RawMetadata {
            core: Some(CoreSection {
                project_kind: Some(self.kind.as_str().to_string()),
                project_name: Some(self.project_name.clone()),
                package_name: Some(self.package_name.clone()),
                license: Some(self.license.as_str().to_string()),
                vcs: Some(self.vcs.as_str().to_string()),
            }),
            main: Some(MainSection {
                author: Some(self.author.clone()),
                author_email: Some(self.author_email.clone()),
                version: Some(self.version.clone()),
                summary: Some(self.summary.clone()),
                download_url: Some(self.download_url.clone()),
            }),
            optional: Some(OptionalSection {
                home_page: Some(self.home_page.clone()),
                keywords: Some(self.keywords.clone()),
            }),
        };

        let body = toml::to_string(&raw).map_err(|e| DomainError::MalformedMetadata {
            reason: format!("could not serialize record: {e}"),
        })?;

        Ok(format!("{HEADER_COMMENT}{body}"))
    }

    /// Parse the on-disk TOML form.
    ///
    /// Required `[core]` fields raise [`DomainError::MissingField`] when
    /// absent; optional fields default to the empty string.
    pub fn from_toml_str(input: &str) -> Result<Self, DomainError> {
        let raw: RawMetadata =
            toml::from_str(input).map_err(|e| DomainError::MalformedMetadata {
                reason: e.to_string(),
            })?;

        let core = raw.core.unwrap_or_default();
        let main = raw.main.unwrap_or_default();
        let optional = raw.optional.unwrap_or_default();

        let kind: ProjectKind = required(core.project_kind, "project-kind")?.parse()?;
        let project_name = required(core.project_name, "project-name")?;
        let package_name = required(core.package_name, "package-name")?;
        let license: License = required(core.license, "license")?.parse()?;
        let vcs: Vcs = required(core.vcs, "vcs")?.parse()?;

        Ok(Self {
            kind,
            project_name,
            package_name,
            license,
            vcs,
            author: main.author.unwrap_or_default(),
            author_email: main.author_email.unwrap_or_default(),
            version: main.version.unwrap_or_default(),
            summary: main.summary.unwrap_or_default(),
            download_url: main.download_url.unwrap_or_default(),
            home_page: optional.home_page.unwrap_or_default(),
            keywords: optional.keywords.unwrap_or_default(),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, DomainError> {
    value.ok_or(DomainError::MissingField { field })
}

// ── On-disk shape ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    core: Option<CoreSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    main: Option<MainSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    optional: Option<OptionalSection>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct CoreSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vcs: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct MainSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    download_url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct OptionalSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    home_page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    keywords: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectMetadata {
        ProjectMetadata {
            kind: ProjectKind::Cmd,
            project_name: "Acme-Runner".into(),
            package_name: "runner".into(),
            license: License::Bsd2,
            vcs: Vcs::Git,
            author: "Ada Lovelace".into(),
            author_email: "ada@example.org".into(),
            version: "0.1.0".into(),
            summary: "runs things".into(),
            download_url: String::new(),
            home_page: "https://example.org".into(),
            keywords: "runner, acme".into(),
        }
    }

    #[test]
    fn roundtrip_preserves_every_field() {
        let m = sample();
        let text = m.to_toml_string().unwrap();
        let back = ProjectMetadata::from_toml_str(&text).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn serialized_form_has_header_and_three_sections() {
        let text = sample().to_toml_string().unwrap();
        assert!(text.starts_with("# Generated by goscaff"));
        assert!(text.contains("[core]"));
        assert!(text.contains("[main]"));
        assert!(text.contains("[optional]"));
        assert!(text.contains("project-name = \"Acme-Runner\""));
    }

    #[test]
    fn missing_required_field_is_reported_by_name() {
        let text = r#"
[core]
project-kind = "cmd"
project-name = "X"
package-name = "x"
vcs = "git"
"#;
        assert_eq!(
            ProjectMetadata::from_toml_str(text).unwrap_err(),
            DomainError::MissingField { field: "license" }
        );
    }

    #[test]
    fn missing_core_section_reports_first_required_field() {
        assert_eq!(
            ProjectMetadata::from_toml_str("[main]\nauthor = \"x\"\n").unwrap_err(),
            DomainError::MissingField {
                field: "project-kind"
            }
        );
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let text = r#"
[core]
project-kind = "pkg"
project-name = "Widget"
package-name = "widget"
license = "cc0"
vcs = "none"
"#;
        let m = ProjectMetadata::from_toml_str(text).unwrap();
        assert_eq!(m.author, "");
        assert_eq!(m.keywords, "");
        assert_eq!(m.license, License::Cc0);
    }

    #[test]
    fn malformed_toml_is_a_malformed_error() {
        assert!(matches!(
            ProjectMetadata::from_toml_str("not = [valid").unwrap_err(),
            DomainError::MalformedMetadata { .. }
        ));
    }

    #[test]
    fn unknown_license_value_is_a_validation_error() {
        let text = r#"
[core]
project-kind = "cmd"
project-name = "X"
package-name = "x"
license = "wtfpl"
vcs = "git"
"#;
        assert!(matches!(
            ProjectMetadata::from_toml_str(text).unwrap_err(),
            DomainError::UnsupportedLicense { .. }
        ));
    }
}
