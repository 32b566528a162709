//! Domain-level errors: validation failures detected before any mutation.

use thiserror::Error;

/// Root domain error type.
///
/// All variants are:
/// - Cloneable (for reporting the same failure in several places)
/// - Categorizable (for CLI display and exit codes)
/// - Raised before any file is modified
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ── Validation ───────────────────────────────────────────────────────────
    #[error("unsupported license '{license}'")]
    UnsupportedLicense { license: String },

    #[error("unsupported version control system '{vcs}'")]
    UnsupportedVcs { vcs: String },

    #[error("unsupported project kind '{kind}'")]
    UnsupportedKind { kind: String },

    #[error("project name must not be empty")]
    MissingProjectName,

    #[error("invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    // ── Metadata record ──────────────────────────────────────────────────────
    #[error("metadata: required field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("metadata is malformed: {reason}")]
    MalformedMetadata { reason: String },

    // ── Template rendering ───────────────────────────────────────────────────
    #[error("template '{template}' references unresolved placeholder '{placeholder}'")]
    UnresolvedPlaceholder {
        template: &'static str,
        placeholder: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        use crate::domain::value_objects::{License, ProjectKind, Vcs};

        match self {
            Self::UnsupportedLicense { license } => {
                let mut out = vec![format!("'{license}' is not a supported license")];
                out.extend(
                    License::ALL
                        .iter()
                        .map(|l| format!("  • {:<9} - {}", l.as_str(), l.full_name())),
                );
                out
            }
            Self::UnsupportedVcs { vcs } => {
                let mut out = vec![format!("'{vcs}' is not a supported VCS")];
                out.extend(
                    Vcs::ALL
                        .iter()
                        .map(|v| format!("  • {:<5} - {}", v.as_str(), v.describe())),
                );
                out
            }
            Self::UnsupportedKind { kind } => {
                let mut out = vec![format!("'{kind}' is not a supported project kind")];
                out.extend(
                    ProjectKind::ALL
                        .iter()
                        .map(|k| format!("  • {:<4} - {}", k.as_str(), k.describe())),
                );
                out
            }
            Self::MissingProjectName => vec![
                "Pass a project name as the first argument".into(),
                "Example: goscaff new My-Tool --kind cmd".into(),
            ],
            Self::MissingField { field } => vec![
                format!("The metadata record has no '{field}' entry"),
                "The Metadata.toml file may have been hand-edited".into(),
            ],
            Self::MalformedMetadata { .. } => vec![
                "Metadata.toml could not be parsed as TOML".into(),
                "Restore it from the Metadata.toml~ backup if one exists".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingField { .. } | Self::MalformedMetadata { .. } => ErrorCategory::Config,
            Self::UnresolvedPlaceholder { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Config,
    Internal,
}
