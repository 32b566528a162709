//! Domain value objects: ProjectKind, License, Vcs.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! Every supported identifier lives in a closed enumeration; the string
//! forms here are the exact identifiers persisted in the metadata record,
//! so a `FromStr` failure is how an unsupported license or VCS surfaces
//! as a validation error before any file is touched.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here with its `as_str` / `FromStr` / display arms
//! 2. For a license: add the text in `licenses.rs` and, if the wording is
//!    family-specific, a header arm in `templates.rs`
//! 3. Done — nothing else changes

use crate::domain::error::DomainError;
use std::fmt;
use std::str::FromStr;

// ── ProjectKind ───────────────────────────────────────────────────────────────

/// The kind of Go project being scaffolded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectKind {
    /// Command line program: gets a `main` stub, no test stub.
    Cmd,
    /// Library package: source stub plus test stub.
    Pkg,
    /// Package that calls C code: like `Pkg` with a cgo import.
    Cgo,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 3] = [Self::Cmd, Self::Pkg, Self::Cgo];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cmd => "cmd",
            Self::Pkg => "pkg",
            Self::Cgo => "cgo",
        }
    }

    /// Human description used in help text and listings.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Cmd => "command line program",
            Self::Pkg => "package",
            Self::Cgo => "package that calls C code",
        }
    }

    /// Library-ish kinds ship a `_test.go` stub; commands do not.
    pub const fn has_test_stub(&self) -> bool {
        matches!(self, Self::Pkg | Self::Cgo)
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cmd" => Ok(Self::Cmd),
            "pkg" | "lib" => Ok(Self::Pkg),
            "cgo" => Ok(Self::Cgo),
            other => Err(DomainError::UnsupportedKind {
                kind: other.to_string(),
            }),
        }
    }
}

// ── License ───────────────────────────────────────────────────────────────────

/// A supported license identifier.
///
/// The identifier (`as_str`) is what the metadata record stores; the full
/// display name (`full_name`) is what headers and documentation render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum License {
    Apache2,
    Bsd2,
    Bsd3,
    Cc0,
    Gpl3,
    Lgpl3,
    Agpl3,
    None,
}

/// License families share a copyright-header template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseFamily {
    Bsd,
    Apache,
    /// GNU family; the inner string is the "Lesser " / "Affero " insertion.
    Gnu(&'static str),
    /// CC0 uses copyleft "Written in <year>" wording instead of a copyright.
    Cc0,
    /// Proprietary / no license: minimal copyright-only header.
    None,
}

impl License {
    pub const ALL: [License; 8] = [
        Self::Apache2,
        Self::Bsd2,
        Self::Bsd3,
        Self::Cc0,
        Self::Gpl3,
        Self::Lgpl3,
        Self::Agpl3,
        Self::None,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Apache2 => "apache-2",
            Self::Bsd2 => "bsd-2",
            Self::Bsd3 => "bsd-3",
            Self::Cc0 => "cc0",
            Self::Gpl3 => "gpl-3",
            Self::Lgpl3 => "lgpl-3",
            Self::Agpl3 => "agpl-3",
            Self::None => "none",
        }
    }

    /// Full display name, rendered into headers and README text.
    pub const fn full_name(&self) -> &'static str {
        match self {
            Self::Apache2 => "Apache License, version 2.0",
            Self::Bsd2 => "BSD 2-Clause License",
            Self::Bsd3 => "BSD 3-Clause License",
            Self::Cc0 => "Creative Commons CC0, version 1.0 Universal",
            Self::Gpl3 => "GNU General Public License, version 3 or later",
            Self::Lgpl3 => "GNU Lesser General Public License, version 3 or later",
            Self::Agpl3 => "GNU Affero General Public License, version 3 or later",
            Self::None => "Proprietary License",
        }
    }

    pub const fn family(&self) -> LicenseFamily {
        match self {
            Self::Bsd2 | Self::Bsd3 => LicenseFamily::Bsd,
            Self::Apache2 => LicenseFamily::Apache,
            Self::Gpl3 => LicenseFamily::Gnu(""),
            Self::Lgpl3 => LicenseFamily::Gnu("Lesser "),
            Self::Agpl3 => LicenseFamily::Gnu("Affero "),
            Self::Cc0 => LicenseFamily::Cc0,
            Self::None => LicenseFamily::None,
        }
    }

    /// Whether the LICENSE file text itself embeds the project name and
    /// year and therefore must be rendered rather than copied verbatim.
    pub const fn has_templated_text(&self) -> bool {
        matches!(self, Self::Bsd3)
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for License {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "apache-2" | "apache" => Ok(Self::Apache2),
            "bsd-2" => Ok(Self::Bsd2),
            "bsd-3" => Ok(Self::Bsd3),
            "cc0" | "cc0-1" => Ok(Self::Cc0),
            "gpl-3" | "gpl" => Ok(Self::Gpl3),
            "lgpl-3" | "lgpl" => Ok(Self::Lgpl3),
            "agpl-3" | "agpl" => Ok(Self::Agpl3),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnsupportedLicense {
                license: other.to_string(),
            }),
        }
    }
}

// ── Vcs ───────────────────────────────────────────────────────────────────────

/// A supported version control system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vcs {
    Bzr,
    Git,
    Hg,
    None,
}

impl Vcs {
    pub const ALL: [Vcs; 4] = [Self::Bzr, Self::Git, Self::Hg, Self::None];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bzr => "bzr",
            Self::Git => "git",
            Self::Hg => "hg",
            Self::None => "none",
        }
    }

    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Bzr => "Bazaar",
            Self::Git => "Git",
            Self::Hg => "Mercurial",
            Self::None => "none",
        }
    }

    /// Ignore-file name: a dot, the identifier, then "ignore".
    pub fn ignore_filename(&self) -> Option<String> {
        match self {
            Self::None => None,
            vcs => Some(format!(".{}ignore", vcs.as_str())),
        }
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vcs {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bzr" => Ok(Self::Bzr),
            "git" => Ok(Self::Git),
            "hg" | "mercurial" => Ok(Self::Hg),
            "none" => Ok(Self::None),
            other => Err(DomainError::UnsupportedVcs {
                vcs: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrips_through_str() {
        for kind in ProjectKind::ALL {
            assert_eq!(kind.as_str().parse::<ProjectKind>().unwrap(), kind);
        }
    }

    #[test]
    fn kind_lib_is_an_alias_for_pkg() {
        assert_eq!("lib".parse::<ProjectKind>().unwrap(), ProjectKind::Pkg);
    }

    #[test]
    fn kind_unknown_errors() {
        assert!(matches!(
            "app".parse::<ProjectKind>(),
            Err(DomainError::UnsupportedKind { .. })
        ));
    }

    #[test]
    fn only_cmd_omits_the_test_stub() {
        assert!(!ProjectKind::Cmd.has_test_stub());
        assert!(ProjectKind::Pkg.has_test_stub());
        assert!(ProjectKind::Cgo.has_test_stub());
    }

    #[test]
    fn license_roundtrips_through_str() {
        for license in License::ALL {
            assert_eq!(license.as_str().parse::<License>().unwrap(), license);
        }
    }

    #[test]
    fn license_unknown_errors() {
        assert!(matches!(
            "mit".parse::<License>(),
            Err(DomainError::UnsupportedLicense { .. })
        ));
    }

    #[test]
    fn gnu_family_carries_the_variant_wording() {
        assert_eq!(License::Gpl3.family(), LicenseFamily::Gnu(""));
        assert_eq!(License::Lgpl3.family(), LicenseFamily::Gnu("Lesser "));
        assert_eq!(License::Agpl3.family(), LicenseFamily::Gnu("Affero "));
    }

    #[test]
    fn only_bsd3_has_templated_text() {
        for license in License::ALL {
            assert_eq!(license.has_templated_text(), license == License::Bsd3);
        }
    }

    #[test]
    fn vcs_ignore_filenames() {
        assert_eq!(Vcs::Git.ignore_filename().as_deref(), Some(".gitignore"));
        assert_eq!(Vcs::Hg.ignore_filename().as_deref(), Some(".hgignore"));
        assert_eq!(Vcs::Bzr.ignore_filename().as_deref(), Some(".bzrignore"));
        assert_eq!(Vcs::None.ignore_filename(), None);
    }

    #[test]
    fn vcs_unknown_errors() {
        assert!(matches!(
            "svn".parse::<Vcs>(),
            Err(DomainError::UnsupportedVcs { .. })
        ));
    }
}
