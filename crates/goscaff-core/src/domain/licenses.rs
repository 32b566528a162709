//! Static license texts, embedded at compile time.
//!
//! Most texts are copied into a project's LICENSE file verbatim. The BSD
//! 3-Clause text embeds the year and project name, so it carries `{{...}}`
//! placeholders and must be rendered (see `License::has_templated_text`).

use crate::domain::value_objects::License;

/// The LICENSE file body for a license, or `None` for proprietary projects.
pub fn license_text(license: License) -> Option<&'static str> {
    match license {
        License::Apache2 => Some(include_str!("../../licenses/apache-2.txt")),
        License::Bsd2 => Some(include_str!("../../licenses/bsd-2.txt")),
        License::Bsd3 => Some(include_str!("../../licenses/bsd-3.txt")),
        License::Cc0 => Some(include_str!("../../licenses/cc0.txt")),
        License::Gpl3 => Some(include_str!("../../licenses/gpl-3.txt")),
        License::Lgpl3 => Some(include_str!("../../licenses/lgpl-3.txt")),
        License::Agpl3 => Some(include_str!("../../licenses/agpl-3.txt")),
        License::None => None,
    }
}

/// The LGPL is a set of additional permissions on top of the GPL, so LGPL
/// projects ship the GPL text alongside their LICENSE file.
pub const GPL_COMPANION_TEXT: &str = include_str!("../../licenses/gpl-3.txt");

/// Filename of the companion GPL text written for LGPL projects.
pub const GPL_COMPANION_FILE: &str = "LICENSE-GPL";
