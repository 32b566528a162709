//! Named text templates and the rendering rules around them.
//!
//! Templates are plain `{{name}}` placeholder substitution — no
//! conditionals, no loops. Files whose first section is a shared copyright
//! header compose via the `{{header}}` placeholder: the license-family
//! header template is rendered first, then spliced into the body template.
//!
//! The update path re-renders headers into existing files; the year found
//! in the old header's grant line is preserved so a project keeps its
//! creation year across license changes.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DomainError;
use crate::domain::tags::TagSet;
use crate::domain::value_objects::{License, LicenseFamily};

// ── Copyright / license headers ───────────────────────────────────────────────
//
// One template per license family. `{{comment}}` is the per-file comment
// marker ("//" for Go sources, "#" for Makefiles).

pub const HEADER_BSD: &str = r#"{{comment}} Copyright {{year}}  The "{{project_name}}" Authors
{{comment}}
{{comment}} Use of this source code is governed by the {{license}}
{{comment}} that can be found in the LICENSE file.
{{comment}}
{{comment}} This software is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES
{{comment}} OR CONDITIONS OF ANY KIND, either express or implied. See the License
{{comment}} for more details.
"#;

pub const HEADER_APACHE: &str = r#"{{comment}} Copyright {{year}}  The "{{project_name}}" Authors
{{comment}}
{{comment}} Licensed under the Apache License, Version 2.0 (the "License");
{{comment}} you may not use this file except in compliance with the License.
{{comment}} You may obtain a copy of the License at
{{comment}}
{{comment}}     http://www.apache.org/licenses/LICENSE-2.0
{{comment}}
{{comment}} Unless required by applicable law or agreed to in writing, software
{{comment}} distributed under the License is distributed on an "AS IS" BASIS,
{{comment}} WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
{{comment}} See the License for the specific language governing permissions and
{{comment}} limitations under the License.
"#;

pub const HEADER_GNU: &str = r#"{{comment}} Copyright {{year}}  The "{{project_name}}" Authors
{{comment}}
{{comment}} This program is free software: you can redistribute it and/or modify
{{comment}} it under the terms of the GNU {{gnu_extra}}General Public License as published by
{{comment}} the Free Software Foundation, either version 3 of the License, or
{{comment}} (at your option) any later version.
{{comment}}
{{comment}} This program is distributed in the hope that it will be useful,
{{comment}} but WITHOUT ANY WARRANTY; without even the implied warranty of
{{comment}} MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
{{comment}} GNU {{gnu_extra}}General Public License for more details.
{{comment}}
{{comment}} You should have received a copy of the GNU {{gnu_extra}}General Public License
{{comment}} along with this program.  If not, see <http://www.gnu.org/licenses/>.
"#;

pub const HEADER_CC0: &str = r#"{{comment}} Written in {{year}} by the "{{project_name}}" Authors
{{comment}}
{{comment}} To the extent possible under law, the author(s) have waived all copyright
{{comment}} and related or neighboring rights to this software to the public domain worldwide.
{{comment}} This software is distributed without any warranty.
{{comment}}
{{comment}} You should have received a copy of the CC0 Public Domain Dedication along
{{comment}} with this software. If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
"#;

pub const HEADER_NONE: &str = r#"{{comment}} Copyright {{year}}  The "{{project_name}}" Authors
"#;

// ── Source file stubs ─────────────────────────────────────────────────────────

pub const SRC_CMD: &str = r#"{{header}}
package main

import (
)
"#;

pub const SRC_PKG: &str = r#"{{header}}
package {{package_name}}

import (
)
"#;

pub const SRC_CGO: &str = r#"{{header}}
package {{package_name}}

import "C"
"#;

pub const SRC_TEST: &str = r#"{{header}}
package {{package_name}}

import (
	"testing"
)

func Test(t *testing.T) {
}
"#;

// ── Build files ───────────────────────────────────────────────────────────────

pub const MAKEFILE_CMD: &str = r#"{{header}}
include $(GOROOT)/src/Make.inc

TARG={{package_name}}
GOFILES=\
	{{package_name}}.go\

include $(GOROOT)/src/Make.cmd
"#;

pub const MAKEFILE_PKG: &str = r#"{{header}}
include $(GOROOT)/src/Make.inc

TARG={{package_name}}
GOFILES=\
	{{package_name}}.go\

include $(GOROOT)/src/Make.pkg
"#;

// ── Documentation files ───────────────────────────────────────────────────────

pub const DOC_README: &str = r#"# {{project_name}}

## Installation

	go get {{package_name}}

## License

Licensed under the {{license}}.
See the LICENSE file for details.
"#;

pub const DOC_NEWS: &str = r#"# News

## {{year}}

* "{{project_name}}" created.
"#;

pub const DOC_AUTHORS: &str = r#"# Authors

Official list of the "{{project_name}}" copyright holders.

* {{author}} <{{author_email}}>
"#;

/// CC0 waives copyright, so the authors file uses attribution wording
/// rather than a copyright-holder list.
pub const DOC_AUTHORS_CC0: &str = r#"# Authors

"{{project_name}}" is written by the people listed below, who have waived
to the extent possible under law all copyright and related or neighboring
rights to this work (see the LICENSE file).

* {{author}} <{{author_email}}>
"#;

pub const DOC_CONTRIBUTORS: &str = r#"# Contributors

People who have contributed to "{{project_name}}" but are not copyright
holders. See the AUTHORS file for those.
"#;

/// Only written when the project uses no VCS; otherwise history lives in
/// the VCS itself.
pub const DOC_CHANGES: &str = r#"# Changes

## {{year}}

* "{{project_name}}": project created.
"#;

// ── VCS ignore boilerplate ────────────────────────────────────────────────────
//
// Written verbatim, never templated.

pub const IGNORE_PATTERNS: &str = r#"# Generic
*~
[._]*

# Go
*.[ao]
*.[568vq]
[568vq].out
main

# Cgo
*.cgo*
*.so
"#;

/// Mercurial ignore files declare their pattern syntax up front.
pub const HG_IGNORE_PREFIX: &str = "syntax: glob\n";

// ── Header rendering ──────────────────────────────────────────────────────────

/// The header template for a license's family.
pub fn header_template(license: License) -> &'static str {
    match license.family() {
        LicenseFamily::Bsd => HEADER_BSD,
        LicenseFamily::Apache => HEADER_APACHE,
        LicenseFamily::Gnu(_) => HEADER_GNU,
        LicenseFamily::Cc0 => HEADER_CC0,
        LicenseFamily::None => HEADER_NONE,
    }
}

/// Render the copyright header for `license`.
///
/// `year` overrides the tag set's year — the update path passes the year
/// extracted from the file's existing header.
pub fn render_header(
    license: License,
    tags: &TagSet,
    comment: &str,
    year: Option<i32>,
) -> Result<String, DomainError> {
    let mut tags = tags.with("comment", comment);
    if let Some(year) = year {
        tags = tags.with("year", year.to_string());
    }
    tags.render("header", header_template(license))
}

/// Render a body template whose `{{header}}` placeholder nests the shared
/// copyright header for `license`.
pub fn render_with_header(
    name: &'static str,
    body: &'static str,
    license: License,
    tags: &TagSet,
    comment: &str,
) -> Result<String, DomainError> {
    let header = render_header(license, tags, comment, None)?;
    tags.with("comment", comment)
        .with("header", header)
        .render(name, body)
}

// ── Update-path rewriting ─────────────────────────────────────────────────────

/// A 4-digit token following the grant wording of a copyright/copyleft line.
static GRANT_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Copyright|Written in)\s+(\d{4})\b").expect("year pattern is valid")
});

/// Extract the creation year from an existing header block.
pub fn extract_year(header: &str) -> Option<i32> {
    GRANT_YEAR_RE
        .captures(header)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Split content into its leading comment block and the remainder.
///
/// The header is the run of lines starting with `comment` at the top of the
/// file; it is empty when the file does not begin with a comment.
pub fn split_leading_comments<'a>(content: &'a str, comment: &str) -> (&'a str, &'a str) {
    let mut end = 0;
    for line in content.split_inclusive('\n') {
        if line.starts_with(comment) {
            end += line.len();
        } else {
            break;
        }
    }
    content.split_at(end)
}

/// Rewrite a source or build file for an update pass: splice in the header
/// for `license` (preserving the original year) and replace the old package
/// name wherever it appears as a standalone token.
pub fn rewrite_source(
    content: &str,
    comment: &str,
    old_package: &str,
    license: License,
    tags: &TagSet,
) -> Result<String, DomainError> {
    let (old_header, rest) = split_leading_comments(content, comment);
    let year = extract_year(old_header);

    let header = render_header(license, tags, comment, year)?;

    let mut rest = rest.to_string();
    if let Some(new_package) = tags.get("package_name") {
        if old_package != new_package {
            rest = replace_token(&rest, old_package, new_package);
        }
    }

    let separator = if rest.starts_with('\n') || rest.is_empty() {
        ""
    } else {
        "\n"
    };
    Ok(format!("{header}{separator}{rest}"))
}

/// Rewrite a documentation file: old display name → new display name, old
/// license display name → new license display name. Everything else is
/// preserved byte for byte.
pub fn rewrite_doc(content: &str, changes: &crate::domain::changeset::ChangeSet) -> String {
    let mut out = content.to_string();
    if let Some(change) = &changes.project_name {
        out = out.replace(&change.old, &change.new);
    }
    if let Some(change) = &changes.license {
        if let (Ok(old), Ok(new)) = (
            change.old.parse::<License>(),
            change.new.parse::<License>(),
        ) {
            out = out.replace(old.full_name(), new.full_name());
        }
    }
    out
}

/// Replace `old` with `new` only where it appears as a whole token
/// (package declarations, import paths, Makefile TARG/GOFILES entries).
fn replace_token(content: &str, old: &str, new: &str) -> String {
    // The pattern is built from a validated package name; escaping keeps
    // this robust if validation ever loosens.
    match Regex::new(&format!(r"\b{}\b", regex::escape(old))) {
        Ok(re) => re.replace_all(content, new).into_owned(),
        Err(_) => content.replace(old, new),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::changeset::{Change, ChangeSet};
    use crate::domain::metadata::ProjectMetadata;
    use crate::domain::value_objects::{ProjectKind, Vcs};

    fn tags_for(license: License) -> TagSet {
        let meta = ProjectMetadata {
            kind: ProjectKind::Pkg,
            project_name: "Go-Tool".into(),
            package_name: "tool".into(),
            license,
            vcs: Vcs::Git,
            author: "Ada".into(),
            author_email: "ada@example.org".into(),
            version: String::new(),
            summary: String::new(),
            download_url: String::new(),
            home_page: String::new(),
            keywords: String::new(),
        };
        TagSet::from_metadata(&meta, 2010)
    }

    // ── headers ───────────────────────────────────────────────────────────

    #[test]
    fn bsd_header_names_license_and_year() {
        let header = render_header(License::Bsd2, &tags_for(License::Bsd2), "//", None).unwrap();
        assert!(header.starts_with("// Copyright 2010  The \"Go-Tool\" Authors"));
        assert!(header.contains("BSD 2-Clause License"));
        assert!(!header.contains("{{"));
    }

    #[test]
    fn gnu_header_inserts_family_variant() {
        let lgpl = render_header(License::Lgpl3, &tags_for(License::Lgpl3), "//", None).unwrap();
        assert!(lgpl.contains("GNU Lesser General Public License"));

        let agpl = render_header(License::Agpl3, &tags_for(License::Agpl3), "//", None).unwrap();
        assert!(agpl.contains("GNU Affero General Public License"));

        let gpl = render_header(License::Gpl3, &tags_for(License::Gpl3), "//", None).unwrap();
        assert!(gpl.contains("GNU General Public License"));
    }

    #[test]
    fn cc0_header_uses_copyleft_wording() {
        let header = render_header(License::Cc0, &tags_for(License::Cc0), "//", None).unwrap();
        assert!(header.starts_with("// Written in 2010 by the \"Go-Tool\" Authors"));
        assert!(!header.contains("Copyright"));
    }

    #[test]
    fn none_header_is_a_single_copyright_line() {
        let header = render_header(License::None, &tags_for(License::None), "//", None).unwrap();
        assert_eq!(header.lines().count(), 1);
    }

    #[test]
    fn explicit_year_overrides_tag_year() {
        let header =
            render_header(License::Bsd2, &tags_for(License::Bsd2), "//", Some(1999)).unwrap();
        assert!(header.contains("Copyright 1999"));
    }

    #[test]
    fn makefile_header_uses_hash_comments() {
        let header = render_header(License::Bsd2, &tags_for(License::Bsd2), "#", None).unwrap();
        assert!(header.starts_with("# Copyright"));
        assert!(!header.contains("//"));
    }

    // ── nesting ───────────────────────────────────────────────────────────

    #[test]
    fn pkg_stub_nests_header_before_package_clause() {
        let out =
            render_with_header("pkg", SRC_PKG, License::Bsd2, &tags_for(License::Bsd2), "//")
                .unwrap();
        assert!(out.starts_with("// Copyright 2010"));
        assert!(out.contains("\npackage tool\n"));
    }

    #[test]
    fn cmd_stub_declares_package_main() {
        let out =
            render_with_header("cmd", SRC_CMD, License::Bsd2, &tags_for(License::Bsd2), "//")
                .unwrap();
        assert!(out.contains("\npackage main\n"));
    }

    #[test]
    fn makefile_references_package_sources() {
        let out = render_with_header(
            "makefile",
            MAKEFILE_PKG,
            License::Bsd2,
            &tags_for(License::Bsd2),
            "#",
        )
        .unwrap();
        assert!(out.contains("TARG=tool"));
        assert!(out.contains("tool.go"));
        assert!(out.contains("Make.pkg"));
    }

    // ── year extraction ───────────────────────────────────────────────────

    #[test]
    fn year_is_extracted_from_copyright_line() {
        assert_eq!(extract_year("// Copyright 2010  The \"X\" Authors\n"), Some(2010));
    }

    #[test]
    fn year_is_extracted_from_copyleft_line() {
        assert_eq!(extract_year("// Written in 2012 by the \"X\" Authors\n"), Some(2012));
    }

    #[test]
    fn no_grant_line_means_no_year() {
        assert_eq!(extract_year("// just a comment\n"), None);
    }

    // ── splitting ─────────────────────────────────────────────────────────

    #[test]
    fn split_separates_header_from_body() {
        let content = "// a\n// b\n\npackage x\n";
        let (header, rest) = split_leading_comments(content, "//");
        assert_eq!(header, "// a\n// b\n");
        assert_eq!(rest, "\npackage x\n");
    }

    #[test]
    fn split_without_header_is_all_body() {
        let content = "package x\n";
        let (header, rest) = split_leading_comments(content, "//");
        assert_eq!(header, "");
        assert_eq!(rest, content);
    }

    // ── update rewriting ──────────────────────────────────────────────────

    #[test]
    fn rewrite_swaps_header_family_and_keeps_year() {
        let original = render_with_header(
            "pkg",
            SRC_PKG,
            License::Bsd2,
            &tags_for(License::Bsd2),
            "//",
        )
        .unwrap();

        // License change to CC0; tag year is the current update year, the
        // spliced header must keep 2010 from the original grant line.
        let tags = tags_for(License::Cc0).with("year", "2026");
        let updated = rewrite_source(&original, "//", "tool", License::Cc0, &tags).unwrap();

        assert!(updated.starts_with("// Written in 2010 by"));
        assert!(!updated.contains("BSD"));
        assert!(updated.contains("\npackage tool\n"));
    }

    #[test]
    fn rewrite_replaces_package_token() {
        let tags = tags_for(License::Bsd2).with("package_name", "kit");
        let content = "// Copyright 2010  The \"Go-Tool\" Authors\n\npackage tool\n\nvar tooling = 1\n";
        let updated = rewrite_source(content, "//", "tool", License::Bsd2, &tags).unwrap();

        assert!(updated.contains("package kit\n"));
        // "tooling" must survive: only whole tokens are replaced.
        assert!(updated.contains("tooling"));
    }

    #[test]
    fn rewrite_handles_makefiles() {
        let original = render_with_header(
            "makefile",
            MAKEFILE_PKG,
            License::Bsd2,
            &tags_for(License::Bsd2),
            "#",
        )
        .unwrap();

        let tags = tags_for(License::Bsd2).with("package_name", "kit");
        let updated = rewrite_source(&original, "#", "tool", License::Bsd2, &tags).unwrap();
        assert!(updated.contains("TARG=kit"));
        assert!(updated.contains("kit.go"));
    }

    #[test]
    fn doc_rewrite_replaces_display_and_license_names() {
        let changes = ChangeSet {
            project_name: Some(Change::new("Go-Tool", "Go-Kit")),
            license: Some(Change::new("bsd-2", "cc0")),
            ..Default::default()
        };
        let content = "# Go-Tool\n\nLicensed under the BSD 2-Clause License.\n";
        let out = rewrite_doc(content, &changes);
        assert_eq!(
            out,
            "# Go-Kit\n\nLicensed under the Creative Commons CC0, version 1.0 Universal.\n"
        );
    }

    #[test]
    fn every_header_family_renders_without_leftover_placeholders() {
        for license in License::ALL {
            let tags = tags_for(license);
            let header = render_header(license, &tags, "//", None).unwrap();
            assert!(!header.contains("{{"), "leftover placeholder for {license}");
        }
    }
}
