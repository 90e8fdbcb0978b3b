//! # OpsForge Review Report Assembly
//!
//! File: cli/src/commands/review/report.rs
//!
//! ## Overview
//!
//! This module owns the markdown skeleton of the bulk review report and the
//! view structs it is rendered from. The report is a write-once document: a
//! header block, the review prompt echoed verbatim, one subsection per
//! discovered file (in discovery order) with reviewer placeholders, and a
//! closing next-steps block.
//!
//! ## Architecture
//!
//! Rendering goes through `core::templating` (Tera). The view carries the
//! generation timestamp as a plain string injected by the caller, which
//! keeps `render_report` a pure function — two renders of the same view are
//! byte-identical.
//!
use crate::core::error::Result;
use crate::core::templating;
use serde::Serialize;

use super::discover::FileRecord;

/// Paragraph used in place of the prompt when no prompt file exists.
pub const MISSING_PROMPT_TEXT: &str =
    "_No prompt file was found. Supply one with `-p` to embed review instructions here._";

/// The embedded report skeleton. One `{% for %}` section per file record.
const REPORT_SKELETON: &str = r#"# Bulk Review Report

- **Generated:** {{ generated_at }}
- **Target directory:** {{ target_dir }}
- **Files reviewed:** {{ file_count }}
- **Prompt file:** {{ prompt_path }}
- **Type filter:** {{ type_filter }}

## Review Prompt

{{ prompt_text }}

---
{% for file in files %}
## `{{ file.path }}`

- **Type:** {{ file.file_type }}
- **Size:** {{ file.byte_size }} bytes
- **Lines:** {{ file.line_count }}

### Checklist

- [ ] Inputs and variables validated
- [ ] No secrets or credentials in source
- [ ] Least-privilege access and permissions
- [ ] Errors handled and surfaced

### Issues Found

_To be filled in by the reviewer._

### Recommendations

_To be filled in by the reviewer._
{% endfor %}
---

## Next Steps

1. Work through each file section and replace the placeholders.
2. Open follow-up issues for every confirmed finding.
3. Re-run the review after fixes land.
"#;

/// Everything the report skeleton needs, in render-ready form.
#[derive(Serialize, Debug)]
pub struct ReportView {
    pub generated_at: String,
    pub target_dir: String,
    pub file_count: usize,
    pub prompt_path: String,
    pub type_filter: String,
    pub prompt_text: String,
    pub files: Vec<FileSection>,
}

/// One file subsection, derived from a `FileRecord`.
#[derive(Serialize, Debug)]
pub struct FileSection {
    pub path: String,
    pub file_type: String,
    pub byte_size: u64,
    pub line_count: usize,
}

impl From<&FileRecord> for FileSection {
    fn from(record: &FileRecord) -> Self {
        FileSection {
            path: record.path.display().to_string(),
            file_type: record.file_type.to_string(),
            byte_size: record.byte_size,
            line_count: record.line_count,
        }
    }
}

/// Renders the full report document from a view. Pure: same view, same
/// bytes.
pub fn render_report(view: &ReportView) -> Result<String> {
    let context = templating::context_from(view)?;
    templating::render_skeleton(REPORT_SKELETON, &context)
}
