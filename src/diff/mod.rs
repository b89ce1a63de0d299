//! Section-level diff between two versions of a markdown document.
//!
//! Documents are split into header-delimited sections which are then aligned
//! as opaque units along a longest common subsequence. A section that differs by
//! a single character counts as removed in its old form and added in its new one.
//!
//! The update pipeline only logs the result. It never decides what reaches the
//! graph store; a later product decision could map `removed` to invalidations.

mod lcs;
mod sections;

pub use lcs::{opcodes, OpTag, Opcode};
pub use sections::{split_sections, HEADER_MARKER};

/// Sections added and removed between two versions, each in its document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SectionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compute the sections added to and removed from `old_text` to obtain `new_text`.
///
/// `Delete` and `Replace` runs contribute their old sections to `removed`;
/// `Insert` and `Replace` runs contribute their new sections to `added`.
/// No deduplication.
pub fn diff_sections(old_text: &str, new_text: &str) -> SectionDiff {
    let old_sections = split_sections(old_text);
    let new_sections = split_sections(new_text);

    let mut diff = SectionDiff::default();
    for op in opcodes(&old_sections, &new_sections) {
        if matches!(op.tag, OpTag::Replace | OpTag::Delete) {
            diff.removed
                .extend(old_sections[op.old].iter().map(|s| s.to_string()));
        }
        if matches!(op.tag, OpTag::Replace | OpTag::Insert) {
            diff.added
                .extend(new_sections[op.new].iter().map(|s| s.to_string()));
        }
    }

    diff
}

/// First line of a section, for log output
pub(crate) fn section_title(section: &str) -> &str {
    section.lines().next().unwrap_or("")
}
