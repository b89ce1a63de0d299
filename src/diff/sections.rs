/// First character of a line that opens a new section
pub const HEADER_MARKER: char = '#';

/// Split text into header-delimited sections.
///
/// Lines are separated on `'\n'`. A new section starts at every line beginning
/// with [`HEADER_MARKER`], except when nothing has been accumulated yet, so the
/// first section may itself open with a header. Each section is the original
/// slice of its lines re-joined with `'\n'`: the newline that precedes the next
/// header belongs to neither section, and the last section keeps the document's
/// trailing newline if there is one.
///
/// Empty text has no sections.
pub fn split_sections(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split('\n') {
        // offset > start: at least one line is already in the current section
        if offset > start && line.starts_with(HEADER_MARKER) {
            sections.push(&text[start..offset - 1]);
            start = offset;
        }
        offset += line.len() + 1;
    }
    sections.push(&text[start..]);

    sections
}
