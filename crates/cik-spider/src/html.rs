const START_TAG: &'static str = "<pre>";
const END_TAG: &'static str = "</pre>";

/// Extract the contents of every `<pre>` element from a raw HTML document.
///
/// The SEC lookup page carries its information in `<pre>` elements:
///     - `sections[0]`: header (column descriptions)
///     - `sections[1]`: main table, where each line is a CIK code and a
///       company title
///
/// Sections are returned in appearance order, trimmed of surrounding
/// whitespace. Nested or overlapping tags are not supported; the page only
/// ever produces sequential pairs.
pub fn extract_pre_sections(html: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut cursor = 0;

    // locate and extract all <pre> elements; the tags are ASCII so byte
    // offsets stay on char boundaries
    while let Some(offset) = html[cursor..].find(START_TAG) {
        let content = cursor + offset + START_TAG.len();
        match html[content..].find(END_TAG) {
            Some(end) => {
                sections.push(html[content..content + end].trim());
                cursor = content + end + END_TAG.len();
            }
            // no matching </pre>; error in HTML?
            None => break,
        }
    }

    sections
}
