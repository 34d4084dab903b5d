use cik_spider::html::extract_pre_sections;

// Extraction behaviour over well-formed, truncated and empty documents.

#[test]
fn well_formed_pairs_in_order() {
    let html = "<html><pre> first </pre><p>noise</p><pre>second</pre><pre>\nthird\n</pre></html>";
    assert_eq!(extract_pre_sections(html), vec!["first", "second", "third"]);
}

#[test]
fn unterminated_start_keeps_prefix() {
    let html = "<pre>kept</pre><pre>dropped: no close tag follows";
    assert_eq!(extract_pre_sections(html), vec!["kept"]);
}

#[test]
fn no_markers_yield_nothing() {
    assert!(extract_pre_sections("<html><body>plain</body></html>").is_empty());
    assert!(extract_pre_sections("").is_empty());
}

#[test]
fn lone_end_tag_is_ignored() {
    assert!(extract_pre_sections("</pre><p>nothing was opened</p>").is_empty());
}

#[test]
fn sections_are_trimmed_but_inner_lines_survive() {
    let html = "<pre>\n  line one\n  line two  \n</pre>";
    assert_eq!(extract_pre_sections(html), vec!["line one\n  line two"]);
}

#[test]
fn empty_section_is_still_emitted() {
    let html = "<pre></pre><pre>data</pre>";
    assert_eq!(extract_pre_sections(html), vec!["", "data"]);
}

#[test]
fn multibyte_text_around_markers() {
    let html = "Société Générale <pre>café &amp; crème</pre> naïve";
    assert_eq!(extract_pre_sections(html), vec!["café &amp; crème"]);
}
