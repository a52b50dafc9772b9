use docx_rs::{read_docx, DocumentChild, Paragraph};
use jiff::civil::date;
use nihss_export::docx::generate_docx;
use nihss_export::render::render;
use nihss_export::styles::DocumentStyles;
use nihss_instruments::instruments::nihss::Nihss;
use nihss_instruments::Instrument;

fn coma_note_docx() -> Vec<u8> {
    let mut engine = Nihss.engine();
    engine.set_item("1a", 3).unwrap();
    let note = render(&engine, "JD", date(2026, 3, 14).at(9, 5, 0, 0)).unwrap();
    generate_docx(&note, &DocumentStyles::default()).unwrap()
}

/// (style id, text) for every body paragraph.
fn paragraphs(bytes: &[u8]) -> Vec<(Option<String>, String)> {
    let docx = read_docx(bytes).unwrap();
    docx.document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(describe(p)),
            _ => None,
        })
        .collect()
}

fn describe(p: &Paragraph) -> (Option<String>, String) {
    let style = p.property.style.as_ref().map(|s| s.val.clone());
    (style, p.raw_text())
}

fn with_style<'a>(paras: &'a [(Option<String>, String)], id: &str) -> Vec<&'a str> {
    paras
        .iter()
        .filter(|(style, _)| style.as_deref() == Some(id))
        .map(|(_, text)| text.as_str())
        .collect()
}

#[test]
fn note_converts_to_a_zip_container() {
    // DOCX is a ZIP archive
    assert!(coma_note_docx().starts_with(b"PK"));
}

#[test]
fn title_and_section_headings_get_heading_styles() {
    let paras = paragraphs(&coma_note_docx());

    assert_eq!(
        with_style(&paras, "Heading1"),
        ["NIH STROKE SCALE (NIHSS) ASSESSMENT"]
    );
    assert_eq!(
        with_style(&paras, "Heading2"),
        ["DETAILED BREAKDOWN", "PLAN"]
    );
    assert_eq!(paras[0].0.as_deref(), Some("Heading1"), "title comes first");
}

#[test]
fn breakdown_lines_become_bullets_and_rules_are_dropped() {
    let paras = paragraphs(&coma_note_docx());

    let breakdown: Vec<&str> = paras
        .iter()
        .skip_while(|(_, text)| text != "DETAILED BREAKDOWN")
        .skip(1)
        .take_while(|(style, _)| style.as_deref() != Some("Heading2"))
        .map(|(_, text)| text.as_str())
        .filter(|text| text.starts_with('\u{2022}'))
        .collect();
    assert_eq!(breakdown.len(), 15);
    assert!(breakdown[0].contains("1a. Level of Consciousness"));
    assert!(breakdown[0].ends_with('3'));

    assert!(paras.iter().all(|(_, text)| !text.trim().chars().all(|c| c == '-')));
    assert!(paras.iter().any(|(_, text)| text == "TOTAL NIHSS SCORE: 35 / 42"));
    assert!(paras.iter().any(|(_, text)| text == "NOTE: Coma defaults applied (1a=3)"));
}

#[test]
fn empty_input_still_produces_a_document() {
    let bytes = generate_docx("", &DocumentStyles::default()).unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert!(with_style(&paragraphs(&bytes), "Heading1").is_empty());
}
