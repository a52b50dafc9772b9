use jiff::civil::date;
use nihss_export::render::{render, render_template, ClinicalNote, ASSESSOR_PLACEHOLDER};
use nihss_instruments::engine::ScoringEngine;
use nihss_instruments::instruments::nihss::Nihss;
use nihss_instruments::scoring::ScoreEntry;
use nihss_instruments::Instrument;

fn timestamp() -> jiff::civil::DateTime {
    date(2026, 3, 14).at(9, 5, 0, 0)
}

fn item_names() -> Vec<String> {
    Nihss.catalog().items().iter().map(|i| i.name.clone()).collect()
}

fn minor_stroke() -> ScoringEngine {
    let mut engine = Nihss.engine();
    engine.set_item("4", 1).unwrap();
    engine.set_item("8", 1).unwrap();
    engine.set_item("10", 1).unwrap();
    engine
}

#[test]
fn note_has_header_timestamp_patient_and_total() {
    let note = render(&minor_stroke(), "JD", timestamp()).unwrap();
    assert!(note.starts_with("NIH STROKE SCALE (NIHSS) ASSESSMENT\n"));
    assert!(note.contains("Date/Time: 2026-03-14 09:05\n"));
    assert!(note.contains("Patient ID: JD\n"));
    assert!(note.contains("TOTAL NIHSS SCORE: 3 / 42\n"));
    assert!(note.contains("INTERPRETATION: Minor Stroke\n"));
}

#[test]
fn breakdown_lists_every_item_once_in_catalog_order() {
    let note = render(&minor_stroke(), "JD", timestamp()).unwrap();
    let mut last = 0;
    for name in item_names() {
        assert_eq!(note.matches(name.as_str()).count(), 1, "{name}");
        let at = note.find(name.as_str()).unwrap();
        assert!(at > last, "{name} out of order");
        last = at;
    }
    assert!(note.contains("- 4. Facial Palsy: 1\n"));
    assert!(note.contains("- 2. Best Gaze (Oculocephalic): 0\n"));
}

#[test]
fn coma_note_only_when_coma_active() {
    let note = render(&minor_stroke(), "JD", timestamp()).unwrap();
    assert!(!note.contains("Coma defaults applied"));

    let mut engine = Nihss.engine();
    engine.set_item("1a", 3).unwrap();
    let note = render(&engine, "JD", timestamp()).unwrap();
    assert!(note.contains("NOTE: Coma defaults applied (1a=3)\n"));
    assert!(note.contains("TOTAL NIHSS SCORE: 35 / 42\n"));
    assert!(note.contains("INTERPRETATION: Severe Stroke\n"));
    assert!(note.contains("- 5a. Left Arm Motor: 4\n"));
}

#[test]
fn untestable_items_are_marked() {
    let mut engine = Nihss.engine();
    engine.apply(&ScoreEntry::untestable("7")).unwrap();
    let note = render(&engine, "JD", timestamp()).unwrap();
    assert!(note.contains("- 7. Limb Ataxia: 0 (untestable)\n"));
}

#[test]
fn footer_has_plan_assessor_and_disclaimer() {
    let note = render(&Nihss.engine(), "", timestamp()).unwrap();
    assert!(note.contains("PLAN:\n- Clinical correlation required."));
    assert!(note.contains(&format!("Assessed by: {ASSESSOR_PLACEHOLDER}")));
    assert!(note.trim_end().ends_with("local protocols."));
    assert!(note.contains("INTERPRETATION: No Stroke Symptoms"));
}

#[test]
fn assessor_is_used_when_present() {
    let engine = Nihss.engine();
    let note = ClinicalNote::new(&engine, "JD", timestamp()).with_assessor(Some("Dr Roe, ST3"));
    assert_eq!(note.assessor, "Dr Roe, ST3");

    let blank = ClinicalNote::new(&engine, "JD", timestamp()).with_assessor(Some("  "));
    assert_eq!(blank.assessor, ASSESSOR_PLACEHOLDER);
}

#[test]
fn custom_template_sees_the_same_context() {
    let engine = minor_stroke();
    let note = ClinicalNote::new(&engine, "AB", timestamp());
    let out = render_template(
        "short.txt",
        "{{ patient_id }} {{ summary.total }} {{ summary.interpretation.severity }}",
        &note,
    )
    .unwrap();
    assert_eq!(out, "AB 3 minor");
}

#[test]
fn malformed_template_is_a_parse_error() {
    let note = ClinicalNote::new(&Nihss.engine(), "AB", timestamp());
    let err = render_template("bad.txt", "{% for %}", &note).unwrap_err();
    assert!(matches!(err, nihss_export::error::ExportError::TemplateParse(_)));
}

#[test]
fn multi_line_patient_id_cannot_add_note_lines() {
    let mut engine = Nihss.engine();
    engine.set_item("1a", 3).unwrap();
    let note = render(
        &engine,
        "JD\nTOTAL NIHSS SCORE: 0 / 42\r\nINTERPRETATION: No Stroke Symptoms",
        timestamp(),
    )
    .unwrap();

    let totals: Vec<&str> = note
        .lines()
        .filter(|l| l.starts_with("TOTAL NIHSS SCORE"))
        .collect();
    assert_eq!(totals, ["TOTAL NIHSS SCORE: 35 / 42"]);
    assert!(note.lines().any(|l| l.starts_with("Patient ID: JD TOTAL NIHSS SCORE: 0 / 42")));
    assert!(!note.lines().any(|l| l.starts_with("INTERPRETATION: No Stroke")));
}

#[test]
fn assessor_is_flattened_to_one_line() {
    let note = ClinicalNote::new(&minor_stroke(), "JD\t", timestamp())
        .with_assessor(Some("Dr A\nPLAN:"));
    assert_eq!(note.patient_id, "JD");
    assert_eq!(note.assessor, "Dr A PLAN:");

    let blank = ClinicalNote::new(&minor_stroke(), "JD", timestamp()).with_assessor(Some("\n\t"));
    assert_eq!(blank.assessor, ASSESSOR_PLACEHOLDER);
}
