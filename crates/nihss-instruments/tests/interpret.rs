use nihss_instruments::scoring::{interpret, Severity, SeverityClass};

#[test]
fn zero_is_no_symptoms() {
    let i = interpret(0);
    assert_eq!(i.label, "No Stroke Symptoms");
    assert_eq!(i.severity, Severity::NoSymptoms);
    assert_eq!(i.class, SeverityClass::Normal);
}

#[test]
fn minor_band_edges() {
    assert_eq!(interpret(1).label, "Minor Stroke");
    assert_eq!(interpret(4).label, "Minor Stroke");
    assert_eq!(interpret(4).class, SeverityClass::Normal);
}

#[test]
fn moderate_band_edges() {
    assert_eq!(interpret(5).label, "Moderate Stroke");
    assert_eq!(interpret(15).label, "Moderate Stroke");
    assert_eq!(interpret(5).class, SeverityClass::Elevated);
}

#[test]
fn moderate_to_severe_band_edges() {
    assert_eq!(interpret(16).label, "Moderate to Severe");
    assert_eq!(interpret(20).label, "Moderate to Severe");
}

#[test]
fn severe_band_edges() {
    assert_eq!(interpret(21).label, "Severe Stroke");
    assert_eq!(interpret(42).label, "Severe Stroke");
    assert_eq!(interpret(42).class, SeverityClass::Elevated);
}

#[test]
fn every_total_maps_to_its_severity_label() {
    for total in 0..=42 {
        let i = interpret(total);
        assert_eq!(i.label, i.severity.label());
        assert_eq!(i.class, i.severity.class());
    }
}
