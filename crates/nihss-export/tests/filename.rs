use jiff::civil::date;
use nihss_export::filename::report_filename;

#[test]
fn follows_nihss_patient_date_pattern() {
    assert_eq!(
        report_filename("JD", date(2026, 10, 17), "txt"),
        "NIHSS_JD_2026-10-17.txt"
    );
}

#[test]
fn path_characters_are_replaced() {
    assert_eq!(
        report_filename("../a b", date(2026, 1, 2), "docx"),
        "NIHSS____a_b_2026-01-02.docx"
    );
}

#[test]
fn empty_patient_id_is_kept_empty() {
    assert_eq!(
        report_filename("", date(2026, 1, 2), "txt"),
        "NIHSS__2026-01-02.txt"
    );
}
