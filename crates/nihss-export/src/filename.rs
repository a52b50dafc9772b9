use jiff::civil::Date;

/// Filename for an exported note: `NIHSS_<patientId>_<YYYY-MM-DD>.<extension>`.
///
/// Anything outside `[A-Za-z0-9_-]` in the patient id becomes `_` so the
/// id cannot introduce path separators.
pub fn report_filename(patient_id: &str, date: Date, extension: &str) -> String {
    let safe: String = patient_id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("NIHSS_{safe}_{date}.{extension}")
}
