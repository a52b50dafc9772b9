use jiff::civil::DateTime;
use serde::Serialize;
use tera::{Context, Tera};

use nihss_instruments::engine::ScoringEngine;
use nihss_instruments::scoring::ScoreSummary;

use crate::error::ExportError;

/// The built-in plain-text note layout.
pub const CLINICAL_NOTE_TEMPLATE: &str = include_str!("../templates/clinical_note.txt");

const CLINICAL_NOTE_NAME: &str = "clinical_note.txt";

/// `Date/Time:` line format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Shown in the sign-off line when no assessor is known.
pub const ASSESSOR_PLACEHOLDER: &str = "[Name/Grade]";

/// Everything a note template can address.
#[derive(Debug, Clone, Serialize)]
pub struct ClinicalNote {
    pub patient_id: String,
    pub timestamp: String,
    pub assessor: String,
    /// e.g. "1a=3"
    pub coma_trigger: String,
    pub summary: ScoreSummary,
}

impl ClinicalNote {
    pub fn new(engine: &ScoringEngine, patient_id: &str, timestamp: DateTime) -> Self {
        let rule = engine.catalog().coma_rule();
        Self {
            patient_id: single_line(patient_id),
            timestamp: timestamp.strftime(TIMESTAMP_FORMAT).to_string(),
            assessor: ASSESSOR_PLACEHOLDER.to_string(),
            coma_trigger: format!("{}={}", rule.trigger_item, rule.trigger_points),
            summary: engine.summary(),
        }
    }

    pub fn with_assessor(mut self, assessor: Option<&str>) -> Self {
        if let Some(name) = assessor.map(single_line).filter(|n| !n.is_empty()) {
            self.assessor = name;
        }
        self
    }
}

/// Free-text fields land on a single note line; control characters become spaces.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Render a Tera template with a ClinicalNote.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The note fields become the template context variables.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    note: &ClinicalNote,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(note)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    tracing::debug!(
        template = template_name,
        total = note.summary.total,
        bytes = rendered.len(),
        "clinical note rendered"
    );
    Ok(rendered)
}

/// Render a note with the built-in layout.
pub fn render_note(note: &ClinicalNote) -> Result<String, ExportError> {
    render_template(CLINICAL_NOTE_NAME, CLINICAL_NOTE_TEMPLATE, note)
}

/// Render the current assessment as a plain-text clinical note.
pub fn render(
    engine: &ScoringEngine,
    patient_id: &str,
    timestamp: DateTime,
) -> Result<String, ExportError> {
    render_note(&ClinicalNote::new(engine, patient_id, timestamp))
}
