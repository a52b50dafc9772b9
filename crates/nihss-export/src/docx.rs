use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Generate a DOCX document from a rendered plain-text clinical note.
///
/// Line conventions of the note layout:
/// - the first non-empty line → Heading 1
/// - an upper-case line ending in `:` (e.g. `PLAN:`) → Heading 2
/// - `- item` → bullet paragraph
/// - a line of dashes → dropped (sections are separated by headings)
/// - `Label: value` → paragraph with the label in bold
/// - everything else → normal paragraph
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size));

    let mut title_done = false;
    let mut paragraphs = 0usize;
    for line in rendered.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.chars().all(|c| c == '-') {
            continue;
        }

        let para = if !title_done {
            title_done = true;
            heading_paragraph(trimmed, "Heading1", styles)
        } else if is_section_heading(trimmed) {
            heading_paragraph(trimmed.trim_end_matches(':'), "Heading2", styles)
        } else if let Some(text) = trimmed.strip_prefix("- ") {
            bullet_paragraph(text, styles)
        } else if let Some((label, value)) = trimmed.split_once(": ") {
            labelled_paragraph(label, value, styles)
        } else {
            body_paragraph(trimmed, styles)
        };
        docx = docx.add_paragraph(para);
        paragraphs += 1;
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    tracing::debug!(paragraphs, "clinical note converted to DOCX");
    Ok(buf.into_inner())
}

fn is_section_heading(line: &str) -> bool {
    line.ends_with(':')
        && line
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(|c| c.is_uppercase())
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
}

fn text_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

fn heading_paragraph(text: &str, style_id: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style(style_id).add_run(
        Run::new()
            .add_text(text)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let para = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(text_run("\u{2022} ", styles));
    match text.split_once(": ") {
        Some((label, value)) => para
            .add_run(text_run(&format!("{label}: "), styles))
            .add_run(text_run(value, styles).bold()),
        None => para.add_run(text_run(text, styles)),
    }
}

fn labelled_paragraph(label: &str, value: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(text_run(&format!("{label}: "), styles).bold())
        .add_run(text_run(value, styles))
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(text_run(text, styles))
}
