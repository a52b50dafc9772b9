//! Line-oriented interactive assessment.
//!
//! Walks the catalog one item at a time, the way a clinician fills in the
//! form: locked items are shown but skipped, `reset` starts over, and an
//! empty line keeps the current answer. `back` steps to the previous open
//! item and `ITEM=VALUE` rewrites any answer without moving.

use std::io::{BufRead, Write};

use nihss_instruments::engine::ScoringEngine;
use nihss_instruments::scoring::ScoreEntry;

use crate::cli::parse_entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Aborted,
}

enum Input {
    Keep,
    Reset,
    Quit,
    Back,
    Untestable,
    Option(usize),
    Edit(ScoreEntry),
    Invalid(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Input::Keep,
            s if s.eq_ignore_ascii_case("reset") => Input::Reset,
            s if s.eq_ignore_ascii_case("q") || s.eq_ignore_ascii_case("quit") => Input::Quit,
            s if s.eq_ignore_ascii_case("back") || s.eq_ignore_ascii_case("b") => Input::Back,
            s if s.eq_ignore_ascii_case("un") => Input::Untestable,
            s if s.contains('=') => match parse_entry(s) {
                Ok(entry) => Input::Edit(entry),
                Err(e) => Input::Invalid(e),
            },
            s => match s.parse::<usize>() {
                Ok(index) => Input::Option(index),
                Err(_) => Input::Invalid(format!(
                    "'{s}' is not an option; enter a number, UN, ITEM=VALUE, back, reset or q"
                )),
            },
        }
    }
}

/// Read one trimmed line, or `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

pub fn run_session<R: BufRead, W: Write>(
    engine: &mut ScoringEngine,
    input: &mut R,
    out: &mut W,
) -> eyre::Result<SessionOutcome> {
    let catalog = engine.catalog();
    let items = catalog.items();

    let mut position = 0;
    while position < items.len() {
        let item = &items[position];

        if engine.is_locked(&item.id) {
            writeln!(
                out,
                "{}: {} (coma default, locked)",
                item.name,
                engine.value(&item.id)?
            )?;
            position += 1;
            continue;
        }

        writeln!(out)?;
        writeln!(out, "{}", item.name)?;
        if let Some(info) = &item.info {
            writeln!(out, "  i: {info}")?;
        }
        for (index, option) in item.options.iter().enumerate() {
            let score = if option.untestable {
                "UN".to_string()
            } else {
                option.points.to_string()
            };
            writeln!(out, "  [{index}] {score} - {}", option.label)?;
        }
        write!(out, "{} > ", item.id)?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(SessionOutcome::Aborted);
        };

        let was_coma = engine.is_coma_active();
        let result = match Input::parse(&line) {
            Input::Keep => Ok(()),
            Input::Reset => {
                engine.reset();
                writeln!(out, "Calculator reset.")?;
                position = 0;
                continue;
            }
            Input::Quit => return Ok(SessionOutcome::Aborted),
            Input::Back => {
                match (0..position).rev().find(|&p| !engine.is_locked(&items[p].id)) {
                    Some(previous) => position = previous,
                    None => writeln!(out, "  already at the first item")?,
                }
                continue;
            }
            Input::Edit(entry) => {
                match engine.apply(&entry) {
                    Ok(()) => {
                        let points = engine.value(&entry.item_id)?;
                        writeln!(out, "  {} set to {points}", entry.item_id)?;
                        report_coma_change(engine, was_coma, out)?;
                        report_total(engine, out)?;
                    }
                    Err(e) => writeln!(out, "  {e}")?,
                }
                continue;
            }
            Input::Untestable => engine.apply(&ScoreEntry::untestable(item.id.clone())),
            Input::Option(index) => engine.select_option(&item.id, index),
            Input::Invalid(message) => {
                writeln!(out, "  {message}")?;
                continue;
            }
        };

        if let Err(e) = result {
            writeln!(out, "  {e}")?;
            continue;
        }

        report_coma_change(engine, was_coma, out)?;
        report_total(engine, out)?;
        position += 1;
    }

    let interpretation = engine.interpretation();
    writeln!(out)?;
    writeln!(
        out,
        "NIHSS Total Score: {} / {} ({})",
        engine.total(),
        catalog.max_total(),
        interpretation.label
    )?;
    Ok(SessionOutcome::Completed)
}

fn report_coma_change<W: Write>(
    engine: &ScoringEngine,
    was_coma: bool,
    out: &mut W,
) -> eyre::Result<()> {
    let rule = engine.catalog().coma_rule();
    match (was_coma, engine.is_coma_active()) {
        (false, true) => writeln!(
            out,
            "Coma detected ({}={}): coma defaults applied. \
             Best gaze and visual fields still require examination.",
            rule.trigger_item, rule.trigger_points
        )?,
        (true, false) => writeln!(
            out,
            "Coma defaults released; forced answers are kept and can now be changed."
        )?,
        _ => {}
    }
    Ok(())
}

fn report_total<W: Write>(engine: &ScoringEngine, out: &mut W) -> eyre::Result<()> {
    writeln!(
        out,
        "  Running total: {} / {}",
        engine.total(),
        engine.catalog().max_total()
    )?;
    Ok(())
}
