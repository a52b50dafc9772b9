use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use eyre::eyre;
use serde::Serialize;

use nihss_export::docx::generate_docx;
use nihss_export::filename::report_filename;
use nihss_export::render::{render_note, ClinicalNote};
use nihss_export::styles::DocumentStyles;
use nihss_instruments::engine::ScoringEngine;
use nihss_instruments::scoring::ScoreEntry;
use nihss_instruments::{get_instrument, Instrument};

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::config::{self, NihssConfig, ReportFormat};
use crate::session::{read_line, run_session, SessionOutcome};

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Serialize)]
struct WrittenReport {
    path: PathBuf,
    total: u32,
    interpretation: String,
}

fn print_json<T: Serialize>(data: T) -> eyre::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

const INSTRUMENT_ID: &str = "nihss";

pub fn run(cli: Cli) -> eyre::Result<()> {
    let instrument = get_instrument(INSTRUMENT_ID)
        .ok_or_else(|| eyre!("instrument '{INSTRUMENT_ID}' is not registered"))?;
    let instrument = instrument.as_ref();
    match cli.command {
        Commands::Items => list_items(instrument, cli.json),
        Commands::Score { selections } => {
            let engine = scored_engine(instrument, &selections)?;
            print_score(&engine, cli.json)
        }
        Commands::Report {
            selections,
            patient_id,
            assessor,
            out,
            format,
            stdout,
        } => {
            let cfg = config::load_config()?;
            let engine = scored_engine(instrument, &selections)?;
            let format = format.unwrap_or(cfg.default_format);
            let assessor = assessor.or(cfg.assessor.clone());
            let now = jiff::Zoned::now().datetime();
            let note = ClinicalNote::new(&engine, &patient_id, now)
                .with_assessor(assessor.as_deref());
            let text = render_note(&note)?;

            if stdout {
                if format == ReportFormat::Docx {
                    return Err(eyre!("--stdout only supports the text format"));
                }
                print!("{text}");
                return Ok(());
            }

            let dir = output_dir(out, &cfg);
            let path = write_note(&dir, &note.patient_id, now.date(), format, &text)?;
            if cli.json {
                print_json(WrittenReport {
                    path,
                    total: note.summary.total,
                    interpretation: note.summary.interpretation.label,
                })
            } else {
                println!("wrote {}", path.display());
                Ok(())
            }
        }
        Commands::Assess {
            patient_id,
            assessor,
            out,
        } => {
            let cfg = config::load_config()?;
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout().lock();
            assess(instrument, &cfg, patient_id, assessor, out, &mut input, &mut output)
        }
        Commands::Config { command } => run_config(command, cli.json),
    }
}

/// Validate every selection up front, then apply them in order.
fn scored_engine(
    instrument: &dyn Instrument,
    selections: &[ScoreEntry],
) -> eyre::Result<ScoringEngine> {
    let errors = instrument.validate_entries(selections);
    if !errors.is_empty() {
        let messages = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(eyre!("invalid selections:\n{messages}"));
    }

    let mut engine = instrument.engine();
    for entry in selections {
        engine.apply(entry)?;
    }
    Ok(engine)
}

fn list_items(instrument: &dyn Instrument, json: bool) -> eyre::Result<()> {
    let catalog = instrument.catalog();
    if json {
        return print_json(catalog);
    }

    println!("{} (max {})", instrument.name(), catalog.max_total());
    for item in catalog.items() {
        println!("{}\t{}", item.id, item.name);
        for option in &item.options {
            let score = if option.untestable {
                "UN".to_string()
            } else {
                option.points.to_string()
            };
            println!("\t{score}\t{}", option.label);
        }
    }
    let rule = catalog.coma_rule();
    let defaults = rule
        .overrides
        .iter()
        .map(|o| format!("{}={}", o.item_id, o.points))
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "coma defaults when {}={}: {defaults}",
        rule.trigger_item, rule.trigger_points
    );
    Ok(())
}

fn print_score(engine: &ScoringEngine, json: bool) -> eyre::Result<()> {
    if json {
        return print_json(engine.summary());
    }

    let catalog = engine.catalog();
    println!(
        "NIHSS Total Score: {} / {}",
        engine.total(),
        catalog.max_total()
    );
    println!("Interpretation: {}", engine.interpretation().label);
    if engine.is_coma_active() {
        let rule = catalog.coma_rule();
        println!(
            "Coma defaults applied ({}={}). Locked: {}",
            rule.trigger_item,
            rule.trigger_points,
            engine.locked_items().join(", ")
        );
    }
    Ok(())
}

fn output_dir(out: Option<PathBuf>, cfg: &NihssConfig) -> PathBuf {
    out.or_else(|| cfg.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn write_note(
    dir: &Path,
    patient_id: &str,
    date: jiff::civil::Date,
    format: ReportFormat,
    text: &str,
) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let bytes = match format {
        ReportFormat::Text => text.as_bytes().to_vec(),
        ReportFormat::Docx => generate_docx(text, &DocumentStyles::default())?,
    };

    let path = dir.join(report_filename(patient_id, date, format.extension()));
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, &bytes)?;
    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "clinical note written");
    Ok(path)
}

fn assess<R: BufRead, W: Write>(
    instrument: &dyn Instrument,
    cfg: &NihssConfig,
    patient_id: Option<String>,
    assessor: Option<String>,
    out: Option<PathBuf>,
    input: &mut R,
    output: &mut W,
) -> eyre::Result<()> {
    let patient_id = match patient_id {
        Some(id) => id,
        None => {
            write!(output, "Patient initials: ")?;
            output.flush()?;
            read_line(input)?.unwrap_or_default()
        }
    };

    let mut engine = instrument.engine();
    if run_session(&mut engine, input, output)? == SessionOutcome::Aborted {
        writeln!(output)?;
        writeln!(output, "Assessment abandoned; nothing saved.")?;
        return Ok(());
    }

    let assessor = assessor.or(cfg.assessor.clone());
    let now = jiff::Zoned::now().datetime();
    let note = ClinicalNote::new(&engine, &patient_id, now).with_assessor(assessor.as_deref());
    let text = render_note(&note)?;
    writeln!(output)?;
    write!(output, "{text}")?;

    if let Some(dir) = out {
        let path = write_note(&dir, &note.patient_id, now.date(), cfg.default_format, &text)?;
        writeln!(output, "wrote {}", path.display())?;
    }
    Ok(())
}

fn run_config(command: ConfigCommands, json: bool) -> eyre::Result<()> {
    match command {
        ConfigCommands::Show => {
            let cfg = config::load_config()?;
            if json {
                return print_json(cfg);
            }
            println!("path: {}", config::config_path()?.display());
            println!(
                "assessor: {}",
                cfg.assessor.as_deref().unwrap_or("(not set)")
            );
            println!(
                "output_dir: {}",
                cfg.output_dir
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(current directory)".to_string())
            );
            println!("default_format: {}", cfg.default_format.extension());
            Ok(())
        }
        ConfigCommands::Set {
            assessor,
            output_dir,
            format,
        } => {
            let mut cfg = config::load_config()?;
            if let Some(name) = assessor {
                cfg.assessor = Some(name);
            }
            if let Some(dir) = output_dir {
                cfg.output_dir = Some(dir);
            }
            if let Some(format) = format {
                cfg.default_format = format;
            }
            let path = config::save_config(&cfg)?;
            println!("config saved to {}", path.display());
            Ok(())
        }
        ConfigCommands::Reset => {
            if config::delete_config()? {
                println!("config removed");
            } else {
                println!("no config to remove");
            }
            Ok(())
        }
    }
}
