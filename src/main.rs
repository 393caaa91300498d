//! Tabula - a small spreadsheet on the command line

mod config;

use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use config::Config;
use tabula_core::analysis::{analysis_data, analysis_prompt};
use tabula_core::{Sheet, TabulaError};
use tabula_engine::builtins::RANGE_BUILTINS;
use tabula_engine::engine::{ERROR_MARKER, FORMULA_MARKER, evaluate, is_formula};

fn print_usage() {
    eprintln!("Usage: tabula [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Sheet to open (.tab, or .csv to import)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <CELL=VALUE>    Set a cell before anything else (can be repeated)");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula against the sheet and print it");
    eprintln!("  -o, --output <FILE>       Export display values to CSV");
    eprintln!("  -w, --write               Save the sheet back to FILE");
    eprintln!("  --analysis-prompt         Print the AI-analysis prompt for the sheet");
    eprintln!("  --config <FILE>           Load configuration from FILE");
    eprintln!("  --no-config               Ignore the user configuration file");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Range functions:");
    for builtin in RANGE_BUILTINS {
        eprintln!("  {:<24}  {}", format!("{}(A1:B2)", builtin.sheet_name), builtin.description);
    }
}

#[derive(Debug, Default, PartialEq)]
struct Cli {
    file_path: Option<PathBuf>,
    sets: Vec<(String, String)>,
    command: Option<String>,
    output_file: Option<PathBuf>,
    write: bool,
    analysis_prompt: bool,
    config_file: Option<PathBuf>,
    no_config: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Cli> {
    let mut cli = Cli::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                cli.help = true;
                return Ok(cli);
            }
            "-s" | "--set" => {
                i += 1;
                let Some(arg) = args.get(i) else {
                    bail!("--set requires CELL=VALUE");
                };
                let Some((cell, value)) = arg.split_once('=') else {
                    bail!("--set expects CELL=VALUE, got '{}'", arg);
                };
                cli.sets.push((cell.trim().to_string(), value.to_string()));
            }
            "-c" | "--command" => {
                i += 1;
                let Some(arg) = args.get(i) else {
                    bail!("--command requires a formula");
                };
                cli.command = Some(arg.clone());
            }
            "-o" | "--output" => {
                i += 1;
                let Some(arg) = args.get(i) else {
                    bail!("--output requires a file path");
                };
                cli.output_file = Some(PathBuf::from(arg));
            }
            "-w" | "--write" => cli.write = true,
            "--analysis-prompt" => cli.analysis_prompt = true,
            "--config" => {
                i += 1;
                let Some(arg) = args.get(i) else {
                    bail!("--config requires a file path");
                };
                cli.config_file = Some(PathBuf::from(arg));
            }
            "--no-config" => cli.no_config = true,
            arg if arg.starts_with('-') && arg.len() > 1 => {
                bail!("Unknown option: {}", arg);
            }
            arg => {
                if cli.file_path.is_some() {
                    bail!("Unexpected argument: {}", arg);
                }
                cli.file_path = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    if cli.write && cli.file_path.is_none() {
        bail!("--write needs a FILE to save to");
    }
    Ok(cli)
}

/// Prefix the formula marker unless the user already typed it.
fn as_formula(command: &str) -> String {
    if is_formula(command) {
        command.to_string()
    } else {
        format!("{}{}", FORMULA_MARKER, command)
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = if cli.no_config {
        Config::default()
    } else {
        Config::load(cli.config_file.as_deref())?
    };

    let mut sheet = Sheet::with_file(cli.file_path.clone(), config.sheet.rows, config.sheet.cols)
        .with_context(|| match &cli.file_path {
            Some(p) => format!("Failed to open {}", p.display()),
            None => "Failed to create sheet".to_string(),
        })?;

    for (cell, value) in &cli.sets {
        sheet.set_cell_by_name(cell, value)?;
    }

    let mut acted = false;
    let mut status = ExitCode::SUCCESS;

    if let Some(command) = &cli.command {
        acted = true;
        let display = evaluate(&as_formula(command), &sheet.store);
        println!("{}", display);
        if display == ERROR_MARKER {
            status = ExitCode::FAILURE;
        }
    }

    if cli.analysis_prompt {
        acted = true;
        let data = analysis_data(&sheet.store);
        if data.is_empty() {
            return Err(TabulaError::EmptySheet.into());
        }
        eprintln!("Prompt for {}:", config.analysis.model);
        println!("{}", analysis_prompt(&config.analysis.prompt_template, &data));
    }

    if let Some(output_path) = &cli.output_file {
        acted = true;
        sheet
            .export_csv(output_path)
            .with_context(|| format!("Failed to export {}", output_path.display()))?;
        eprintln!("Exported to {}", output_path.display());
    }

    if cli.write {
        acted = true;
        let path = sheet.save_file()?;
        eprintln!("Saved {}", path.display());
    }

    if !acted {
        for (cell_ref, raw) in sheet.store.values() {
            println!("{}: {} => {}", cell_ref, raw, evaluate(raw, &sheet.store));
        }
    }

    Ok(status)
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };
    if cli.help {
        print_usage();
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
