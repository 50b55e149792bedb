use std::env;
use std::path::{Path, PathBuf};
use trc_engine::config::runtime::FileProcessorPreferences;
use trc_engine::lines::LineBuffer;
use trc_engine::pipeline::{FileResolution, PipelineError};
use trc_engine::{file_processor, logging, pipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize global logging system
    logging::init_global_logging()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <results.log> [more files...] [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[1..]);

    if options.inputs.is_empty() {
        eprintln!("Error: No input files given");
        std::process::exit(1);
    }

    if options.output.is_some() && options.inputs.len() > 1 {
        eprintln!("Error: --output only applies to a single input file");
        std::process::exit(1);
    }

    let mut totals = RunTotals::default();

    for input in &options.inputs {
        match process_single_file(input, &options) {
            Ok(Outcome::Resolved(resolution)) => {
                totals.processed += 1;
                totals.markers += resolution.summary.total;
                totals.unresolved += resolution.summary.unchanged_count;
                if !options.quiet {
                    print_file_summary(input, &resolution, options.json);
                }
            }
            Ok(Outcome::Skipped) => {
                totals.skipped += 1;
                if !options.quiet {
                    println!("{}: no pending markers, skipped", input);
                }
            }
            Err(error) => {
                totals.failed += 1;
                eprintln!("{}: FAILED: {}", input, error);
            }
        }
    }

    if !options.quiet && options.inputs.len() > 1 {
        print_run_totals(&totals);
    }

    if totals.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Debug, Default)]
struct Options {
    inputs: Vec<String>,
    output: Option<PathBuf>,
    json: bool,
    quiet: bool,
}

#[derive(Debug, Default)]
struct RunTotals {
    processed: usize,
    skipped: usize,
    failed: usize,
    markers: usize,
    unresolved: usize,
}

enum Outcome {
    Resolved(FileResolution),
    Skipped,
}

fn print_help(program_name: &str) {
    println!("Test Result Cleaner v{}", env!("CARGO_PKG_VERSION"));
    println!("Resolves pending PASS/FAIL markers in equipment test logs");
    println!();
    println!("USAGE:");
    println!(
        "    {} <results.log>                  # Resolve one log file",
        program_name
    );
    println!(
        "    {} <a.log> <b.log> [options]      # Resolve several files",
        program_name
    );
    println!();
    println!("ARGUMENTS:");
    println!("    <results.log>  Path to a test log containing PASS/FAIL markers");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --output PATH       Write the resolved file to PATH (single input only)");
    println!("    --json              Print per-file summaries as JSON");
    println!("    --quiet             Suppress per-file reporting");
    println!();
    println!("OUTPUT:");
    println!("    Each input is written next to the original as <name>_processed.<ext>");
    println!("    with every decidable PASS/FAIL marker rewritten to PASS or FAIL.");
    println!("    Markers whose context cannot be located or classified are left alone.");
    println!();
    println!("EXAMPLES:");
    println!("    {} results.log", program_name);
    println!("    {} results.log --output cleaned.log", program_name);
    println!("    {} run1.log run2.log --json", program_name);
}

fn parse_options(args: &[String]) -> Options {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => {
                if i + 1 < args.len() {
                    options.output = Some(PathBuf::from(&args[i + 1]));
                    i += 1; // Skip the path argument
                } else {
                    eprintln!("Warning: --output requires a path");
                }
            }
            "--json" => {
                options.json = true;
            }
            "--quiet" => {
                options.quiet = true;
            }
            other if other.starts_with("--") => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            _ => {
                options.inputs.push(args[i].clone());
            }
        }
        i += 1;
    }

    options
}

fn process_single_file(file_path: &str, options: &Options) -> Result<Outcome, PipelineError> {
    let file_result = file_processor::process_file(file_path)?;
    let lines = file_result.lines();

    if !LineBuffer::from_slice(&lines).has_pending_markers() {
        if FileProcessorPreferences::default().log_skipped_files {
            trc_engine::log_info!("File has no pending markers, skipping", "file" => file_path);
        }
        return Ok(Outcome::Skipped);
    }

    let resolution = pipeline::resolve_lines(lines);
    resolution.log_success(file_path);

    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(Path::new(file_path)));
    file_processor::write_output(&output_path, &resolution.lines)?;

    Ok(Outcome::Resolved(resolution))
}

/// `results.log` becomes `results_processed.log` next to the original
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_processed.{}", stem, ext),
        None => format!("{}_processed", stem),
    };
    input.with_file_name(name)
}

fn print_file_summary(file_path: &str, resolution: &FileResolution, json: bool) {
    if json {
        match serde_json::to_string_pretty(&resolution.summary) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => eprintln!("{}: could not render summary: {}", file_path, e),
        }
        return;
    }

    let summary = &resolution.summary;
    println!(
        "{}: {} markers, {} PASS, {} FAIL, {} unchanged ({:.2} ms)",
        file_path,
        summary.total,
        summary.pass_count,
        summary.fail_count,
        summary.unchanged_count,
        resolution.processing_duration.as_secs_f64() * 1000.0
    );

    if !summary.fail_lines.is_empty() {
        println!(
            "  FAIL at lines: {}",
            format_line_list(&summary.fail_lines)
        );
    }
    if !summary.unchanged_lines.is_empty() {
        println!(
            "  Unresolved at lines: {}",
            format_line_list(&summary.unchanged_lines)
        );
    }
}

fn format_line_list(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_run_totals(totals: &RunTotals) {
    println!();
    println!("Run Summary:");
    println!("  Files processed: {}", totals.processed);
    println!("  Files skipped: {}", totals.skipped);
    println!("  Files failed: {}", totals.failed);
    println!("  Markers seen: {}", totals.markers);
    println!("  Markers unresolved: {}", totals.unresolved);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_options() {
        let args = vec![
            "results.log".to_string(),
            "--output".to_string(),
            "out.log".to_string(),
            "--json".to_string(),
        ];

        let options = parse_options(&args);
        assert_eq!(options.inputs, vec!["results.log"]);
        assert_eq!(options.output, Some(PathBuf::from("out.log")));
        assert!(options.json);
        assert!(!options.quiet);
    }

    #[test]
    fn test_parse_options_unknown_flag_ignored() {
        let args = vec!["--frobnicate".to_string(), "a.log".to_string()];
        let options = parse_options(&args);
        assert_eq!(options.inputs, vec!["a.log"]);
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/results.log")),
            PathBuf::from("/tmp/results_processed.log")
        );
        assert_eq!(
            default_output_path(Path::new("results")),
            PathBuf::from("results_processed")
        );
    }

    #[test]
    fn test_process_single_file_end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("results.log");
        fs::write(&input, "S/B 27535 +/- 5\nMP 100 = 27537    PASS/FAIL\n").unwrap();

        let options = Options::default();
        let outcome = process_single_file(input.to_str().unwrap(), &options).unwrap();
        match outcome {
            Outcome::Resolved(resolution) => {
                assert_eq!(resolution.summary.pass_count, 1);
            }
            Outcome::Skipped => panic!("Expected the file to be processed"),
        }

        let output = dir.path().join("results_processed.log");
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("MP 100 = 27537    PASS"));
        assert!(!written.contains("PASS/FAIL"));
    }

    #[test]
    fn test_file_without_markers_is_skipped() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("clean.log");
        fs::write(&input, "MP 100 = 27537    PASS\n").unwrap();

        let options = Options::default();
        let outcome = process_single_file(input.to_str().unwrap(), &options).unwrap();
        assert!(matches!(outcome, Outcome::Skipped));
        assert!(!dir.path().join("clean_processed.log").exists());
    }
}
