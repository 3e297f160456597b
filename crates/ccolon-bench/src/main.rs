use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser};
use serde::Serialize;

use ccolon_interpreter::{BufferConsole, Interpreter};
use ccolon_lexer::Lexer;
use ccolon_parser::Parser as CcolonParser;
use ccolon_syntax::error::Error;

#[derive(Parser, Debug)]
#[command(name = "ccolon-bench", about = "Run C-colon benchmarks")]
struct Cli {
    /// Specific test(s) to run (by name, e.g. arithmetic). If omitted, runs all discovered scripts.
    #[arg(short = 't', long = "test", action = ArgAction::Append)]
    tests: Vec<String>,

    /// Iterations per test (measured)
    #[arg(short = 'n', long = "iterations", default_value_t = 10)]
    iterations: u32,

    /// Warmup iterations (not measured)
    #[arg(short = 'w', long = "warmup", default_value_t = 2)]
    warmup: u32,

    /// Output JSON file path; default: benchmark/results/<timestamp>.json
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Include demos/ directory in discovery
    #[arg(long = "include-demos", default_value_t = false)]
    include_demos: bool,

    /// Line returned to every console.scanp call
    #[arg(long = "prompt-reply", default_value = "42")]
    prompt_reply: String,

    /// List discovered tests and exit
    #[arg(long = "list", default_value_t = false)]
    list: bool,
}

#[derive(Debug, Serialize)]
struct BenchResult {
    name: String,
    iterations: u32,
    avg_total_ms: f64,
    min_total_ms: f64,
    max_total_ms: f64,
    avg_lex_ms: f64,
    avg_parse_ms: f64,
    avg_exec_ms: f64,
    output_bytes: usize,
    warnings: usize,
}

#[derive(Debug, Serialize)]
struct OutputDoc {
    timestamp: String,
    ccolon_version: String,
    benchmarks: Vec<BenchResult>,
}

#[derive(Debug, Clone)]
struct ScriptCase {
    name: String,
    path: PathBuf,
}

#[derive(Debug, Default)]
struct Samples {
    totals: Vec<f64>,
    lexes: Vec<f64>,
    parses: Vec<f64>,
    execs: Vec<f64>,
    output_bytes: usize,
    warnings: usize,
}

/// Phase timings and captured console traffic of one run.
struct RunOutcome {
    lex: Duration,
    parse: Duration,
    exec: Duration,
    output_bytes: usize,
    warnings: usize,
}

fn workspace_root() -> PathBuf {
    // crates/ccolon-bench -> crates -> root
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest.ancestors().nth(2).unwrap_or(manifest).to_path_buf()
}

fn discover_scripts(include_demos: bool) -> Vec<ScriptCase> {
    let root = workspace_root();
    let mut out = Vec::new();

    let mut candidates = vec![root.join("benchmark/scripts")];
    if include_demos { candidates.push(root.join("demos")); }

    for dir in candidates {
        let Ok(entries) = fs::read_dir(&dir) else { continue };
        for e in entries.flatten() {
            let p = e.path();
            if p.extension().and_then(|s| s.to_str()) == Some("ccolon") {
                let name = p.file_stem().and_then(|s| s.to_str()).unwrap_or("").to_string();
                out.push(ScriptCase { name, path: p });
            }
        }
    }

    out.sort_by(|a, b| a.name.cmp(&b.name));
    out
}

fn run_once(src: &str, reply: &str) -> Result<RunOutcome, Error> {
    let t = Instant::now();
    let tokens = Lexer::new(src).tokenize()?;
    let lex = t.elapsed();

    let t = Instant::now();
    let program = CcolonParser::new(tokens).parse_program()?;
    let parse = t.elapsed();

    let t = Instant::now();
    let mut interp = Interpreter::with_console(BufferConsole::answering(reply));
    interp.run(program)?;
    let exec = t.elapsed();

    let console = interp.into_console();
    Ok(RunOutcome {
        lex,
        parse,
        exec,
        output_bytes: console.output().len(),
        warnings: console.warnings().len(),
    })
}

fn measure_script(src: &str, reply: &str, iterations: u32, warmup: u32) -> Result<Samples, Error> {
    for _ in 0..warmup {
        run_once(src, reply)?;
    }

    let mut samples = Samples::default();
    for _ in 0..iterations {
        let t0 = Instant::now();
        let run = run_once(src, reply)?;
        let total = t0.elapsed();

        samples.lexes.push(dur_ms(run.lex));
        samples.parses.push(dur_ms(run.parse));
        samples.execs.push(dur_ms(run.exec));
        samples.totals.push(dur_ms(total));
        samples.output_bytes = run.output_bytes;
        samples.warnings = run.warnings;
    }
    Ok(samples)
}

fn dur_ms(d: Duration) -> f64 { d.as_secs_f64() * 1000.0 }

fn stats(vals: &[f64]) -> (f64, f64, f64) {
    if vals.is_empty() { return (0.0, 0.0, 0.0); }
    let min = vals.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = vals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg = vals.iter().sum::<f64>() / (vals.len() as f64);
    (avg, min, max)
}

fn fail(msg: String) -> ! {
    eprintln!("{}", msg);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let mut scripts = discover_scripts(cli.include_demos);

    if cli.list {
        println!("Discovered tests:");
        for s in &scripts { println!("- {} ({})", s.name, s.path.display()); }
        return;
    }

    if !cli.tests.is_empty() {
        let wanted: std::collections::HashSet<_> = cli.tests.iter().map(|s| s.to_lowercase()).collect();
        scripts.retain(|s| wanted.contains(&s.name.to_lowercase()));
        if scripts.is_empty() {
            eprintln!("No matching tests. Use --list to see available.");
            std::process::exit(2);
        }
    }

    if scripts.is_empty() {
        eprintln!("No .ccolon scripts found in benchmark/scripts or demos.");
        std::process::exit(2);
    }

    let mut results = Vec::new();

    for case in &scripts {
        let src = fs::read_to_string(&case.path)
            .unwrap_or_else(|e| fail(format!("Failed to read {}: {}", case.path.display(), e)));
        let samples = measure_script(&src, &cli.prompt_reply, cli.iterations, cli.warmup)
            .unwrap_or_else(|e| fail(format!("{}: {}: {}", case.name, e.kind.label(), e)));
        let (avg_t, min_t, max_t) = stats(&samples.totals);
        let (avg_l, _, _) = stats(&samples.lexes);
        let (avg_p, _, _) = stats(&samples.parses);
        let (avg_e, _, _) = stats(&samples.execs);

        println!(
            "{:>12}: total avg={:.3}ms min={:.3}ms max={:.3}ms | lex={:.3}ms parse={:.3}ms exec={:.3}ms | out={}B",
            case.name, avg_t, min_t, max_t, avg_l, avg_p, avg_e, samples.output_bytes
        );

        results.push(BenchResult {
            name: case.name.clone(),
            iterations: cli.iterations,
            avg_total_ms: avg_t,
            min_total_ms: min_t,
            max_total_ms: max_t,
            avg_lex_ms: avg_l,
            avg_parse_ms: avg_p,
            avg_exec_ms: avg_e,
            output_bytes: samples.output_bytes,
            warnings: samples.warnings,
        });
    }

    let now = chrono::Utc::now();
    let out_path = match cli.output {
        Some(p) => p,
        None => {
            // filename-safe timestamp
            let ts_file = now.format("%Y-%m-%d_%H-%M-%SZ").to_string();
            workspace_root().join("benchmark/results").join(format!("{}.json", ts_file))
        }
    };

    let doc = OutputDoc {
        timestamp: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        ccolon_version: env!("CARGO_PKG_VERSION").to_string(),
        benchmarks: results,
    };

    let json = serde_json::to_string_pretty(&doc)
        .unwrap_or_else(|e| fail(format!("Failed to serialize results: {}", e)));
    if let Some(parent) = out_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            fail(format!("Failed to create {}: {}", parent.display(), e));
        }
    }
    if let Err(e) = fs::write(&out_path, json) {
        fail(format!("Failed to write {}: {}", out_path.display(), e));
    }

    println!("\nSaved results to {}", out_path.display());
}
