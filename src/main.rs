// sexpc: S-expression to C-style call transpiler

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser as CliParser;
use log::{info, LevelFilter};

use sexpc::{parse, tokenize, transform, CompileError};

#[derive(CliParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source file to compile (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Compile an inline S-expression instead of a file
    #[arg(short, long, value_name = "SOURCE", conflicts_with = "input")]
    expr: Option<String>,

    /// Compile the built-in example programs
    #[arg(long, conflicts_with_all = ["input", "expr"])]
    demo: bool,

    /// Print per-kind node counts for both trees to stderr
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if cli.demo {
        for source in sexpc::DEMO_PROGRAMS {
            match run(source, cli.stats) {
                Ok(output) => println!("Input:\n{}\nOutput:\n{}\n", source, output),
                Err(e) => exit_with(&e),
            }
        }
        return;
    }

    let source = match read_source(&cli) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match run(&source, cli.stats) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => exit_with(&e),
    }
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn read_source(cli: &Cli) -> io::Result<String> {
    if let Some(expr) = &cli.expr {
        return Ok(expr.clone());
    }
    match &cli.input {
        Some(path) => {
            info!("reading {}", path.display());
            fs::read_to_string(path).map_err(|e| {
                io::Error::new(e.kind(), format!("failed to read '{}': {}", path.display(), e))
            })
        }
        None => {
            info!("reading source from stdin");
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Run the pipeline stage by stage so `--stats` can see both trees.
fn run(source: &str, stats: bool) -> Result<String, CompileError> {
    let tokens = tokenize(source)?;
    let program = parse(&tokens)?;
    let lowered = transform(&program)?;

    if stats {
        eprintln!("source tree:");
        for (kind, count) in program.node_counts().sorted() {
            eprintln!("  {:<20} {}", kind, count);
        }
        eprintln!("target tree:");
        for (kind, count) in lowered.node_counts().sorted() {
            eprintln!("  {:<20} {}", kind, count);
        }
    }

    Ok(sexpc::generate(&lowered)?)
}

fn exit_with(err: &CompileError) -> ! {
    eprintln!("{} failed: {}", err.stage(), err);
    process::exit(1);
}
