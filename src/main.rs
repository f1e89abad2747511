use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tpdump::{config, EventSource, FileSource, Reporter, Settings, StreamSource};

#[derive(Parser, Debug)]
#[command(name = "tpdump")]
#[command(about = "Dump muon trigger primitives from every subsystem as diagnostic lines")]
struct Args {
    /// JSON Lines event file, one event per line ("-" reads stdin)
    #[arg(short, long, required_unless_present = "describe")]
    events: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many events
    #[arg(short = 'n', long)]
    max_events: Option<usize>,

    /// Print every configuration option with its default and exit
    #[arg(long)]
    describe: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostic lines go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    if args.describe {
        print!("{}", config::describe());
        return Ok(());
    }

    let settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    let reporter = Reporter::from_settings(&settings).context("setting up subsystems")?;

    let mut source: Box<dyn EventSource> = match args.events {
        Some(path) if path.as_os_str() != "-" => Box::new(
            FileSource::open(&path)
                .with_context(|| format!("opening {}", path.display()))?,
        ),
        _ => Box::new(StreamSource::new(io::stdin().lock(), "stdin")),
    };

    let stdout = io::stdout();
    let mut sink = BufWriter::new(stdout.lock());
    reporter.run(source.as_mut(), &mut sink, args.max_events)?;
    Ok(())
}
