use std::{
    fs,
    io::{self, Write as _},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context as _;
use clap::Parser;
use syzygy_deps::{plan, Options, SyzygyOracle, DEFAULT_TBGEN};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate a Makefile for Syzygy table generation.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Opt {
    /// Use n threads. If no other tasks are running, it is recommended to
    /// set n to the number of CPU cores, or if the CPU supports
    /// hyperthreading, to the number of CPU hyperthreads.
    #[arg(long, short = 't')]
    threads: Option<usize>,
    /// Only compress and save WDL files
    #[arg(long, short = 'w')]
    wdl: bool,
    /// Only compress and save DTZ files
    #[arg(long, short = 'z')]
    dtz: bool,
    /// Save statistics
    #[arg(long, short = 's')]
    stats: bool,
    /// Reduce RAM usage during compression by temporarily saving tables to
    /// disk
    #[arg(long, short = 'd')]
    disk: bool,

    /// The tablebase generator to use
    #[arg(long, default_value = DEFAULT_TBGEN)]
    tbgen: String,
    /// The generator for tables with pawns [default: TBGEN with p appended]
    #[arg(long)]
    tbgenp: Option<String>,

    #[arg(long)]
    wdl_suffix: Option<String>,
    #[arg(long)]
    pawnless_wdl_suffix: Option<String>,
    #[arg(long)]
    dtz_suffix: Option<String>,
    #[arg(long)]
    pawnless_dtz_suffix: Option<String>,

    /// Treat KvK as a trivial endgame [default unless generating suicide or
    /// giveaway tables]
    #[arg(long, conflicts_with = "not_one_king")]
    one_king: bool,
    /// Kings are regular pieces that can be captured
    #[arg(long)]
    not_one_king: bool,

    /// Write the Makefile to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Endgames to generate, e.g. KRPvKR
    endgames: Vec<String>,
}

impl Opt {
    fn options(&self) -> Options {
        Options {
            threads: self.threads,
            wdl: self.wdl,
            dtz: self.dtz,
            stats: self.stats,
            disk: self.disk,
            tbgen: Some(self.tbgen.clone()),
            tbgenp: self.tbgenp.clone(),
            wdl_suffix: self.wdl_suffix.clone(),
            dtz_suffix: self.dtz_suffix.clone(),
            pawnless_wdl_suffix: self.pawnless_wdl_suffix.clone(),
            pawnless_dtz_suffix: self.pawnless_dtz_suffix.clone(),
            one_king: match (self.one_king, self.not_one_king) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
}

fn run(opt: &Opt) -> anyhow::Result<()> {
    let config = opt.options().resolve()?;
    let makefile = plan(&opt.endgames, &SyzygyOracle::new(), &config)?;
    info!(
        requested = makefile.aggregate.prerequisites.len(),
        rules = makefile.rules.len(),
        "planned tables"
    );

    let text = makefile.to_string();
    match opt.output {
        Some(ref path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("failed to write to stdout")?,
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let opt = Opt::parse();

    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
