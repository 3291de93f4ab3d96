// Entry point: load the config, overlay CLI flags, run one sweep.
use std::error::Error;

use clap::Parser;
use tracing::Level;

use pksweep::cli::Args;
use pksweep::config::SweepConfig;
use pksweep::run;

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    if let Err(err) = sweep(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn sweep(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = SweepConfig::load_or_default(&args.config)?;
    args.apply_to(&mut cfg);

    let summary = run::run(&cfg)?;
    println!(
        "Sweep complete (seed {}). Figures in {}:",
        summary.seed,
        cfg.output.dir.display()
    );
    for path in &summary.figures {
        println!("  {}", path.display());
    }
    Ok(())
}
