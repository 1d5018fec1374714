#![forbid(unsafe_code)]

//! # dpend
//!
//! Headless double pendulum frame driver.
//!
//! ```bash
//! dpend run -n 600 -f table
//! dpend config -c swing.toml
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use tracing::info;

use pendulum_cli::{Cli, Command, Config, Driver, RunArgs, logging, output};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    logging::init(cli.log_level(), cli.log_format)?;

    match cli.command() {
        Command::Run(args) => run(&args),
        Command::Config(settings) => {
            let config = Config::from_cli(&settings).context("invalid configuration")?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn run(args: &RunArgs) -> anyhow::Result<()> {
    let config = Config::from_cli(&args.settings).context("invalid configuration")?;

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut writer = output::writer(args.format, out);

    info!(
        frames = config.run.frames,
        fps = config.run.fps,
        events = config.events.len(),
        "Run started"
    );

    let mut driver = Driver::new(&config);
    while let Some(record) = driver.next_frame()? {
        if record.frame % args.every == 0 {
            writer.write_frame(&record)?;
        }
    }

    let summary = driver.summary();
    writer.finish(&summary)?;

    info!(
        frames = summary.frames,
        stepped = summary.stepped_frames,
        max_drift = summary.max_drift,
        "Run finished"
    );
    Ok(())
}
