use blackjack_lib::{BasicStrategy, SilentSink};
use blackjack_sim::prelude::*;
use clap::Parser;
use log::info;
use std::io;
use std::process::ExitCode;

fn play_n_rounds(cli: &AutoplayCli) -> Result<(), AppError> {
    let mut table = cli.table.table()?;
    let mut strategy = BasicStrategy::new(cli.bet, cli.rounds);
    info!(
        "playing {} rounds at ${:.2} per round with {:?}",
        cli.rounds,
        cli.bet,
        table.config()
    );

    let summary = if cli.table.json {
        table.run(&mut strategy, &mut JsonSink::new(io::stdout()))?
    } else {
        table.run(&mut strategy, &mut SilentSink)?
    };
    write_summary(&summary, cli.table.json, io::stdout())?;
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = AutoplayCli::parse();
    finish(play_n_rounds(&cli), cli.table.json)
}
