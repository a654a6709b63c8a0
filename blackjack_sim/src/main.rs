use blackjack_sim::prelude::*;
use clap::Parser;
use std::io;
use std::process::ExitCode;

fn play(cli: &PlayCli) -> Result<(), AppError> {
    let mut table = cli.table.table()?;
    let stdin = io::stdin();

    if cli.table.json {
        // Prompts go to stderr so stdout stays valid JSON lines
        let mut source = ConsoleSource::new(stdin.lock(), io::stderr());
        let summary = table.run(&mut source, &mut JsonSink::new(io::stdout()))?;
        write_summary(&summary, true, io::stdout())?;
        return Ok(());
    }

    println!("Welcome to simple Blackjack with betting!");
    let mut source = ConsoleSource::new(stdin.lock(), io::stdout());
    let summary = table.run(&mut source, &mut ConsoleSink::new(io::stdout()))?;
    if !summary.depleted {
        println!("Thanks for playing.");
    }
    write_summary(&summary, false, io::stdout())?;
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = PlayCli::parse();
    finish(play(&cli), cli.table.json)
}
