use clap::{Parser, Subcommand};

use self::{apply::ApplyArg, run::RunArg, simulate::SimulateArg};

mod apply;
mod run;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Track a game from a stream of sensor frames
    Run(#[clap(flatten)] RunArg),
    /// Feed commands or a recorded move log straight into the rule engine
    Apply(#[clap(flatten)] ApplyArg),
    /// Generate a synthetic frame stream
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Run(arg) => run::run(&arg)?,
        Mode::Apply(arg) => apply::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
