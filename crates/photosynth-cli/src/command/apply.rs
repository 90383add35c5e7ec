use std::path::PathBuf;

use photosynth_engine::{Command, GameProcessor};
use tracing::info;

use crate::{
    record::MoveRecord,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ApplyArg {
    /// Command envelopes as JSON lines (`-` for standard input)
    #[arg(long, conflicts_with = "moves", required_unless_present = "moves")]
    commands: Option<PathBuf>,
    /// Moves log written by `run` to replay
    #[arg(long)]
    moves: Option<PathBuf>,
    /// Game state output file [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
    /// End the game after the last command
    #[arg(long)]
    end_game: bool,
}

pub(crate) fn run(arg: &ApplyArg) -> anyhow::Result<()> {
    let ApplyArg {
        commands,
        moves,
        output,
        end_game,
    } = arg;

    let commands: Box<dyn Iterator<Item = anyhow::Result<Command>>> = match (commands, moves) {
        (Some(path), _) => Box::new(util::read_json_lines::<Command>("command", path)?),
        (None, Some(path)) => Box::new(
            util::read_json_lines::<MoveRecord>("move record", path)?
                .map(|record| record.map(|record| Command::Move(record.to_move()))),
        ),
        (None, None) => anyhow::bail!("either --commands or --moves is required"),
    };

    let mut output = Output::from_output_path(output.as_deref())?;
    let mut processor = GameProcessor::new();
    let mut num_commands = 0_usize;
    for command in commands {
        output.write_json_line(&processor.handle(command?))?;
        num_commands += 1;
    }
    if *end_game {
        output.write_json_line(&processor.handle(Command::EndGame))?;
    }

    let summary = processor.summary();
    info!(
        commands = num_commands,
        autumn_score = summary.autumn_score,
        winter_score = summary.winter_score,
        "commands applied"
    );
    Ok(())
}
