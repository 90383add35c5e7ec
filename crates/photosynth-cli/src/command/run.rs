use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, Sender},
    thread::{self, JoinHandle},
};

use anyhow::Context;
use chrono::Utc;
use photosynth_engine::{Command, GameProcessor};
use photosynth_tracker::{
    Frame, LabelSnapshot, MoveExtractor, PieceClasses, PipelineConfig, SignalStabilizer,
};
use tracing::{info, warn};

use crate::{
    record::MoveRecord,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    /// Frame stream as JSON lines (`-` for standard input)
    #[arg(long)]
    frames: PathBuf,
    /// Pipeline config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// File to append detected moves to, one JSON record per line
    #[arg(long)]
    moves_log: Option<PathBuf>,
    /// Game state output file [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
    /// End the game after the last frame
    #[arg(long)]
    end_game: bool,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let RunArg {
        frames,
        config,
        moves_log,
        output,
        end_game,
    } = arg;
    let config = util::load_config(config.as_deref())?;
    let frames = util::read_json_lines::<Frame>("frame", frames)?;

    let (frame_tx, frame_rx) = mpsc::channel();
    let (snapshot_tx, snapshot_rx) = mpsc::channel();
    let (command_tx, command_rx) = mpsc::channel();

    let stabilizer = spawn_stage("stabilizer", {
        let config = config.clone();
        move || stabilize(&config, &frame_rx, &snapshot_tx)
    })?;
    let extractor = spawn_stage("extractor", {
        let classes = config.classes.clone();
        let moves_log = moves_log.clone();
        let end_game = *end_game;
        move || {
            extract(
                classes,
                moves_log.as_deref(),
                end_game,
                &snapshot_rx,
                &command_tx,
            )
        }
    })?;
    let rules = spawn_stage("rules", {
        let output = output.clone();
        move || apply_commands(output.as_deref(), &command_rx)
    })?;

    let mut read_result = Ok(());
    let mut num_frames = 0_usize;
    for frame in frames {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                read_result = Err(e);
                break;
            }
        };
        num_frames += 1;
        if frame_tx.send(frame).is_err() {
            // a stage stopped early, its error is reported on join
            break;
        }
    }
    drop(frame_tx);

    join_stage(stabilizer)?;
    join_stage(extractor)?;
    join_stage(rules)?;
    read_result?;

    info!(frames = num_frames, "pipeline finished");
    Ok(())
}

fn spawn_stage<F>(name: &str, f: F) -> anyhow::Result<(String, JoinHandle<anyhow::Result<()>>)>
where
    F: FnOnce() -> anyhow::Result<()> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name(name.to_owned())
        .spawn(f)
        .with_context(|| format!("Failed to spawn {name} thread"))?;
    Ok((name.to_owned(), handle))
}

fn join_stage((name, handle): (String, JoinHandle<anyhow::Result<()>>)) -> anyhow::Result<()> {
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("{name} thread panicked"))?
        .with_context(|| format!("{name} stage failed"))
}

fn stabilize(
    config: &PipelineConfig,
    frames: &Receiver<Frame>,
    snapshots: &Sender<LabelSnapshot>,
) -> anyhow::Result<()> {
    let mut stabilizer = SignalStabilizer::new(config);
    for frame in frames {
        match stabilizer.process(&frame) {
            Ok(Some(snapshot)) => {
                if snapshots.send(snapshot).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(sequence = frame.sequence, "frame dropped: {e}"),
        }
    }
    Ok(())
}

fn extract(
    classes: PieceClasses,
    moves_log: Option<&Path>,
    end_game: bool,
    snapshots: &Receiver<LabelSnapshot>,
    commands: &Sender<Command>,
) -> anyhow::Result<()> {
    let mut log = moves_log.map(Output::append).transpose()?;
    let mut extractor = MoveExtractor::new(classes);
    for snapshot in snapshots {
        let moves = extractor.extract(snapshot);
        if moves.is_empty() {
            continue;
        }
        let now = Utc::now();
        for mv in moves {
            if let Some(log) = &mut log {
                log.write_json_line(&MoveRecord::new(&mv, now))?;
            }
            if commands.send(Command::Move(mv)).is_err() {
                return Ok(());
            }
        }
    }
    if end_game {
        // the rules stage may already be gone; its error is reported on join
        let _ = commands.send(Command::EndGame);
    }
    Ok(())
}

fn apply_commands(output: Option<&Path>, commands: &Receiver<Command>) -> anyhow::Result<()> {
    let mut output = Output::from_output_path(output)?;
    let mut processor = GameProcessor::new();
    for command in commands {
        let update = processor.handle(command);
        output.write_json_line(&update)?;
    }
    Ok(())
}
