use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use photosynth_tracker::PipelineConfig;
use serde::{Serialize, de::DeserializeOwned};

/// Destination of JSON-lines output: standard output or a file.
pub struct Output {
    writer: Box<dyn Write>,
    name: String,
}

impl Output {
    pub fn from_output_path(output_path: Option<&Path>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                Ok(Self::file(file, path))
            }
            None => Ok(Self {
                writer: Box::new(io::stdout().lock()),
                name: "stdout".to_owned(),
            }),
        }
    }

    /// Opens `path` for appending, creating it if needed.
    pub fn append(path: &Path) -> anyhow::Result<Self> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .with_context(|| format!("Failed to open file for appending: {}", path.display()))?;
        Ok(Self::file(file, path))
    }

    fn file(file: File, path: &Path) -> Self {
        Self {
            writer: Box::new(BufWriter::new(file)),
            name: path.display().to_string(),
        }
    }

    /// Writes `value` as one line of JSON and flushes.
    pub fn write_json_line<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        serde_json::to_writer(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.name))?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to write to {}", self.name))
    }
}

/// Opens `path` for reading; `-` reads standard input.
fn open_input(path: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Reads a JSON-lines file (or `-` for standard input) one value at a time.
///
/// Blank lines are skipped.
pub fn read_json_lines<T>(
    kind: &'static str,
    path: &Path,
) -> anyhow::Result<impl Iterator<Item = anyhow::Result<T>> + use<T>>
where
    T: DeserializeOwned,
{
    let reader = open_input(path)?;
    let name = path.display().to_string();
    let values = reader
        .lines()
        .enumerate()
        .filter_map(move |(i, line)| {
            let line = match line.with_context(|| format!("Failed to read {name}")) {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            if line.trim().is_empty() {
                return None;
            }
            Some(
                serde_json::from_str(&line)
                    .with_context(|| format!("Failed to parse {kind} at {name}:{}", i + 1)),
            )
        });
    Ok(values)
}

/// Loads the pipeline config from `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}
