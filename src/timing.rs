use crate::collection::RecordCollection;
use crate::reader::FastaReader;
use anyhow::{Context, Result};
use std::io::Write;
use std::time::{Duration, Instant};

pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Draws a `.` every `interval` records, and ends the line with the record count once a
/// pass is complete. An interval of 0 disables the dots.
pub struct Progress<W: Write> {
    out: W,
    interval: usize,
    dirty: bool,
}

impl<W: Write> Progress<W> {
    pub fn new(out: W, interval: usize) -> Self {
        Self {
            out,
            interval,
            dirty: false,
        }
    }

    pub fn tick(&mut self, records: usize) -> std::io::Result<()> {
        if self.interval == 0 || records % self.interval != 0 {
            return Ok(());
        }
        self.dirty = true;
        write!(self.out, ".")?;
        self.out.flush()
    }

    pub fn finish(&mut self, records: usize) -> std::io::Result<()> {
        self.dirty = false;
        writeln!(self.out, " {records} FASTA records")
    }

    /// Terminates a line of dots left behind by a pass which failed.
    pub fn abandon(&mut self) -> std::io::Result<()> {
        if self.dirty {
            self.dirty = false;
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassResult {
    pub records: usize,
    pub bases: usize,
    pub elapsed: Duration,
}

/// Timings for every pass over a single file.
#[derive(Debug, Default)]
pub struct LoadSummary {
    pub passes: Vec<PassResult>,
}

impl LoadSummary {
    pub fn total(&self) -> Duration {
        self.passes.iter().map(|p| p.elapsed).sum()
    }

    pub fn average(&self) -> Duration {
        match self.passes.len() {
            0 => Duration::ZERO,
            n => self.total().div_f64(n as f64),
        }
    }

    /// Records loaded by the last pass. Every pass over the same file loads the same number.
    pub fn records(&self) -> usize {
        self.passes.last().map_or(0, |p| p.records)
    }

    /// Writes the timing report for `path`.
    pub fn report(&self, out: &mut impl Write, path: &str) -> std::io::Result<()> {
        let (minutes, seconds) = split_minutes(self.average());

        writeln!(
            out,
            "{:.6} seconds taken for processing total",
            self.total().as_secs_f64()
        )?;
        writeln!(
            out,
            "On average: {minutes} minutes, {seconds:.6} seconds per run"
        )?;
        writeln!(out, "{} records processed from '{}'", self.records(), path)
    }
}

/// Splits a duration into whole minutes and the remaining (fractional) seconds.
pub fn split_minutes(duration: Duration) -> (u64, f64) {
    let minutes = duration.as_secs() / 60;
    let seconds = duration.as_secs_f64() - (minutes * 60) as f64;
    (minutes, seconds)
}

/// Loads every record of the file at `path` into memory once, then releases them.
///
/// Only the read-and-store loop is timed; opening the file and releasing the records are
/// not.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, or if it cannot be parsed. The error
/// names the file and the line at which parsing failed.
pub fn load_once<W: Write>(path: &str, progress: &mut Progress<W>) -> Result<PassResult> {
    let mut reader =
        FastaReader::from_path(path).with_context(|| format!("Unable to open file {path}"))?;

    let mut collection = RecordCollection::new();

    let now = Instant::now();
    let loaded = collection.load_from_reader(&mut reader, |n| progress.tick(n));
    let elapsed = now.elapsed();

    let records = match loaded {
        Ok(n) => n,
        Err(e) => {
            progress.abandon()?;
            let line = e.line().unwrap_or(reader.lines_read() + 1);
            return Err(e).with_context(|| format!("Failure at line {line} of '{path}'"));
        }
    };

    progress.finish(records)?;

    if collection.is_empty() {
        warn!("No FASTA records found in '{path}'");
    }

    let result = PassResult {
        records,
        bases: collection.total_bases(),
        elapsed,
    };
    collection.release_all();

    Ok(result)
}

/// Runs [`load_once`] `repeats` times on the same file, stopping at the first failure.
pub fn load_repeatedly<W: Write>(
    path: &str,
    repeats: u64,
    progress: &mut Progress<W>,
) -> Result<LoadSummary> {
    let mut summary = LoadSummary::default();

    for i in 0..repeats {
        let pass = load_once(path, progress)?;
        info!(
            "Pass {}/{repeats} of '{path}': {:.6}s",
            i + 1,
            pass.elapsed.as_secs_f64()
        );
        debug!("{} records, {} bases", pass.records, pass.bases);
        summary.passes.push(pass);
    }

    Ok(summary)
}
