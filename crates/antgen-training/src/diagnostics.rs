//! Per-generation reports and where they are written.
//!
//! At every generation boundary the population manager builds a [`GenerationReport`]
//! for the fittest genome and hands it to a [`DiagnosticSink`]. [`AppendFileSink`]
//! appends a human-readable block to a file; [`NullSink`] drops the report.

use std::{
    fmt,
    fs::OpenOptions,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use antgen_board::BoardSnapshot;
use chrono::Utc;

use crate::{
    fitness::FitnessSummary,
    genome::{GENOME_LEN, GeneRole, Genome},
};

/// Summary of a finished generation and its fittest genome.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Generation that was just evaluated, starting at 0
    pub generation: u64,
    pub best_index: usize,
    pub genome: Genome,
    pub fitness: f64,
    pub summary: FitnessSummary,
    /// Terminal board of the best genome's last game, if the engine supplied one
    pub final_board: Option<BoardSnapshot>,
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "generation: {}", self.generation)?;
        writeln!(f, "best genome: #{} {}", self.best_index, self.genome)?;
        writeln!(f, "fitness: {:.6}", self.fitness)?;
        writeln!(
            f,
            "population: min={:.6} max={:.6} mean={:.6} std_dev={:.6}",
            self.summary.min, self.summary.max, self.summary.mean, self.summary.std_dev
        )?;
        write!(f, "placements:")?;
        for position in 0..GENOME_LEN {
            let sep = if position == 0 { " " } else { ", " };
            let role = match GeneRole::of_position(position) {
                GeneRole::Home => 'h',
                GeneRole::Target => 't',
            };
            write!(f, "{sep}{role}{}", self.genome.cell(position))?;
        }
        writeln!(f)?;
        match &self.final_board {
            Some(board) => writeln!(f, "final board:\n{board}"),
            None => writeln!(f, "final board: (not reported)"),
        }
    }
}

/// Destination for generation reports.
pub trait DiagnosticSink: fmt::Debug + Send {
    fn record(&mut self, report: &GenerationReport) -> io::Result<()>;
}

impl<T> DiagnosticSink for Box<T>
where
    T: DiagnosticSink + ?Sized,
{
    fn record(&mut self, report: &GenerationReport) -> io::Result<()> {
        (**self).record(report)
    }
}

/// Appends each report to a file, creating it if needed.
///
/// The file is opened for every record and never truncated, so several runs (or several
/// sinks) pointed at the same path accumulate their reports.
#[derive(Debug, Clone)]
pub struct AppendFileSink {
    path: PathBuf,
}

impl AppendFileSink {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagnosticSink for AppendFileSink {
    fn record(&mut self, report: &GenerationReport) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        write!(file, "=== {timestamp} ===\n{report}\n")?;
        file.flush()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _report: &GenerationReport) -> io::Result<()> {
        Ok(())
    }
}
