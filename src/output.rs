//! Tabular writers for the final result set

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::error::WriteError;
use crate::record::{BowlingRecord, Year, COLUMNS};

/// Consumes the complete, ordered result set of a run
pub trait TabularWriter {
    /// Write `records` and return where they went
    fn write(&mut self, records: &[BowlingRecord], year: &Year) -> Result<PathBuf, WriteError>;
}

/// `bowlingdata<Year>.<ext>`
pub fn artifact_name(year: &Year, format: OutputFormat) -> String {
    let ext = match format {
        OutputFormat::Csv => "csv",
        OutputFormat::Jsonl => "jsonl",
    };
    format!("bowlingdata{year}.{ext}")
}

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[&str], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header plus one row per record
pub fn write_csv<W: Write>(mut w: W, records: &[BowlingRecord]) -> io::Result<()> {
    write_row(&mut w, &COLUMNS, ',')?;
    for record in records {
        write_row(&mut w, &record.fields(), ',')?;
    }
    Ok(())
}

/// One JSON object per line, keyed by column name
pub fn write_jsonl<W: Write>(mut w: W, records: &[BowlingRecord]) -> Result<(), WriteError> {
    for record in records {
        serde_json::to_writer(&mut w, record)?;
        writeln!(w)?;
    }
    Ok(())
}

/// Writes the artifact into a directory
#[derive(Debug, Clone)]
pub struct FileWriter {
    dir: PathBuf,
    format: OutputFormat,
}

impl FileWriter {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    pub fn path_for(&self, year: &Year) -> PathBuf {
        self.dir.join(artifact_name(year, self.format))
    }
}

impl TabularWriter for FileWriter {
    fn write(&mut self, records: &[BowlingRecord], year: &Year) -> Result<PathBuf, WriteError> {
        let path = self.path_for(year);
        write_file(&path, records, self.format)?;
        Ok(path)
    }
}

fn write_file(path: &Path, records: &[BowlingRecord], format: OutputFormat) -> Result<(), WriteError> {
    let mut out = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Csv => write_csv(&mut out, records)?,
        OutputFormat::Jsonl => write_jsonl(&mut out, records)?,
    }
    out.flush()?;
    Ok(())
}

/// Keeps everything in memory; handy for tests and for piping elsewhere
#[derive(Debug, Default, Clone)]
pub struct MemoryWriter {
    pub written: Vec<(Year, Vec<BowlingRecord>)>,
}

impl TabularWriter for MemoryWriter {
    fn write(&mut self, records: &[BowlingRecord], year: &Year) -> Result<PathBuf, WriteError> {
        self.written.push((year.clone(), records.to_vec()));
        Ok(PathBuf::from(artifact_name(year, OutputFormat::Csv)))
    }
}
