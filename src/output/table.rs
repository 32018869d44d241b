//! Whole-table-in-memory CSV writer used as a performance baseline

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::error::FramemarkResult;
use crate::output::writer::{header_for, write_record};

/// Materializes every row, renders the table, then writes it in one call.
///
/// Produces the same bytes as [`StreamingCsvWriter`](crate::output::writer::StreamingCsvWriter)
/// for the same rows but blocks for the whole duration.
#[derive(Debug, Clone)]
pub struct TableCsvWriter {
    kind: ExportKind,
}

impl Default for TableCsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableCsvWriter {
    pub fn new() -> Self {
        Self {
            kind: ExportKind::Annotation,
        }
    }

    pub fn with_kind(mut self, kind: ExportKind) -> Self {
        self.kind = kind;
        self
    }

    /// Write `rows` to `path`; the whole call is reported as a single block
    pub fn write<I>(&self, rows: I, path: &Path) -> ExportMetrics
    where
        I: IntoIterator,
        I::Item: Into<Row>,
    {
        let start = Instant::now();
        let result = self.render(rows).and_then(|(table, count)| {
            std::fs::write(path, table)?;
            Ok(count)
        });
        let duration_seconds = start.elapsed().as_secs_f64();

        match result {
            Ok(rows_written) => {
                info!(rows = rows_written, path = %path.display(), "Table export completed in {:.3}s", duration_seconds);
                ExportMetrics {
                    success: true,
                    method: ExportMethod::Table,
                    rows_written,
                    duration_seconds,
                    max_block_seconds: duration_seconds,
                    chunk_count: 1,
                    error: None,
                }
            }
            Err(e) => {
                warn!(path = %path.display(), "Table export failed: {}", e);
                ExportMetrics::failed(ExportMethod::Table, duration_seconds, e.to_string())
            }
        }
    }

    fn render<I>(&self, rows: I) -> FramemarkResult<(Vec<u8>, u64)>
    where
        I: IntoIterator,
        I::Item: Into<Row>,
    {
        let rows: Vec<Row> = rows.into_iter().map(Into::into).collect();
        let first = rows
            .first()
            .ok_or_else(|| DomainError::BadArgs("no rows to export".to_string()))?;
        let header = header_for(self.kind, first)?;

        let mut table = Vec::new();
        write_record(&mut table, header.iter().map(String::as_str))?;
        for row in &rows {
            write_record(&mut table, row.project(&header))?;
        }
        Ok((table, rows.len() as u64))
    }
}
