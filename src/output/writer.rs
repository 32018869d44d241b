//! Streaming CSV writer with chunked yield points

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::iter;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::model::*;
use crate::error::{FramemarkError, FramemarkResult};

/// Default number of rows between yield points
pub const DEFAULT_CHUNK_SIZE: usize = 5000;

/// Receives control between chunks of a long write
pub trait ChunkCallback {
    /// Called after every chunk and once after the final row
    fn on_chunk(&mut self, rows_written: u64);

    /// Checked after each chunk; returning true stops the write
    fn should_cancel(&self) -> bool {
        false
    }
}

impl<F> ChunkCallback for F
where
    F: FnMut(u64),
{
    fn on_chunk(&mut self, rows_written: u64) {
        self(rows_written)
    }
}

/// Quote a field when it contains a delimiter, quote or line break
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Write one CSV line terminated by `\n`
pub fn write_record<'a, W, I>(out: &mut W, fields: I) -> std::io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            out.write_all(b",")?;
        }
        out.write_all(escape_field(field).as_bytes())?;
    }
    out.write_all(b"\n")
}

/// Header taken from the first row, checked against the export kind
pub(crate) fn header_for(kind: ExportKind, first: &Row) -> Result<Vec<String>, DomainError> {
    let header: Vec<String> = first.keys().map(str::to_string).collect();
    match kind.missing_field(&header) {
        Some(missing) => Err(DomainError::InvalidFormat(format!(
            "first row is missing required field '{}'",
            missing
        ))),
        None => Ok(header),
    }
}

#[derive(Debug, Default)]
struct Progress {
    rows_written: u64,
    chunk_count: u64,
    max_block_seconds: f64,
}

/// Incremental CSV writer.
///
/// Consumes its input in a single forward pass and hands control back to the
/// caller every `chunk_size` rows so no single blocking interval grows with
/// the size of the export.
#[derive(Debug, Clone)]
pub struct StreamingCsvWriter {
    chunk_size: usize,
    kind: ExportKind,
}

impl Default for StreamingCsvWriter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl StreamingCsvWriter {
    /// Create an annotation writer; a chunk size of 0 is treated as 1
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            kind: ExportKind::Annotation,
        }
    }

    /// Validate headers against another export kind
    pub fn with_kind(mut self, kind: ExportKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn kind(&self) -> ExportKind {
        self.kind
    }

    /// Write `rows` to `path`.
    ///
    /// The header is the first row's field list; later rows are projected onto
    /// it. Without a callback the whole write counts as one chunk and no block
    /// timing is reported.
    pub fn write<I>(&self, rows: I, path: &Path, mut callback: Option<&mut dyn ChunkCallback>) -> ExportMetrics
    where
        I: IntoIterator,
        I::Item: Into<Row>,
    {
        let start = Instant::now();
        let tracked = callback.is_some();
        let mut progress = Progress::default();

        let result = self.write_rows(rows, path, &mut callback, &mut progress);
        let duration_seconds = start.elapsed().as_secs_f64();

        let (max_block_seconds, chunk_count) = if tracked {
            (progress.max_block_seconds, progress.chunk_count)
        } else {
            (0.0, 1)
        };

        match result {
            Ok(()) => {
                info!(
                    rows = progress.rows_written,
                    chunks = chunk_count,
                    path = %path.display(),
                    "CSV export completed in {:.3}s",
                    duration_seconds
                );
                ExportMetrics {
                    success: true,
                    method: ExportMethod::Streaming,
                    rows_written: progress.rows_written,
                    duration_seconds,
                    max_block_seconds,
                    chunk_count,
                    error: None,
                }
            }
            Err(e) => {
                warn!(rows = progress.rows_written, path = %path.display(), "CSV export failed: {}", e);
                ExportMetrics {
                    success: false,
                    method: ExportMethod::Streaming,
                    rows_written: progress.rows_written,
                    duration_seconds,
                    max_block_seconds,
                    chunk_count,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    fn write_rows<I>(
        &self,
        rows: I,
        path: &Path,
        callback: &mut Option<&mut dyn ChunkCallback>,
        progress: &mut Progress,
    ) -> FramemarkResult<()>
    where
        I: IntoIterator,
        I::Item: Into<Row>,
    {
        let mut rows = rows.into_iter().map(Into::into);
        let first: Row = rows
            .next()
            .ok_or_else(|| DomainError::BadArgs("no rows to export".to_string()))?;
        let header = header_for(self.kind, &first)?;

        let file = File::create(path).map_err(|e| FramemarkError::OutputError {
            message: format!("Failed to create {}: {}", path.display(), e),
        })?;
        let mut out = BufWriter::new(file);
        write_record(&mut out, header.iter().map(String::as_str))?;

        let chunk = self.chunk_size as u64;
        let mut block_start = Instant::now();

        for row in iter::once(first).chain(rows) {
            write_record(&mut out, row.project(&header))?;
            progress.rows_written += 1;

            if progress.rows_written % chunk == 0 {
                if let Some(cb) = callback.as_mut() {
                    out.flush()?;
                    Self::yield_chunk(&mut **cb, progress, &mut block_start);
                    debug!(rows = progress.rows_written, chunk = progress.chunk_count, "Chunk written");

                    if cb.should_cancel() {
                        info!(rows = progress.rows_written, "CSV export cancelled");
                        return Err(DomainError::Cancelled("export cancelled".to_string()).into());
                    }
                }
            }
        }

        out.flush()?;
        if let Some(cb) = callback.as_mut() {
            Self::yield_chunk(&mut **cb, progress, &mut block_start);
        }
        Ok(())
    }

    fn yield_chunk(cb: &mut dyn ChunkCallback, progress: &mut Progress, block_start: &mut Instant) {
        let block = block_start.elapsed().as_secs_f64();
        progress.max_block_seconds = progress.max_block_seconds.max(block);
        progress.chunk_count += 1;
        cb.on_chunk(progress.rows_written);
        *block_start = Instant::now();
    }
}
