//! Export output: dense sequences, CSV writers and readers, summaries

pub mod dense;
pub mod reader;
pub mod summary;
pub mod table;
pub mod writer;

pub use dense::DenseExportBuilder;
pub use summary::ExportSummary;
pub use table::TableCsvWriter;
pub use writer::{ChunkCallback, StreamingCsvWriter};
