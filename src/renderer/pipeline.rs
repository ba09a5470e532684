// Pipeline driving rows from the source through transformer, renderer and assembler
use crate::error::ConvertError;
use crate::renderer::assembler::DocumentAssembler;
use crate::renderer::options::{RenderOptions, ResolvedOptions};
use crate::renderer::row_format::RowRenderer;
use crate::renderer::transformer::RowTransformer;
use crate::row_source::RowSource;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, trace};

/// Statistics about one rendered document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStatistics {
    /// Records read from the source
    pub rows_read: usize,
    /// Records dropped by the row filter
    pub rows_dropped: usize,
    /// Rows present in the document
    pub rows_rendered: usize,
    /// Wall time spent rendering, in milliseconds
    pub generation_time_ms: u64,
}

/// A rendered document with its statistics
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub sql: String,
    pub statistics: RenderStatistics,
}

/// Render every row of `path` with `options` and return the document text
pub fn render_rows(path: impl AsRef<Path>, options: RenderOptions) -> Result<String, ConvertError> {
    render_document(path, options).map(|document| document.sql)
}

/// Render every row of `path` with `options`, returning statistics as well
pub fn render_document(
    path: impl AsRef<Path>,
    options: RenderOptions,
) -> Result<RenderedDocument, ConvertError> {
    debug!(?options, "Resolving render options");
    let resolved = options.resolve()?;
    let source = RowSource::with_dialect(path.as_ref(), resolved.dialect.clone());
    render_resolved(&source, &resolved)
}

/// Run the pipeline over a source with already resolved options.
///
/// Rows are read, transformed, rendered and appended one at a time; the
/// input is never held in memory as a whole.
#[instrument(skip_all, fields(path = %source.path().display()))]
pub fn render_resolved(
    source: &RowSource,
    options: &ResolvedOptions,
) -> Result<RenderedDocument, ConvertError> {
    let start_time = Instant::now();
    let transformer = RowTransformer::new(options.values_filter.as_ref(), &options.value_filter);
    let renderer = RowRenderer::new(&options.row_format, &options.values_glue);
    let mut assembler = DocumentAssembler::new(
        &options.before,
        &options.row_glue,
        &options.after,
        &options.when_empty,
    );
    let mut statistics = RenderStatistics::default();

    for (row_index, row) in source.rows()?.enumerate() {
        let row = row?;
        statistics.rows_read += 1;

        let Some(fields) = transformer.transform(row, row_index)? else {
            trace!(row_index, "Row dropped by values filter");
            statistics.rows_dropped += 1;
            continue;
        };

        let rendered = renderer.render(&fields, row_index)?;
        assembler.push(&rendered);
    }

    statistics.rows_rendered = assembler.rows();
    statistics.generation_time_ms = start_time.elapsed().as_millis() as u64;

    info!(
        rows_read = statistics.rows_read,
        rows_dropped = statistics.rows_dropped,
        rows_rendered = statistics.rows_rendered,
        duration_ms = statistics.generation_time_ms,
        "Rendered document"
    );

    Ok(RenderedDocument {
        sql: assembler.finish(),
        statistics,
    })
}
