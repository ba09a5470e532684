// Row-rendering pipeline: escaping, row hooks, row formats and document assembly
pub mod assembler;
pub mod escape;
pub mod options;
pub mod pipeline;
pub mod row_format;
pub mod transformer;

// Re-export main types and functions
pub use assembler::{assemble, DocumentAssembler};
pub use escape::{classify_field, escape, escape_field, is_plain_decimal, unquote};
pub use options::{
    Defaults, RenderOptions, ResolvedFormat, ResolvedOptions, RowBuilder, RowFormat, ValueFilter,
    ValuesFilter, DEFAULTS,
};
pub use pipeline::{render_document, render_resolved, render_rows, RenderStatistics, RenderedDocument};
pub use row_format::{escape_template_literal, RowRenderer, Template};
pub use transformer::RowTransformer;
