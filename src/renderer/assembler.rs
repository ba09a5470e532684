// Document assembler: joins rendered rows and wraps them
/// Builds the output document incrementally, one rendered row at a time
pub struct DocumentAssembler<'a> {
    before: &'a str,
    row_glue: &'a str,
    after: &'a str,
    when_empty: &'a str,
    buffer: String,
    rows: usize,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(before: &'a str, row_glue: &'a str, after: &'a str, when_empty: &'a str) -> Self {
        Self {
            before,
            row_glue,
            after,
            when_empty,
            buffer: String::new(),
            rows: 0,
        }
    }

    /// Append one rendered row
    pub fn push(&mut self, rendered: &str) {
        if self.rows == 0 {
            self.buffer.push_str(self.before);
        } else {
            self.buffer.push_str(self.row_glue);
        }
        self.buffer.push_str(rendered);
        self.rows += 1;
    }

    /// Number of rows appended so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Finish the document. With no rows the result is `when_empty`
    /// verbatim and `before`/`after` are not used.
    pub fn finish(mut self) -> String {
        if self.rows == 0 {
            return self.when_empty.to_string();
        }
        self.buffer.push_str(self.after);
        self.buffer
    }
}

/// Assemble a complete document from already rendered rows
pub fn assemble<I, S>(rendered_rows: I, before: &str, row_glue: &str, after: &str, when_empty: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut assembler = DocumentAssembler::new(before, row_glue, after, when_empty);
    for row in rendered_rows {
        assembler.push(row.as_ref());
    }
    assembler.finish()
}
