// Row rendering through a format template or a row builder
use crate::error::ConvertError;
use crate::renderer::options::ResolvedFormat;

/// A validated format template split around its single `%s` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    prefix: String,
    suffix: String,
}

impl Template {
    /// Parse a format string. `%%` is a literal percent sign; exactly one
    /// `%s` must be present and no other directive is accepted.
    pub fn parse(template: &str) -> Result<Self, ConvertError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut placeholders = 0;
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            let out = if placeholders == 0 { &mut prefix } else { &mut suffix };
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('%') => out.push('%'),
                Some('s') => placeholders += 1,
                Some(other) => {
                    return Err(ConvertError::configuration(format!(
                        "unsupported directive %{} in row format {:?}",
                        other, template
                    )))
                }
                None => {
                    return Err(ConvertError::configuration(format!(
                        "dangling % at end of row format {:?}",
                        template
                    )))
                }
            }
        }

        if placeholders != 1 {
            return Err(ConvertError::configuration(format!(
                "row format {:?} must contain exactly one %s placeholder, found {}",
                template, placeholders
            )));
        }

        Ok(Self { prefix, suffix })
    }

    /// Substitute the glued fields into the placeholder
    pub fn render(&self, fields: &[String], values_glue: &str) -> String {
        let joined = fields.join(values_glue);
        let mut out = String::with_capacity(self.prefix.len() + joined.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(&joined);
        out.push_str(&self.suffix);
        out
    }
}

/// Escape text so it is taken literally when embedded in a template
pub fn escape_template_literal(text: &str) -> String {
    text.replace('%', "%%")
}

/// Turns one transformed row into one rendered string
pub struct RowRenderer<'a> {
    format: &'a ResolvedFormat,
    values_glue: &'a str,
}

impl<'a> RowRenderer<'a> {
    pub fn new(format: &'a ResolvedFormat, values_glue: &'a str) -> Self {
        Self {
            format,
            values_glue,
        }
    }

    pub fn render(&self, fields: &[String], row_index: usize) -> Result<String, ConvertError> {
        match self.format {
            ResolvedFormat::Template(template) => Ok(template.render(fields, self.values_glue)),
            ResolvedFormat::Builder(builder) => {
                builder(fields).map_err(|e| ConvertError::from_hook(row_index, e))
            }
        }
    }
}
