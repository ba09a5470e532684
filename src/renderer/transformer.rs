// Row transformer: whole-row filter followed by per-value filter
use crate::error::ConvertError;
use crate::renderer::options::{ValueFilter, ValuesFilter};
use crate::types::Row;

/// Applies the configured row and value hooks to each raw row
pub struct RowTransformer<'a> {
    values_filter: Option<&'a ValuesFilter>,
    value_filter: &'a ValueFilter,
}

impl<'a> RowTransformer<'a> {
    pub fn new(values_filter: Option<&'a ValuesFilter>, value_filter: &'a ValueFilter) -> Self {
        Self {
            values_filter,
            value_filter,
        }
    }

    /// Transform one raw row. `Ok(None)` means the row was dropped by the
    /// whole-row filter.
    pub fn transform(&self, row: Row, row_index: usize) -> Result<Option<Vec<String>>, ConvertError> {
        let row = match self.values_filter {
            Some(filter) => match filter(row, row_index) {
                Ok(Some(row)) => row,
                Ok(None) => return Ok(None),
                Err(e) => return Err(ConvertError::from_hook(row_index, e)),
            },
            None => row,
        };

        row.iter()
            .enumerate()
            .map(|(col_index, value)| {
                (self.value_filter)(value.as_str(), row_index, col_index)
                    .map(Option::unwrap_or_default)
                    .map_err(|e| ConvertError::from_hook(row_index, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}
