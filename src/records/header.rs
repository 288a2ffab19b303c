//! Header resolution: semantic role -> column index, from the actual file.

use std::collections::HashMap;

use super::{ColumnSpec, RecordError, Role};

/// Resolved column positions for one file.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    indices: HashMap<Role, usize>,
    /// Highest referenced column index + 1; rows shorter than this are rejected.
    required_width: usize,
}

impl HeaderMap {
    /// Resolve a column spec against a tab-separated header row.
    ///
    /// Fails with [`RecordError::MissingColumn`] naming the first missing
    /// field; in that case nothing from the file is processed.
    pub fn resolve(file: &str, header_row: &str, spec: &ColumnSpec) -> Result<Self, RecordError> {
        let names: Vec<&str> = header_row.split('\t').map(str::trim).collect();

        let mut indices = HashMap::new();
        let mut required_width = 0;
        for (role, column) in &spec.columns {
            let idx = names.iter().position(|n| n == column).ok_or_else(|| {
                RecordError::MissingColumn {
                    file: file.to_string(),
                    column: column.clone(),
                    role: *role,
                }
            })?;
            indices.insert(*role, idx);
            required_width = required_width.max(idx + 1);
        }

        Ok(Self {
            indices,
            required_width,
        })
    }

    /// Minimum number of fields a data row must have.
    pub fn required_width(&self) -> usize {
        self.required_width
    }

    /// Field of `row` holding the given role.
    ///
    /// Callers must have validated the row width against
    /// [`HeaderMap::required_width`]; the role must be part of the spec this
    /// map was resolved from.
    pub fn field<'a, S: AsRef<str>>(&self, row: &'a [S], role: Role) -> &'a str {
        row[self.indices[&role]].as_ref()
    }
}
