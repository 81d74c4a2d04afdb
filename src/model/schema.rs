//! Column metadata

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
}

impl Column {
    /// Create a new column with name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
