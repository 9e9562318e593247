/// A row that could not be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowFailure {
    /// Zero-based position of the row in the source read order.
    pub row_index: usize,
    pub message: String,
}

/// Outcome of migrating a single table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableReport {
    pub table: String,
    pub rows_found: usize,
    pub rows_inserted: usize,
    /// Rows swallowed by `ON CONFLICT DO NOTHING`.
    pub rows_skipped: usize,
    pub failures: Vec<RowFailure>,
}

impl TableReport {
    pub fn new(table: impl Into<String>, rows_found: usize) -> Self {
        Self {
            table: table.into(),
            rows_found,
            ..Default::default()
        }
    }

    pub fn is_empty_table(&self) -> bool {
        self.rows_found == 0
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// A media file that could not be uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

/// Outcome of migrating a single upload directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryReport {
    pub directory: String,
    /// `false` when the local directory does not exist.
    pub present: bool,
    pub files_found: usize,
    pub files_uploaded: usize,
    pub failures: Vec<FileFailure>,
}

impl DirectoryReport {
    pub fn missing(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            present: false,
            ..Default::default()
        }
    }

    pub fn new(directory: impl Into<String>, files_found: usize) -> Self {
        Self {
            directory: directory.into(),
            present: true,
            files_found,
            ..Default::default()
        }
    }
}

/// Accumulated outcome of one migration run. Not persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MigrationRunReport {
    pub tables: Vec<TableReport>,
    pub directories: Vec<DirectoryReport>,
}

impl MigrationRunReport {
    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == name)
    }

    pub fn directory(&self, name: &str) -> Option<&DirectoryReport> {
        self.directories.iter().find(|d| d.directory == name)
    }

    pub fn rows_found(&self) -> usize {
        self.tables.iter().map(|t| t.rows_found).sum()
    }

    pub fn rows_inserted(&self) -> usize {
        self.tables.iter().map(|t| t.rows_inserted).sum()
    }

    pub fn row_failures(&self) -> usize {
        self.tables.iter().map(TableReport::failed).sum()
    }

    pub fn files_found(&self) -> usize {
        self.directories.iter().map(|d| d.files_found).sum()
    }

    pub fn files_uploaded(&self) -> usize {
        self.directories.iter().map(|d| d.files_uploaded).sum()
    }

    pub fn file_failures(&self) -> usize {
        self.directories.iter().map(|d| d.failures.len()).sum()
    }

    /// True when every attempted row and file went through.
    pub fn is_clean(&self) -> bool {
        self.row_failures() == 0 && self.file_failures() == 0
    }
}
