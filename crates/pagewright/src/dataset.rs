//! Test Data Pipeline.
//!
//! Resolves a CSV file from the active environment and the invoking test
//! file's name — `data/<env>/<basename>.csv`, where the basename drops the
//! `test_` prefix and the source extension — then loads its rows as ordered
//! test inputs. A missing environment folder or CSV file is a configuration
//! error raised before any test body executes; it is never retried.
//!
//! The first CSV row is the header; every data row must carry a `code`
//! field. `code` uniqueness within a file is assumed, not enforced — a
//! collision silently overwrites the prior tracker entry.

use crate::config::Environment;
use crate::result::{PagewrightError, PagewrightResult};
use std::path::{Path, PathBuf};

/// Default root folder for test data
pub const DEFAULT_DATA_DIR: &str = "data";

/// The field every data row must carry
pub const CODE_FIELD: &str = "code";

/// One CSV row: an ordered set of named fields, immutable once read.
///
/// One row drives one parametrized test invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    index: usize,
    fields: Vec<(String, String)>,
}

impl DataRow {
    /// Zero-based row index within the file
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Field value by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// The row's `code` identifier
    #[must_use]
    pub fn code(&self) -> &str {
        // presence is validated at load time
        self.get(CODE_FIELD).unwrap_or_default()
    }

    /// Field names in file order
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// All rows of one resolved CSV file, in file order
#[derive(Debug, Clone)]
pub struct DataSet {
    path: PathBuf,
    rows: Vec<DataRow>,
}

impl DataSet {
    /// Derive the CSV file name from a test file name: drop the `test_`
    /// prefix and the source extension, append `.csv`.
    #[must_use]
    pub fn csv_name_for(test_file: &str) -> String {
        let stem = Path::new(test_file)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(test_file);
        let base = stem.strip_prefix("test_").unwrap_or(stem);
        format!("{base}.csv")
    }

    /// Resolve the CSV path for a test, failing fast when the environment
    /// folder or the derived file is absent.
    pub fn resolve_path(
        data_dir: impl AsRef<Path>,
        env: Environment,
        test_file: &str,
    ) -> PagewrightResult<PathBuf> {
        let base_folder = data_dir.as_ref().join(env.as_str());
        if !base_folder.exists() {
            return Err(PagewrightError::MissingDataFolder {
                path: base_folder.display().to_string(),
            });
        }

        let csv_path = base_folder.join(Self::csv_name_for(test_file));
        if !csv_path.exists() {
            return Err(PagewrightError::MissingDataFile {
                test: test_file.to_string(),
                path: csv_path.display().to_string(),
            });
        }

        Ok(csv_path)
    }

    /// Resolve and load the dataset for a test under a data root
    pub fn load(
        data_dir: impl AsRef<Path>,
        env: Environment,
        test_file: &str,
    ) -> PagewrightResult<Self> {
        let path = Self::resolve_path(data_dir, env, test_file)?;
        Self::from_csv(path)
    }

    /// Resolve and load under the default `data/` root
    pub fn for_test(env: Environment, test_file: &str) -> PagewrightResult<Self> {
        Self::load(DEFAULT_DATA_DIR, env, test_file)
    }

    /// Load a CSV file directly
    pub fn from_csv(path: impl Into<PathBuf>) -> PagewrightResult<Self> {
        let path = path.into();
        let mut reader = csv::Reader::from_path(&path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            let fields: Vec<(String, String)> = headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect();
            let row = DataRow { index, fields };
            if row.get(CODE_FIELD).is_none() {
                return Err(PagewrightError::MissingField {
                    index,
                    field: CODE_FIELD.to_string(),
                });
            }
            rows.push(row);
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "dataset loaded");
        Ok(Self { path, rows })
    }

    /// Path the dataset was loaded from
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows in file order
    #[must_use]
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the file had no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a DataRow;
    type IntoIter = std::slice::Iter<'a, DataRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
