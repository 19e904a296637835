use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use getset::Getters;
use log::{debug, warn};
use thiserror::Error;

pub const ACCOUNT_NAME: &str = "Account Name";
pub const DESCRIPTION: &str = "Description";
pub const CURRENT_VALUE: &str = "Current Value";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to open snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read snapshot: {0}")]
    Csv(#[from] csv::Error),
    #[error("snapshot has no `{0}` column")]
    MissingColumn(&'static str),
}

/// One position of the brokerage export.
#[derive(Debug, Clone, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct SnapshotRow {
    account_name: String,
    description: String,
    /// Still carries the currency prefix, e.g. `$500.00`.
    current_value: String,
}

impl SnapshotRow {
    pub fn new(
        account_name: impl Into<String>,
        description: impl Into<String>,
        current_value: impl Into<String>,
    ) -> SnapshotRow {
        SnapshotRow {
            account_name: account_name.into(),
            description: description.into(),
            current_value: current_value.into(),
        }
    }
}

/// The brokerage export, loaded once and never modified.
#[derive(Debug, Default)]
pub struct Snapshot {
    rows: Vec<SnapshotRow>,
    /// Every non-empty cell of every kept record, whatever its column.
    values: HashSet<String>,
}

impl Snapshot {
    pub fn rows(&self) -> &[SnapshotRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `value` shows up anywhere in the export, in any column.
    pub fn contains_value(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    /// First row in file order with the given account name and description.
    pub fn find(&self, account_name: &str, description: &str) -> Option<&SnapshotRow> {
        self.rows
            .iter()
            .find(|row| row.account_name == account_name && row.description == description)
    }

    fn push(&mut self, row: SnapshotRow, cells: impl Iterator<Item = String>) {
        self.values.extend(cells.filter(|cell| !cell.is_empty()));
        self.rows.push(row);
    }
}

impl FromIterator<SnapshotRow> for Snapshot {
    fn from_iter<I: IntoIterator<Item = SnapshotRow>>(iter: I) -> Self {
        let mut snapshot = Snapshot::default();
        for row in iter {
            let cells = vec![
                row.account_name.clone(),
                row.description.clone(),
                row.current_value.clone(),
            ];
            snapshot.push(row, cells.into_iter());
        }
        snapshot
    }
}

pub fn load_snapshot(file_path: impl AsRef<Path>) -> Result<Snapshot, SnapshotError> {
    let file = File::open(file_path)?;
    read_snapshot(file)
}

/// Reads a brokerage export. Columns are located by header name, so exports
/// carrying extra columns load fine. Records missing one of the three required
/// fields, like the disclaimer lines at the end of an export, are skipped.
pub fn read_snapshot<R: Read>(reader: R) -> Result<Snapshot, SnapshotError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|header| header.trim_start_matches('\u{feff}') == name)
            .ok_or(SnapshotError::MissingColumn(name))
    };
    let account_name = column(ACCOUNT_NAME)?;
    let description = column(DESCRIPTION)?;
    let current_value = column(CURRENT_VALUE)?;

    let mut snapshot = Snapshot::default();
    let mut keys = HashSet::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        let field = |index: usize| record.get(index).filter(|value| !value.is_empty());

        match (field(account_name), field(description), field(current_value)) {
            (Some(account_name), Some(description), Some(current_value)) => {
                if !keys.insert((account_name.to_string(), description.to_string())) {
                    warn!(
                        "duplicate snapshot row for {} / {}, the first one is used",
                        account_name, description
                    );
                }
                let row = SnapshotRow::new(account_name, description, current_value);
                snapshot.push(row, record.iter().map(str::to_string));
            },
            _ => debug!("skipping incomplete snapshot record {}", line + 1),
        }
    }

    Ok(snapshot)
}
