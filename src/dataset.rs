// Ownership of the loaded inspection data.
//
// A `Snapshot` is never mutated after it is built. Reloading builds a fresh
// snapshot from the same file and swaps it in only once it loaded completely,
// so a failed reload leaves the current data in place.
use crate::error::LoadError;
use crate::loader::{load_records, LoadReport};
use crate::types::InspectionRecord;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct Snapshot {
    pub records: Vec<InspectionRecord>,
    pub report: LoadReport,
    pub source: PathBuf,
    pub loaded_at: DateTime<Local>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let (records, report) = load_records(path)?;
        Ok(Snapshot {
            records,
            report,
            source: path.to_path_buf(),
            loaded_at: Local::now(),
        })
    }
}

pub struct Dataset {
    path: PathBuf,
    current: Arc<Snapshot>,
}

impl Dataset {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let current = Arc::new(Snapshot::load(&path)?);
        tracing::info!(
            path = %path.display(),
            rows = current.report.loaded_rows,
            "dataset loaded"
        );
        Ok(Dataset { path, current })
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the source file and make the result current.
    ///
    /// On error the previous snapshot stays current.
    pub fn reload(&mut self) -> Result<Arc<Snapshot>, LoadError> {
        match Snapshot::load(&self.path) {
            Ok(fresh) => {
                self.current = Arc::new(fresh);
                tracing::info!(
                    path = %self.path.display(),
                    rows = self.current.report.loaded_rows,
                    "dataset reloaded"
                );
                Ok(self.snapshot())
            }
            Err(e) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "reload failed, keeping previous dataset"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const GOOD: &str = "Consultant Name,LGA,Type of Facilities,Status,Amount Charged\n\
                        A,X,Shop,Complied,1000\n\
                        A,Y,Shop,Pending,500\n";

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "revenue_dashboard_{}_{}.csv",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reload_picks_up_new_contents() {
        let path = scratch_file("reload_ok", GOOD);
        let mut ds = Dataset::open(&path).unwrap();
        let before = ds.snapshot();
        assert_eq!(before.records.len(), 2);

        fs::write(&path, format!("{}B,Z,Hotel,Complied,250\n", GOOD)).unwrap();
        let after = ds.reload().unwrap();
        assert_eq!(after.records.len(), 3);
        assert_eq!(ds.snapshot().records.len(), 3);
        // Readers holding the old snapshot still see it whole.
        assert_eq!(before.records.len(), 2);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let path = scratch_file("reload_bad_schema", GOOD);
        let mut ds = Dataset::open(&path).unwrap();

        fs::write(&path, "Consultant Name,LGA\nA,X\n").unwrap();
        assert!(matches!(ds.reload(), Err(LoadError::MissingColumns(_))));
        assert_eq!(ds.snapshot().records.len(), 2);

        fs::remove_file(&path).unwrap();
        assert!(matches!(ds.reload(), Err(LoadError::Io { .. })));
        assert_eq!(ds.snapshot().records.len(), 2);
        assert_eq!(ds.snapshot().records[0].consultant_name, "A");
    }

    #[test]
    fn open_fails_for_missing_file() {
        assert!(Dataset::open("no/such/dir/consultants_revenue.csv").is_err());
    }
}
