//! Record stores the reporting core reads submissions from.
//!
//! The core never holds a store itself; callers pass one in.

use crate::error::{Error, Result};
use crate::init::SUBMISSION_COLUMNS;
use crate::model::{Status, Submission};
use chrono::Utc;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

pub trait SubmissionStore {
    /// All submissions, newest first.
    fn list_submissions(&self) -> Result<Vec<Submission>>;

    /// Stores a new submission. A blank id gets a fresh UUID and a missing
    /// timestamp is set to now.
    fn create_submission(&mut self, submission: Submission) -> Result<Submission>;

    fn update_submission(&mut self, submission: Submission) -> Result<()>;

    fn delete_submission(&mut self, id: &str) -> Result<()>;

    fn set_status(&mut self, id: &str, status: Status) -> Result<()>;
}

fn newest_first(submissions: &mut [Submission]) {
    // None sorts before Some, so reversing the comparison puts undated records last
    submissions.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
}

fn position(records: &[Submission], id: &str) -> Result<usize> {
    records
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

fn insert(records: &mut Vec<Submission>, mut submission: Submission) -> Result<Submission> {
    if submission.id.trim().is_empty() {
        submission.id = Uuid::new_v4().to_string();
    }
    if records.iter().any(|s| s.id == submission.id) {
        return Err(Error::DuplicateId(submission.id));
    }
    submission.submitted_at.get_or_insert_with(Utc::now);
    records.push(submission.clone());
    Ok(submission)
}

fn replace(records: &mut [Submission], submission: Submission) -> Result<()> {
    let idx = position(records, &submission.id)?;
    records[idx] = submission;
    Ok(())
}

fn remove(records: &mut Vec<Submission>, id: &str) -> Result<()> {
    let idx = position(records, id)?;
    records.remove(idx);
    Ok(())
}

fn restatus(records: &mut [Submission], id: &str, status: Status) -> Result<()> {
    let idx = position(records, id)?;
    records[idx].status = status;
    Ok(())
}

/// Keeps submissions in memory. Useful for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Vec<Submission>,
}

impl MemoryStore {
    pub fn new(records: Vec<Submission>) -> Self {
        Self { records }
    }
}

impl SubmissionStore for MemoryStore {
    fn list_submissions(&self) -> Result<Vec<Submission>> {
        let mut records = self.records.clone();
        newest_first(&mut records);
        Ok(records)
    }

    fn create_submission(&mut self, submission: Submission) -> Result<Submission> {
        insert(&mut self.records, submission)
    }

    fn update_submission(&mut self, submission: Submission) -> Result<()> {
        replace(&mut self.records, submission)
    }

    fn delete_submission(&mut self, id: &str) -> Result<()> {
        remove(&mut self.records, id)
    }

    fn set_status(&mut self, id: &str, status: Status) -> Result<()> {
        restatus(&mut self.records, id, status)
    }
}

/// A CSV file with one submission per row. Every mutation rewrites the file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Submission>> {
        let file = File::open(&self.path)?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let mut records = Vec::new();
        for result in rdr.deserialize() {
            records.push(result?);
        }
        tracing::debug!(path = %self.path.display(), rows = records.len(), "loaded submissions");
        Ok(records)
    }

    /// Writes a sibling temp file and renames it over the data file, so a
    /// failed write never leaves a truncated file behind.
    fn save(&self, records: &[Submission]) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut wtr = WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file_mut());
            wtr.write_record(SUBMISSION_COLUMNS)?;
            for record in records {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }
        tmp.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path.display(), rows = records.len(), "saved submissions");
        Ok(())
    }

    fn modify<T>(&self, f: impl FnOnce(&mut Vec<Submission>) -> Result<T>) -> Result<T> {
        let mut records = self.load()?;
        let out = f(&mut records)?;
        self.save(&records)?;
        Ok(out)
    }
}

impl SubmissionStore for CsvStore {
    fn list_submissions(&self) -> Result<Vec<Submission>> {
        let mut records = self.load()?;
        newest_first(&mut records);
        Ok(records)
    }

    fn create_submission(&mut self, submission: Submission) -> Result<Submission> {
        self.modify(|records| insert(records, submission))
    }

    fn update_submission(&mut self, submission: Submission) -> Result<()> {
        self.modify(|records| replace(records, submission))
    }

    fn delete_submission(&mut self, id: &str) -> Result<()> {
        self.modify(|records| remove(records, id))
    }

    fn set_status(&mut self, id: &str, status: Status) -> Result<()> {
        self.modify(|records| restatus(records, id, status))?;
        tracing::info!(id, %status, "status updated");
        Ok(())
    }
}
