//! Flat tabular export of submissions and aggregated contributors.
//!
//! CSV output is UTF-8 with a header row, every field double-quoted and `\n`
//! line endings. Spreadsheet consumers depend on this layout.

use crate::derive::derive;
use crate::error::Result;
use crate::model::{AggregatedPerson, Submission};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// India Standard Time, +05:30.
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

pub const HEADER: [&str; 26] = [
    "Status",
    "Full Name",
    "Email",
    "Phone",
    "Address",
    "PAN",
    "Date",
    "Time",
    "Transaction ID",
    "Contribution Mode",
    "Screenshot URL",
    "Planting Option",
    "Trees Planted",
    "Dedication",
    "One Tree Option",
    "Bundle Plan Option",
    "Lifetime Plan Option",
    "Donation Option",
    "Other Donation Amount",
    "Verification Choice",
    "Contribution Mode",
    "Contribution Frequency",
    "Final Contribution Amount",
    "Total Amount",
    "Final Contribution Amount",
    "User Email",
];

pub const PEOPLE_HEADER: [&str; 9] = [
    "Full Name",
    "Designation",
    "Tier",
    "Trees Planted",
    "Trees Adopted",
    "Total Contribution",
    "Donations",
    "Submissions",
    "Dedications",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Offset dates and times are rendered in, whatever the host's zone.
    pub utc_offset_secs: i32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            utc_offset_secs: DEFAULT_UTC_OFFSET_SECS,
        }
    }
}

impl ExportOptions {
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }

    pub fn localize(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.offset())
    }
}

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

/// Cells for one submission, in [`HEADER`] order.
pub fn to_row(submission: &Submission, opts: &ExportOptions) -> Vec<String> {
    let (date, time) = submission
        .submitted_at
        .map(|at| {
            let local = opts.localize(at);
            (
                local.format("%d/%m/%Y").to_string(),
                local.format("%H:%M:%S").to_string(),
            )
        })
        .unwrap_or_default();
    let planted = derive(submission).planted;

    vec![
        submission.status.to_string(),
        submission.full_name(),
        text(&submission.email),
        text(&submission.phone),
        text(&submission.address),
        text(&submission.pan),
        date,
        time,
        text(&submission.transaction_id),
        text(&submission.contribution_mode),
        text(&submission.screenshot_url),
        text(&submission.planting_option),
        planted.to_string(),
        text(&submission.dedication),
        text(&submission.one_tree_option),
        text(&submission.bundle_plan_option),
        text(&submission.lifetime_plan_option),
        text(&submission.donation_option),
        text(&submission.other_donation_amount),
        text(&submission.verification_choice),
        text(&submission.contribution_mode),
        text(&submission.contribution_frequency),
        text(&submission.final_contribution_amount),
        submission
            .total_amount
            .map(|amount| amount.to_string())
            .unwrap_or_default(),
        text(&submission.final_contribution_amount),
        text(&submission.user_email),
    ]
}

/// Cells for one contributor, in [`PEOPLE_HEADER`] order.
pub fn person_row(person: &AggregatedPerson) -> Vec<String> {
    vec![
        person.full_name.clone(),
        person.designation_tier.label().to_string(),
        person.designation_tier.level().to_string(),
        person.total_planted.to_string(),
        person.total_adopted.to_string(),
        person.total_contribution.to_string(),
        person.total_donation.to_string(),
        person.submission_count.to_string(),
        person.dedications.join("; "),
    ]
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer)
}

pub fn write_submissions_csv<W: Write>(
    writer: W,
    submissions: &[Submission],
    opts: &ExportOptions,
) -> Result<()> {
    let mut wtr = csv_writer(writer);
    wtr.write_record(HEADER)?;
    for submission in submissions {
        wtr.write_record(to_row(submission, opts))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_people_csv<W: Write>(writer: W, people: &[AggregatedPerson]) -> Result<()> {
    let mut wtr = csv_writer(writer);
    wtr.write_record(PEOPLE_HEADER)?;
    for person in people {
        wtr.write_record(person_row(person))?;
    }
    wtr.flush()?;
    Ok(())
}

/// `<prefix>_YYYY-MM-DD_HH-MM-SS.csv`
pub fn export_file_name(prefix: &str, at: DateTime<FixedOffset>) -> String {
    format!("{}_{}.csv", prefix, at.format("%Y-%m-%d_%H-%M-%S"))
}

pub fn export_submissions(
    dir: &Path,
    submissions: &[Submission],
    opts: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name("submissions", opts.localize(now)));
    write_submissions_csv(File::create(&path)?, submissions, opts)?;
    tracing::info!(path = %path.display(), rows = submissions.len(), "exported submissions");
    Ok(path)
}

pub fn export_people(
    dir: &Path,
    people: &[AggregatedPerson],
    opts: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name("contributors", opts.localize(now)));
    write_people_csv(File::create(&path)?, people)?;
    tracing::info!(path = %path.display(), rows = people.len(), "exported contributors");
    Ok(path)
}
