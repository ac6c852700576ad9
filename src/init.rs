use crate::error::Result;
use csv::Writer;
use std::path::{Path, PathBuf};

/// Column names of the submissions file, in the order records are written.
pub const SUBMISSION_COLUMNS: [&str; 27] = [
    "id",
    "firstName",
    "middleName",
    "lastName",
    "email",
    "phone",
    "address",
    "pan",
    "transactionId",
    "contributionMode",
    "screenshotUrl",
    "verificationChoice",
    "plantingOption",
    "otherTrees",
    "oneTreeOption",
    "bundlePlanOption",
    "lifetimePlanOption",
    "donationOption",
    "otherDonationAmount",
    "dedication",
    "totalAmount",
    "contributionFrequency",
    "finalContributionAmount",
    "status",
    "submittedAt",
    "userEmail",
    "userId",
];

/// Creates an empty submissions file holding only the header row.
pub fn init_csv(filename: impl AsRef<Path>) -> Result<PathBuf> {
    let mut path = filename.as_ref().to_path_buf();
    if path.extension().is_none_or(|ext| ext != "csv") {
        path.as_mut_os_string().push(".csv");
    }

    let mut wtr = Writer::from_path(&path)?;
    wtr.write_record(SUBMISSION_COLUMNS)?;
    wtr.flush()?;
    tracing::info!(path = %path.display(), "created submissions file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_extension_and_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_csv(dir.path().join("pledges")).unwrap();
        assert_eq!(path.file_name().unwrap(), "pledges.csv");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), SUBMISSION_COLUMNS.join(","));
    }

    #[test]
    fn keeps_existing_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_csv(dir.path().join("pledges.csv")).unwrap();
        assert_eq!(path.file_name().unwrap(), "pledges.csv");
    }
}
