use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One contributor's pledge event, as stored by the record store.
///
/// Option fields keep the raw text the form produced; [`crate::pledge::Pledge`]
/// is the structured view the deriver works on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Submission {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub pan: Option<String>,
    pub transaction_id: Option<String>,
    pub contribution_mode: Option<String>,
    pub screenshot_url: Option<String>,
    pub verification_choice: Option<String>,
    pub planting_option: Option<String>,
    pub other_trees: Option<String>,
    pub one_tree_option: Option<String>,
    pub bundle_plan_option: Option<String>,
    pub lifetime_plan_option: Option<String>,
    pub donation_option: Option<String>,
    pub other_donation_amount: Option<String>,
    pub dedication: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub total_amount: Option<f64>,
    pub contribution_frequency: Option<String>,
    pub final_contribution_amount: Option<String>,
    pub status: Status,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub submitted_at: Option<DateTime<Utc>>,
    pub user_email: Option<String>,
    pub user_id: Option<String>,
}

impl Submission {
    /// Display name: the non-blank name parts joined by single spaces.
    pub fn full_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Normalized contributor identity: lowercase, whitespace collapsed.
    pub fn identity_key(&self) -> String {
        self.full_name()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Per-installment pledge amount; negative or non-finite values count as 0.
    pub fn installment_amount(&self) -> f64 {
        match self.total_amount {
            Some(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => 0.0,
        }
    }

    pub fn frequency(&self) -> ContributionFrequency {
        self.contribution_frequency
            .as_deref()
            .map(ContributionFrequency::parse)
            .unwrap_or_default()
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == Status::Confirmed
    }
}

/// Administrative payment verification flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Confirmed,
    /// Anything that is not explicitly confirmed is treated as pending.
    #[default]
    #[serde(other)]
    Pending,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Confirmed => "confirmed",
            Status::Pending => "pending",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(Status::Confirmed),
            "pending" => Ok(Status::Pending),
            other => Err(format!("unknown status `{other}` (expected pending or confirmed)")),
        }
    }
}

/// How many installments a pledge is paid in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContributionFrequency {
    #[default]
    OneTime,
    Annual3,
    Annual5,
}

impl ContributionFrequency {
    /// Unrecognized values fall back to a single installment.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "annual-3" => ContributionFrequency::Annual3,
            "annual-5" => ContributionFrequency::Annual5,
            _ => ContributionFrequency::OneTime,
        }
    }

    pub fn multiplier(&self) -> u32 {
        match self {
            ContributionFrequency::OneTime => 1,
            ContributionFrequency::Annual3 => 3,
            ContributionFrequency::Annual5 => 5,
        }
    }
}

/// Contributor designation, ordered so that `max` picks the highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DesignationTier {
    #[default]
    Companion,
    Nourisher,
    Protector,
}

impl DesignationTier {
    pub fn level(&self) -> u8 {
        match self {
            DesignationTier::Companion => 0,
            DesignationTier::Nourisher => 1,
            DesignationTier::Protector => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DesignationTier::Companion => "Companion",
            DesignationTier::Nourisher => "Nourisher",
            DesignationTier::Protector => "Protector",
        }
    }
}

impl fmt::Display for DesignationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-submission figures produced by [`crate::derive::derive`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub planted: u64,
    pub adopted: u64,
    /// Installment amount times the number of installments ("pledged").
    pub full_contribution: f64,
    pub tier: DesignationTier,
}

/// Per-contributor fold over all of their submissions. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPerson {
    pub key: String,
    pub full_name: String,
    pub total_contribution: f64,
    pub total_planted: u64,
    pub total_adopted: u64,
    /// Sum of the separate donation amounts, outside the tree pledges.
    pub total_donation: u64,
    pub dedications: Vec<String>,
    pub designation_tier: DesignationTier,
    pub submission_count: usize,
}
