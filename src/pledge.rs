//! Structured view of a submission.
//!
//! Option strings are interpreted once here; everything downstream works on
//! these variants and never looks at the raw text again.

use crate::model::{ContributionFrequency, Submission};
use crate::options::{self, OTHER_DONATION, OTHER_PLANTING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantingChoice {
    /// A preset `N-tree` option.
    Fixed(u64),
    /// `other-planting` with a free-form count.
    Other(u64),
}

impl PlantingChoice {
    pub fn trees(&self) -> u64 {
        match self {
            PlantingChoice::Fixed(n) | PlantingChoice::Other(n) => *n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundlePlan {
    Couple,
    Family,
    Grove,
    /// Some other bundle with its size in the option text.
    Sized(u64),
    /// A bundle whose size could not be read. Still a bundle for tiering.
    Unsized,
}

impl BundlePlan {
    pub fn trees(&self) -> u64 {
        match self {
            BundlePlan::Couple => 2,
            BundlePlan::Family => 3,
            BundlePlan::Grove => 5,
            BundlePlan::Sized(n) => *n,
            BundlePlan::Unsized => 0,
        }
    }

    fn from_option(option: &str) -> Self {
        let lower = option.to_lowercase();
        match options::parse_bundle_count(Some(option)) {
            2 if lower.contains("couple") => BundlePlan::Couple,
            3 if lower.contains("family") => BundlePlan::Family,
            5 if lower.contains("grove") => BundlePlan::Grove,
            0 => BundlePlan::Unsized,
            n => BundlePlan::Sized(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationChoice {
    Preset(u64),
    Other(u64),
}

impl DonationChoice {
    pub fn amount(&self) -> u64 {
        match self {
            DonationChoice::Preset(n) | DonationChoice::Other(n) => *n,
        }
    }
}

/// A submission's pledge with every option already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Pledge {
    pub planting: Option<PlantingChoice>,
    /// Trees adopted through the one-tree plan.
    pub one_tree: Option<u64>,
    pub bundle: Option<BundlePlan>,
    /// Trees adopted through the lifetime plan.
    pub lifetime: Option<u64>,
    pub donation: Option<DonationChoice>,
    pub installment: f64,
    pub frequency: ContributionFrequency,
}

impl Pledge {
    pub fn from_submission(submission: &Submission) -> Self {
        let planting = options::present(submission.planting_option.as_deref()).map(|option| {
            let count = options::parse_planting_count(
                Some(option),
                submission.other_trees.as_deref(),
            );
            if option == OTHER_PLANTING {
                PlantingChoice::Other(count)
            } else {
                PlantingChoice::Fixed(count)
            }
        });

        let one_tree = options::present(submission.one_tree_option.as_deref())
            .map(|option| options::parse_adopted_count(Some(option)));
        let bundle =
            options::present(submission.bundle_plan_option.as_deref()).map(BundlePlan::from_option);
        let lifetime = options::present(submission.lifetime_plan_option.as_deref())
            .map(|option| options::parse_adopted_count(Some(option)));

        let donation = options::present(submission.donation_option.as_deref()).map(|option| {
            let amount = options::parse_donation_amount(
                Some(option),
                submission.other_donation_amount.as_deref(),
            );
            if option == OTHER_DONATION {
                DonationChoice::Other(amount)
            } else {
                DonationChoice::Preset(amount)
            }
        });

        Self {
            planting,
            one_tree,
            bundle,
            lifetime,
            donation,
            installment: submission.installment_amount(),
            frequency: submission.frequency(),
        }
    }

    pub fn planted(&self) -> u64 {
        self.planting.map(|p| p.trees()).unwrap_or(0)
    }

    /// One-tree, bundle and lifetime plans add up; a submission may carry all three.
    pub fn adopted(&self) -> u64 {
        self.one_tree
            .unwrap_or(0)
            .saturating_add(self.bundle.map(|b| b.trees()).unwrap_or(0))
            .saturating_add(self.lifetime.unwrap_or(0))
    }

    pub fn full_contribution(&self) -> f64 {
        self.installment * f64::from(self.frequency.multiplier())
    }
}

impl From<&Submission> for Pledge {
    fn from(submission: &Submission) -> Self {
        Pledge::from_submission(submission)
    }
}
