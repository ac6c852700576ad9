use crate::model::{DerivedMetrics, DesignationTier, Submission};
use crate::pledge::Pledge;

/// Planted and adopted counts, pledged amount and tier for one submission.
pub fn derive(submission: &Submission) -> DerivedMetrics {
    derive_pledge(&Pledge::from(submission))
}

pub fn derive_pledge(pledge: &Pledge) -> DerivedMetrics {
    DerivedMetrics {
        planted: pledge.planted(),
        adopted: pledge.adopted(),
        full_contribution: pledge.full_contribution(),
        tier: tier(pledge),
    }
}

/// Lifetime plans outrank bundles, which outrank everything else.
/// One-tree plans and donations never lift a submission above Companion.
pub fn tier(pledge: &Pledge) -> DesignationTier {
    if pledge.lifetime.is_some() {
        DesignationTier::Protector
    } else if pledge.bundle.is_some() {
        DesignationTier::Nourisher
    } else {
        DesignationTier::Companion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use pretty_assertions::assert_eq;

    fn submission() -> Submission {
        Submission {
            first_name: "Meera".into(),
            last_name: "Iyer".into(),
            status: Status::Confirmed,
            ..Default::default()
        }
    }

    #[test]
    fn other_planting_reads_other_trees() {
        let s = Submission {
            planting_option: Some("other-planting".into()),
            other_trees: Some("7".into()),
            ..submission()
        };
        assert_eq!(derive(&s).planted, 7);
    }

    #[test]
    fn fixed_planting_count() {
        let s = Submission {
            planting_option: Some("12-tree".into()),
            ..submission()
        };
        assert_eq!(derive(&s).planted, 12);
    }

    #[test]
    fn first_bundle_keyword_in_priority_order_wins() {
        let s = Submission {
            bundle_plan_option: Some("couple-less-grove-12".into()),
            ..submission()
        };
        // couple before family before grove, then the digit fallback
        assert_eq!(derive(&s).adopted, 2);

        let s = Submission {
            bundle_plan_option: Some("adopt-grove-pack-12".into()),
            ..submission()
        };
        assert_eq!(derive(&s).adopted, 5);
    }

    #[test]
    fn lifetime_without_digits_adopts_one() {
        let s = Submission {
            lifetime_plan_option: Some("adopt-lifetime".into()),
            ..submission()
        };
        let metrics = derive(&s);
        assert_eq!(metrics.adopted, 1);
        assert_eq!(metrics.tier, DesignationTier::Protector);
    }

    #[test]
    fn plans_are_additive() {
        let s = Submission {
            one_tree_option: Some("adopt-1-tree-1-year".into()),
            bundle_plan_option: Some("adopt-family-pack".into()),
            lifetime_plan_option: Some("adopt-3-tree-lifetime".into()),
            ..submission()
        };
        assert_eq!(derive(&s).adopted, 1 + 3 + 3);
    }

    #[test]
    fn full_contribution_uses_frequency() {
        let s = Submission {
            total_amount: Some(1000.0),
            contribution_frequency: Some("annual-3".into()),
            ..submission()
        };
        assert_eq!(derive(&s).full_contribution, 3000.0);

        let s = Submission {
            total_amount: Some(1000.0),
            contribution_frequency: Some("weekly".into()),
            ..submission()
        };
        assert_eq!(derive(&s).full_contribution, 1000.0);
    }

    #[test]
    fn tier_ignores_one_tree_and_donation() {
        let s = Submission {
            one_tree_option: Some("adopt-1-tree-1-year".into()),
            donation_option: Some("5000".into()),
            ..submission()
        };
        assert_eq!(derive(&s).tier, DesignationTier::Companion);

        let s = Submission {
            bundle_plan_option: Some("adopt-couple-pack".into()),
            ..submission()
        };
        assert_eq!(derive(&s).tier, DesignationTier::Nourisher);
    }

    #[test]
    fn empty_submission_derives_zeroes() {
        assert_eq!(derive(&Submission::default()), DerivedMetrics::default());
    }
}
