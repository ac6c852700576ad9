use crate::derive::derive;
use crate::model::{AggregatedPerson, Status, Submission};
use crate::options;
use serde::Serialize;

/// Which submissions a summary counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Verified payments only; the figure shown publicly.
    #[default]
    Confirmed,
    Pending,
    All,
}

impl StatusFilter {
    pub fn admits(&self, status: Status) -> bool {
        match self {
            StatusFilter::Confirmed => status == Status::Confirmed,
            StatusFilter::Pending => status == Status::Pending,
            StatusFilter::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_planted: u64,
    pub total_adopted: u64,
    /// Sum of recorded payments, not of pledged amounts.
    pub total_collected: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleTotals {
    pub people: usize,
    pub total_planted: u64,
    pub total_adopted: u64,
    /// Sum of frequency-multiplied pledges.
    pub total_contribution: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub confirmed: usize,
}

/// Totals over confirmed submissions.
pub fn summarize(submissions: &[Submission]) -> SummaryTotals {
    summarize_with(submissions, StatusFilter::Confirmed)
}

pub fn summarize_with(submissions: &[Submission], filter: StatusFilter) -> SummaryTotals {
    submissions
        .iter()
        .filter(|s| filter.admits(s.status))
        .fold(SummaryTotals::default(), |mut totals, s| {
            let metrics = derive(s);
            totals.total_planted = totals.total_planted.saturating_add(metrics.planted);
            totals.total_adopted = totals.total_adopted.saturating_add(metrics.adopted);
            totals.total_collected += collected_amount(s);
            totals
        })
}

/// Amount actually recorded as received: the final amount text when there
/// is one, otherwise the installment amount.
pub fn collected_amount(submission: &Submission) -> f64 {
    match options::present(submission.final_contribution_amount.as_deref()) {
        Some(text) => options::parse_amount_text(text).unwrap_or(0.0),
        None => submission.installment_amount(),
    }
}

pub fn summarize_people(people: &[AggregatedPerson]) -> PeopleTotals {
    people.iter().fold(
        PeopleTotals {
            people: people.len(),
            ..Default::default()
        },
        |mut totals, p| {
            totals.total_planted = totals.total_planted.saturating_add(p.total_planted);
            totals.total_adopted = totals.total_adopted.saturating_add(p.total_adopted);
            totals.total_contribution += p.total_contribution;
            totals
        },
    )
}

pub fn status_counts(submissions: &[Submission]) -> StatusCounts {
    submissions
        .iter()
        .fold(StatusCounts::default(), |mut counts, s| {
            match s.status {
                Status::Pending => counts.pending += 1,
                Status::Confirmed => counts.confirmed += 1,
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use pretty_assertions::assert_eq;

    fn confirmed() -> Submission {
        Submission {
            first_name: "Kiran".into(),
            last_name: "Shah".into(),
            status: Status::Confirmed,
            ..Default::default()
        }
    }

    #[test]
    fn pending_submissions_contribute_nothing() {
        let pending = Submission {
            status: Status::Pending,
            planting_option: Some("50-tree".into()),
            lifetime_plan_option: Some("adopt-9-tree-lifetime".into()),
            final_contribution_amount: Some("₹99,999".into()),
            total_amount: Some(99_999.0),
            ..confirmed()
        };
        assert_eq!(summarize(&[pending]), SummaryTotals::default());
    }

    #[test]
    fn collected_prefers_final_amount_text() {
        let submissions = vec![
            Submission {
                final_contribution_amount: Some("₹1,500".into()),
                total_amount: Some(500.0),
                contribution_frequency: Some("annual-3".into()),
                ..confirmed()
            },
            Submission {
                final_contribution_amount: Some("".into()),
                total_amount: Some(250.0),
                ..confirmed()
            },
            Submission {
                final_contribution_amount: Some("n/a".into()),
                total_amount: Some(800.0),
                ..confirmed()
            },
        ];
        assert_eq!(summarize(&submissions).total_collected, 1750.0);
    }

    #[test]
    fn filter_selects_statuses() {
        let submissions = vec![
            Submission {
                planting_option: Some("2-tree".into()),
                ..confirmed()
            },
            Submission {
                status: Status::Pending,
                planting_option: Some("3-tree".into()),
                ..confirmed()
            },
        ];
        assert_eq!(summarize_with(&submissions, StatusFilter::Confirmed).total_planted, 2);
        assert_eq!(summarize_with(&submissions, StatusFilter::Pending).total_planted, 3);
        assert_eq!(summarize_with(&submissions, StatusFilter::All).total_planted, 5);
        assert_eq!(
            status_counts(&submissions),
            StatusCounts {
                pending: 1,
                confirmed: 1
            }
        );
    }

    #[test]
    fn people_totals_use_pledged_amounts() {
        let submissions = vec![
            Submission {
                planting_option: Some("5-tree".into()),
                total_amount: Some(1000.0),
                contribution_frequency: Some("annual-5".into()),
                final_contribution_amount: Some("1000".into()),
                ..confirmed()
            },
            Submission {
                first_name: "Lata".into(),
                bundle_plan_option: Some("adopt-grove-pack".into()),
                total_amount: Some(300.0),
                ..confirmed()
            },
        ];
        let totals = summarize_people(&aggregate(&submissions));
        assert_eq!(
            totals,
            PeopleTotals {
                people: 2,
                total_planted: 5,
                total_adopted: 5,
                total_contribution: 5300.0,
            }
        );
        assert_eq!(summarize(&submissions).total_collected, 1300.0);
    }
}
