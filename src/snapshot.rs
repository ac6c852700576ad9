use crate::aggregate::aggregate;
use crate::error::Result;
use crate::model::{AggregatedPerson, Submission};
use crate::store::SubmissionStore;
use crate::summary::{
    PeopleTotals, StatusCounts, StatusFilter, SummaryTotals, status_counts, summarize_people,
    summarize_with,
};
use serde::Serialize;

/// Every reporting figure computed from one read of the record store.
///
/// Nothing is cached between reads; build a new snapshot whenever the
/// underlying records change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(skip)]
    pub submissions: Vec<Submission>,
    pub people: Vec<AggregatedPerson>,
    pub totals: SummaryTotals,
    pub people_totals: PeopleTotals,
    pub counts: StatusCounts,
}

impl Snapshot {
    pub fn build(submissions: Vec<Submission>, filter: StatusFilter) -> Self {
        let people = aggregate(&submissions);
        Self {
            totals: summarize_with(&submissions, filter),
            people_totals: summarize_people(&people),
            counts: status_counts(&submissions),
            people,
            submissions,
        }
    }

    pub fn load<S: SubmissionStore + ?Sized>(store: &S, filter: StatusFilter) -> Result<Self> {
        Ok(Self::build(store.list_submissions()?, filter))
    }
}
