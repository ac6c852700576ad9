use crate::derive::derive_pledge;
use crate::model::{AggregatedPerson, Submission};
use crate::pledge::Pledge;
use indexmap::IndexMap;

/// Folds submissions into one entry per contributor.
///
/// People come out in the order their first submission was seen. Submissions
/// with a blank name share the empty key.
pub fn aggregate(submissions: &[Submission]) -> Vec<AggregatedPerson> {
    let mut people: IndexMap<String, AggregatedPerson> = IndexMap::new();

    for submission in submissions {
        let key = submission.identity_key();
        let person = people
            .entry(key.clone())
            .or_insert_with(|| AggregatedPerson {
                key,
                full_name: submission.full_name(),
                ..Default::default()
            });
        fold(person, submission);
    }

    tracing::trace!(
        submissions = submissions.len(),
        people = people.len(),
        "aggregated submissions"
    );
    people.into_values().collect()
}

fn fold(person: &mut AggregatedPerson, submission: &Submission) {
    let pledge = Pledge::from(submission);
    let metrics = derive_pledge(&pledge);
    let donation = pledge.donation.map(|d| d.amount()).unwrap_or(0);
    person.total_contribution += metrics.full_contribution;
    person.total_planted = person.total_planted.saturating_add(metrics.planted);
    person.total_adopted = person.total_adopted.saturating_add(metrics.adopted);
    person.total_donation = person.total_donation.saturating_add(donation);
    person.designation_tier = person.designation_tier.max(metrics.tier);
    person.submission_count += 1;

    if let Some(dedication) = submission
        .dedication
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        && !person.dedications.iter().any(|d| d == dedication)
    {
        person.dedications.push(dedication.to_string());
    }
}
