use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use treepledge::export::{self, ExportOptions, HEADER};
use treepledge::init::init_csv;
use treepledge::report;
use treepledge::{
    CsvStore, DesignationTier, Snapshot, Status, StatusFilter, Submission, SubmissionStore,
};

fn pledge(first: &str, last: &str, day: u32) -> Submission {
    Submission {
        first_name: first.into(),
        last_name: last.into(),
        submitted_at: Some(Utc.with_ymd_and_hms(2024, 8, day, 6, 30, 0).unwrap()),
        ..Default::default()
    }
}

#[test]
fn end_to_end_through_csv_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = init_csv(dir.path().join("submissions")).unwrap();
    let mut store = CsvStore::new(&path);

    let first = store
        .create_submission(Submission {
            planting_option: Some("5-tree".into()),
            total_amount: Some(1000.0),
            contribution_frequency: Some("annual-3".into()),
            final_contribution_amount: Some("₹1,000".into()),
            status: Status::Confirmed,
            ..pledge("Ravi", "Kumar", 1)
        })
        .unwrap();
    store
        .create_submission(Submission {
            one_tree_option: Some("adopt-1-tree-1-year".into()),
            bundle_plan_option: Some("adopt-family-pack".into()),
            total_amount: Some(500.0),
            contribution_frequency: Some("one-time".into()),
            dedication: Some("For the village school".into()),
            status: Status::Confirmed,
            ..pledge("ravi", "kumar", 2)
        })
        .unwrap();
    let pending = store
        .create_submission(Submission {
            planting_option: Some("other-planting".into()),
            other_trees: Some("7".into()),
            total_amount: Some(700.0),
            ..pledge("Leela", "Nair", 3)
        })
        .unwrap();

    let snapshot = Snapshot::load(&store, StatusFilter::Confirmed).unwrap();
    assert_eq!(snapshot.people.len(), 2);
    let ravi = &snapshot.people[1];
    assert_eq!(ravi.key, "ravi kumar");
    assert_eq!(ravi.total_planted, 5);
    assert_eq!(ravi.total_adopted, 4);
    assert_eq!(ravi.total_contribution, 3500.0);
    assert_eq!(ravi.designation_tier, DesignationTier::Nourisher);
    assert_eq!(ravi.dedications, vec!["For the village school"]);

    assert_eq!(snapshot.totals.total_planted, 5);
    assert_eq!(snapshot.totals.total_adopted, 4);
    assert_eq!(snapshot.totals.total_collected, 1500.0);

    store.set_status(&pending.id, Status::Confirmed).unwrap();
    let snapshot = Snapshot::load(&store, StatusFilter::Confirmed).unwrap();
    assert_eq!(snapshot.totals.total_planted, 12);
    assert_eq!(snapshot.counts.pending, 0);

    store.delete_submission(&first.id).unwrap();
    let snapshot = Snapshot::load(&store, StatusFilter::All).unwrap();
    assert_eq!(snapshot.submissions.len(), 2);
    assert_eq!(snapshot.totals.total_planted, 7);
}

#[test]
fn export_writes_stamped_quoted_file() {
    let dir = tempfile::tempdir().unwrap();
    let submissions = vec![
        Submission {
            planting_option: Some("12-tree".into()),
            status: Status::Confirmed,
            ..pledge("Farah", "Sheikh", 5)
        },
        pledge("Gopal", "Menon", 4),
    ];
    let now = Utc.with_ymd_and_hms(2024, 8, 10, 18, 0, 0).unwrap();
    let opts = ExportOptions::default();

    let path = export::export_submissions(dir.path(), &submissions, &opts, now).unwrap();
    assert_eq!(
        path.file_name().unwrap(),
        "submissions_2024-08-10_23-30-00.csv"
    );

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    let header = HEADER
        .iter()
        .map(|h| format!("\"{}\"", h))
        .collect::<Vec<_>>()
        .join(",");
    assert_eq!(lines[0], header);
    assert!(lines[1].starts_with("\"confirmed\",\"Farah Sheikh\",\"\",\"\",\"\",\"\",\"05/08/2024\",\"12:00:00\""));
    assert!(lines[2].starts_with("\"pending\",\"Gopal Menon\""));
}

#[test]
fn report_is_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.xlsx");
    let snapshot = Snapshot::build(
        vec![Submission {
            lifetime_plan_option: Some("adopt-lifetime".into()),
            status: Status::Confirmed,
            ..pledge("Isha", "Verma", 9)
        }],
        StatusFilter::Confirmed,
    );
    report::generate_report(&snapshot, &output, &ExportOptions::default(), Utc::now()).unwrap();
    assert!(std::fs::metadata(&output).unwrap().len() > 0);
}
