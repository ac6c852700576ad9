use crate::error::Result;
use crate::export::{ExportOptions, HEADER, to_row};
use crate::model::{AggregatedPerson, DesignationTier};
use crate::snapshot::Snapshot;
use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const PEOPLE_COLUMNS: u16 = 9;

/// `<stem>-report.xlsx` beside the data file.
pub fn default_report_path(data: &Path) -> PathBuf {
    let stem = data
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "submissions".into());
    data.with_file_name(format!("{stem}-report.xlsx"))
}

struct ReportFormats {
    title: Format,
    header: Format,
    cell: Format,
    money: Format,
    label: Format,
    note: Format,
}

impl ReportFormats {
    fn new() -> Self {
        let boxed = Format::new()
            .set_border(FormatBorder::Thin)
            .set_align(FormatAlign::VerticalCenter);
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(18)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            header: boxed
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(0xE2EFDA))
                .set_align(FormatAlign::Center)
                .set_text_wrap(),
            cell: boxed.clone().set_align(FormatAlign::Center),
            money: boxed.clone().set_num_format("#,##0.00"),
            label: boxed.clone().set_bold().set_align(FormatAlign::Left),
            note: boxed.set_align(FormatAlign::Left).set_text_wrap(),
        }
    }
}

/// Dense ranking by pledged contribution, highest first. Equal amounts share
/// a rank and the next amount takes the following rank.
fn compute_ranks(people: &[AggregatedPerson]) -> HashMap<String, u32> {
    let mut totals: Vec<(&str, f64)> = people
        .iter()
        .map(|p| (p.key.as_str(), p.total_contribution))
        .collect();
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut rank_map = HashMap::new();
    let Some(&(_, first)) = totals.first() else {
        return rank_map;
    };
    let (mut cur_rank, mut prev_score) = (1, first);
    for (key, score) in totals {
        if score != prev_score {
            cur_rank += 1;
            prev_score = score;
        }
        rank_map.insert(key.to_string(), cur_rank);
    }
    rank_map
}

fn write_report_header(
    ws: &mut Worksheet,
    start_row: u32,
    snapshot: &Snapshot,
    generated: &str,
    fmt: &ReportFormats,
) -> Result<u32> {
    const TITLE_ROW_HEIGHT: f64 = 30.0;
    let last_col = PEOPLE_COLUMNS - 1;

    ws.set_row_height(start_row, TITLE_ROW_HEIGHT)?;
    ws.merge_range(
        start_row,
        0,
        start_row,
        last_col,
        "Tree Pledge Contribution Report",
        &fmt.title,
    )?;
    let r = start_row + 1;
    ws.merge_range(
        r,
        0,
        r,
        3,
        &format!("Generated: {}", generated),
        &fmt.label,
    )?;
    ws.merge_range(
        r,
        4,
        r,
        last_col,
        &format!(
            "Confirmed: {}  Pending: {}",
            snapshot.counts.confirmed, snapshot.counts.pending
        ),
        &fmt.label,
    )?;

    let lines = [
        (
            "Confirmed totals",
            format!(
                "{} trees planted, {} trees adopted, {} collected",
                snapshot.totals.total_planted,
                snapshot.totals.total_adopted,
                snapshot.totals.total_collected
            ),
        ),
        (
            "Pledged totals",
            format!(
                "{} contributors, {} trees planted, {} trees adopted, {} pledged",
                snapshot.people_totals.people,
                snapshot.people_totals.total_planted,
                snapshot.people_totals.total_adopted,
                snapshot.people_totals.total_contribution
            ),
        ),
    ];
    let mut r = r + 1;
    for (label, value) in lines {
        ws.write_string_with_format(r, 0, label, &fmt.label)?;
        ws.merge_range(r, 1, r, last_col, &value, &fmt.note)?;
        r += 1;
    }
    Ok(r)
}

fn merge_or_write_str(
    ws: &mut Worksheet,
    start: u32,
    end: u32,
    col: u16,
    val: &str,
    fmt: &Format,
) -> Result<()> {
    if end > start {
        ws.merge_range(start, col, end, col, val, fmt)?;
    } else {
        ws.write_string_with_format(start, col, val, fmt)?;
    }
    Ok(())
}

fn write_people_headers(ws: &mut Worksheet, row: u32, fmt: &Format) -> Result<()> {
    let headers = [
        "Designation",
        "Rank",
        "Full Name",
        "Trees Planted",
        "Trees Adopted",
        "Total Contribution",
        "Donations",
        "Submissions",
        "Dedications",
    ];
    for (i, h) in headers.iter().enumerate() {
        ws.write_string_with_format(row, i as u16, *h, fmt)?;
    }
    Ok(())
}

fn write_person_row(
    ws: &mut Worksheet,
    row: u32,
    person: &AggregatedPerson,
    rank: u32,
    fmt: &ReportFormats,
) -> Result<()> {
    ws.write_number_with_format(row, 1, rank, &fmt.cell)?;
    ws.write_string_with_format(row, 2, &person.full_name, &fmt.cell)?;
    ws.write_number_with_format(row, 3, person.total_planted as f64, &fmt.cell)?;
    ws.write_number_with_format(row, 4, person.total_adopted as f64, &fmt.cell)?;
    ws.write_number_with_format(row, 5, person.total_contribution, &fmt.money)?;
    ws.write_number_with_format(row, 6, person.total_donation as f64, &fmt.money)?;
    ws.write_number_with_format(row, 7, person.submission_count as f64, &fmt.cell)?;
    ws.write_string_with_format(row, 8, person.dedications.join("\n"), &fmt.note)?;
    Ok(())
}

/// People grouped by designation, highest tier first, each group ordered by
/// contribution. The designation cell spans its group.
fn write_people_table(
    ws: &mut Worksheet,
    start_row: u32,
    people: &[AggregatedPerson],
    fmt: &ReportFormats,
) -> Result<u32> {
    write_people_headers(ws, start_row, &fmt.header)?;
    let mut row = start_row + 1;
    let rank_map = compute_ranks(people);

    for tier in [
        DesignationTier::Protector,
        DesignationTier::Nourisher,
        DesignationTier::Companion,
    ] {
        let mut group: Vec<&AggregatedPerson> = people
            .iter()
            .filter(|p| p.designation_tier == tier)
            .collect();
        if group.is_empty() {
            continue;
        }
        group.sort_by(|a, b| {
            b.total_contribution
                .total_cmp(&a.total_contribution)
                .then_with(|| a.full_name.cmp(&b.full_name))
        });

        let grp_start = row;
        for person in group {
            let rank = rank_map.get(&person.key).copied().unwrap_or(0);
            write_person_row(ws, row, person, rank, fmt)?;
            row += 1;
        }
        merge_or_write_str(ws, grp_start, row - 1, 0, tier.label(), &fmt.cell)?;
    }

    Ok(row)
}

fn set_column_widths(ws: &mut Worksheet) -> Result<()> {
    let widths = [14, 8, 24, 12, 12, 18, 14, 12, 36];
    for (col, w) in widths.iter().enumerate() {
        ws.set_column_width(col as u16, *w)?;
    }
    Ok(())
}

fn submissions_sheet(snapshot: &Snapshot, opts: &ExportOptions) -> Result<Worksheet> {
    let fmt = ReportFormats::new();
    let mut ws = Worksheet::new();
    ws.set_name("Submissions")?;
    for (i, h) in HEADER.iter().enumerate() {
        ws.write_string_with_format(0, i as u16, *h, &fmt.header)?;
    }
    for (idx, submission) in snapshot.submissions.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, cell) in to_row(submission, opts).iter().enumerate() {
            ws.write_string(row, col as u16, cell)?;
        }
    }
    Ok(ws)
}

fn contributors_sheet(snapshot: &Snapshot, generated: &str) -> Result<Worksheet> {
    let fmt = ReportFormats::new();
    let mut ws = Worksheet::new();
    ws.set_name("Contributors")?;
    let row = write_report_header(&mut ws, 0, snapshot, generated, &fmt)?;
    write_people_table(&mut ws, row, &snapshot.people, &fmt)?;
    set_column_widths(&mut ws)?;
    Ok(ws)
}

pub fn build_workbook(
    snapshot: &Snapshot,
    opts: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<Workbook> {
    let generated = opts.localize(now).format("%d/%m/%Y %H:%M").to_string();
    let mut workbook = Workbook::new();
    workbook.push_worksheet(contributors_sheet(snapshot, &generated)?);
    workbook.push_worksheet(submissions_sheet(snapshot, opts)?);
    Ok(workbook)
}

pub fn generate_report(
    snapshot: &Snapshot,
    output: &Path,
    opts: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut workbook = build_workbook(snapshot, opts, now)?;
    workbook.save(output)?;
    tracing::info!(
        path = %output.display(),
        people = snapshot.people.len(),
        submissions = snapshot.submissions.len(),
        "report generated"
    );
    Ok(())
}
