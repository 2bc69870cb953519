//! Sample weeks shown on first launch.

use chrono::NaiveDate;
use visadesk_types::{Document, DocumentId, TimesheetStatus, WeekId, WeeklyTimesheet};

/// First id the generator may issue after the sample data is loaded.
pub const SAMPLE_NEXT_ID: u64 = 100;

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Three weeks of January 2024, newest first.
pub fn sample_weeks() -> Vec<WeeklyTimesheet> {
    let weeks = [
        (3, (2024, 1, 15), (2024, 1, 21), 40, TimesheetStatus::Draft),
        (2, (2024, 1, 8), (2024, 1, 14), 38, TimesheetStatus::Submitted),
        (1, (2024, 1, 1), (2024, 1, 7), 40, TimesheetStatus::Approved),
    ];

    weeks
        .into_iter()
        .filter_map(|(id, start, end, total_hours, status)| {
            let week_start = date(start.0, start.1, start.2)?;
            let week_end = date(end.0, end.1, end.2)?;
            let submitted_date = (status != TimesheetStatus::Draft).then(|| week_end.succ_opt()).flatten();
            let approved_date = (status == TimesheetStatus::Approved)
                .then(|| week_end.checked_add_days(chrono::Days::new(3)))
                .flatten();
            Some(WeeklyTimesheet {
                id: WeekId(id),
                week_start,
                week_end,
                total_hours,
                status,
                documents: sample_documents(id, week_end),
                submitted_date,
                approved_date,
            })
        })
        .collect()
}

fn sample_documents(week: u64, week_end: NaiveDate) -> Vec<Document> {
    match week {
        1 => vec![
            Document {
                id: DocumentId(10),
                name: "timesheet-2024-01-07.pdf".into(),
                mime_type: "application/pdf".into(),
                size_label: "245.3 KB".into(),
                upload_date: week_end,
            },
            Document {
                id: DocumentId(11),
                name: "manager-approval.eml".into(),
                mime_type: "message/rfc822".into(),
                size_label: "12.8 KB".into(),
                upload_date: week_end,
            },
        ],
        2 => vec![Document {
            id: DocumentId(20),
            name: "hours-week-2.xlsx".into(),
            mime_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".into(),
            size_label: "18.4 KB".into(),
            upload_date: week_end,
        }],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_newest_first_with_unique_ids() {
        let weeks = sample_weeks();
        assert_eq!(weeks.len(), 3);
        assert!(weeks.windows(2).all(|pair| pair[0].week_start > pair[1].week_start));
        let max_id = weeks
            .iter()
            .flat_map(|week| std::iter::once(week.id.0).chain(week.documents.iter().map(|doc| doc.id.0)))
            .max()
            .unwrap_or_default();
        assert!(max_id < SAMPLE_NEXT_ID);
    }
}
