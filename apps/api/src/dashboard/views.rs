//! Derived views over the in-memory record list. Pure recomputations, never
//! cached.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::application::{JobApplication, Status};

/// Length of the trend window, ending today inclusive.
pub const TREND_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    #[serde(rename = "Applied")]
    pub applied: usize,
    #[serde(rename = "Interviewing")]
    pub interviewing: usize,
    #[serde(rename = "Offer")]
    pub offer: usize,
    #[serde(rename = "Rejected")]
    pub rejected: usize,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Applied => self.applied,
            Status::Interviewing => self.interviewing,
            Status::Offer => self.offer,
            Status::Rejected => self.rejected,
        }
    }

    fn bump(&mut self, status: Status) {
        match status {
            Status::Applied => self.applied += 1,
            Status::Interviewing => self.interviewing += 1,
            Status::Offer => self.offer += 1,
            Status::Rejected => self.rejected += 1,
        }
    }
}

pub fn status_counts(apps: &[JobApplication]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for app in apps {
        counts.bump(app.status);
    }
    counts
}

/// One slice of the status pie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionSlice {
    pub name: Status,
    pub value: usize,
}

/// Every status gets a slice, zero counts included, in `Status::ALL` order.
pub fn status_distribution(apps: &[JobApplication]) -> Vec<DistributionSlice> {
    let counts = status_counts(apps);
    Status::ALL
        .into_iter()
        .map(|status| DistributionSlice {
            name: status,
            value: counts.get(status),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// `MMM d`, e.g. `Jul 5`
    pub label: String,
    pub applications: usize,
}

/// Applications per day for the `days` days ending at `today`, oldest first.
pub fn daily_trend(apps: &[JobApplication], today: NaiveDate, days: u32) -> Vec<TrendPoint> {
    (0..days)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(i64::from(offset));
            TrendPoint {
                date,
                label: date.format("%b %-d").to_string(),
                applications: apps.iter().filter(|a| a.date_applied == date).count(),
            }
        })
        .collect()
}

/// The table view for one status tab (`None` = All), most recent first.
pub fn filter_by_status(apps: &[JobApplication], filter: Option<Status>) -> Vec<JobApplication> {
    let mut filtered: Vec<JobApplication> = apps
        .iter()
        .filter(|a| filter.map_or(true, |status| a.status == status))
        .cloned()
        .collect();
    filtered.sort_by(|a, b| b.date_applied.cmp(&a.date_applied));
    filtered
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub counts: StatusCounts,
    pub distribution: Vec<DistributionSlice>,
    pub trend: Vec<TrendPoint>,
}

pub fn summarize(apps: &[JobApplication], today: NaiveDate) -> DashboardSummary {
    DashboardSummary {
        total: apps.len(),
        counts: status_counts(apps),
        distribution: status_distribution(apps),
        trend: daily_trend(apps, today, TREND_DAYS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn app(id: &str, status: Status, date: NaiveDate) -> JobApplication {
        JobApplication {
            id: id.into(),
            user_id: "user-1".into(),
            job_title: "Engineer".into(),
            company_name: "Acme".into(),
            date_applied: date,
            status,
            site_applied_on: None,
            notes: None,
            rejection_reason: None,
        }
    }

    #[test]
    fn test_distribution_includes_zero_counts() {
        let apps = vec![
            app("1", Status::Applied, ymd(2024, 7, 1)),
            app("2", Status::Applied, ymd(2024, 7, 2)),
            app("3", Status::Offer, ymd(2024, 7, 3)),
        ];
        let counts = status_counts(&apps);
        assert_eq!(counts.get(Status::Applied), 2);
        assert_eq!(counts.get(Status::Offer), 1);
        assert_eq!(counts.get(Status::Interviewing), 0);
        assert_eq!(counts.get(Status::Rejected), 0);

        let slices = status_distribution(&apps);
        assert_eq!(slices.len(), 4);
        assert_eq!(
            slices,
            vec![
                DistributionSlice { name: Status::Applied, value: 2 },
                DistributionSlice { name: Status::Interviewing, value: 0 },
                DistributionSlice { name: Status::Offer, value: 1 },
                DistributionSlice { name: Status::Rejected, value: 0 },
            ]
        );
    }

    #[test]
    fn test_counts_serialize_with_status_names() {
        let json = serde_json::to_value(status_counts(&[])).unwrap();
        assert_eq!(json["Interviewing"], 0);
    }

    #[test]
    fn test_trend_covers_thirty_days_ending_today() {
        let today = ymd(2024, 7, 20);
        let apps = vec![
            app("1", Status::Applied, today),
            app("2", Status::Applied, today),
            app("3", Status::Offer, ymd(2024, 6, 21)),
            app("4", Status::Offer, ymd(2024, 6, 20)), // outside the window
        ];
        let trend = daily_trend(&apps, today, TREND_DAYS);
        assert_eq!(trend.len(), 30);
        assert_eq!(trend[0].date, ymd(2024, 6, 21));
        assert_eq!(trend[0].applications, 1);
        assert_eq!(trend[29].date, today);
        assert_eq!(trend[29].label, "Jul 20");
        assert_eq!(trend[29].applications, 2);
        assert_eq!(trend.iter().map(|p| p.applications).sum::<usize>(), 3);
    }

    #[test]
    fn test_filter_by_status_sorts_most_recent_first() {
        let apps = vec![
            app("old", Status::Applied, ymd(2024, 6, 1)),
            app("offer", Status::Offer, ymd(2024, 6, 15)),
            app("new", Status::Applied, ymd(2024, 7, 1)),
        ];
        let applied = filter_by_status(&apps, Some(Status::Applied));
        let ids: Vec<&str> = applied.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);

        let all = filter_by_status(&apps, None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].id, "offer");
    }

    #[test]
    fn test_summary_totals() {
        let today = ymd(2024, 7, 20);
        let apps = vec![app("1", Status::Rejected, today)];
        let summary = summarize(&apps, today);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.counts.rejected, 1);
        assert_eq!(summary.trend.len(), TREND_DAYS as usize);
    }
}
