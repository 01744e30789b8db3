use crate::core::current_list::CourseListQuery;
use crate::domain::view::CourseCardSnapshot;
use crate::utils::error::DashboardError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Csv];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "dashboard.json",
            OutputFormat::Csv => "current_list.csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s.trim())
            .ok_or_else(|| DashboardError::UnknownKeyError {
                kind: "output format".to_string(),
                key: s.to_string(),
                expected: "json, csv".to_string(),
            })
    }
}

/// 報表：一次查詢的彙總與當頁卡片
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub query: CourseListQuery,
    pub num_courses: usize,
    pub has_courses: bool,
    pub has_available_dashboards: bool,
    pub num_pages: usize,
    pub expiring_entitlements: usize,
    pub cards: Vec<CourseCardSnapshot>,
}

/// CSV 的一列
#[derive(Debug, Clone, Serialize)]
pub struct ListingRow<'a> {
    pub card_id: &'a str,
    pub title: &'a str,
    pub course_number: &'a str,
    pub is_enrolled: bool,
    pub last_enrolled: &'a str,
    pub is_passing: bool,
    pub show_expiration_warning: bool,
    pub related_programs: usize,
}

impl DashboardReport {
    pub fn listing_rows(&self) -> impl Iterator<Item = ListingRow<'_>> {
        self.cards.iter().map(|card| ListingRow {
            card_id: &card.card_id,
            title: card.course.as_ref().map_or("", |c| c.title.as_str()),
            course_number: card
                .course
                .as_ref()
                .and_then(|c| c.course_number.as_deref())
                .unwrap_or(""),
            is_enrolled: card.enrollment.is_enrolled,
            last_enrolled: card.enrollment.last_enrolled.as_deref().unwrap_or(""),
            is_passing: card.grades.as_ref().is_some_and(|g| g.is_passing),
            show_expiration_warning: card
                .entitlements
                .as_ref()
                .is_some_and(|e| e.show_expiration_warning),
            related_programs: card.related_programs.as_ref().map_or(0, |p| p.length),
        })
    }
}
