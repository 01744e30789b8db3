//! 課程列表查詢：篩選、排序、分頁。

use crate::domain::model::{CourseRecord, Enrollment, RootState};
use crate::domain::view::{CourseList, VisibleCard};
use crate::utils::dates::parse_optional_date;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    /// 保留「已選課」的課程
    NotEnrolled,
    Done,
    Upgraded,
    InProgress,
    NotStarted,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::NotEnrolled,
        FilterKey::Done,
        FilterKey::Upgraded,
        FilterKey::InProgress,
        FilterKey::NotStarted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::NotEnrolled => "notEnrolled",
            FilterKey::Done => "done",
            FilterKey::Upgraded => "upgraded",
            FilterKey::InProgress => "inProgress",
            FilterKey::NotStarted => "notStarted",
        }
    }

    pub fn matches(&self, enrollment: &Enrollment) -> bool {
        match self {
            FilterKey::NotEnrolled => enrollment.is_enrolled,
            FilterKey::Done => enrollment.has_finished,
            FilterKey::Upgraded => enrollment.is_verified,
            FilterKey::InProgress => enrollment.has_started,
            FilterKey::NotStarted => !enrollment.has_started,
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        FilterKey::ALL
            .into_iter()
            .find(|filter| filter.as_str() == key)
            .ok_or_else(|| DashboardError::UnknownKeyError {
                kind: "filter".to_string(),
                key: key.to_string(),
                expected: FilterKey::ALL.map(|f| f.as_str()).join(", "),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Enrolled,
    #[default]
    Title,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Enrolled => "enrolled",
            SortKey::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "enrolled" => Ok(SortKey::Enrolled),
            "title" => Ok(SortKey::Title),
            other => Err(DashboardError::UnknownKeyError {
                kind: "sort".to_string(),
                key: other.to_string(),
                expected: "enrolled, title".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseListQuery {
    pub sort_by: SortKey,
    pub is_ascending: bool,
    pub filters: Vec<FilterKey>,
    pub page_number: usize,
    pub page_size: usize,
}

impl Default for CourseListQuery {
    fn default() -> Self {
        Self {
            sort_by: SortKey::Title,
            is_ascending: true,
            filters: Vec::new(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CourseListQuery {
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = FilterKey>) -> Self {
        self.filters = filters.into_iter().collect();
        self
    }

    pub fn sorted_by(mut self, sort_by: SortKey, is_ascending: bool) -> Self {
        self.sort_by = sort_by;
        self.is_ascending = is_ascending;
        self
    }

    pub fn page(mut self, page_number: usize, page_size: usize) -> Self {
        self.page_number = page_number;
        self.page_size = page_size;
        self
    }

    /// 所有篩選條件都須成立；沒有 enrollment 的課程視為全部旗標為 false
    pub fn accepts(&self, record: &CourseRecord) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        let fallback = Enrollment::default();
        let enrollment = record.enrollment.as_ref().unwrap_or(&fallback);
        self.filters.iter().all(|filter| filter.matches(enrollment))
    }
}

impl Validate for CourseListQuery {
    fn validate(&self) -> Result<()> {
        validate_positive_number("query.page_number", self.page_number, 1).map_err(|e| {
            DashboardError::ValidationError {
                message: e.to_string(),
            }
        })?;
        validate_positive_number("query.page_size", self.page_size, 1).map_err(|e| {
            DashboardError::ValidationError {
                message: e.to_string(),
            }
        })
    }
}

/// 依查詢條件取出當頁課程與總頁數。不會修改來源資料。
///
/// 同鍵的課程依 card id 排列，因此遞減結果恰為遞增結果的反序。
pub fn current_list<'a>(state: &'a RootState, query: &CourseListQuery) -> Result<CourseList<'a>> {
    query.validate()?;

    let mut list: Vec<VisibleCard<'a>> = state
        .app
        .course_data
        .iter()
        .filter(|(_, record)| query.accepts(record))
        .map(|(card_id, record)| VisibleCard {
            card_id: card_id.as_str(),
            record,
        })
        .collect();

    match query.sort_by {
        SortKey::Enrolled => sort_cards(&mut list, query.is_ascending, |record| {
            parse_optional_date(
                record
                    .enrollment
                    .as_ref()
                    .and_then(|e| e.last_enrollment.as_deref()),
            )
        }),
        SortKey::Title => sort_cards(&mut list, query.is_ascending, |record| {
            record.course.title.to_lowercase()
        }),
    }

    let total = list.len();
    let num_pages = total.div_ceil(query.page_size);
    let start = (query.page_number - 1)
        .saturating_mul(query.page_size)
        .min(total);
    let end = start.saturating_add(query.page_size).min(total);

    tracing::debug!(
        "Course list: {} matched, page {}/{} ({} visible)",
        total,
        query.page_number,
        num_pages,
        end - start
    );

    Ok(CourseList {
        visible: list.drain(start..end).collect(),
        num_pages,
    })
}

fn sort_cards<K, F>(cards: &mut Vec<VisibleCard<'_>>, is_ascending: bool, key: F)
where
    K: Ord,
    F: Fn(&CourseRecord) -> K,
{
    let mut keyed: Vec<(K, VisibleCard<'_>)> =
        cards.drain(..).map(|card| (key(card.record), card)).collect();

    // 同鍵時以 card id 決定先後
    keyed.sort_by(|(a, card_a), (b, card_b)| {
        let ordering: Ordering = a.cmp(b).then_with(|| card_a.card_id.cmp(card_b.card_id));
        if is_ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    cards.extend(keyed.into_iter().map(|(_, card)| card));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment(is_enrolled: bool, has_started: bool, has_finished: bool) -> Enrollment {
        Enrollment {
            is_enrolled,
            has_started,
            has_finished,
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_key_round_trip_names() {
        for filter in FilterKey::ALL {
            assert_eq!(filter.as_str().parse::<FilterKey>().unwrap(), filter);
        }
        assert!("archived".parse::<FilterKey>().is_err());
    }

    #[test]
    fn test_sort_key_rejects_unknown() {
        assert_eq!("enrolled".parse::<SortKey>().unwrap(), SortKey::Enrolled);
        assert_eq!("title".parse::<SortKey>().unwrap(), SortKey::Title);
        assert!("price".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_filter_predicates() {
        let started = enrollment(true, true, false);
        assert!(FilterKey::NotEnrolled.matches(&started));
        assert!(FilterKey::InProgress.matches(&started));
        assert!(!FilterKey::NotStarted.matches(&started));
        assert!(!FilterKey::Done.matches(&started));
        assert!(!FilterKey::Upgraded.matches(&started));
    }

    #[test]
    fn test_accepts_requires_every_filter() {
        let record = CourseRecord {
            enrollment: Some(enrollment(true, true, true)),
            ..Default::default()
        };
        let query = CourseListQuery::default().with_filters([FilterKey::Done, FilterKey::NotStarted]);
        assert!(!query.accepts(&record));

        let query = CourseListQuery::default().with_filters([FilterKey::Done, FilterKey::InProgress]);
        assert!(query.accepts(&record));
    }

    #[test]
    fn test_record_without_enrollment_only_passes_not_started() {
        let record = CourseRecord::default();
        assert!(CourseListQuery::default()
            .with_filters([FilterKey::NotStarted])
            .accepts(&record));
        assert!(!CourseListQuery::default()
            .with_filters([FilterKey::NotEnrolled])
            .accepts(&record));
    }

    #[test]
    fn test_query_validation() {
        assert!(CourseListQuery::default().validate().is_ok());
        assert!(CourseListQuery::default().page(0, 10).validate().is_err());
        assert!(CourseListQuery::default().page(1, 0).validate().is_err());
    }

    #[test]
    fn test_query_deserializes_from_camel_case() {
        let query: CourseListQuery = serde_json::from_value(serde_json::json!({
            "sortBy": "enrolled",
            "isAscending": false,
            "filters": ["done", "upgraded"],
            "pageNumber": 2,
            "pageSize": 5
        }))
        .unwrap();

        assert_eq!(query.sort_by, SortKey::Enrolled);
        assert!(!query.is_ascending);
        assert_eq!(query.filters, vec![FilterKey::Done, FilterKey::Upgraded]);
        assert_eq!((query.page_number, query.page_size), (2, 5));
    }
}
