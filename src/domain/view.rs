//! UI 使用的扁平化 view model。
//!
//! 欄位為 `None` 時不輸出 (等同 JS 的 `undefined`)；整個 view 為 `None`
//! 則代表空物件 `{}`。

use crate::domain::model::{CourseRecord, EntitlementSession};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificatesView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honor_cert_download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_preview_url: Option<String>,
    pub is_downloadable: bool,
    pub is_earned_but_unavailable: bool,
    pub is_restricted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_number: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRunView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    pub is_archived: bool,
    pub is_started: bool,
    pub is_finished: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_passing_grade: Option<f64>,
}

/// 未選課時只有 `is_enrolled = false`，其餘欄位皆為 `None`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_upgrade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_started: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_finished: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_audit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_audit_access_expired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_email_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_enrolled: Option<String>,
    pub is_enrolled: bool,
}

impl EnrollmentView {
    pub fn not_enrolled() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementsView {
    pub can_change: bool,
    pub can_view_course: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entitlement_sessions: Option<Vec<EntitlementSession>>,
    pub is_entitlement: bool,
    pub is_expired: bool,
    pub is_fulfilled: bool,
    pub has_sessions: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_deadline: Option<String>,
    pub show_expiration_warning: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradesView {
    pub is_passing: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_number_of_weeks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_courses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedProgramsView {
    pub list: Vec<ProgramView>,
    pub length: usize,
}

/// 單張卡片所有 view 的集合
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCardSnapshot {
    pub card_id: String,
    #[serde(serialize_with = "serialize_or_empty")]
    pub certificates: Option<CertificatesView>,
    #[serde(serialize_with = "serialize_or_empty")]
    pub course: Option<CourseView>,
    #[serde(serialize_with = "serialize_or_empty")]
    pub course_run: Option<CourseRunView>,
    pub enrollment: EnrollmentView,
    #[serde(serialize_with = "serialize_or_empty")]
    pub entitlements: Option<EntitlementsView>,
    #[serde(serialize_with = "serialize_or_empty")]
    pub grades: Option<GradesView>,
    #[serde(serialize_with = "serialize_or_empty")]
    pub provider: Option<ProviderView>,
    #[serde(serialize_with = "serialize_or_empty")]
    pub related_programs: Option<RelatedProgramsView>,
}

/// 課程列表查詢結果中的一筆：card id 與來源記錄的借用
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleCard<'a> {
    pub card_id: &'a str,
    #[serde(flatten)]
    pub record: &'a CourseRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseList<'a> {
    pub visible: Vec<VisibleCard<'a>>,
    pub num_pages: usize,
}

impl CourseList<'_> {
    pub fn card_ids(&self) -> Vec<&str> {
        self.visible.iter().map(|card| card.card_id).collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.visible
            .iter()
            .map(|card| card.record.course.title.as_str())
            .collect()
    }
}

fn serialize_or_empty<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    use serde::ser::SerializeMap;

    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
