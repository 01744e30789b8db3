use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// card id → 課程記錄。以 card id 排序，作為課程列表的基準順序
pub type CourseData = BTreeMap<String, CourseRecord>;

/// `null` 與缺欄位一樣取預設值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// 狀態容器回傳的完整狀態樹
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootState {
    pub app: Arc<AppState>,
}

impl RootState {
    pub fn new(app: AppState) -> Self {
        Self { app: Arc::new(app) }
    }
}

/// 每個 slice 各自包在 `Arc` 裡，selector 以指標相等判斷是否需要重算
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_data: Arc<CourseData>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform_settings: Arc<PlatformSettings>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggested_courses: Arc<Vec<SuggestedCourse>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_confirmation: Arc<EmailConfirmation>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enterprise_dashboards: Arc<EnterpriseDashboards>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub select_session_modal: Arc<SelectSessionModal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub certificates: Certificates,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course: Course,
    #[serde(default)]
    pub course_run: Option<CourseRun>,
    #[serde(default)]
    pub enrollment: Option<Enrollment>,
    #[serde(default)]
    pub entitlements: Option<Entitlements>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grades: Grades,
    #[serde(default)]
    pub provider: Option<Provider>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_programs: Vec<RelatedProgram>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificates {
    pub available_date: Option<String>,
    pub cert_download_url: Option<String>,
    pub honor_cert_download_url: Option<String>,
    pub cert_preview_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_downloadable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_earned: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_available: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_restricted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    pub banner_url: Option<String>,
    pub course_number: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseRun {
    pub end_date: Option<String>,
    pub course_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_archived: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_started: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_finished: bool,
    pub min_passing_grade: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Enrollment {
    pub access_expiration_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub can_upgrade: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_started: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_finished: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_audit: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_audit_access_expired: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_email_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_verified: bool,
    pub last_enrollment: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_enrolled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entitlements {
    #[serde(deserialize_with = "null_as_default")]
    pub can_change: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_view_course: bool,
    pub available_sessions: Option<Vec<EntitlementSession>>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_entitlement: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_expired: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_fulfilled: bool,
    pub change_deadline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntitlementSession {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub course_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Grades {
    #[serde(deserialize_with = "null_as_default")]
    pub is_passing: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Provider {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelatedProgram {
    pub uuid: Option<String>,
    pub banner_url: Option<String>,
    pub estimated_number_of_weeks: Option<u32>,
    pub logo_url: Option<String>,
    pub number_of_courses: Option<u32>,
    pub program_type: Option<String>,
    pub program_url: Option<String>,
    pub provider: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformSettings {
    pub support_email: Option<String>,
    pub billing_email: Option<String>,
    pub course_search_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestedCourse {
    pub banner_url: Option<String>,
    pub logo_image_url: Option<String>,
    pub title: Option<String>,
    pub course_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailConfirmation {
    #[serde(deserialize_with = "null_as_default")]
    pub is_needed: bool,
    pub send_email_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnterpriseDashboards {
    pub available_dashboards: Option<Vec<EnterpriseDashboard>>,
    pub most_recent_dashboard: Option<EnterpriseDashboard>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnterpriseDashboard {
    pub label: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectSessionModal {
    pub card_id: Option<String>,
}
