//! 頂層 slice 與彙總 selector。
//!
//! 簡單 selector 以 `state.app` 的指標為快取鍵，彙總 selector 以其輸入
//! slice 的指標為快取鍵；狀態容器必須以整個替換 slice 的方式更新。

use crate::core::memo::Memo;
use crate::domain::model::{
    AppState, CourseData, CourseRecord, EmailConfirmation, EnterpriseDashboards,
    PlatformSettings, RootState, SelectSessionModal, SuggestedCourse,
};
use std::sync::Arc;

pub struct Selectors {
    course_data: Memo<AppState, Arc<CourseData>>,
    platform_settings: Memo<AppState, Arc<PlatformSettings>>,
    suggested_courses: Memo<AppState, Arc<Vec<SuggestedCourse>>>,
    email_confirmation: Memo<AppState, Arc<EmailConfirmation>>,
    enterprise_dashboards: Memo<AppState, Arc<EnterpriseDashboards>>,
    select_session_modal: Memo<AppState, Arc<SelectSessionModal>>,
    num_courses: Memo<CourseData, usize>,
    has_available_dashboards: Memo<EnterpriseDashboards, bool>,
}

impl Selectors {
    pub fn new() -> Self {
        Self {
            course_data: Memo::new(),
            platform_settings: Memo::new(),
            suggested_courses: Memo::new(),
            email_confirmation: Memo::new(),
            enterprise_dashboards: Memo::new(),
            select_session_modal: Memo::new(),
            num_courses: Memo::new(),
            has_available_dashboards: Memo::new(),
        }
    }

    pub fn course_data(&self, state: &RootState) -> Arc<CourseData> {
        self.course_data
            .get_or_compute(&state.app, |app| Arc::clone(&app.course_data))
    }

    pub fn platform_settings(&self, state: &RootState) -> Arc<PlatformSettings> {
        self.platform_settings
            .get_or_compute(&state.app, |app| Arc::clone(&app.platform_settings))
    }

    pub fn suggested_courses(&self, state: &RootState) -> Arc<Vec<SuggestedCourse>> {
        self.suggested_courses
            .get_or_compute(&state.app, |app| Arc::clone(&app.suggested_courses))
    }

    pub fn email_confirmation(&self, state: &RootState) -> Arc<EmailConfirmation> {
        self.email_confirmation
            .get_or_compute(&state.app, |app| Arc::clone(&app.email_confirmation))
    }

    pub fn enterprise_dashboards(&self, state: &RootState) -> Arc<EnterpriseDashboards> {
        self.enterprise_dashboards
            .get_or_compute(&state.app, |app| Arc::clone(&app.enterprise_dashboards))
    }

    pub fn select_session_modal(&self, state: &RootState) -> Arc<SelectSessionModal> {
        self.select_session_modal
            .get_or_compute(&state.app, |app| Arc::clone(&app.select_session_modal))
    }

    pub fn num_courses(&self, state: &RootState) -> usize {
        let course_data = self.course_data(state);
        self.num_courses.get_or_compute(&course_data, |data| {
            tracing::trace!("Recomputing course count");
            data.len()
        })
    }

    pub fn has_courses(&self, state: &RootState) -> bool {
        self.num_courses(state) > 0
    }

    /// 只要 `availableDashboards` 存在即為 true，空清單也算
    pub fn has_available_dashboards(&self, state: &RootState) -> bool {
        let dashboards = self.enterprise_dashboards(state);
        self.has_available_dashboards
            .get_or_compute(&dashboards, |d| d.available_dashboards.is_some())
    }

    /// 各快取的重算次數
    pub fn recomputations(&self) -> SelectorStats {
        SelectorStats {
            simple: self.course_data.recomputations()
                + self.platform_settings.recomputations()
                + self.suggested_courses.recomputations()
                + self.email_confirmation.recomputations()
                + self.enterprise_dashboards.recomputations()
                + self.select_session_modal.recomputations(),
            num_courses: self.num_courses.recomputations(),
            has_available_dashboards: self.has_available_dashboards.recomputations(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectorStats {
    pub simple: u64,
    pub num_courses: u64,
    pub has_available_dashboards: u64,
}

/// 依 card id 取課程記錄，不快取
pub fn course_card_data<'a>(state: &'a RootState, card_id: &str) -> Option<&'a CourseRecord> {
    state.app.course_data.get(card_id)
}
