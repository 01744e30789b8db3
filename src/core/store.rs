use crate::domain::model::{
    AppState, CourseData, CourseRecord, EnterpriseDashboards, RootState, SelectSessionModal,
};
use crate::domain::ports::StateSource;
use std::sync::Arc;

/// 記憶體中的狀態容器。
///
/// 更新時建立新的 `AppState`，未變動的 slice 沿用原本的 `Arc`，
/// 因此以指標判斷的快取只會在真正換掉的 slice 上失效。
#[derive(Debug, Clone)]
pub struct StateStore {
    state: Arc<RootState>,
}

impl StateStore {
    pub fn new(state: RootState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    pub fn from_json(bytes: &[u8]) -> crate::utils::error::Result<Self> {
        let state: RootState = serde_json::from_slice(bytes)?;
        Ok(Self::new(state))
    }

    fn update(&mut self, apply: impl FnOnce(&mut AppState)) {
        let mut app = (*self.state.app).clone();
        apply(&mut app);
        self.state = Arc::new(RootState::new(app));
    }

    pub fn replace_course_data(&mut self, course_data: CourseData) {
        tracing::debug!("Replacing course data ({} cards)", course_data.len());
        self.update(|app| app.course_data = Arc::new(course_data));
    }

    /// 替換單張卡片；其他卡片內容不變，但 `courseData` slice 為新的參照
    pub fn upsert_card(&mut self, card_id: impl Into<String>, record: CourseRecord) {
        let mut course_data = (*self.state.app.course_data).clone();
        course_data.insert(card_id.into(), record);
        self.replace_course_data(course_data);
    }

    pub fn replace_enterprise_dashboards(&mut self, dashboards: EnterpriseDashboards) {
        self.update(|app| app.enterprise_dashboards = Arc::new(dashboards));
    }

    pub fn open_select_session_modal(&mut self, card_id: Option<String>) {
        self.update(|app| app.select_session_modal = Arc::new(SelectSessionModal { card_id }));
    }
}

impl StateSource for StateStore {
    fn state(&self) -> Arc<RootState> {
        Arc::clone(&self.state)
    }
}
