use crate::core::current_list::CourseListQuery;
use crate::domain::model::RootState;
use crate::domain::report::{DashboardReport, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 外部狀態容器的唯讀存取
pub trait StateSource {
    fn state(&self) -> Arc<RootState>;
}

/// 目前時間由外部注入，讓到期提醒可預測
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait ConfigProvider: Send + Sync {
    fn state_file(&self) -> &str;
    fn output_path(&self) -> &str;
    fn query(&self) -> CourseListQuery;
    fn output_formats(&self) -> &[OutputFormat];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RootState>;
    async fn transform(&self, state: RootState) -> Result<DashboardReport>;
    async fn load(&self, report: DashboardReport) -> Result<String>;
}
