use crate::core::course_card::{card_snapshot, entitlements};
use crate::core::current_list::current_list;
use crate::core::selectors::Selectors;
use crate::core::{Clock, ConfigProvider, Pipeline, RootState, Storage};
use crate::domain::report::{DashboardReport, OutputFormat};
use crate::domain::view::CourseCardSnapshot;
use crate::utils::clock::SystemClock;
use crate::utils::error::{DashboardError, Result};

/// 讀取狀態檔、套用 selector、輸出報表
pub struct DashboardPipeline<S: Storage, C: ConfigProvider, K: Clock = SystemClock> {
    source: S,
    sink: S,
    config: C,
    clock: K,
}

impl<S: Storage, C: ConfigProvider> DashboardPipeline<S, C, SystemClock> {
    pub fn new(source: S, sink: S, config: C) -> Self {
        Self {
            source,
            sink,
            config,
            clock: SystemClock,
        }
    }
}

impl<S: Storage, C: ConfigProvider, K: Clock> DashboardPipeline<S, C, K> {
    pub fn with_clock<K2: Clock>(self, clock: K2) -> DashboardPipeline<S, C, K2> {
        DashboardPipeline {
            source: self.source,
            sink: self.sink,
            config: self.config,
            clock,
        }
    }

    fn write_json(report: &DashboardReport) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(report)?)
    }

    fn write_csv(report: &DashboardReport) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in report.listing_rows() {
            writer.serialize(row)?;
        }
        writer.into_inner().map_err(|e| {
            DashboardError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, K: Clock> Pipeline for DashboardPipeline<S, C, K> {
    async fn extract(&self) -> Result<RootState> {
        tracing::debug!("Reading dashboard state from: {}", self.config.state_file());
        let bytes = self.source.read_file(self.config.state_file()).await?;
        let state: RootState = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            "Loaded state with {} course cards",
            state.app.course_data.len()
        );
        Ok(state)
    }

    async fn transform(&self, state: RootState) -> Result<DashboardReport> {
        let selectors = Selectors::new();
        let now = self.clock.now();
        let query = self.config.query();

        let list = current_list(&state, &query)?;
        let cards: Vec<CourseCardSnapshot> = list
            .visible
            .iter()
            .map(|card| card_snapshot(&state, card.card_id, now))
            .collect();

        let expiring_entitlements = state
            .app
            .course_data
            .keys()
            .filter_map(|card_id| entitlements(&state, card_id, now))
            .filter(|view| view.show_expiration_warning)
            .count();

        if expiring_entitlements > 0 {
            tracing::info!(
                "⏰ {} entitlement(s) must pick a session within the next 180 days",
                expiring_entitlements
            );
        }

        Ok(DashboardReport {
            generated_at: now,
            num_courses: selectors.num_courses(&state),
            has_courses: selectors.has_courses(&state),
            has_available_dashboards: selectors.has_available_dashboards(&state),
            num_pages: list.num_pages,
            expiring_entitlements,
            cards,
            query,
        })
    }

    async fn load(&self, report: DashboardReport) -> Result<String> {
        let formats = self.config.output_formats();
        let Some(primary) = formats.first() else {
            return Err(DashboardError::ConfigError {
                message: "No output formats configured".to_string(),
            });
        };

        for format in formats {
            let data = match format {
                OutputFormat::Json => Self::write_json(&report)?,
                OutputFormat::Csv => Self::write_csv(&report)?,
            };
            tracing::debug!("Writing {} ({} bytes) to storage", format.file_name(), data.len());
            self.sink.write_file(format.file_name(), &data).await?;
        }

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            primary.file_name()
        ))
    }
}
