pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{
    current_list::{current_list, CourseListQuery, FilterKey, SortKey},
    engine::DashboardEngine,
    pipeline::DashboardPipeline,
    selectors::{course_card_data, Selectors},
    store::StateStore,
};
pub use domain::model::{AppState, CourseData, CourseRecord, RootState};
pub use utils::error::{DashboardError, Result};
