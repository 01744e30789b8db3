pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::current_list::{CourseListQuery, FilterKey, SortKey, DEFAULT_PAGE_SIZE};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::report::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_positive_number, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "learner-dashboard")]
#[command(about = "Project a learner dashboard state file into a course listing report")]
pub struct CliConfig {
    #[arg(long, default_value = "./dashboard-state.json")]
    pub state_file: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "title", help = "Sort key: enrolled or title")]
    pub sort_by: SortKey,

    #[arg(long, help = "Sort in descending order")]
    pub descending: bool,

    #[arg(long, value_delimiter = ',', help = "notEnrolled, done, upgraded, inProgress, notStarted")]
    pub filters: Vec<FilterKey>,

    #[arg(long, default_value = "1")]
    pub page_number: usize,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    #[arg(long, value_delimiter = ',', default_values_t = [OutputFormat::Json, OutputFormat::Csv])]
    pub formats: Vec<OutputFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn state_file(&self) -> &str {
        &self.state_file
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn query(&self) -> CourseListQuery {
        CourseListQuery::default()
            .sorted_by(self.sort_by, !self.descending)
            .with_filters(self.filters.iter().copied())
            .page(self.page_number, self.page_size)
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("state_file", &self.state_file)?;
        validate_file_extension("state_file", &self.state_file, &["json"])?;
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("page_number", self.page_number, 1)?;
        validate_positive_number("page_size", self.page_size, 1)?;
        if self.formats.is_empty() {
            return Err(crate::utils::error::DashboardError::MissingConfigError {
                field: "formats".to_string(),
            });
        }
        Ok(())
    }
}
