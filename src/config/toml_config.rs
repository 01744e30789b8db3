use crate::core::current_list::{CourseListQuery, FilterKey, SortKey, DEFAULT_PAGE_SIZE};
use crate::core::ConfigProvider;
use crate::domain::report::OutputFormat;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_one_of, validate_path,
    validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dashboard: DashboardSection,
    pub state: StateSection,
    #[serde(default)]
    pub query: QuerySection,
    pub output: OutputSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSection {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySection {
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default = "default_true")]
    pub is_ascending: bool,
    #[serde(default)]
    pub filters: Vec<FilterKey>,
    #[serde(default = "default_page_number")]
    pub page_number: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for QuerySection {
    fn default() -> Self {
        Self {
            sort_by: SortKey::default(),
            is_ascending: true,
            filters: Vec::new(),
            page_number: default_page_number(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: String,
    pub formats: Vec<OutputFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_true() -> bool {
    true
}

fn default_page_number() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STATE_FILE})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("dashboard.name", &self.dashboard.name)?;

        validate_path("state.path", &self.state.path)?;
        validate_file_extension("state.path", &self.state.path, &["json"])?;

        validate_path("output.path", &self.output.path)?;
        if self.output.formats.is_empty() {
            return Err(DashboardError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }

        validate_positive_number("query.page_number", self.query.page_number, 1)?;
        validate_positive_number("query.page_size", self.query.page_size, 1)?;

        if let Some(level) = self.log_level() {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.json)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn state_file(&self) -> &str {
        &self.state.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn query(&self) -> CourseListQuery {
        CourseListQuery {
            sort_by: self.query.sort_by,
            is_ascending: self.query.is_ascending,
            filters: self.query.filters.clone(),
            page_number: self.query.page_number,
            page_size: self.query.page_size,
        }
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output.formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
