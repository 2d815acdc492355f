use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SnitchError;
use crate::todo::Todo;

/// File name of the per-project configuration, looked up in the scan root
pub const PROJECT_CONFIG_FILE: &str = ".snitch.toml";

/// Default timeout for issue-tracker requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// GitHub credentials stored in ~/.snitch/github.toml
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Personal access token sent as `Authorization: token <...>`
    pub personal_token: String,
    /// API base URL, for GitHub Enterprise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Credentials {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("personal_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Default credentials location: `$HOME/.snitch/github.toml`
pub fn default_credentials_path() -> Result<PathBuf, SnitchError> {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .ok_or_else(|| SnitchError::NotFound("home directory (HOME is not set)".to_string()))?;
    Ok(PathBuf::from(home).join(".snitch").join("github.toml"))
}

/// Load credentials from `path`
pub fn load_credentials(path: &Path) -> Result<Credentials, SnitchError> {
    if !path.exists() {
        return Err(SnitchError::credentials_not_found(path));
    }
    let content = std::fs::read_to_string(path)?;
    let creds: Credentials = toml::from_str(&content)?;
    if creds.personal_token.trim().is_empty() {
        return Err(SnitchError::InvalidArgs(format!(
            "personal_token in '{}' is empty",
            path.display()
        )));
    }
    Ok(creds)
}

/// On-disk form of `.snitch.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfigFile {
    #[serde(default)]
    pub title: TitleConfig,
}

/// Rules for turning a TODO's text into an issue title
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleConfig {
    #[serde(default)]
    pub transforms: Vec<TitleTransform>,
}

/// One regex substitution applied to the title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleTransform {
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(default)]
    pub replace: String,
}

/// Compiled project configuration
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    title_transforms: Vec<(Regex, String)>,
}

impl ProjectConfig {
    pub fn from_file(file: &ProjectConfigFile) -> Result<Self, SnitchError> {
        let title_transforms = file
            .title
            .transforms
            .iter()
            .map(|t| -> Result<(Regex, String), SnitchError> {
                Ok((Regex::new(&t.pattern)?, t.replace.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { title_transforms })
    }

    /// Issue title for `todo`: its text with every transform applied in order
    pub fn title_of(&self, todo: &Todo) -> String {
        let mut title = todo.suffix().to_string();
        for (re, replacement) in &self.title_transforms {
            title = re.replace_all(&title, replacement.as_str()).into_owned();
        }
        title.trim().to_string()
    }
}

/// Load `.snitch.toml` from `root`, falling back to defaults when absent
pub fn load_project_config(root: &Path) -> Result<ProjectConfig, SnitchError> {
    let config_path = root.join(PROJECT_CONFIG_FILE);
    if !config_path.exists() {
        return Ok(ProjectConfig::default());
    }
    let content = std::fs::read_to_string(&config_path)?;
    let file: ProjectConfigFile = toml::from_str(&content)?;
    ProjectConfig::from_file(&file)
}
