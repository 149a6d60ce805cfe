use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ConfigError, Result};
use crate::models::ChatModel;

/// 默认的对话接口地址
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// 程序配置
///
/// 运行开始时按值交给后台任务，运行期间的修改不会影响正在进行的批处理。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// PDF 文件夹
    pub pdf_folder: PathBuf,
    /// 输出文件夹
    pub output_folder: PathBuf,
    /// 问题文件（每行一个问题）
    pub questions_file: Option<PathBuf>,
    /// 直接写在配置文件里的问题，优先级低于问题文件
    pub questions: Vec<String>,
    // --- LLM 配置 ---
    pub api_url: String,
    pub api_key: String,
    pub model: ChatModel,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 两个文件之间的等待时间（秒）
    pub pacing_interval_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 运行日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pdf_folder: PathBuf::new(),
            output_folder: PathBuf::new(),
            questions_file: None,
            questions: Vec::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: ChatModel::default(),
            request_timeout_secs: 30,
            pacing_interval_secs: 60,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::io(path.display().to_string(), e))?;
        toml::from_str(&content).map_err(|source| AppError::TomlParse {
            path: path.display().to_string(),
            source,
        })
    }

    /// 用环境变量覆盖 LLM 相关配置，无法识别的模型名直接报错
    pub fn apply_env(self) -> std::result::Result<Self, ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// 按给定的查找函数覆盖 LLM 相关配置
    pub fn apply_env_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> std::result::Result<Self, ConfigError> {
        if let Some(url) = lookup("PDF_QA_API_URL") {
            self.api_url = url;
        }
        if let Some(key) = lookup("PDF_QA_API_KEY") {
            self.api_key = key;
        }
        if let Some(name) = lookup("PDF_QA_MODEL") {
            self.model = name.parse()?;
        }
        Ok(self)
    }

    /// 更新 API 地址，空值会被拒绝
    pub fn set_api_url(&mut self, url: impl Into<String>) -> std::result::Result<(), ConfigError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        self.api_url = url.trim().to_string();
        Ok(())
    }

    /// 更新 API 密钥，空值会被拒绝
    pub fn set_api_key(&mut self, key: impl Into<String>) -> std::result::Result<(), ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        self.api_key = key.trim().to_string();
        Ok(())
    }

    /// 运行前校验，任何一项不满足都不会启动后台任务
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.pdf_folder.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPdfFolder);
        }
        if self.output_folder.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputFolder);
        }
        if !self.pdf_folder.is_dir() {
            return Err(ConfigError::PdfFolderNotFound {
                path: self.pdf_folder.display().to_string(),
            });
        }
        if !self.output_folder.is_dir() {
            return Err(ConfigError::OutputFolderNotFound {
                path: self.output_folder.display().to_string(),
            });
        }
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::EmptyApiUrl);
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn pacing_interval(&self) -> Duration {
        Duration::from_secs(self.pacing_interval_secs)
    }
}
