use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误（运行开始前即可发现）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 文件读取或目录扫描失败
    #[error("文件错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 写入 Excel 失败
    #[error("写入表格失败 ({path}): {source}")]
    Write {
        path: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// 问题与答案数量不一致
    #[error("问题数量 {questions} 与答案数量 {answers} 不一致")]
    LengthMismatch { questions: usize, answers: usize },

    /// TOML 配置文件解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// HTTP 客户端构建失败
    #[error("HTTP客户端初始化失败: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// 后台任务异常终止
    #[error("后台任务异常终止: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PDF 文件夹不能为空")]
    EmptyPdfFolder,
    #[error("输出文件夹不能为空")]
    EmptyOutputFolder,
    #[error("PDF 文件夹不存在: {path}")]
    PdfFolderNotFound { path: String },
    #[error("输出文件夹不存在: {path}")]
    OutputFolderNotFound { path: String },
    #[error("请至少输入一个问题")]
    NoQuestions,
    #[error("API 地址不能为空")]
    EmptyApiUrl,
    #[error("API 密钥不能为空")]
    EmptyApiKey,
    #[error("不支持的模型: {name}")]
    UnknownModel { name: String },
}

/// LLM 调用错误
///
/// 这些错误不会传播到编排层，只用于决定替代答案。
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("请求超时 (模型: {model})")]
    Timeout { model: String },

    #[error("LLM API调用失败 (模型: {model}): {source}")]
    RequestFailed {
        model: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API返回错误响应: status={status}, body={body}")]
    BadStatus { status: u16, body: String },

    #[error("JSON解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyResponse { model: String },
}

impl LlmError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, LlmError::Timeout { .. })
    }
}

impl AppError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_app_error() {
        let err: AppError = ConfigError::EmptyApiKey.into();
        assert!(matches!(err, AppError::Config(ConfigError::EmptyApiKey)));
        assert_eq!(err.to_string(), "配置错误: API 密钥不能为空");
    }

    #[test]
    fn only_timeout_is_timeout() {
        assert!(LlmError::Timeout { model: "gpt-4".into() }.is_timeout());
        assert!(!LlmError::EmptyResponse { model: "gpt-4".into() }.is_timeout());
        assert!(!LlmError::BadStatus {
            status: 500,
            body: String::new()
        }
        .is_timeout());
    }
}
