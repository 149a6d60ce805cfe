//! LLM 服务 - 业务能力层
//!
//! 只负责"针对一段文本逐个提问"的能力，不关心文件和流程
//!
//! ## 技术栈
//! - 直接使用 `reqwest` 调用兼容 OpenAI 的 chat/completions 接口
//! - 每个请求有独立超时，超时与其他失败分别映射为不同的替代答案
//! - 不做重试

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, LlmError, Result};
use crate::models::ChatModel;
use crate::utils::logging::truncate_text;

/// 请求超时时的替代答案
pub const TIMEOUT_MARKER: &str = "请求超时";
/// 其他失败时的替代答案
pub const UNANSWERABLE_MARKER: &str = "无法回答";
/// 固定的采样温度
pub const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// LLM 服务
///
/// 职责：
/// - 为每个问题拼接提示词并调用接口
/// - 把所有失败降级为替代答案
/// - 在每个问题发出前检查取消信号
pub struct LlmService {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl LlmService {
    /// 根据配置创建，超时时间取自 `request_timeout_secs`
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_timeout(&config.api_url, &config.api_key, config.request_timeout())
    }

    pub fn with_timeout(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AppError::HttpClient)?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// 依次回答所有问题
    ///
    /// 返回的答案与 `questions` 一一对应。如果在某个问题发出前检测到取消，
    /// 立即返回空列表，表示这个文件没有结果。
    pub async fn answer_questions(
        &self,
        text: &str,
        questions: &[String],
        model: ChatModel,
        cancel: &CancellationToken,
    ) -> Vec<String> {
        let mut answers = Vec::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            if cancel.is_cancelled() {
                info!("处理已取消");
                return Vec::new();
            }

            debug!(
                "提问 {}/{}: {}",
                index + 1,
                questions.len(),
                truncate_text(question, 40)
            );

            let prompt = build_prompt(text, question);
            let answer = match self.send_to_llm(&prompt, model).await {
                Ok(answer) => answer,
                Err(e) if e.is_timeout() => {
                    warn!("请求超时：{}", question);
                    TIMEOUT_MARKER.to_string()
                }
                Err(e) => {
                    warn!("无法回答问题 {}，错误：{}", question, e);
                    UNANSWERABLE_MARKER.to_string()
                }
            };
            answers.push(answer);
        }

        answers
    }

    /// 发送单条用户消息，返回第一条回复去除首尾空白后的内容
    pub async fn send_to_llm(&self, prompt: &str, model: ChatModel) -> std::result::Result<String, LlmError> {
        debug!("调用 LLM API，模型: {}，提示词长度: {} 字符", model, prompt.chars().count());

        let request = ChatRequest {
            model: model.as_str(),
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| classify(e, model))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| classify(e, model))?;

        if !status.is_success() {
            return Err(LlmError::BadStatus {
                status: status.as_u16(),
                body: truncate_text(&body, 200),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::EmptyResponse {
                model: model.to_string(),
            })?;

        debug!("LLM API 调用成功");

        Ok(content.trim().to_string())
    }
}

/// 拼接提示词：全文在前，问题在后
pub fn build_prompt(text: &str, question: &str) -> String {
    format!("根据以下文本回答问题：\n\n{}\n\n问题：{}", text, question)
}

fn classify(err: reqwest::Error, model: ChatModel) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout {
            model: model.to_string(),
        }
    } else {
        LlmError::RequestFailed {
            model: model.to_string(),
            source: err,
        }
    }
}
