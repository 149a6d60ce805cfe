//! # PDF QA Batch
//!
//! 批量读取 PDF 文本，针对每个文件向 LLM 提出同一组问题，并把问答写入 Excel
//!
//! ## 架构设计
//!
//! ### ① 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个文件或单段文本
//! - `PdfExtractor` - PDF 文本提取，失败降级为空文本
//! - `LlmService` - 逐个提问，失败降级为替代答案
//! - `ExcelWriter` - 写出问答表
//!
//! ### ② 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 扫描文件夹、顺序处理、节奏控制、取消
//! - `orchestrator/file_processor` - 单个文件：提取 → 提问 → 写出
//!
//! ### ③ 模型与配置
//! - `models/` - 问题列表、模型枚举、进度事件、运行统计
//! - `config` - 运行配置（TOML 文件 / 环境变量 / 命令行）
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, ConfigError, LlmError, Result};
pub use models::{ChatModel, ProgressEvent, ProgressState, QuestionList, RunOutcome, RunSummary};
pub use orchestrator::{BatchProcessor, RunHandle};
pub use services::{ExcelWriter, LlmService, PdfExtractor, TextExtractor};
