//! 批量 PDF 处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是一次批处理的入口，负责文件扫描、逐个处理、节奏控制和取消。
//!
//! ## 核心功能
//!
//! 1. **文件扫描**：列出 PDF 文件夹中以 `.pdf` 结尾的文件（区分大小写），按文件名排序
//! 2. **顺序处理**：委托 `FileFlow` 处理单个文件，一次只处理一个
//! 3. **节奏控制**：两个文件之间等待固定间隔，避免触发接口限流
//! 4. **协作式取消**：在每个文件开始前、每个问题发出前、等待前检查取消信号
//! 5. **进度上报**：通过 channel 发送 `ProgressEvent`，不直接修改界面状态
//!
//! ## 设计特点
//!
//! - **配置快照**：运行开始时按值持有 `Config`，中途修改不影响本次运行
//! - **单任务**：整个循环跑在一个后台 tokio 任务里

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{ProgressEvent, ProgressSink, QuestionList, RunOutcome, RunSummary};
use crate::orchestrator::file_processor::{FileFlow, FileOutcome};
use crate::services::{LlmService, PdfExtractor, TextExtractor};
use crate::utils::logging::{log_file_start, log_files_loaded};

/// 参与处理的文件后缀
pub const PDF_SUFFIX: &str = ".pdf";

/// 批量处理器
pub struct BatchProcessor {
    config: Config,
    flow: FileFlow,
}

impl BatchProcessor {
    /// 校验配置并创建处理器，校验失败时不会启动任何任务
    pub fn new(config: Config, questions: QuestionList) -> Result<Self> {
        config.validate()?;

        let llm_service = LlmService::new(&config)?;
        let flow = FileFlow::new(
            Arc::new(PdfExtractor::new()),
            llm_service,
            questions,
            config.model,
            config.output_folder.clone(),
        );

        Ok(Self { config, flow })
    }

    /// 替换文本提取实现
    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.flow.set_extractor(extractor);
        self
    }

    /// 在后台任务中运行，返回用于取消和接收进度的句柄
    pub fn spawn(self) -> RunHandle {
        let cancel = CancellationToken::new();
        let (sender, receiver) = mpsc::unbounded_channel();
        let sink = ProgressSink::new(sender);

        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move { self.run(&sink, &task_cancel).await });

        RunHandle {
            cancel,
            progress: receiver,
            task,
        }
    }

    /// 运行一次完整的批处理
    pub async fn run(&self, progress: &ProgressSink, cancel: &CancellationToken) -> Result<RunSummary> {
        info!("\n📁 正在扫描待处理的 PDF 文件...");
        let files = list_pdf_files(&self.config.pdf_folder).await?;
        let total = files.len();
        log_files_loaded(&self.config.pdf_folder, total);
        progress.emit(ProgressEvent::Started { total });

        let mut summary = RunSummary::new(total);
        let pacing = self.config.pacing_interval();

        for (idx, pdf_path) in files.iter().enumerate() {
            if cancel.is_cancelled() {
                summary.outcome = RunOutcome::Cancelled;
                break;
            }

            let name = file_name(pdf_path);
            log_file_start(idx + 1, total, &name);
            progress.emit(ProgressEvent::FileStarted {
                index: idx + 1,
                name: name.clone(),
            });

            match self.flow.run(pdf_path, cancel).await? {
                FileOutcome::Skipped => {
                    summary.processed += 1;
                    summary.skipped_empty += 1;
                    progress.emit(ProgressEvent::FileSkipped {
                        name,
                        processed: summary.processed,
                    });
                }
                FileOutcome::Written(output) => {
                    summary.processed += 1;
                    summary.outputs.push(output.clone());
                    progress.emit(ProgressEvent::FileCompleted {
                        name,
                        output,
                        processed: summary.processed,
                    });
                }
                FileOutcome::Cancelled => {
                    summary.outcome = RunOutcome::Cancelled;
                    break;
                }
            }

            let has_more = idx + 1 < total;
            if has_more && !cancel.is_cancelled() && !pacing.is_zero() {
                info!("等待 {} 秒后处理下一个文件...", pacing.as_secs());
                progress.emit(ProgressEvent::Waiting {
                    seconds: pacing.as_secs(),
                });
                tokio::select! {
                    _ = tokio::time::sleep(pacing) => {}
                    _ = cancel.cancelled() => {
                        warn!("等待期间收到取消请求");
                    }
                }
            }
        }

        progress.emit(ProgressEvent::Finished {
            outcome: summary.outcome,
        });
        info!("{}", summary.outcome.label());

        Ok(summary)
    }
}

/// 后台运行句柄
pub struct RunHandle {
    cancel: CancellationToken,
    progress: UnboundedReceiver<ProgressEvent>,
    task: JoinHandle<Result<RunSummary>>,
}

impl RunHandle {
    /// 请求取消，正在进行的请求会完成，之后的工作不再开始
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 下一条进度事件，后台任务结束且事件取完后返回 `None`
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.progress.recv().await
    }

    /// 等待后台任务结束
    pub async fn join(self) -> Result<RunSummary> {
        self.task.await.map_err(AppError::from)?
    }
}

/// 列出文件夹中以 `.pdf` 结尾的文件，按文件名排序
pub async fn list_pdf_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::io(folder.display().to_string(), e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::io(folder.display().to_string(), e))?
    {
        // 跟随符号链接
        let is_file = fs::metadata(entry.path())
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if is_file && entry.file_name().to_string_lossy().ends_with(PDF_SUFFIX) {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
