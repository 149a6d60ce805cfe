//! 单个文件处理器 - 编排层
//!
//! ## 职责
//!
//! 对一个 PDF 依次执行：提取文本 → 逐个提问 → 写出表格。
//!
//! ## 结果
//!
//! - 文本为空：不提问也不写文件，返回 [`FileOutcome::Skipped`]
//! - 提问过程中被取消：不写文件，返回 [`FileOutcome::Cancelled`]
//! - 其余情况写出 `<文件名>.xlsx`，返回 [`FileOutcome::Written`]
//!
//! 写文件失败会直接向上返回错误。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::Result;
use crate::models::{ChatModel, QuestionList};
use crate::services::pdf_extractor::is_blank;
use crate::services::{ExcelWriter, LlmService, TextExtractor};

/// 输出文件扩展名
pub const OUTPUT_EXTENSION: &str = "xlsx";

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// 已写出结果文件
    Written(PathBuf),
    /// 无内容，跳过
    Skipped,
    /// 提问期间收到取消
    Cancelled,
}

/// 单个文件的处理流程
///
/// 创建一次，整批复用。
pub struct FileFlow {
    extractor: Arc<dyn TextExtractor>,
    llm_service: LlmService,
    writer: ExcelWriter,
    questions: QuestionList,
    model: ChatModel,
    output_folder: PathBuf,
}

impl FileFlow {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        llm_service: LlmService,
        questions: QuestionList,
        model: ChatModel,
        output_folder: PathBuf,
    ) -> Self {
        Self {
            extractor,
            llm_service,
            writer: ExcelWriter::new(),
            questions,
            model,
            output_folder,
        }
    }

    pub fn set_extractor(&mut self, extractor: Arc<dyn TextExtractor>) {
        self.extractor = extractor;
    }

    pub async fn run(&self, pdf_path: &Path, cancel: &CancellationToken) -> Result<FileOutcome> {
        let text = self.extract(pdf_path).await;
        if is_blank(&text) {
            info!("文件 {} 无内容，跳过处理", pdf_path.display());
            return Ok(FileOutcome::Skipped);
        }
        info!("提取到 {} 个字符", text.chars().count());

        let answers = self
            .llm_service
            .answer_questions(&text, self.questions.as_slice(), self.model, cancel)
            .await;

        if cancel.is_cancelled() {
            info!("文件 {} 处理被取消，不写出结果", pdf_path.display());
            return Ok(FileOutcome::Cancelled);
        }

        let output_file = output_path(&self.output_folder, pdf_path);
        self.writer
            .write(self.questions.as_slice(), &answers, &output_file)?;

        Ok(FileOutcome::Written(output_file))
    }

    /// 在阻塞线程池上提取文本，解析线程 panic 也按空文本处理
    async fn extract(&self, pdf_path: &Path) -> String {
        let extractor = Arc::clone(&self.extractor);
        let path = pdf_path.to_path_buf();

        match tokio::task::spawn_blocking(move || extractor.extract_text(&path)).await {
            Ok(text) => text,
            Err(e) => {
                error!("提取 {} 时线程异常: {}", pdf_path.display(), e);
                String::new()
            }
        }
    }
}

/// `<输出目录>/<文件名去掉扩展名>.xlsx`
pub fn output_path(output_folder: &Path, pdf_path: &Path) -> PathBuf {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_folder.join(format!("{}.{}", stem, OUTPUT_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_stem_only() {
        assert_eq!(
            output_path(Path::new("/out"), Path::new("/in/report.pdf")),
            PathBuf::from("/out/report.xlsx")
        );
        assert_eq!(
            output_path(Path::new("/out"), Path::new("/in/v1.2.final.pdf")),
            PathBuf::from("/out/v1.2.final.xlsx")
        );
    }
}
