//! 进度事件与进度状态
//!
//! 后台任务只发送 [`ProgressEvent`]，界面一侧通过 [`ProgressState::apply`] 自行汇总，
//! 两边不共享可变状态。

use std::path::PathBuf;

use tokio::sync::mpsc::UnboundedSender;

/// 一次批处理的结束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// 全部文件处理完毕
    Completed,
    /// 用户中途取消
    Cancelled,
}

impl RunOutcome {
    /// 结束时显示的状态文本
    pub fn label(self) -> &'static str {
        match self {
            RunOutcome::Completed => "处理完成！",
            RunOutcome::Cancelled => "处理已取消",
        }
    }
}

/// 后台任务发出的进度事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// 扫描完成，确定文件总数
    Started { total: usize },
    /// 开始处理第 `index` 个文件（从 1 开始）
    FileStarted { index: usize, name: String },
    /// 文件无内容，已计入处理数但没有输出
    FileSkipped { name: String, processed: usize },
    /// 结果已写入
    FileCompleted {
        name: String,
        output: PathBuf,
        processed: usize,
    },
    /// 进入文件间的等待
    Waiting { seconds: u64 },
    /// 批处理结束
    Finished { outcome: RunOutcome },
}

/// 界面展示用的进度状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    pub total: usize,
    pub processed: usize,
    pub current_file: Option<String>,
    pub status: String,
    pub outcome: Option<RunOutcome>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            total: 0,
            processed: 0,
            current_file: None,
            status: "等待处理...".to_string(),
            outcome: None,
        }
    }
}

impl ProgressState {
    pub fn apply(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { total } => {
                self.total = *total;
                self.processed = 0;
                self.current_file = None;
                self.outcome = None;
                self.status = format!("共找到 {} 个 PDF 文件", total);
            }
            ProgressEvent::FileStarted { name, .. } => {
                self.current_file = Some(name.clone());
                self.status = format!("正在处理：{}", name);
            }
            ProgressEvent::FileSkipped { name, processed } => {
                self.processed = *processed;
                self.status = format!("文件 {} 无内容，跳过处理", name);
            }
            ProgressEvent::FileCompleted {
                output, processed, ..
            } => {
                self.processed = *processed;
                self.status = format!("结果已保存到 {}", output.display());
            }
            ProgressEvent::Waiting { seconds } => {
                self.status = format!("等待 {} 秒后处理下一个文件...", seconds);
            }
            ProgressEvent::Finished { outcome } => {
                self.current_file = None;
                self.outcome = Some(*outcome);
                self.status = outcome.label().to_string();
            }
        }
    }

    /// 进度条位置（0.0 ~ 1.0）
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// 进度事件发送端
///
/// 接收端关闭后事件直接丢弃，不影响批处理本身。
#[derive(Debug, Clone)]
pub struct ProgressSink(Option<UnboundedSender<ProgressEvent>>);

impl ProgressSink {
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self(Some(sender))
    }

    /// 不关心进度时使用
    pub fn disabled() -> Self {
        Self(None)
    }

    pub fn emit(&self, event: ProgressEvent) {
        if let Some(sender) = &self.0 {
            let _ = sender.send(event);
        }
    }
}
