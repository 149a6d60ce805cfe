use std::path::PathBuf;

use crate::models::RunOutcome;

/// 一次批处理的统计结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// 扫描到的 PDF 总数
    pub total: usize,
    /// 已处理数量（包括无内容跳过的文件）
    pub processed: usize,
    /// 因无内容而跳过的数量
    pub skipped_empty: usize,
    /// 写出的结果文件
    pub outputs: Vec<PathBuf>,
    pub outcome: RunOutcome,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            processed: 0,
            skipped_empty: 0,
            outputs: Vec::new(),
            outcome: RunOutcome::Completed,
        }
    }

    /// 未处理（被取消跳过）的数量
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.processed)
    }
}
