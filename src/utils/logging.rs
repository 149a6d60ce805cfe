/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::RunSummary;

/// 初始化 tracing 订阅者
///
/// 优先读取 `RUST_LOG`，否则按 `verbose` 选择 debug / info。重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nPDF 批量问答日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|e| AppError::io(log_file_path, e))?;
    Ok(())
}

/// 把本次运行的统计追加到日志文件
pub fn append_summary(log_file_path: &str, summary: &RunSummary) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .map_err(|e| AppError::io(log_file_path, e))?;

    let mut lines = format!(
        "完成时间: {}\n结果: {}\n已处理: {}/{}（无内容 {}）\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        summary.outcome.label(),
        summary.processed,
        summary.total,
        summary.skipped_empty
    );
    for output in &summary.outputs {
        lines.push_str(&format!("输出: {}\n", output.display()));
    }

    file.write_all(lines.as_bytes())
        .map_err(|e| AppError::io(log_file_path, e))?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, question_count: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - PDF 批量问答模式");
    info!("📁 PDF 文件夹: {}", config.pdf_folder.display());
    info!("📁 输出文件夹: {}", config.output_folder.display());
    info!("🤖 模型: {}", config.model);
    info!("❓ 问题数量: {}", question_count);
    info!("⏱️ 文件间隔: {} 秒", config.pacing_interval_secs);
    info!("{}", "=".repeat(60));
}

/// 记录文件扫描结果
pub fn log_files_loaded(folder: &Path, total: usize) {
    info!("✓ 在 {} 中找到 {} 个 PDF 文件", folder.display(), total);
}

/// 记录单个文件开始处理
pub fn log_file_start(index: usize, total: usize, name: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📄 [{}/{}] 正在处理文件：{}", index, total, name);
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 {}", summary.outcome.label());
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已处理: {}/{}", summary.processed, summary.total);
    info!("📝 生成表格: {}", summary.outputs.len());
    info!("⚪ 无内容跳过: {}", summary.skipped_empty);
    if summary.remaining() > 0 {
        info!("⏹️ 未处理: {}", summary.remaining());
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
