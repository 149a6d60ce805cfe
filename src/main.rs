use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pdf_qa_batch::utils::logging;
use pdf_qa_batch::{BatchProcessor, ChatModel, Config, ProgressEvent, ProgressState, QuestionList};
use tracing::{info, warn};

/// 批量从 PDF 提取文本，向 LLM 提问并把问答写入 Excel
#[derive(Parser, Debug)]
#[command(name = "pdf-qa-batch", version)]
struct Cli {
    /// TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,
    /// PDF 文件夹
    #[arg(long)]
    pdf_dir: Option<PathBuf>,
    /// 输出文件夹
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// 问题文件，每行一个问题
    #[arg(long)]
    questions_file: Option<PathBuf>,
    /// chat/completions 接口地址
    #[arg(long)]
    api_url: Option<String>,
    /// API 密钥
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long, value_enum)]
    model: Option<ChatModel>,
    /// 单次请求超时（秒）
    #[arg(long)]
    request_timeout: Option<u64>,
    /// 两个文件之间的等待时间（秒）
    #[arg(long)]
    pacing_interval: Option<u64>,
    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// 优先级：命令行 > 环境变量 > 配置文件 > 默认值
    fn load_config(&self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let mut config = base.apply_env()?;

        if let Some(dir) = &self.pdf_dir {
            config.pdf_folder = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_folder = dir.clone();
        }
        if let Some(path) = &self.questions_file {
            config.questions_file = Some(path.clone());
        }
        if let Some(url) = &self.api_url {
            config.set_api_url(url.as_str())?;
        }
        if let Some(key) = &self.api_key {
            config.set_api_key(key.as_str())?;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(secs) = self.request_timeout {
            config.request_timeout_secs = secs;
        }
        if let Some(secs) = self.pacing_interval {
            config.pacing_interval_secs = secs;
        }
        config.verbose_logging |= self.verbose;

        Ok(config)
    }
}

async fn load_questions(config: &Config) -> Result<QuestionList> {
    let questions = match &config.questions_file {
        Some(path) => QuestionList::load(path)
            .await
            .with_context(|| format!("无法读取问题文件: {}", path.display()))?,
        None => QuestionList::new(&config.questions)?,
    };
    Ok(questions)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let questions = load_questions(&config).await?;
    logging::log_startup(&config, questions.as_slice().len());

    let log_file = config.output_log_file.clone();
    let processor = BatchProcessor::new(config, questions).context("运行前校验失败")?;
    // 校验通过后才创建日志文件
    logging::init_log_file(&log_file)?;

    info!("处理开始，请稍候...（Ctrl-C 取消）");
    let mut handle = processor.spawn();

    let cancel = handle.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("收到取消请求，当前请求完成后停止");
            cancel.cancel();
        }
    });

    let mut state = ProgressState::default();
    while let Some(event) = handle.next_event().await {
        state.apply(&event);
        match &event {
            ProgressEvent::FileStarted { .. }
            | ProgressEvent::FileSkipped { .. }
            | ProgressEvent::FileCompleted { .. } => {
                info!(
                    "[{}/{}] {:.0}% {}",
                    state.processed,
                    state.total,
                    state.fraction() * 100.0,
                    state.status
                );
            }
            _ => info!("{}", state.status),
        }
    }

    let summary = handle.join().await?;
    logging::append_summary(&log_file, &summary)?;
    logging::print_final_stats(&summary, &log_file);

    Ok(())
}
