//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量处理器
//! - 扫描 PDF 文件夹（Vec<PathBuf>）
//! - 顺序处理、文件间等待、协作式取消
//! - 通过 channel 上报进度，输出统计
//!
//! ### `file_processor` - 单个文件处理器
//! - 提取文本 → 逐个提问 → 写出表格
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<PDF>)
//!     ↓
//! file_processor (处理单个 PDF)
//!     ↓
//! services (能力层：pdf_extractor / llm_service / excel_writer)
//! ```

pub mod batch_processor;
pub mod file_processor;

pub use batch_processor::{list_pdf_files, BatchProcessor, RunHandle};
pub use file_processor::{output_path, FileFlow, FileOutcome};
