//! PDF 文本提取服务 - 业务能力层
//!
//! 只负责"读出一个 PDF 的文字"，任何失败都降级为空字符串。

use std::path::Path;

use lopdf::Document;
use tracing::{debug, error, warn};

/// 文本提取能力
///
/// 实现方不允许把错误抛给调用方，无法读取时返回空字符串。
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, path: &Path) -> String;
}

/// 基于 lopdf 的 PDF 文本提取
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, path: &Path) -> String {
        let doc = match Document::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                error!("无法解析 PDF 文件 {}，错误：{}", path.display(), e);
                return String::new();
            }
        };

        let pages = doc.get_pages();
        debug!("{} 共 {} 页", path.display(), pages.len());

        // get_pages 返回按页码排序的 BTreeMap
        let texts: Vec<String> = pages
            .keys()
            .map(|&page_num| match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("{} 第 {} 页提取失败: {}", path.display(), page_num, e);
                    String::new()
                }
            })
            .collect();

        texts.join("\n")
    }
}

/// 提取结果是否等同于"无内容"
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
