#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use pdf_qa_batch::{ChatModel, Config, TextExtractor};
use tokio_util::sync::CancellationToken;
use wiremock::MockServer;

pub fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

pub fn questions(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 测试用目录：in/ 放 PDF，out/ 放结果
pub struct Workspace {
    _dir: tempfile::TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        std::fs::create_dir(&input).unwrap();
        std::fs::create_dir(&output).unwrap();
        Self {
            _dir: dir,
            input,
            output,
        }
    }

    pub fn config(&self, server: &MockServer) -> Config {
        Config {
            pdf_folder: self.input.clone(),
            output_folder: self.output.clone(),
            api_url: format!("{}/v1/chat/completions", server.uri()),
            api_key: "sk-test".to_string(),
            model: ChatModel::Gpt35Turbo,
            request_timeout_secs: 5,
            pacing_interval_secs: 0,
            ..Config::default()
        }
    }

    /// 写一个占位文件，内容由 FakeExtractor 决定
    pub fn touch(&self, name: &str) {
        std::fs::write(self.input.join(name), b"%PDF-placeholder").unwrap();
    }

    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.output)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// 一页带文字的 PDF
pub fn write_text_pdf(path: &Path, text: &str) {
    write_pdf(
        path,
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 24.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    );
}

/// 一页没有任何文字的 PDF（相当于扫描件）
pub fn write_blank_pdf(path: &Path) {
    write_pdf(path, vec![]);
}

fn write_pdf(path: &Path, operations: Vec<Operation>) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// 读出 xlsx 第一张表的所有行
pub fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// 按文件名返回固定文本；可在读取某个文件时触发取消
#[derive(Default)]
pub struct FakeExtractor {
    texts: HashMap<String, String>,
    cancel_on: Option<(String, CancellationToken)>,
}

impl FakeExtractor {
    pub fn with_text(mut self, name: &str, text: &str) -> Self {
        self.texts.insert(name.to_string(), text.to_string());
        self
    }

    pub fn cancel_when_reading(mut self, name: &str, token: CancellationToken) -> Self {
        self.cancel_on = Some((name.to_string(), token));
        self
    }
}

impl TextExtractor for FakeExtractor {
    fn extract_text(&self, path: &Path) -> String {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        if let Some((target, token)) = &self.cancel_on {
            if *target == name {
                token.cancel();
            }
        }
        self.texts.get(&name).cloned().unwrap_or_default()
    }
}
