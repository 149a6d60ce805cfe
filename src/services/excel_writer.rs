//! 结果写入服务 - 业务能力层
//!
//! 只负责把一组问答写成一个 xlsx 文件

use std::path::Path;

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::{AppError, Result};

/// 表头
pub const HEADERS: [&str; 2] = ["问题", "答案"];

/// Excel 写入服务
#[derive(Debug, Default, Clone, Copy)]
pub struct ExcelWriter;

impl ExcelWriter {
    pub fn new() -> Self {
        Self
    }

    /// 写入问答表，已存在的文件会被覆盖
    pub fn write(&self, questions: &[String], answers: &[String], output_file: &Path) -> Result<()> {
        if questions.len() != answers.len() {
            return Err(AppError::LengthMismatch {
                questions: questions.len(),
                answers: answers.len(),
            });
        }

        let to_err = |source| AppError::Write {
            path: output_file.display().to_string(),
            source,
        };

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).map_err(to_err)?;
        }

        for (row, (question, answer)) in questions.iter().zip(answers).enumerate() {
            let row = row as u32 + 1;
            worksheet.write_string(row, 0, question).map_err(to_err)?;
            worksheet.write_string(row, 1, answer).map_err(to_err)?;
        }

        worksheet.set_column_width(0, 40).map_err(to_err)?;
        worksheet.set_column_width(1, 80).map_err(to_err)?;

        workbook.save(output_file).map_err(to_err)?;
        info!("结果已保存到 {}", output_file.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Reader, Xlsx};

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rows_read_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.xlsx");
        let questions = strings(&["作者是谁？", "发表年份？", "主要结论？"]);
        let answers = strings(&["张三", "请求超时", "无法回答"]);

        ExcelWriter::new().write(&questions, &answers, &path).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], strings(&["问题", "答案"]));
        for (i, row) in rows[1..].iter().enumerate() {
            assert_eq!(row[0], questions[i]);
            assert_eq!(row[1], answers[i]);
        }
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.xlsx");
        std::fs::write(&path, b"stale").unwrap();

        let writer = ExcelWriter::new();
        writer
            .write(&strings(&["a", "b"]), &strings(&["1", "2"]), &path)
            .unwrap();
        writer.write(&strings(&["c"]), &strings(&["3"]), &path).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], strings(&["c", "3"]));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.xlsx");

        let err = ExcelWriter::new()
            .write(&strings(&["a", "b"]), &strings(&["1"]), &path)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::LengthMismatch {
                questions: 2,
                answers: 1
            }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("paper.xlsx");

        let err = ExcelWriter::new()
            .write(&strings(&["a"]), &strings(&["1"]), &path)
            .unwrap_err();
        assert!(matches!(err, AppError::Write { .. }));
    }
}
