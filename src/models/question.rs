use std::path::Path;

use tokio::fs;

use crate::error::{AppError, ConfigError, Result};

/// 用户输入的问题列表
///
/// 每行一个问题，顺序即答案的顺序。首尾空白会被去掉，空行会被忽略。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionList(Vec<String>);

impl QuestionList {
    pub fn new<I, S>(questions: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let questions: Vec<String> = questions
            .into_iter()
            .map(|q| q.as_ref().trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if questions.is_empty() {
            return Err(ConfigError::NoQuestions);
        }

        Ok(Self(questions))
    }

    /// 从多行文本解析问题列表
    pub fn from_text(text: &str) -> std::result::Result<Self, ConfigError> {
        Self::new(text.lines())
    }

    /// 从文本文件加载问题列表
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AppError::io(path.display().to_string(), e))?;
        Ok(Self::from_text(&content)?)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_drops_blank_lines() {
        let list = QuestionList::from_text("  作者是谁？\n\n发表年份？  \r\n   \n主要结论？\n").unwrap();
        assert_eq!(list.as_slice(), ["作者是谁？", "发表年份？", "主要结论？"]);
    }

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(QuestionList::from_text(" \n\n"), Err(ConfigError::NoQuestions));
        assert_eq!(
            QuestionList::new(Vec::<String>::new()),
            Err(ConfigError::NoQuestions)
        );
    }

    #[tokio::test]
    async fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.txt");
        std::fs::write(&path, "第一题\n第二题\n").unwrap();

        let list = QuestionList::load(&path).await.unwrap();
        assert_eq!(list.as_slice().len(), 2);
        assert_eq!(list.as_slice()[1], "第二题");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let err = QuestionList::load(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }
}
