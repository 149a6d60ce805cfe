pub mod excel_writer;
pub mod llm_service;
pub mod pdf_extractor;

pub use excel_writer::ExcelWriter;
pub use llm_service::{LlmService, TIMEOUT_MARKER, UNANSWERABLE_MARKER};
pub use pdf_extractor::{PdfExtractor, TextExtractor};
