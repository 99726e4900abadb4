//! docpdf - DOC/DOCX ↔ PDF 폴더 일괄 변환기
//!
//! 실행 파일이 있는 폴더의 문서를 버튼 두 개로 일괄 변환하는 작은 도구입니다.
//! 문서 형식 자체는 외부 서비스에 맡기고, 이 크레이트는 폴더 검색, 파일별 변환 호출,
//! 진행 상황 보고만 담당합니다.
//!
//! # 주요 기능
//!
//! - 📂 **폴더 검색**: 작업 폴더 바로 아래의 `.doc`/`.docx` 또는 `.pdf` (대소문자 무시, `~$` 임시 파일 제외)
//! - 📄 **DOC/DOCX → PDF**: LibreOffice 헤드리스 변환
//! - 📝 **PDF → DOCX**: 페이지 텍스트 추출 후 빈 줄 기준 문단으로 재구성
//! - 🛡️ **파일 단위 실패 격리**: 한 파일이 실패해도 나머지는 계속 변환
//! - 🔒 **작업 임대**: 방향별로 하나의 작업만 실행, 종료 시 항상 버튼 복구
//! - 📊 **진행 상황 보고**: 백그라운드 스레드에서 순서대로 상태 전달
//!
//! # 예제
//!
//! ```no_run
//! use std::sync::Arc;
//! use docpdf::{ConsoleReporter, ConversionDispatcher, Direction, WorkflowController};
//!
//! let controller = WorkflowController::new(
//!     "./documents",
//!     ConversionDispatcher::default(),
//!     Arc::new(ConsoleReporter::new(true)),
//! );
//! if let Some(handle) = controller.spawn(Direction::PdfToDocument) {
//!     let outcome = handle.join().unwrap();
//!     println!("{}/{}", outcome.result.converted, outcome.result.total);
//! }
//! ```

pub mod cli;
pub mod console;
pub mod dispatcher;
pub mod error;
pub mod job;
pub mod pattern;
pub mod reporter;
pub mod scanner;
pub mod services;
pub mod stats;
pub mod workflow;

// Re-exports for convenient access
pub use cli::{Action, Args};
pub use console::ConsoleReporter;
pub use dispatcher::{pages_to_paragraphs, ConversionDispatcher};
pub use error::{DocPdfError, Result};
pub use job::{BatchResult, CandidateFile, ConversionJob, ConversionOutcome, Direction, SourceFormat};
pub use pattern::PatternMatcher;
pub use reporter::{ChannelReporter, JobSummary, ProgressReporter, Severity, StatusEvent};
pub use scanner::{executable_dir, scan};
pub use services::{
    DocumentWriter, DocxParagraphWriter, LibreOfficeConverter, PdfRenderer, PdfTextExtractor,
    TextExtractor,
};
pub use stats::Statistics;
pub use workflow::{JobLease, JobOutcome, WorkflowController, WorkflowState};
