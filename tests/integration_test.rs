//! 통합 테스트 모듈
//!
//! docpdf의 전체 흐름을 가짜 변환 서비스로 테스트합니다.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use docpdf::{
    DocPdfError, DocumentWriter, PdfRenderer, Result, TextExtractor,
};

/// 테스트용 파일 생성 헬퍼
fn create_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// 문서/PDF/기타 파일이 섞인 작업 폴더 생성
fn setup_mixed_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();

    create_file(temp_dir.path(), "report.docx", b"docx");
    create_file(temp_dir.path(), "legacy.DOC", b"doc");
    create_file(temp_dir.path(), "Minutes.Docx", b"docx");
    create_file(temp_dir.path(), "~$report.docx", b"lock");
    create_file(temp_dir.path(), "scan.pdf", b"pdf");
    create_file(temp_dir.path(), "INVOICE.PDF", b"pdf");
    create_file(temp_dir.path(), "notes.txt", b"text");

    // 하위 폴더는 검색하지 않음
    let nested = temp_dir.path().join("archive");
    fs::create_dir(&nested).unwrap();
    create_file(&nested, "old.docx", b"docx");
    create_file(&nested, "old.pdf", b"pdf");

    temp_dir
}

/// 입력 내용을 그대로 출력에 쓰는 렌더러. 이름에 "corrupt"가 있으면 실패합니다.
struct FakeRenderer {
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeRenderer {
    fn new() -> (Self, Arc<Mutex<Vec<PathBuf>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl PdfRenderer for FakeRenderer {
    fn render(&self, input: &Path, output: &Path) -> Result<()> {
        self.calls.lock().unwrap().push(input.to_path_buf());
        if input.to_string_lossy().contains("corrupt") {
            return Err(DocPdfError::PdfConversion {
                file: input.to_path_buf(),
                reason: "corrupt document".to_string(),
            });
        }
        let mut bytes = b"%PDF ".to_vec();
        bytes.extend(fs::read(input).unwrap());
        fs::write(output, bytes).unwrap();
        Ok(())
    }
}

/// 파일 내용을 한 페이지 텍스트로 돌려주는 추출기
struct FileAsPageExtractor;

impl TextExtractor for FileAsPageExtractor {
    fn extract_pages(&self, input: &Path) -> Result<Vec<String>> {
        Ok(vec![fs::read_to_string(input).unwrap()])
    }
}

/// 작성된 문단을 출력 경로별로 기록하는 작성기
#[derive(Clone, Default)]
struct RecordingWriter {
    written: Arc<Mutex<Vec<(PathBuf, Vec<String>)>>>,
}

impl DocumentWriter for RecordingWriter {
    fn write(&self, paragraphs: &[String], output: &Path) -> Result<()> {
        fs::write(output, paragraphs.join("\n")).unwrap();
        self.written
            .lock()
            .unwrap()
            .push((output.to_path_buf(), paragraphs.to_vec()));
        Ok(())
    }
}

fn sorted_names(files: &[docpdf::CandidateFile]) -> Vec<String> {
    let mut names: Vec<String> = files.iter().map(|f| f.file_name()).collect();
    names.sort();
    names
}

mod scanner_tests {
    use super::*;
    use docpdf::{scan, Direction};

    #[test]
    fn test_document_scan_matches_exactly() {
        let temp_dir = setup_mixed_directory();

        let files = scan(temp_dir.path(), Direction::DocumentToPdf).unwrap();

        assert_eq!(
            sorted_names(&files),
            vec!["Minutes.Docx", "legacy.DOC", "report.docx"]
        );
    }

    #[test]
    fn test_pdf_scan_matches_exactly() {
        let temp_dir = setup_mixed_directory();

        let files = scan(temp_dir.path(), Direction::PdfToDocument).unwrap();

        assert_eq!(sorted_names(&files), vec!["INVOICE.PDF", "scan.pdf"]);
    }

    #[test]
    fn test_scan_missing_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = scan(&temp_dir.path().join("missing"), Direction::PdfToDocument);
        assert!(result.is_err());
    }
}

mod workflow_tests {
    use super::*;
    use docpdf::{
        BatchResult, ChannelReporter, ConversionDispatcher, Direction, Severity, StatusEvent,
        WorkflowController, WorkflowState,
    };

    fn controller_with(
        root: &Path,
        dispatcher: ConversionDispatcher,
    ) -> (WorkflowController, std::sync::mpsc::Receiver<StatusEvent>) {
        let (reporter, receiver) = ChannelReporter::new();
        (
            WorkflowController::new(root, dispatcher, Arc::new(reporter)),
            receiver,
        )
    }

    #[test]
    fn test_one_failure_out_of_three() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.docx", b"a");
        create_file(temp_dir.path(), "corrupt.docx", b"b");
        create_file(temp_dir.path(), "c.docx", b"c");

        let (renderer, calls) = FakeRenderer::new();
        let (controller, _events) = controller_with(
            temp_dir.path(),
            ConversionDispatcher::default().with_renderer(renderer),
        );

        let outcome = controller.run(Direction::DocumentToPdf).unwrap();

        assert_eq!(outcome.state, WorkflowState::Done);
        assert_eq!(outcome.result, BatchResult::new(2, 3));
        assert_eq!(calls.lock().unwrap().len(), 3);
        assert!(temp_dir.path().join("a.pdf").exists());
        assert!(temp_dir.path().join("c.pdf").exists());
        assert!(!temp_dir.path().join("corrupt.pdf").exists());
    }

    #[test]
    fn test_lock_files_are_never_converted() {
        let temp_dir = setup_mixed_directory();
        let (renderer, calls) = FakeRenderer::new();
        let (controller, _events) = controller_with(
            temp_dir.path(),
            ConversionDispatcher::default().with_renderer(renderer),
        );

        let outcome = controller.run(Direction::DocumentToPdf).unwrap();

        assert_eq!(outcome.result, BatchResult::new(3, 3));
        assert!(calls
            .lock()
            .unwrap()
            .iter()
            .all(|p| !p.file_name().unwrap().to_string_lossy().starts_with("~$")));
        assert!(temp_dir.path().join("legacy.pdf").exists());
        assert!(temp_dir.path().join("Minutes.pdf").exists());
        assert!(!temp_dir.path().join("archive").join("old.pdf").exists());
    }

    #[test]
    fn test_second_run_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_file(temp_dir.path(), "memo.docx", b"v1");
        let (renderer, _calls) = FakeRenderer::new();
        let (controller, _events) = controller_with(
            temp_dir.path(),
            ConversionDispatcher::default().with_renderer(renderer),
        );

        let first = controller.run(Direction::DocumentToPdf).unwrap();
        fs::write(&input, b"v2").unwrap();
        let second = controller.run(Direction::DocumentToPdf).unwrap();

        assert_eq!(first.result, BatchResult::new(1, 1));
        assert_eq!(second.result, BatchResult::new(1, 1));
        assert_eq!(
            fs::read(temp_dir.path().join("memo.pdf")).unwrap(),
            b"%PDF v2"
        );
    }

    #[test]
    fn test_empty_directory_reports_info() {
        let temp_dir = TempDir::new().unwrap();
        let (controller, events) =
            controller_with(temp_dir.path(), ConversionDispatcher::default());

        let outcome = controller.run(Direction::DocumentToPdf).unwrap();

        assert_eq!(outcome.state, WorkflowState::Done);
        assert_eq!(outcome.result, BatchResult::new(0, 0));
        assert_eq!(outcome.summary.severity, Severity::Info);

        let infos: Vec<String> = events
            .try_iter()
            .filter_map(|e| match e {
                StatusEvent::Status {
                    message,
                    severity: Severity::Info,
                    ..
                } => Some(message),
                _ => None,
            })
            .collect();
        assert_eq!(infos, vec!["No DOC/DOCX files found"]);
    }

    #[test]
    fn test_pdf_to_docx_paragraphs() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "hello.pdf", b"Hello\n\nWorld");
        let writer = RecordingWriter::default();
        let (controller, _events) = controller_with(
            temp_dir.path(),
            ConversionDispatcher::default()
                .with_extractor(FileAsPageExtractor)
                .with_writer(writer.clone()),
        );

        let outcome = controller.run(Direction::PdfToDocument).unwrap();

        assert_eq!(outcome.result, BatchResult::new(1, 1));
        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, temp_dir.path().join("hello.docx"));
        assert_eq!(written[0].1, vec!["Hello", "World"]);
    }

    #[test]
    fn test_pdf_to_docx_with_real_writer() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "letter.pdf", b"Dear reader,\n\nThanks.\n\n");
        let (controller, _events) = controller_with(
            temp_dir.path(),
            ConversionDispatcher::default().with_extractor(FileAsPageExtractor),
        );

        let outcome = controller.run(Direction::PdfToDocument).unwrap();

        assert_eq!(outcome.result, BatchResult::new(1, 1));
        let bytes = fs::read(temp_dir.path().join("letter.docx")).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_directory_failure_releases_control() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("vanished");
        let (controller, events) = controller_with(&root, ConversionDispatcher::default());

        let outcome = controller
            .spawn(Direction::PdfToDocument)
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(outcome.state, WorkflowState::Failed);
        assert!(!controller.is_busy(Direction::PdfToDocument));

        let events: Vec<StatusEvent> = events.try_iter().collect();
        assert!(events.iter().any(|e| matches!(
            e,
            StatusEvent::Status {
                severity: Severity::Error,
                ..
            }
        )));
        // 요약보다 트리거 복구가 먼저 전달됩니다.
        let tail: Vec<&StatusEvent> = events.iter().rev().take(2).collect();
        assert!(matches!(tail[0], StatusEvent::Summary { .. }));
        assert_eq!(
            tail[1],
            &StatusEvent::ControlEnabled {
                direction: Direction::PdfToDocument,
                enabled: true
            }
        );
    }

    #[test]
    fn test_both_directions_run_concurrently() {
        let temp_dir = setup_mixed_directory();
        let (renderer, _calls) = FakeRenderer::new();
        let writer = RecordingWriter::default();
        let (controller, events) = controller_with(
            temp_dir.path(),
            ConversionDispatcher::default()
                .with_renderer(renderer)
                .with_extractor(FileAsPageExtractor)
                .with_writer(writer.clone()),
        );

        // 한쪽 출력이 다른 쪽 스캔에 잡힐 수 있으므로 개수는 하한만 확인합니다.
        let docs = controller.spawn(Direction::DocumentToPdf).unwrap();
        let pdfs = controller.spawn(Direction::PdfToDocument).unwrap();
        let docs = docs.join().unwrap();
        let pdfs = pdfs.join().unwrap();

        assert!(docs.result.total >= 3);
        assert_eq!(docs.result.converted, docs.result.total);
        assert!(pdfs.result.total >= 2);
        assert_eq!(pdfs.result.converted, pdfs.result.total);

        let summaries = events
            .try_iter()
            .filter(|e| matches!(e, StatusEvent::Summary { .. }))
            .count();
        assert_eq!(summaries, 2);
    }
}

mod lease_tests {
    use super::*;
    use docpdf::{
        ConversionDispatcher, Direction, JobSummary, ProgressReporter, Severity,
        WorkflowController,
    };

    /// 진행 메시지에서 패닉하는 보고기
    #[derive(Default)]
    struct PanickingReporter {
        enabled: Mutex<Vec<(Direction, bool)>>,
    }

    impl ProgressReporter for PanickingReporter {
        fn report(&self, _direction: Direction, message: &str, _severity: Severity) {
            if message.starts_with("Converted") {
                panic!("display went away");
            }
        }

        fn set_enabled(&self, direction: Direction, enabled: bool) {
            self.enabled.lock().unwrap().push((direction, enabled));
        }

        fn summary(&self, _direction: Direction, _summary: &JobSummary) {}
    }

    #[test]
    fn test_control_reenabled_after_panic() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "a.docx", b"a");
        let (renderer, _calls) = FakeRenderer::new();
        let reporter = Arc::new(PanickingReporter::default());
        let controller = WorkflowController::new(
            temp_dir.path(),
            ConversionDispatcher::default().with_renderer(renderer),
            reporter.clone(),
        );

        let handle = controller.spawn(Direction::DocumentToPdf).unwrap();
        assert!(handle.join().is_err());

        assert!(!controller.is_busy(Direction::DocumentToPdf));
        assert_eq!(
            *reporter.enabled.lock().unwrap(),
            vec![
                (Direction::DocumentToPdf, false),
                (Direction::DocumentToPdf, true)
            ]
        );
    }
}

mod error_tests {
    use docpdf::DocPdfError;
    use std::path::PathBuf;

    #[test]
    fn test_directory_access_display() {
        let error = DocPdfError::DirectoryAccess {
            path: PathBuf::from("/nonexistent"),
            reason: "permission denied".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("작업 폴더에 접근할 수 없습니다"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_conversion_error_display() {
        let error = DocPdfError::PdfConversion {
            file: PathBuf::from("report.docx"),
            reason: "service unavailable".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("PDF 변환 실패"));
        assert!(msg.contains("report.docx"));
    }
}
