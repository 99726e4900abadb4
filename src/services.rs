//! 외부 변환 서비스 모듈
//!
//! 문서 형식 자체의 해석과 생성은 외부 도구와 라이브러리에 맡깁니다.
//!
//! - DOC/DOCX → PDF: LibreOffice 헤드리스 실행
//! - PDF 텍스트 추출: `pdf-extract`
//! - DOCX 작성: `docx-rs`

use docx_rs::{BreakType, Docx, Paragraph, Run};
use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{DocPdfError, Result};

/// DOC/DOCX 파일을 PDF로 렌더링하는 서비스
pub trait PdfRenderer: Send + Sync {
    /// `input`을 변환하여 `output`에 PDF를 생성합니다. 동기 호출입니다.
    fn render(&self, input: &Path, output: &Path) -> Result<()>;
}

/// PDF에서 페이지별 텍스트를 추출하는 서비스
pub trait TextExtractor: Send + Sync {
    /// 페이지 순서대로 텍스트를 반환합니다. 추출할 수 없는 페이지는 빈 문자열입니다.
    fn extract_pages(&self, input: &Path) -> Result<Vec<String>>;
}

/// 문단 목록으로 DOCX 파일을 작성하는 서비스
pub trait DocumentWriter: Send + Sync {
    fn write(&self, paragraphs: &[String], output: &Path) -> Result<()>;
}

/// LibreOffice (`soffice --headless --convert-to pdf`) 기반 PDF 렌더러
#[derive(Debug, Clone, Default)]
pub struct LibreOfficeConverter {
    /// 사용자가 지정한 실행 파일 (None이면 기본 후보를 차례로 시도)
    program: Option<PathBuf>,
}

impl LibreOfficeConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 실행 파일 경로 지정
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn candidates(&self) -> Vec<PathBuf> {
        if let Some(ref program) = self.program {
            return vec![program.clone()];
        }

        let mut candidates = vec![PathBuf::from("soffice"), PathBuf::from("libreoffice")];
        if cfg!(windows) {
            candidates.push(PathBuf::from(
                r"C:\Program Files\LibreOffice\program\soffice.exe",
            ));
        }
        candidates
    }

    fn run(&self, input: &Path, out_dir: &Path) -> Result<std::process::Output> {
        let mut last_error = None;

        for program in self.candidates() {
            let result = Command::new(&program)
                .arg("--headless")
                .arg("--convert-to")
                .arg("pdf")
                .arg("--outdir")
                .arg(out_dir)
                .arg(input)
                .output();

            match result {
                Ok(output) => return Ok(output),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("LibreOffice 후보 없음: {}", program.display());
                    last_error = Some((program, e));
                }
                Err(e) => {
                    return Err(DocPdfError::ServiceUnavailable {
                        program: program.display().to_string(),
                        reason: e.to_string(),
                    })
                }
            }
        }

        let (program, reason) = last_error
            .map(|(p, e)| (p.display().to_string(), e.to_string()))
            .unwrap_or_else(|| ("soffice".to_string(), "실행 파일 없음".to_string()));
        Err(DocPdfError::ServiceUnavailable { program, reason })
    }
}

impl PdfRenderer for LibreOfficeConverter {
    fn render(&self, input: &Path, output: &Path) -> Result<()> {
        let conversion_error = |reason: String| DocPdfError::PdfConversion {
            file: input.to_path_buf(),
            reason,
        };

        let out_dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        // 이전 실행의 PDF와 섞이지 않도록 매번 빈 폴더에 받은 뒤 옮깁니다.
        let staging = tempfile::Builder::new()
            .prefix(".docpdf-")
            .tempdir_in(out_dir)
            .map_err(|e| conversion_error(format!("임시 폴더 생성 실패: {}", e)))?;

        let result = self.run(input, staging.path())?;
        if !result.status.success() {
            return Err(conversion_error(format!(
                "종료 코드 {:?}: {}",
                result.status.code(),
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        // LibreOffice는 항상 `<입력 이름>.pdf`로 저장합니다.
        let stem = input
            .file_stem()
            .ok_or_else(|| DocPdfError::UnsupportedInput {
                file: input.to_path_buf(),
            })?;
        let mut produced_name = stem.to_os_string();
        produced_name.push(".pdf");
        let produced = staging.path().join(produced_name);

        // 종료 코드 0이어도 아무것도 쓰지 않는 경우가 있습니다 (열 수 없는 원본, 프로필 잠금).
        if !produced.is_file() {
            return Err(conversion_error(format!(
                "PDF가 생성되지 않았습니다: {}",
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        fs::rename(&produced, output).map_err(|e| conversion_error(e.to_string()))?;
        Ok(())
    }
}

/// `pdf-extract` 기반 텍스트 추출기
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, input: &Path) -> Result<Vec<String>> {
        let path = input.to_path_buf();

        // 손상된 PDF에서 라이브러리가 패닉할 수 있어 파일 단위로 격리합니다.
        match panic::catch_unwind(move || pdf_extract::extract_text_by_pages(&path)) {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(DocPdfError::TextExtraction {
                file: input.to_path_buf(),
                reason: e.to_string(),
            }),
            Err(_) => Err(DocPdfError::TextExtraction {
                file: input.to_path_buf(),
                reason: "추출 라이브러리 패닉".to_string(),
            }),
        }
    }
}

/// `docx-rs` 기반 DOCX 작성기
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxParagraphWriter;

impl DocumentWriter for DocxParagraphWriter {
    fn write(&self, paragraphs: &[String], output: &Path) -> Result<()> {
        let write_error = |reason: String| DocPdfError::DocumentWrite {
            file: output.to_path_buf(),
            reason,
        };

        let docx = paragraphs
            .iter()
            .fold(Docx::new(), |docx, text| docx.add_paragraph(paragraph(text)));

        let file = File::create(output).map_err(|e| write_error(e.to_string()))?;
        docx.build()
            .pack(file)
            .map_err(|e| write_error(e.to_string()))?;

        Ok(())
    }
}

/// 문단 내부 줄바꿈은 줄 나눔으로 유지
fn paragraph(text: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(xml_safe(line));
    }
    Paragraph::new().add_run(run)
}

/// XML 1.0에서 허용하지 않는 문자 제거 (PDF 추출 결과의 폼 피드 등)
fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| match c {
            '\t' | '\n' | '\r' => true,
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => false,
            _ => true,
        })
        .collect()
}
