//! 파일 변환 모듈
//!
//! 후보 파일 하나를 알맞은 외부 서비스로 변환하고, 실패를 파일 단위로 격리합니다.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::error::{DocPdfError, Result};
use crate::job::{CandidateFile, ConversionOutcome, Direction};
use crate::services::{
    DocumentWriter, DocxParagraphWriter, LibreOfficeConverter, PdfRenderer, PdfTextExtractor,
    TextExtractor,
};

/// 페이지 사이와 문단 사이 구분자 (빈 줄)
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// 외부 서비스 묶음과 파일 단위 변환
pub struct ConversionDispatcher {
    renderer: Box<dyn PdfRenderer>,
    extractor: Box<dyn TextExtractor>,
    writer: Box<dyn DocumentWriter>,
}

impl Default for ConversionDispatcher {
    fn default() -> Self {
        Self::new(
            LibreOfficeConverter::new(),
            PdfTextExtractor,
            DocxParagraphWriter,
        )
    }
}

impl ConversionDispatcher {
    /// 서비스 지정 생성
    pub fn new(
        renderer: impl PdfRenderer + 'static,
        extractor: impl TextExtractor + 'static,
        writer: impl DocumentWriter + 'static,
    ) -> Self {
        Self {
            renderer: Box::new(renderer),
            extractor: Box::new(extractor),
            writer: Box::new(writer),
        }
    }

    /// PDF 렌더러 교체
    pub fn with_renderer(mut self, renderer: impl PdfRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// 텍스트 추출기 교체
    pub fn with_extractor(mut self, extractor: impl TextExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// DOCX 작성기 교체
    pub fn with_writer(mut self, writer: impl DocumentWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// 단일 파일 변환
    ///
    /// 출력 경로에 파일이 이미 있으면 경고 없이 덮어씁니다.
    /// 어떤 실패도 호출자에게 전파하지 않고 `ConversionOutcome::Failed`로 반환합니다.
    pub fn convert(&self, file: &CandidateFile, direction: Direction) -> ConversionOutcome {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.convert_internal(file, direction)
        }))
        .unwrap_or_else(|_| {
            Err(DocPdfError::PdfConversion {
                file: file.path.clone(),
                reason: "변환 중 패닉 발생".to_string(),
            })
        });

        match result {
            Ok(output) => {
                log::info!("변환 완료: {} → {}", file.path.display(), output.display());
                ConversionOutcome::Converted(output)
            }
            Err(e) => {
                log::error!("Error converting {}: {}", file.path.display(), e);
                ConversionOutcome::Failed(e.to_string())
            }
        }
    }

    fn convert_internal(&self, file: &CandidateFile, direction: Direction) -> Result<PathBuf> {
        if !file.format.accepted_by(direction) {
            return Err(DocPdfError::UnsupportedInput {
                file: file.path.clone(),
            });
        }

        let output = file.output_path(direction);
        match direction {
            Direction::DocumentToPdf => self.renderer.render(&file.path, &output)?,
            Direction::PdfToDocument => self.pdf_to_docx(&file.path, &output)?,
        }
        Ok(output)
    }

    fn pdf_to_docx(&self, input: &Path, output: &Path) -> Result<()> {
        let pages = self.extractor.extract_pages(input)?;
        let paragraphs = pages_to_paragraphs(&pages);
        log::debug!(
            "{}: {}쪽, 문단 {}개",
            input.display(),
            pages.len(),
            paragraphs.len()
        );
        self.writer.write(&paragraphs, output)
    }
}

/// 페이지 텍스트를 문단 목록으로 재구성
///
/// 각 페이지 뒤에 빈 줄을 붙여 이어 붙인 다음, 빈 줄 기준으로 나누고
/// 앞뒤 공백을 제거하며 빈 문단은 버립니다. 레이아웃, 이미지, 표, 서식은 보존하지 않습니다.
///
/// # Examples
/// ```
/// use docpdf::dispatcher::pages_to_paragraphs;
///
/// let pages = vec!["Hello\n\nWorld".to_string()];
/// assert_eq!(pages_to_paragraphs(&pages), vec!["Hello", "World"]);
/// ```
pub fn pages_to_paragraphs(pages: &[String]) -> Vec<String> {
    let mut text = String::new();
    for page in pages {
        text.push_str(page);
        text.push_str(PARAGRAPH_SEPARATOR);
    }

    text.split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
