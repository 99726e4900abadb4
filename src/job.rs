//! 변환 작업 데이터 모델
//!
//! 변환 방향, 작업, 후보 파일, 파일별 결과, 일괄 결과를 정의합니다.

use std::fmt;
use std::path::{Path, PathBuf};

/// 변환 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// DOC/DOCX → PDF
    DocumentToPdf,
    /// PDF → DOCX
    PdfToDocument,
}

impl Direction {
    /// 두 방향 모두
    pub const ALL: [Direction; 2] = [Direction::DocumentToPdf, Direction::PdfToDocument];

    /// 출력 파일 확장자
    pub fn output_extension(self) -> &'static str {
        match self {
            Direction::DocumentToPdf => "pdf",
            Direction::PdfToDocument => "docx",
        }
    }

    /// 입력 형식 이름 (상태 메시지용)
    pub fn source_label(self) -> &'static str {
        match self {
            Direction::DocumentToPdf => "DOC/DOCX",
            Direction::PdfToDocument => "PDF",
        }
    }

    /// 출력 형식 이름 (상태 메시지용)
    pub fn target_label(self) -> &'static str {
        match self {
            Direction::DocumentToPdf => "PDF",
            Direction::PdfToDocument => "DOCX",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source_label(), self.target_label())
    }
}

/// 한 번의 트리거로 생성되는 변환 작업
#[derive(Debug, Clone)]
pub struct ConversionJob {
    /// 검색 대상 폴더
    pub root: PathBuf,
    /// 변환 방향
    pub direction: Direction,
}

impl ConversionJob {
    pub fn new(root: impl Into<PathBuf>, direction: Direction) -> Self {
        Self {
            root: root.into(),
            direction,
        }
    }
}

/// 입력 파일 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Doc,
    Docx,
    Pdf,
}

impl SourceFormat {
    /// 확장자로 형식 추론 (대소문자 무시)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy();
        if ext.eq_ignore_ascii_case("doc") {
            Some(SourceFormat::Doc)
        } else if ext.eq_ignore_ascii_case("docx") {
            Some(SourceFormat::Docx)
        } else if ext.eq_ignore_ascii_case("pdf") {
            Some(SourceFormat::Pdf)
        } else {
            None
        }
    }

    /// 이 형식이 주어진 방향의 입력이 될 수 있는지 확인
    pub fn accepted_by(self, direction: Direction) -> bool {
        match direction {
            Direction::DocumentToPdf => matches!(self, SourceFormat::Doc | SourceFormat::Docx),
            Direction::PdfToDocument => self == SourceFormat::Pdf,
        }
    }
}

/// 스캐너가 선택한 변환 후보 파일
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub format: SourceFormat,
}

impl CandidateFile {
    pub fn new(path: PathBuf, format: SourceFormat) -> Self {
        Self { path, format }
    }

    /// 표시용 파일 이름
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// 확장자만 바꾼 출력 경로
    pub fn output_path(&self, direction: Direction) -> PathBuf {
        self.path.with_extension(direction.output_extension())
    }
}

/// 파일 하나의 변환 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// 변환 성공 (출력 경로)
    Converted(PathBuf),
    /// 변환 실패 (사유)
    Failed(String),
}

impl ConversionOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionOutcome::Converted(_))
    }
}

/// 일괄 변환 결과. 사용자에게 보여지는 유일한 값입니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub converted: usize,
    pub total: usize,
}

impl BatchResult {
    pub fn new(converted: usize, total: usize) -> Self {
        debug_assert!(converted <= total);
        Self { converted, total }
    }

    pub fn failed(&self) -> usize {
        self.total - self.converted
    }

    /// 성공률 (%)
    pub fn success_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.converted as f64 / self.total as f64 * 100.0)
    }
}
