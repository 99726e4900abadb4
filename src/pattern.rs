//! 패턴 매칭 모듈
//!
//! glob 패턴을 사용한 파일 이름 필터링을 담당합니다.

use glob::{MatchOptions, Pattern};

use crate::error::{DocPdfError, Result};
use crate::job::Direction;

/// 편집기 잠금/임시 파일 접두사. 변경 불가 규칙입니다.
pub const LOCK_FILE_PREFIX: &str = "~$";

/// 확장자 비교는 대소문자를 무시합니다.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// 컴파일된 포함/제외 패턴 매처
#[derive(Debug, Default)]
pub struct PatternMatcher {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PatternMatcher {
    /// 새 패턴 매처 생성
    ///
    /// # Arguments
    /// * `include` - 포함 글로브 패턴 목록 (비어 있으면 모든 파일 매칭)
    /// * `exclude` - 제외 글로브 패턴 목록
    ///
    /// # Examples
    /// ```
    /// use docpdf::pattern::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::new(&["*.pdf"], &[]).unwrap();
    /// assert!(matcher.matches("report.PDF"));
    /// assert!(!matcher.matches("report.docx"));
    /// ```
    pub fn new(include: &[&str], exclude: &[&str]) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// 변환 방향별 기본 매처
    pub fn for_direction(direction: Direction) -> Self {
        let lock_files = format!("{}*", LOCK_FILE_PREFIX);
        let (include, exclude): (&[&str], Vec<&str>) = match direction {
            Direction::DocumentToPdf => (&["*.doc", "*.docx"], vec![lock_files.as_str()]),
            Direction::PdfToDocument => (&["*.pdf"], Vec::new()),
        };
        // 고정 패턴이므로 컴파일 실패는 발생하지 않습니다.
        Self::new(include, &exclude).unwrap_or_default()
    }

    /// 파일 이름이 포함 패턴 중 하나와 일치하고 제외 패턴과는 일치하지 않는지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        let included = self.include.is_empty()
            || self
                .include
                .iter()
                .any(|p| p.matches_with(file_name, MATCH_OPTIONS));
        included && !self.is_excluded(file_name)
    }

    /// 제외 패턴과 일치하는지 확인
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude
            .iter()
            .any(|p| p.matches_with(file_name, MATCH_OPTIONS))
    }
}

fn compile(patterns: &[&str]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|_| DocPdfError::InvalidPattern {
                pattern: p.to_string(),
            })
        })
        .collect()
}
