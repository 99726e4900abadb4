//! 에러 타입 정의 모듈
//!
//! docpdf에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// docpdf에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum DocPdfError {
    /// 작업 폴더가 존재하지 않음
    #[error("작업 폴더를 찾을 수 없습니다: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// 작업 폴더를 열거나 읽을 수 없음 (작업 전체 중단)
    #[error("작업 폴더에 접근할 수 없습니다 ({path}): {reason}")]
    DirectoryAccess { path: PathBuf, reason: String },

    /// 변환 방향에 맞지 않는 입력 파일
    #[error("지원하지 않는 입력 파일입니다: {file}")]
    UnsupportedInput { file: PathBuf },

    /// 외부 변환 프로그램을 실행할 수 없음
    #[error("변환 프로그램을 실행할 수 없습니다 ({program}): {reason}")]
    ServiceUnavailable { program: String, reason: String },

    /// DOC/DOCX → PDF 변환 실패
    #[error("PDF 변환 실패 ({file}): {reason}")]
    PdfConversion { file: PathBuf, reason: String },

    /// PDF 텍스트 추출 실패
    #[error("PDF 텍스트 추출 실패 ({file}): {reason}")]
    TextExtraction { file: PathBuf, reason: String },

    /// DOCX 파일 쓰기 실패
    #[error("DOCX 쓰기 실패 ({file}): {reason}")]
    DocumentWrite { file: PathBuf, reason: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },
}

/// docpdf 결과 타입 별칭
pub type Result<T> = std::result::Result<T, DocPdfError>;
