//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.
//! 작업 폴더는 인자로 받지 않고 항상 실행 파일이 있는 폴더를 사용합니다.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::job::Direction;

/// 실행할 변환 (화면의 두 버튼에 해당)
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Action {
    /// DOC/DOCX → PDF
    #[default]
    ToPdf,
    /// PDF → DOCX
    ToDocx,
    /// 두 변환을 동시에 시작
    Both,
}

impl Action {
    /// 이 동작이 시작하는 변환 방향 목록
    pub fn directions(self) -> Vec<Direction> {
        match self {
            Action::ToPdf => vec![Direction::DocumentToPdf],
            Action::ToDocx => vec![Direction::PdfToDocument],
            Action::Both => Direction::ALL.to_vec(),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::ToPdf => write!(f, "DOC/DOCX → PDF"),
            Action::ToDocx => write!(f, "PDF → DOCX"),
            Action::Both => write!(f, "DOC/DOCX → PDF, PDF → DOCX"),
        }
    }
}

/// docpdf CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "docpdf",
    author = "YourName <your@email.com>",
    version,
    about = "docpdf - 실행 파일이 있는 폴더의 DOC/DOCX ↔ PDF 일괄 변환 도구",
    long_about = r#"
docpdf
======

실행 파일이 있는 폴더(하위 폴더 제외)의 문서를 일괄 변환합니다.

  • to-pdf  : *.doc, *.docx → *.pdf  (LibreOffice 필요, ~$ 임시 파일 제외)
  • to-docx : *.pdf → *.docx         (텍스트만 추출, 서식/이미지 미보존)
  • both    : 두 변환을 동시에 실행

같은 이름의 출력 파일은 경고 없이 덮어씁니다.

예제:
  docpdf to-pdf
  docpdf to-docx --verbose
  docpdf both --soffice "C:\Program Files\LibreOffice\program\soffice.exe"
  docpdf to-pdf --dry-run
"#
)]
pub struct Args {
    /// 실행할 변환
    #[arg(value_enum, default_value_t = Action::ToPdf)]
    pub action: Action,

    /// LibreOffice 실행 파일 경로 (기본값: PATH의 soffice/libreoffice)
    #[arg(long)]
    pub soffice: Option<PathBuf>,

    /// 상세 진단 로그 출력
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 진행률 바 숨김
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// env_logger 기본 필터 (RUST_LOG가 있으면 그쪽이 우선)
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_action() {
        let args = Args::try_parse_from(["docpdf"]).unwrap();
        assert_eq!(args.action, Action::ToPdf);
        assert!(!args.dry_run);
        assert_eq!(args.log_filter(), "warn");
    }

    #[test]
    fn test_parse_both_with_options() {
        let args = Args::try_parse_from([
            "docpdf",
            "both",
            "--soffice",
            "/opt/libreoffice/program/soffice",
            "-v",
            "--no-progress",
        ])
        .unwrap();

        assert_eq!(args.action, Action::Both);
        assert_eq!(
            args.soffice,
            Some(PathBuf::from("/opt/libreoffice/program/soffice"))
        );
        assert!(args.verbose);
        assert!(args.no_progress);
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn test_action_directions() {
        assert_eq!(Action::ToPdf.directions(), vec![Direction::DocumentToPdf]);
        assert_eq!(Action::ToDocx.directions(), vec![Direction::PdfToDocument]);
        assert_eq!(Action::Both.directions().len(), 2);
    }

    #[test]
    fn test_rejects_directory_argument() {
        assert!(Args::try_parse_from(["docpdf", "to-pdf", "--dir", "/tmp"]).is_err());
    }
}
