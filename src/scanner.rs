//! 폴더 검색 모듈
//!
//! 작업 폴더 바로 아래(비재귀)에서 변환 후보 파일을 수집합니다.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{DocPdfError, Result};
use crate::job::{CandidateFile, Direction, SourceFormat};
use crate::pattern::PatternMatcher;

/// 실행 파일이 있는 폴더 (작업 폴더)
pub fn executable_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("실행 파일의 상위 폴더가 없습니다: {}", exe.display()),
        )
    })
}

/// 변환 후보 파일 수집
///
/// # Arguments
/// * `root` - 검색할 폴더
/// * `direction` - 변환 방향
///
/// # Returns
/// 파일 시스템 열거 순서의 후보 목록. 일치하는 파일이 없으면 빈 목록입니다.
/// 폴더 자체를 열거할 수 없을 때만 에러를 반환합니다.
pub fn scan(root: &Path, direction: Direction) -> Result<Vec<CandidateFile>> {
    if !root.exists() {
        return Err(DocPdfError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    if !root.is_dir() {
        return Err(DocPdfError::DirectoryAccess {
            path: root.to_path_buf(),
            reason: "폴더가 아닙니다".to_string(),
        });
    }

    let matcher = PatternMatcher::for_direction(direction);
    let mut candidates = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| DocPdfError::DirectoryAccess {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        // UTF-8이 아닌 이름도 확장자와 `~$` 접두사는 그대로 남습니다.
        let matched = path
            .file_name()
            .map(|s| matcher.matches(&s.to_string_lossy()))
            .unwrap_or(false);
        if !matched {
            continue;
        }

        if let Some(format) = SourceFormat::from_path(path).filter(|f| f.accepted_by(direction)) {
            candidates.push(CandidateFile::new(path.to_path_buf(), format));
        }
    }

    log::debug!(
        "{} 후보 {}개 발견: {}",
        direction,
        candidates.len(),
        root.display()
    );

    Ok(candidates)
}
