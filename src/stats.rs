//! 통계 및 유틸리티 모듈
//!
//! 작업별 변환 통계 수집 및 포맷팅을 담당합니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::job::BatchResult;

/// 작업 하나의 처리 통계
///
/// 작업마다 새로 만들며 다른 작업과 공유하지 않습니다.
#[derive(Debug, Default)]
pub struct Statistics {
    /// 총 후보 파일 수 (검색 시점에 고정)
    pub total_files: usize,
    /// 성공 처리 수
    pub success_count: AtomicUsize,
    /// 에러 발생 수
    pub error_count: AtomicUsize,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 성공 카운트 증가. 증가 후 값을 반환합니다.
    pub fn increment_success(&self) -> usize {
        self.success_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// 에러 카운트 증가
    pub fn increment_error(&self) {
        self.error_count.fetch_add(1, Ordering::Relaxed);
    }

    /// 성공 수 반환
    pub fn get_success_count(&self) -> usize {
        self.success_count.load(Ordering::Relaxed)
    }

    /// 에러 수 반환
    pub fn get_error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 사용자에게 보여줄 일괄 결과
    pub fn result(&self) -> BatchResult {
        BatchResult::new(
            self.get_success_count().min(self.total_files),
            self.total_files,
        )
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}시간 {}분", hours, mins)
    } else if secs >= 60 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        format!("{}분 {}초", mins, remaining_secs)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(5)), "5.000초");
        assert_eq!(format_duration(Duration::from_secs(65)), "1분 5초");
        assert_eq!(format_duration(Duration::from_secs(3665)), "1시간 1분");
    }

    #[test]
    fn test_statistics_counters() {
        let stats = Statistics::new(3);

        assert_eq!(stats.increment_success(), 1);
        assert_eq!(stats.increment_success(), 2);
        stats.increment_error();

        assert_eq!(stats.get_success_count(), 2);
        assert_eq!(stats.get_error_count(), 1);
        assert_eq!(stats.result(), BatchResult::new(2, 3));
    }

    #[test]
    fn test_empty_statistics() {
        let stats = Statistics::new(0);
        assert_eq!(stats.result(), BatchResult::default());
    }
}
