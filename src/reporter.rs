//! 진행 상황 보고 모듈
//!
//! 백그라운드 작업 스레드에서 화면 계층으로 상태 메시지를 전달합니다.
//! 화면 계층이 자기 스레드로 옮기는 책임을 지며, 메시지는 보낸 순서대로 도착합니다.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::time::Duration;

use crate::job::{BatchResult, Direction};

/// 상태 메시지 분류 (표시 색상 선택용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Progress,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// 상태 표시 색상 이름
    pub fn color_name(self) -> &'static str {
        match self {
            Severity::Info => "black",
            Severity::Progress => "blue",
            Severity::Success => "green",
            Severity::Warning => "orange",
            Severity::Error => "red",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Info => "INFO",
            Severity::Progress => "PROGRESS",
            Severity::Success => "SUCCESS",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// 작업 종료 요약 (대화 상자로 표시)
#[derive(Debug, Clone, PartialEq)]
pub struct JobSummary {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub result: BatchResult,
    pub elapsed: Duration,
}

/// 화면 계층으로 가는 보고 경로
///
/// 작업 스레드에서 호출되므로 `Send + Sync`여야 합니다.
pub trait ProgressReporter: Send + Sync {
    /// 상태 표시줄 갱신
    fn report(&self, direction: Direction, message: &str, severity: Severity);

    /// 파일 하나의 변환을 시작하기 직전 호출 (`current`는 1부터)
    fn file_started(&self, _direction: Direction, _current: usize, _total: usize, _file_name: &str) {}

    /// 트리거 버튼 활성/비활성
    fn set_enabled(&self, direction: Direction, enabled: bool);

    /// 작업 종료 요약
    fn summary(&self, direction: Direction, summary: &JobSummary);
}

/// 채널로 전달되는 화면 갱신 이벤트
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEvent {
    Status {
        direction: Direction,
        message: String,
        severity: Severity,
    },
    FileStarted {
        direction: Direction,
        current: usize,
        total: usize,
        file_name: String,
    },
    ControlEnabled {
        direction: Direction,
        enabled: bool,
    },
    Summary {
        direction: Direction,
        summary: JobSummary,
    },
}

/// 이벤트를 채널로 보내는 보고기
///
/// 화면 스레드는 `Receiver`에서 이벤트를 꺼내 자기 위젯에 반영합니다.
pub struct ChannelReporter {
    sender: Mutex<Sender<StatusEvent>>,
    notify: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ChannelReporter {
    /// 보고기와 수신 채널 생성
    pub fn new() -> (Self, Receiver<StatusEvent>) {
        let (sender, receiver) = mpsc::channel();
        let reporter = Self {
            sender: Mutex::new(sender),
            notify: None,
        };
        (reporter, receiver)
    }

    /// 이벤트마다 호출할 알림 (예: 화면 다시 그리기 요청)
    pub fn with_notify(mut self, notify: impl Fn() + Send + Sync + 'static) -> Self {
        self.notify = Some(Box::new(notify));
        self
    }

    fn send(&self, event: StatusEvent) {
        let sent = match self.sender.lock() {
            Ok(sender) => sender.send(event).is_ok(),
            Err(_) => false,
        };
        if !sent {
            log::debug!("화면 채널이 닫혀 상태 이벤트를 버립니다");
            return;
        }
        if let Some(ref notify) = self.notify {
            notify();
        }
    }
}

impl ProgressReporter for ChannelReporter {
    fn report(&self, direction: Direction, message: &str, severity: Severity) {
        log::trace!("{} [{}] {}", direction, severity, message);
        self.send(StatusEvent::Status {
            direction,
            message: message.to_string(),
            severity,
        });
    }

    fn file_started(&self, direction: Direction, current: usize, total: usize, file_name: &str) {
        self.send(StatusEvent::FileStarted {
            direction,
            current,
            total,
            file_name: file_name.to_string(),
        });
    }

    fn set_enabled(&self, direction: Direction, enabled: bool) {
        self.send(StatusEvent::ControlEnabled { direction, enabled });
    }

    fn summary(&self, direction: Direction, summary: &JobSummary) {
        self.send(StatusEvent::Summary {
            direction,
            summary: summary.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_reporter_preserves_order() {
        let (reporter, receiver) = ChannelReporter::new();

        reporter.set_enabled(Direction::PdfToDocument, false);
        reporter.report(Direction::PdfToDocument, "first", Severity::Progress);
        reporter.file_started(Direction::PdfToDocument, 1, 2, "a.pdf");
        reporter.report(Direction::PdfToDocument, "second", Severity::Success);

        let events: Vec<StatusEvent> = receiver.try_iter().collect();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            StatusEvent::ControlEnabled {
                direction: Direction::PdfToDocument,
                enabled: false
            }
        );
        assert!(matches!(&events[1], StatusEvent::Status { message, .. } if message == "first"));
        assert!(matches!(&events[2], StatusEvent::FileStarted { current: 1, total: 2, .. }));
        assert!(matches!(&events[3], StatusEvent::Status { message, .. } if message == "second"));
    }

    #[test]
    fn test_channel_reporter_notify() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let (reporter, _receiver) = ChannelReporter::new();
        let reporter = reporter.with_notify(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        reporter.report(Direction::DocumentToPdf, "x", Severity::Info);
        reporter.set_enabled(Direction::DocumentToPdf, true);

        assert_eq!(count.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (reporter, receiver) = ChannelReporter::new();
        drop(receiver);
        reporter.report(Direction::DocumentToPdf, "nobody listens", Severity::Error);
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Progress.color_name(), "blue");
        assert_eq!(Severity::Success.color_name(), "green");
        assert_eq!(Severity::Warning.color_name(), "orange");
        assert_eq!(Severity::Error.color_name(), "red");
    }
}
