//! 터미널 화면 모듈
//!
//! 상태 메시지를 컬러 출력과 진행률 바로 보여주는 보고기입니다.

use colored::{ColoredString, Colorize};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::job::Direction;
use crate::reporter::{JobSummary, ProgressReporter, Severity};
use crate::stats::format_duration;

/// 터미널 보고기
///
/// 방향마다 진행률 바를 하나씩 두어 두 작업이 동시에 돌아도 섞이지 않습니다.
pub struct ConsoleReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<Direction, ProgressBar>>,
    show_progress: bool,
}

impl ConsoleReporter {
    pub fn new(show_progress: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
            show_progress,
        }
    }

    fn println(&self, line: String) {
        if self.show_progress && !self.multi.is_hidden() && self.multi.println(&line).is_ok() {
            return;
        }
        println!("{}", line);
    }

    fn bar(&self, direction: Direction, total: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let mut bars = self.bars.lock().ok()?;
        let bar = bars
            .entry(direction)
            .or_insert_with(|| self.multi.add(create_progress_bar(total)));
        Some(bar.clone())
    }

    fn finish_bar(&self, direction: Direction) {
        let bar = self
            .bars
            .lock()
            .ok()
            .and_then(|mut bars| bars.remove(&direction));
        if let Some(bar) = bar {
            bar.finish_and_clear();
            self.multi.remove(&bar);
        }
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report(&self, direction: Direction, message: &str, severity: Severity) {
        self.println(format!(
            "  {} {} {}",
            chrono::Local::now().format("[%H:%M:%S]").to_string().dimmed(),
            format!("[{}]", direction).bright_white(),
            paint(message, severity)
        ));
    }

    fn file_started(&self, direction: Direction, current: usize, total: usize, file_name: &str) {
        if let Some(bar) = self.bar(direction, total) {
            bar.set_position(current.saturating_sub(1) as u64);
            bar.set_message(format!("Converting {}/{}: {}", current, total, file_name));
        }
    }

    fn set_enabled(&self, direction: Direction, enabled: bool) {
        log::debug!(
            "{} 트리거 {}",
            direction,
            if enabled { "활성화" } else { "비활성화" }
        );
    }

    fn summary(&self, direction: Direction, summary: &JobSummary) {
        self.finish_bar(direction);
        self.println(format_summary(direction, summary));
    }
}

/// 심각도별 색상 적용
pub fn paint(message: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Info => message.normal(),
        Severity::Progress => message.bright_blue(),
        Severity::Success => message.bright_green(),
        Severity::Warning => message.yellow(),
        Severity::Error => message.bright_red(),
    }
}

/// 작업 종료 요약 박스
pub fn format_summary(direction: Direction, summary: &JobSummary) -> String {
    let result = summary.result;
    let mut lines = vec![
        String::new(),
        "═".repeat(50).bright_blue().to_string(),
        format!(" 📊 {}: {}", direction, summary.title)
            .bright_white()
            .bold()
            .to_string(),
        "═".repeat(50).bright_blue().to_string(),
        format!("  {}", paint(&summary.message, summary.severity)),
        format!("  {} 전체 파일:    {}", "📁".bright_cyan(), result.total),
        format!(
            "  {} 성공:         {}",
            "✅".bright_green(),
            result.converted.to_string().green()
        ),
    ];

    if result.failed() > 0 {
        lines.push(format!(
            "  {} 실패:         {}",
            "❌".bright_red(),
            result.failed().to_string().red()
        ));
    }

    if let Some(rate) = result.success_rate() {
        lines.push(format!("  {} 성공률:       {:.1}%", "📈".bright_white(), rate));
    }

    lines.push(format!(
        "  {} 처리 시간:    {}",
        "⏱️".bright_cyan(),
        format_duration(summary.elapsed)
    ));
    lines.push("═".repeat(50).bright_blue().to_string());
    lines.join("\n")
}

/// 진행률 바 생성
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::BatchResult;
    use std::time::Duration;

    fn summary(converted: usize, total: usize) -> JobSummary {
        JobSummary {
            title: "Success".to_string(),
            message: "done".to_string(),
            severity: Severity::Success,
            result: BatchResult::new(converted, total),
            elapsed: Duration::from_millis(250),
        }
    }

    #[test]
    fn test_format_summary_counts() {
        colored::control::set_override(false);

        let text = format_summary(Direction::DocumentToPdf, &summary(2, 3));

        assert!(text.contains("DOC/DOCX → PDF"));
        assert!(text.contains("전체 파일:    3"));
        assert!(text.contains("성공:         2"));
        assert!(text.contains("실패:         1"));
        assert!(text.contains("66.7%"));
        assert!(text.contains("250ms"));
    }

    #[test]
    fn test_format_summary_without_failures() {
        colored::control::set_override(false);

        let text = format_summary(Direction::PdfToDocument, &summary(0, 0));

        assert!(!text.contains("실패"));
        assert!(!text.contains("성공률"));
    }

    #[test]
    fn test_console_reporter_without_progress() {
        let reporter = ConsoleReporter::new(false);
        reporter.file_started(Direction::PdfToDocument, 1, 1, "a.pdf");
        reporter.summary(Direction::PdfToDocument, &summary(1, 1));
        assert!(reporter.bars.lock().unwrap().is_empty());
    }
}
