//! 작업 흐름 제어 모듈
//!
//! 트리거 하나당 검색 → 파일별 변환 → 보고 → 마무리를 백그라운드 스레드에서 실행합니다.
//! 방향별 작업 임대(lease)를 잡고 시작하며, 어떤 종료 상태에서든 임대가 풀리면서
//! 트리거 버튼이 다시 활성화됩니다.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::dispatcher::ConversionDispatcher;
use crate::error::Result;
use crate::job::{BatchResult, CandidateFile, ConversionJob, ConversionOutcome, Direction};
use crate::reporter::{JobSummary, ProgressReporter, Severity};
use crate::scanner;
use crate::stats::Statistics;

/// 작업 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Scanning,
    Converting,
    /// 정상 종료 (일부 파일 실패 포함)
    Done,
    /// 폴더 자체에 접근하지 못해 중단
    Failed,
}

/// 종료된 작업의 결과
#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub direction: Direction,
    pub state: WorkflowState,
    pub result: BatchResult,
    pub summary: JobSummary,
}

type BusyFlags = [AtomicBool; 2];

fn slot(direction: Direction) -> usize {
    match direction {
        Direction::DocumentToPdf => 0,
        Direction::PdfToDocument => 1,
    }
}

/// 방향별 배타적 작업 임대
///
/// 잡는 순간 트리거가 비활성화되고, 드롭될 때(패닉으로 풀리는 경우 포함) 다시 활성화됩니다.
pub struct JobLease {
    direction: Direction,
    busy: Arc<BusyFlags>,
    reporter: Arc<dyn ProgressReporter>,
}

impl JobLease {
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Drop for JobLease {
    fn drop(&mut self) {
        self.busy[slot(self.direction)].store(false, Ordering::Release);
        self.reporter.set_enabled(self.direction, true);
        log::debug!("{} 작업 임대 해제", self.direction);
    }
}

/// 변환 작업 흐름 제어기
///
/// 복제본은 같은 임대 상태와 보고 경로를 공유합니다.
#[derive(Clone)]
pub struct WorkflowController {
    root: PathBuf,
    dispatcher: Arc<ConversionDispatcher>,
    reporter: Arc<dyn ProgressReporter>,
    busy: Arc<BusyFlags>,
}

impl WorkflowController {
    /// 새 제어기 생성
    ///
    /// # Arguments
    /// * `root` - 검색할 작업 폴더
    /// * `dispatcher` - 파일 변환기
    /// * `reporter` - 화면 계층 보고 경로
    pub fn new(
        root: impl Into<PathBuf>,
        dispatcher: ConversionDispatcher,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            root: root.into(),
            dispatcher: Arc::new(dispatcher),
            reporter,
            busy: Arc::new([AtomicBool::new(false), AtomicBool::new(false)]),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 해당 방향 작업이 진행 중인지 확인
    pub fn is_busy(&self, direction: Direction) -> bool {
        self.busy[slot(direction)].load(Ordering::Acquire)
    }

    /// 방향별 임대 획득. 이미 진행 중이면 `None`입니다.
    pub fn try_acquire(&self, direction: Direction) -> Option<JobLease> {
        self.busy[slot(direction)]
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.reporter.set_enabled(direction, false);
        Some(JobLease {
            direction,
            busy: Arc::clone(&self.busy),
            reporter: Arc::clone(&self.reporter),
        })
    }

    /// 변환 없이 후보 목록만 확인
    pub fn preview(&self, direction: Direction) -> Result<Vec<CandidateFile>> {
        scanner::scan(&self.root, direction)
    }

    /// 백그라운드 스레드에서 작업 시작
    ///
    /// 같은 방향 작업이 진행 중이면 아무것도 하지 않고 `None`을 반환합니다.
    /// 반환된 핸들은 기다리지 않고 버려도 됩니다.
    pub fn spawn(&self, direction: Direction) -> Option<JoinHandle<JobOutcome>> {
        let lease = match self.try_acquire(direction) {
            Some(lease) => lease,
            None => {
                log::warn!("{} 작업이 이미 진행 중입니다", direction);
                return None;
            }
        };

        let controller = self.clone();
        let job = ConversionJob::new(self.root.clone(), direction);
        let spawned = thread::Builder::new()
            .name(format!("docpdf-{}", direction.output_extension()))
            .spawn(move || controller.run_with_lease(job, lease));

        match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                // 클로저와 함께 임대도 드롭되어 버튼이 다시 활성화됩니다.
                log::error!("작업 스레드를 시작할 수 없습니다: {}", e);
                self.reporter
                    .report(direction, "Conversion failed", Severity::Error);
                None
            }
        }
    }

    /// 현재 스레드에서 작업 실행
    pub fn run(&self, direction: Direction) -> Option<JobOutcome> {
        let lease = self.try_acquire(direction)?;
        let job = ConversionJob::new(self.root.clone(), direction);
        Some(self.run_with_lease(job, lease))
    }

    fn run_with_lease(&self, job: ConversionJob, lease: JobLease) -> JobOutcome {
        let direction = job.direction;
        let outcome = self.execute(&job);

        log::info!(
            "{} 작업 종료: {:?}, {}/{} 변환",
            direction,
            outcome.state,
            outcome.result.converted,
            outcome.result.total
        );
        // 요약 창이 뜰 때 트리거는 이미 활성화되어 있어야 합니다.
        debug_assert_eq!(lease.direction(), direction);
        drop(lease);
        self.reporter.summary(direction, &outcome.summary);
        outcome
    }

    fn execute(&self, job: &ConversionJob) -> JobOutcome {
        let direction = job.direction;
        enter(direction, WorkflowState::Scanning);
        self.reporter.report(
            direction,
            &format!("Converting {} to {}...", direction.source_label(), direction.target_label()),
            Severity::Progress,
        );

        let candidates = match scanner::scan(&job.root, direction) {
            Ok(candidates) => candidates,
            Err(e) => {
                let stats = Statistics::new(0);
                enter(direction, WorkflowState::Failed);
                log::error!("{} 작업 중단: {}", direction, e);
                self.reporter
                    .report(direction, "Conversion failed", Severity::Error);
                return JobOutcome {
                    direction,
                    state: WorkflowState::Failed,
                    result: stats.result(),
                    summary: JobSummary {
                        title: "Error".to_string(),
                        message: format!("Conversion failed: {}", e),
                        severity: Severity::Error,
                        result: stats.result(),
                        elapsed: stats.elapsed(),
                    },
                };
            }
        };

        let stats = Statistics::new(candidates.len());
        if candidates.is_empty() {
            self.reporter.report(
                direction,
                &format!("No {} files found", direction.source_label()),
                Severity::Info,
            );
            return JobOutcome {
                direction,
                state: WorkflowState::Done,
                result: stats.result(),
                summary: JobSummary {
                    title: "Info".to_string(),
                    message: no_files_message(direction),
                    severity: Severity::Info,
                    result: stats.result(),
                    elapsed: stats.elapsed(),
                },
            };
        }

        enter(direction, WorkflowState::Converting);
        let total = candidates.len();

        for (index, file) in candidates.iter().enumerate() {
            self.reporter
                .file_started(direction, index + 1, total, &file.file_name());

            match self.dispatcher.convert(file, direction) {
                ConversionOutcome::Converted(_) => {
                    let converted = stats.increment_success();
                    self.reporter.report(
                        direction,
                        &format!("Converted {}/{} files...", converted, total),
                        Severity::Progress,
                    );
                }
                ConversionOutcome::Failed(reason) => {
                    stats.increment_error();
                    log::warn!("건너뜀 {}: {}", file.path.display(), reason);
                }
            }
        }

        let state = enter(direction, WorkflowState::Done);

        let result = stats.result();
        self.reporter.report(
            direction,
            &format!("Conversion complete! {} files converted", result.converted),
            Severity::Success,
        );

        JobOutcome {
            direction,
            state,
            result,
            summary: completion_summary(direction, result, &stats),
        }
    }
}

fn enter(direction: Direction, state: WorkflowState) -> WorkflowState {
    log::debug!("{} 상태: {:?}", direction, state);
    state
}

fn no_files_message(direction: Direction) -> String {
    match direction {
        Direction::DocumentToPdf => {
            "No DOC or DOCX files found in the current directory.".to_string()
        }
        Direction::PdfToDocument => "No PDF files found in the current directory.".to_string(),
    }
}

fn completion_summary(direction: Direction, result: BatchResult, stats: &Statistics) -> JobSummary {
    let failed = stats.get_error_count();
    let (title, message, severity) = if failed == 0 {
        (
            "Success",
            format!(
                "Successfully converted {} files to {}!",
                result.converted,
                direction.target_label()
            ),
            Severity::Success,
        )
    } else {
        (
            "Completed with errors",
            format!(
                "Converted {}/{} files to {} ({} failed).",
                result.converted,
                result.total,
                direction.target_label(),
                failed
            ),
            Severity::Warning,
        )
    };

    JobSummary {
        title: title.to_string(),
        message,
        severity,
        result,
        elapsed: stats.elapsed(),
    }
}
