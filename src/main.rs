//! docpdf - DOC/DOCX ↔ PDF 폴더 일괄 변환기
//!
//! 터미널 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

use docpdf::{
    cli::Args,
    console::ConsoleReporter,
    dispatcher::ConversionDispatcher,
    job::{CandidateFile, Direction},
    services::LibreOfficeConverter,
    workflow::{WorkflowController, WorkflowState},
};

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    // 작업 폴더 확인
    let root = docpdf::executable_dir().context("실행 파일 위치를 확인할 수 없습니다")?;

    // 헤더 출력
    print_header(&args, &root);

    let renderer = match args.soffice {
        Some(ref program) => LibreOfficeConverter::with_program(program),
        None => LibreOfficeConverter::new(),
    };
    let dispatcher = ConversionDispatcher::default().with_renderer(renderer);
    let reporter = Arc::new(ConsoleReporter::new(!args.no_progress));
    let controller = WorkflowController::new(&root, dispatcher, reporter);

    // 드라이런 모드
    if args.dry_run {
        for direction in args.action.directions() {
            let files = controller
                .preview(direction)
                .with_context(|| format!("폴더를 검색할 수 없습니다: {:?}", root))?;
            print_dry_run(direction, &files);
        }
        return Ok(());
    }

    // 방향별 백그라운드 작업 시작
    let handles: Vec<_> = args
        .action
        .directions()
        .into_iter()
        .filter_map(|direction| controller.spawn(direction))
        .collect();

    // 터미널은 작업이 끝날 때까지 기다려야 출력이 잘리지 않습니다.
    let mut failed = false;
    for handle in handles {
        match handle.join() {
            Ok(outcome) => failed |= outcome.state == WorkflowState::Failed,
            Err(_) => {
                log::error!("작업 스레드가 비정상 종료되었습니다");
                failed = true;
            }
        }
    }

    if failed {
        anyhow::bail!("변환 작업이 중단되었습니다");
    }

    println!();
    Ok(())
}

/// 헤더 출력
fn print_header(args: &Args, root: &Path) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 📄 docpdf".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());
    println!(
        "  {} Working Directory: {}",
        "📂".bright_cyan(),
        root.file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string())
    );
    println!("  {} 변환: {}", "⚙️".bright_yellow(), args.action);

    if let Some(ref soffice) = args.soffice {
        println!("  {} LibreOffice: {:?}", "🔧".bright_magenta(), soffice);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 드라이런 출력
fn print_dry_run(direction: Direction, files: &[CandidateFile]) {
    println!(
        "\n{} {}",
        "📋".bright_cyan(),
        format!("{} 처리 예정 파일 목록:", direction).bright_cyan()
    );
    for (i, file) in files.iter().enumerate() {
        println!(
            "  {}. {} → {}",
            i + 1,
            file.file_name(),
            file.output_path(direction)
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        );
    }
    println!(
        "\n{} 총 {} 개의 파일이 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        files.len().to_string().bright_green()
    );
}
