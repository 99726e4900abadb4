#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! docpdf 데스크톱 화면
//!
//! 버튼 두 개, 상태 표시줄, 진행률 바, 로그 창, 작업 종료 요약 창으로 구성됩니다.
//! 작업 스레드의 이벤트는 채널로 받아 화면 스레드에서만 위젯에 반영합니다.

use anyhow::{Context, Result};
use eframe::egui;
use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use docpdf::{
    ChannelReporter, ConversionDispatcher, Direction, JobSummary, Severity, StatusEvent,
    WorkflowController,
};

const DOC_TO_PDF_COLOR: egui::Color32 = egui::Color32::from_rgb(0x4C, 0xAF, 0x50);
const PDF_TO_DOCX_COLOR: egui::Color32 = egui::Color32::from_rgb(0x21, 0x96, 0xF3);

struct DocPdfApp {
    controller: WorkflowController,
    events: Receiver<StatusEvent>,
    dir_name: String,
    status: (String, Severity),
    enabled: HashMap<Direction, bool>,
    progress: HashMap<Direction, (usize, usize, String)>,
    log: Vec<String>,
    summaries: Vec<(Direction, JobSummary)>,
}

impl DocPdfApp {
    fn new(cc: &eframe::CreationContext<'_>, root: &Path) -> Self {
        let ctx = cc.egui_ctx.clone();
        let (reporter, events) = ChannelReporter::new();
        let reporter = reporter.with_notify(move || ctx.request_repaint());

        let controller =
            WorkflowController::new(root, ConversionDispatcher::default(), Arc::new(reporter));

        Self {
            controller,
            events,
            dir_name: root
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.display().to_string()),
            status: ("Ready".to_string(), Severity::Success),
            enabled: Direction::ALL.iter().map(|d| (*d, true)).collect(),
            progress: HashMap::new(),
            log: Vec::new(),
            summaries: Vec::new(),
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                StatusEvent::Status {
                    message, severity, ..
                } => {
                    self.log.push(format!(
                        "[{}] {}",
                        chrono::Local::now().format("%H:%M:%S"),
                        message
                    ));
                    self.status = (message, severity);
                }
                StatusEvent::FileStarted {
                    direction,
                    current,
                    total,
                    file_name,
                } => {
                    self.progress.insert(direction, (current, total, file_name));
                }
                StatusEvent::ControlEnabled { direction, enabled } => {
                    self.enabled.insert(direction, enabled);
                }
                StatusEvent::Summary { direction, summary } => {
                    self.progress.remove(&direction);
                    self.summaries.push((direction, summary));
                }
            }
        }
    }

    fn trigger_button(&mut self, ui: &mut egui::Ui, direction: Direction, fill: egui::Color32) {
        let enabled = self.enabled.get(&direction).copied().unwrap_or(true);
        let label = egui::RichText::new(format!("Convert {}", direction))
            .color(egui::Color32::WHITE)
            .strong();
        let button = egui::Button::new(label)
            .fill(fill)
            .min_size(egui::vec2(200.0, 56.0));

        if ui.add_enabled(enabled, button).clicked() && self.controller.spawn(direction).is_none()
        {
            log::warn!("{} 작업이 이미 진행 중입니다", direction);
        }
    }

    fn show_summary_window(&mut self, ctx: &egui::Context) {
        let mut close = false;
        if let Some((direction, summary)) = self.summaries.first() {
            egui::Window::new(summary.title.clone())
                .id(egui::Id::new(("summary", *direction)))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    let color = severity_color(ui, summary.severity);
                    ui.colored_label(color, &summary.message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
        }
        if close {
            self.summaries.remove(0);
        }
    }
}

impl eframe::App for DocPdfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("docpdf");
                ui.label(format!("Working Directory: {}", self.dir_name));
            });
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                self.trigger_button(ui, Direction::DocumentToPdf, DOC_TO_PDF_COLOR);
                self.trigger_button(ui, Direction::PdfToDocument, PDF_TO_DOCX_COLOR);
            });
            ui.add_space(8.0);

            for direction in Direction::ALL {
                if let Some((current, total, file_name)) = self.progress.get(&direction) {
                    let fraction = *current as f32 / (*total).max(1) as f32;
                    ui.add(
                        egui::ProgressBar::new(fraction)
                            .text(format!("Converting {}/{}: {}", current, total, file_name)),
                    );
                }
            }

            ui.vertical_centered(|ui| {
                let color = severity_color(ui, self.status.1);
                ui.colored_label(color, &self.status.0);
            });
            ui.add_space(8.0);

            egui::ScrollArea::vertical()
                .max_height(100.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.log {
                        ui.monospace(line);
                    }
                });
        });

        self.show_summary_window(ctx);
    }
}

fn severity_color(ui: &egui::Ui, severity: Severity) -> egui::Color32 {
    match severity.color_name() {
        "blue" => PDF_TO_DOCX_COLOR,
        "green" => DOC_TO_PDF_COLOR,
        "orange" => egui::Color32::from_rgb(0xFF, 0x98, 0x00),
        "red" => egui::Color32::from_rgb(0xF4, 0x43, 0x36),
        _ => ui.visuals().text_color(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let root = docpdf::executable_dir().context("실행 파일 위치를 확인할 수 없습니다")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([500.0, 400.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "docpdf",
        options,
        Box::new(move |cc| Ok(Box::new(DocPdfApp::new(cc, &root)))),
    )
    .map_err(|e| anyhow::anyhow!("화면을 시작할 수 없습니다: {}", e))
}
