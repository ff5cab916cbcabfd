use crate::application::{InfoStore, LoadStatus, ModuleReport};
use crate::config::UiEnvConfig;
use crate::domain::topology::{ModuleId, TopologyLayout};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::info_panel::render_info_panel;
use crate::interfaces::log_panel::LogPanel;
use crate::interfaces::topology_view::render_topology;
use crossbeam_channel::Receiver;
use eframe::egui;
use tracing::debug;

/// Desktop front end: topology diagram, info panel and log tail.
pub struct VisualizerApp {
    store: InfoStore,
    layout: TopologyLayout,
    selected: Option<ModuleId>,
    report: Option<ModuleReport>,
    info_text: String,
    log_rx: Receiver<String>,
    logs: LogPanel,
    show_logs: bool,
}

impl VisualizerApp {
    pub fn new(store: InfoStore, log_rx: Receiver<String>, ui_config: &UiEnvConfig) -> Self {
        Self {
            store,
            layout: TopologyLayout::standard(),
            selected: None,
            report: None,
            info_text: String::new(),
            log_rx,
            logs: LogPanel::new(ui_config.log_capacity),
            show_logs: ui_config.show_logs,
        }
    }

    /// Looks `id` up in the info store and shows the resulting report.
    pub fn select(&mut self, id: ModuleId) {
        debug!("Selected {}", id);
        let report = self.store.describe_module(id);
        self.info_text = report.to_string();
        self.report = Some(report);
        self.selected = Some(id);
    }

    pub fn selected(&self) -> Option<ModuleId> {
        self.selected
    }

    pub fn info_text(&self) -> &str {
        &self.info_text
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Hardware Topology Visualizer");
            ui.separator();

            let summary = self.store.summary();
            let (status, color) = match &summary.status {
                LoadStatus::Loaded => (
                    format!(
                        "{} modules / {} metrics from {}",
                        summary.modules, summary.metrics, summary.location
                    ),
                    DesignSystem::SUCCESS,
                ),
                LoadStatus::Partial(_) => (
                    format!(
                        "Partial data: {} modules from {}",
                        summary.modules, summary.location
                    ),
                    DesignSystem::WARNING,
                ),
                LoadStatus::Unavailable(_) => (
                    "No performance data, showing built-in descriptions".to_string(),
                    DesignSystem::TEXT_MUTED,
                ),
            };
            ui.label(egui::RichText::new(status).small().color(color));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.checkbox(&mut self.show_logs, "Logs");
                ui.label(
                    egui::RichText::new(format!(
                        "Loaded {}",
                        summary.loaded_at.format("%H:%M:%S UTC")
                    ))
                    .small()
                    .color(DesignSystem::TEXT_MUTED),
                );
            });
        });
    }
}

impl eframe::App for VisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());

        self.logs.drain(&self.log_rx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        if self.show_logs {
            egui::TopBottomPanel::bottom("log_panel")
                .resizable(true)
                .default_height(150.0)
                .min_height(60.0)
                .show(ctx, |ui| {
                    self.logs.show(ui);
                });
        }

        egui::SidePanel::right("info_panel")
            .default_width(380.0)
            .min_width(260.0)
            .max_width(700.0)
            .resizable(true)
            .show(ctx, |ui| {
                render_info_panel(ui, self.report.as_ref(), &self.info_text);
            });

        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                let store = &self.store;
                let clicked = render_topology(ui, &self.layout, self.selected, |id| {
                    store.has_data(&id.name())
                });
                if let Some(id) = clicked {
                    self.select(id);
                }
            });
    }
}
