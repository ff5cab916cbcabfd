use crate::application::ModuleReport;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Read-only report for the selected module.
pub fn render_info_panel(ui: &mut egui::Ui, report: Option<&ModuleReport>, text: &str) {
    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.heading("Component Info");
    ui.add_space(DesignSystem::SPACING_SMALL);

    let Some(report) = report else {
        ui.label(
            egui::RichText::new("Select a component in the diagram.")
                .color(DesignSystem::TEXT_MUTED),
        );
        return;
    };

    let (badge, color) = match report {
        ModuleReport::Performance { .. } => ("MEASURED", DesignSystem::SUCCESS),
        ModuleReport::Static { .. } => ("STATIC", DesignSystem::ACCENT_SECONDARY),
        ModuleReport::Unknown { .. } => ("UNKNOWN", DesignSystem::WARNING),
    };

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(report.name())
                .size(16.0)
                .strong()
                .color(DesignSystem::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(badge).size(11.0).strong().color(color));
        });
    });
    ui.add_space(DesignSystem::SPACING_SMALL);

    DesignSystem::card_frame().show(ui, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                let mut view = text;
                ui.add(
                    egui::TextEdit::multiline(&mut view)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(f32::INFINITY),
                );
            });
    });
}
