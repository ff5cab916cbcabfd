use crate::interfaces::design_system::DesignSystem;
use crossbeam_channel::Receiver;
use eframe::egui;
use std::collections::VecDeque;

/// Bounded tail of the tracing output, fed through the log channel.
pub struct LogPanel {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogPanel {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(1024)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Moves every pending message from the channel into the panel.
    pub fn drain(&mut self, rx: &Receiver<String>) {
        while let Ok(msg) = rx.try_recv() {
            self.push(msg);
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new("LOGS")
                .size(11.0)
                .strong()
                .color(DesignSystem::TEXT_SECONDARY),
        );
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.lines {
                    let color = if line.contains("ERROR") {
                        DesignSystem::DANGER
                    } else if line.contains("WARN") {
                        DesignSystem::WARNING
                    } else {
                        DesignSystem::TEXT_SECONDARY
                    };
                    ui.label(egui::RichText::new(line).monospace().size(12.0).color(color));
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_lines_are_dropped() {
        let mut panel = LogPanel::new(2);
        panel.push("one".into());
        panel.push("two".into());
        panel.push("three".into());
        assert_eq!(panel.lines().collect::<Vec<_>>(), vec!["two", "three"]);
    }

    #[test]
    fn test_drain_reads_channel() {
        let (tx, rx) = crossbeam_channel::unbounded();
        tx.send("INFO loaded".to_string()).unwrap();
        tx.send(" WARN missing".to_string()).unwrap();
        let mut panel = LogPanel::new(10);
        panel.drain(&rx);
        assert_eq!(panel.lines().count(), 2);
    }
}
