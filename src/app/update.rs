//! Main update loop, toolbar and sent-message list

use eframe::egui;
use std::time::{Duration, Instant};

use super::SpellApp;
use crate::ui;

impl eframe::App for SpellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Settings changes, checker notifications and the rehighlight timer
        if self.highlighter.poll(now) {
            ctx.request_repaint();
        }
        for notice in self.highlighter.take_notices() {
            self.push_status(notice);
        }

        // Wake up exactly when a pending rehighlight is due
        let wait = self
            .highlighter
            .repaint_after(now)
            .unwrap_or(Duration::from_millis(500));
        ctx.request_repaint_after(wait);
        ui::toasts::purge_old_status_messages(&mut self.status_messages, 4);

        let theme = self.get_theme();

        self.render_toolbar(ctx, &theme);
        self.render_input_panel(ctx, &theme);
        self.render_sent_messages(ctx, &theme);

        ui::toasts::render_status_toasts(ctx, &self.status_messages, &theme);
    }
}

impl SpellApp {
    fn render_toolbar(&mut self, ctx: &egui::Context, theme: &ui::theme::SlircTheme) {
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let mut enabled = self.settings.enable_spell_check;
                    if ui.checkbox(&mut enabled, "Spell check").changed() {
                        self.set_spell_check_enabled(enabled);
                    }

                    ui.separator();

                    let current = self.checker.current_language();
                    let mut selected = current.clone();
                    egui::ComboBox::from_label("Language")
                        .selected_text(&current)
                        .show_ui(ui, |ui| {
                            for language in &self.languages {
                                ui.selectable_value(&mut selected, language.clone(), language);
                            }
                        });
                    if selected != current {
                        self.select_language(&selected);
                    }

                    if !self.checker.is_backend_available() {
                        ui.colored_label(theme.text_muted, "(no dictionary)");
                    }
                });
            });
    }

    fn render_sent_messages(&mut self, ctx: &egui::Context, theme: &ui::theme::SlircTheme) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.surface[0]).inner_margin(egui::Margin::same(12)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if self.sent_messages.is_empty() {
                            ui.colored_label(theme.text_muted, "Messages you send appear here.");
                        }
                        for message in &self.sent_messages {
                            ui.label(egui::RichText::new(message).color(theme.text_primary));
                        }
                    });
            });
    }
}
