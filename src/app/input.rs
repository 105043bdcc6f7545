//! Message input panel with spell-check underlines and suggestions

use eframe::egui;

use crate::app::SpellApp;
use crate::ui::theme::SlircTheme;

impl SpellApp {
    /// Render the input panel at the bottom of the window
    pub(in crate::app) fn render_input_panel(&mut self, ctx: &egui::Context, theme: &SlircTheme) {
        egui::TopBottomPanel::bottom("input_panel")
            .frame(
                egui::Frame::new()
                    .fill(theme.surface[1])
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .stroke(egui::Stroke::new(1.0, theme.border_medium)),
            )
            .show(ctx, |ui| {
                let input_frame = egui::Frame::new()
                    .fill(theme.surface[2])
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(10, 8));

                input_frame.show(ui, |ui| {
                    let font_id = egui::FontId::proportional(14.0);
                    let color = theme.text_primary;
                    let highlighter = &mut self.highlighter;
                    let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
                        let base = egui::TextFormat::simple(font_id.clone(), color);
                        let job = highlighter.layout_job(text, base, wrap_width);
                        ui.fonts(|fonts| fonts.layout_job(job))
                    };

                    let output = egui::TextEdit::multiline(&mut self.message_input)
                        .desired_rows(1)
                        .desired_width(ui.available_width() - 4.0)
                        .frame(false)
                        .hint_text("Type a message... (Enter to send)")
                        .layouter(&mut layouter)
                        .show(ui);

                    // Remember which misspelled word the context menu is about
                    if output.response.secondary_clicked() {
                        self.context_word = output
                            .response
                            .interact_pointer_pos()
                            .and_then(|pos| {
                                let cursor = output.galley.cursor_from_pos(pos - output.galley_pos);
                                let offset =
                                    char_to_byte(&self.message_input, cursor.ccursor.index);
                                self.highlighter.misspelling_at(&self.message_input, offset)
                            });
                    }

                    output.response.context_menu(|ui| self.render_suggestion_menu(ui));

                    let enter_detected = output.response.has_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter) && !i.modifiers.shift);
                    if enter_detected {
                        // The multiline edit already inserted the newline
                        let trimmed = self.message_input.trim_end_matches(['\r', '\n']).len();
                        self.message_input.truncate(trimmed);
                        self.send_message();
                        output.response.request_focus();
                    }
                });
            });
    }

    fn render_suggestion_menu(&mut self, ui: &mut egui::Ui) {
        let Some(misspelling) = self.context_word.clone() else {
            ui.label("No spelling issues here");
            return;
        };

        let suggestions = self.checker.suggestions(&misspelling.word);
        if suggestions.is_empty() {
            ui.weak("No suggestions");
        }
        for suggestion in suggestions {
            if ui.button(&suggestion).clicked() {
                self.apply_suggestion(&misspelling, &suggestion);
                self.context_word = None;
                ui.close_menu();
            }
        }

        ui.separator();
        if ui.button(format!("Add \"{}\" to dictionary", misspelling.word)).clicked() {
            self.add_to_dictionary(&misspelling.word);
            self.context_word = None;
            ui.close_menu();
        }
    }
}

/// Byte offset of the `char_index`-th character, clamped to the text length
fn char_to_byte(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_byte() {
        assert_eq!(char_to_byte("hello", 2), 2);
        assert_eq!(char_to_byte("héllo", 2), 3);
        assert_eq!(char_to_byte("abc", 10), 3);
    }
}
