//! 汎用ボタン - アイコン、無効化、読み込み中表示

use crate::ui::icons::{icon_rect, Icon};
use eframe::egui::{self, Response, Sense, TextStyle, Vec2, Widget};

/// アイコン付きボタン
pub struct SignerButton {
    text: String,
    left_icon: Option<Icon>,
    right_icon: Option<Icon>,
    disabled: bool,
    loading: bool,
}

impl SignerButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            left_icon: None,
            right_icon: None,
            disabled: false,
            loading: false,
        }
    }

    /// テキストなしのアイコンボタン
    pub fn icon(icon: Icon) -> Self {
        Self::new("").left_icon(icon)
    }

    pub fn left_icon(mut self, icon: Icon) -> Self {
        self.left_icon = Some(icon);
        self
    }

    pub fn right_icon(mut self, icon: Icon) -> Self {
        self.right_icon = Some(icon);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// 読み込み中はスピナーを表示し、クリックを受け付けない
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub(crate) fn is_enabled(&self) -> bool {
        !self.disabled && !self.loading
    }

    /// 左側に描くアイコン (読み込み中はローダー)
    fn leading_icon(&self) -> Option<Icon> {
        if self.loading {
            Some(Icon::Loader)
        } else {
            self.left_icon
        }
    }

    /// 右側のアイコン (読み込み中は非表示)
    fn trailing_icon(&self) -> Option<Icon> {
        if self.loading {
            None
        } else {
            self.right_icon
        }
    }
}

impl Widget for SignerButton {
    fn ui(self, ui: &mut egui::Ui) -> Response {
        let enabled = self.is_enabled() && ui.is_enabled();
        let padding = ui.spacing().button_padding;
        let gap = ui.spacing().item_spacing.x;
        let font_id = TextStyle::Button.resolve(ui.style());
        let icon_size = font_id.size + 2.0;

        let text_color = ui.visuals().text_color();
        let galley = ui
            .painter()
            .layout_no_wrap(self.text.clone(), font_id, text_color);

        let leading = self.leading_icon();
        let trailing = self.trailing_icon();

        let mut content = Vec2::new(0.0, galley.size().y.max(icon_size));
        let mut parts = 0;
        if leading.is_some() {
            content.x += icon_size;
            parts += 1;
        }
        if !self.text.is_empty() {
            content.x += galley.size().x;
            parts += 1;
        }
        if trailing.is_some() {
            content.x += icon_size;
            parts += 1;
        }
        if parts > 1 {
            content.x += gap * (parts - 1) as f32;
        }

        let desired = content + padding * 2.0;
        let sense = if enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(desired, sense);

        if ui.is_rect_visible(rect) {
            let visuals = if enabled {
                ui.style().interact(&response)
            } else {
                &ui.visuals().widgets.noninteractive
            };
            let fill = visuals.weak_bg_fill;
            let fg = if enabled {
                visuals.fg_stroke.color
            } else {
                visuals.fg_stroke.color.gamma_multiply(0.5)
            };

            ui.painter().rect(rect, visuals.rounding, fill, visuals.bg_stroke);

            let mut x = rect.min.x + padding.x;
            let center_y = rect.center().y;
            let time = ui.input(|i| i.time) as f32;

            if let Some(icon) = leading {
                let r = icon_rect(egui::pos2(x + icon_size / 2.0, center_y), icon_size);
                icon.paint(ui.painter(), r, fg, time);
                x += icon_size + gap;
                if icon == Icon::Loader {
                    ui.ctx().request_repaint();
                }
            }
            if !self.text.is_empty() {
                let pos = egui::pos2(x, center_y - galley.size().y / 2.0);
                x += galley.size().x + gap;
                ui.painter().galley(pos, galley, fg);
            }
            if let Some(icon) = trailing {
                let r = icon_rect(egui::pos2(x + icon_size / 2.0, center_y), icon_size);
                icon.paint(ui.painter(), r, fg, time);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_disables_and_swaps_icons() {
        let button = SignerButton::new("Guardar")
            .left_icon(Icon::Download)
            .right_icon(Icon::ChevronRight)
            .loading(true);
        assert!(!button.is_enabled());
        assert_eq!(button.leading_icon(), Some(Icon::Loader));
        assert_eq!(button.trailing_icon(), None);
    }

    #[test]
    fn disabled_flag_blocks_clicks() {
        let button = SignerButton::new("Ver").disabled(true);
        assert!(!button.is_enabled());
        assert!(SignerButton::new("Ver").is_enabled());
    }

    #[test]
    fn disabled_button_does_not_report_clicks() {
        let ctx = egui::Context::default();
        let mut clicked = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                clicked = ui.add(SignerButton::icon(Icon::Close).disabled(true)).clicked();
            });
        });
        assert!(!clicked);
    }
}
