//! モーダルダイアログ - 背景、Escで閉じる、フォーカス復元

use crate::ui::button::SignerButton;
use crate::ui::icons::Icon;
use eframe::egui::{self, Color32, Id, Order, Rect, Sense};

/// 背景の暗幕
const BACKDROP: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);
/// 画面端からの余白
const SCREEN_MARGIN: f32 = 16.0;

/// show() の結果
pub struct ModalResponse<R> {
    /// 中身の戻り値 (閉じている場合は None)
    pub inner: Option<R>,
    /// Esc、背景クリック、閉じるボタンのいずれかが押された
    pub close_requested: bool,
}

/// モーダルの状態
pub struct Modal {
    id: Id,
    title: Option<String>,
    frame: Option<egui::Frame>,
    open: bool,
    /// 開く前にフォーカスしていたウィジェット
    previous_focus: Option<Id>,
    /// 開いた直後、ダイアログ内にフォーカスを移す
    focus_on_open: bool,
}

impl Modal {
    pub fn new(id_source: impl std::hash::Hash) -> Self {
        Self {
            id: Id::new(id_source),
            title: None,
            frame: None,
            open: false,
            previous_focus: None,
            focus_on_open: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// ダイアログ枠のスタイルを上書き
    pub fn frame(mut self, frame: egui::Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 開く - 現在のフォーカスを記憶
    pub fn open(&mut self, ctx: &egui::Context) {
        if self.open {
            return;
        }
        self.previous_focus = ctx.memory(|m| m.focused());
        self.open = true;
        self.focus_on_open = true;
        log::debug!("モーダルを開く: {:?}", self.title);
    }

    /// 閉じる - 記憶したフォーカスを戻す
    pub fn close(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }
        self.open = false;
        self.focus_on_open = false;
        match self.previous_focus.take() {
            Some(id) => ctx.memory_mut(|m| m.request_focus(id)),
            None => ctx.memory_mut(|m| m.stop_text_input()),
        }
        log::debug!("モーダルを閉じる: {:?}", self.title);
    }

    /// 描画 - 閉じる要求は呼び出し側が close() で処理する
    pub fn show<R>(
        &mut self,
        ctx: &egui::Context,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> ModalResponse<R> {
        let screen = ctx.screen_rect();
        // 描画先がまだ無い間は何も出さない
        if !self.open || !screen.is_positive() {
            return ModalResponse {
                inner: None,
                close_requested: false,
            };
        }

        let mut close_requested = ctx.input(|i| i.key_pressed(egui::Key::Escape));

        // 背景 - 下のパネルへの入力を遮る
        let backdrop = egui::Area::new(self.id.with("backdrop"))
            .order(Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let response = ui.allocate_rect(screen, Sense::click());
                ui.painter().rect_filled(screen, 0.0, BACKDROP);
                response
            });
        if backdrop.inner.clicked() {
            close_requested = true;
        }

        let dialog_rect = Rect::from_min_max(
            screen.min + egui::vec2(SCREEN_MARGIN, screen.height() * 0.05),
            screen.max - egui::vec2(SCREEN_MARGIN, screen.height() * 0.05),
        );
        let frame = self
            .frame
            .unwrap_or_else(|| egui::Frame::window(&ctx.style()).inner_margin(24.0));
        let title = self.title.clone();
        let focus_on_open = std::mem::take(&mut self.focus_on_open);

        let dialog = egui::Area::new(self.id.with("dialog"))
            .order(Order::Foreground)
            .fixed_pos(dialog_rect.min)
            .show(ctx, |ui| {
                frame.show(ui, |ui| {
                    let inner_size =
                        dialog_rect.size() - frame.inner_margin.sum() - frame.outer_margin.sum();
                    ui.set_min_size(inner_size);
                    ui.set_max_size(inner_size);

                    let mut close_clicked = false;
                    ui.horizontal(|ui| {
                        if let Some(title) = &title {
                            ui.heading(title);
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let close = ui.add(SignerButton::icon(Icon::Close));
                            if focus_on_open {
                                close.request_focus();
                            }
                            close_clicked = close.clicked();
                        });
                    });
                    ui.add_space(8.0);

                    let inner = add_contents(ui);
                    (inner, close_clicked)
                })
                .inner
            });

        let (inner, close_clicked) = dialog.inner;
        ModalResponse {
            inner: Some(inner),
            close_requested: close_requested || close_clicked,
        }
    }
}
