//! ページビューアー - ページ送り、ズーム、署名位置の選択

use crate::pdf::{DocumentSource, PdfDocument};
use crate::ui::button::SignerButton;
use crate::ui::icons::Icon;
use crate::viewer::{PdfClick, Selection, ViewState};
use eframe::egui::{self, Color32, Pos2, Rect, Sense, Stroke, TextureHandle, Vec2};

/// ビューアー操作の結果
#[derive(Default)]
pub struct ViewerResult {
    /// 確定された署名位置
    pub confirmed: Option<PdfClick>,
}

/// 描画済みテクスチャのキー (ページ, 倍率%)
type TextureKey = (usize, i32);

/// PDFビューアーの状態
pub struct PageViewer {
    id: egui::Id,
    source: DocumentSource,
    document: Option<PdfDocument>,
    state: ViewState,
    selection: Selection,
    /// false なら閲覧のみ
    signing: bool,
    box_size: Vec2,

    // ページテクスチャのキャッシュ
    page_texture: Option<TextureHandle>,
    texture_key: Option<TextureKey>,
}

impl PageViewer {
    /// 署名位置を選択するビューアー
    pub fn signing(source: DocumentSource, initial_scale: f32, box_size: Vec2) -> Self {
        Self {
            id: egui::Id::new(uuid::Uuid::new_v4()),
            source,
            document: None,
            state: ViewState::new(initial_scale),
            selection: Selection::default(),
            signing: true,
            box_size,
            page_texture: None,
            texture_key: None,
        }
    }

    /// 閲覧専用のビューアー
    pub fn read_only(source: DocumentSource, initial_scale: f32) -> Self {
        Self {
            signing: false,
            ..Self::signing(source, initial_scale, Vec2::ZERO)
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// マウス追従プレビューの中心 (選択可能かつ読み込み完了時のみ)
    fn hover_preview(&self) -> Option<Pos2> {
        if !self.signing || self.state.is_loading() {
            return None;
        }
        self.selection.hover_position()
    }

    // ----- 操作 -----

    /// ページ上のクリック (ページ左上基準の画面座標)
    pub fn click(&mut self, at: Pos2) -> bool {
        if !self.signing || self.state.is_loading() {
            return false;
        }
        self.selection.click(at)
    }

    /// 確定待ちの位置を確定
    pub fn confirm(&mut self) -> Option<PdfClick> {
        let click = self
            .selection
            .confirm(self.state.scale(), self.state.current_page())?;
        log::info!(
            "署名位置を確定: ({:.1}, {:.1}) ページ {}",
            click.x,
            click.y,
            click.page
        );
        Some(click)
    }

    pub fn cancel(&mut self) {
        self.selection.cancel();
    }

    /// 確定済みの位置を削除
    pub fn remove_signature(&mut self) {
        self.selection.remove();
    }

    pub fn previous_page(&mut self) {
        if self.state.previous_page() {
            self.selection.cancel();
        }
    }

    pub fn next_page(&mut self) {
        if self.state.next_page() {
            self.selection.cancel();
        }
    }

    fn submit_page_input(&mut self) {
        let before = self.state.current_page();
        self.state.submit_page_input();
        if self.state.current_page() != before {
            self.selection.cancel();
        }
    }

    pub fn retry(&mut self) {
        log::info!("再試行");
        self.state.retry();
        self.page_texture = None;
        self.texture_key = None;
    }

    // ----- 読み込み -----

    /// 未読み込みならドキュメントを開く
    fn ensure_document(&mut self) {
        if self.document.is_some() || self.state.error().is_some() {
            return;
        }
        match PdfDocument::open(&self.source) {
            Ok(doc) => {
                log::info!("PDFを読み込み: {} ページ", doc.page_count());
                self.state.on_document_loaded(doc.page_count());
                if self.state.error().is_none() {
                    self.document = Some(doc);
                }
            }
            Err(e) => {
                log::error!("PDFを開けません: {:#}", e);
                self.state.on_document_error();
            }
        }
    }

    /// 現在のページと倍率のテクスチャを用意
    fn ensure_page_texture(&mut self, ctx: &egui::Context) {
        let Some(doc) = &self.document else {
            return;
        };
        if self.state.error().is_some() {
            return;
        }

        let key = (
            self.state.current_page(),
            (self.state.scale() * 100.0).round() as i32,
        );
        if self.texture_key == Some(key) && self.page_texture.is_some() {
            return;
        }

        let page_index = self.state.current_page() - 1;
        match doc.render_page(page_index, self.state.scale()) {
            Ok(image) => {
                self.page_texture = Some(ctx.load_texture(
                    format!("page_{}", page_index),
                    image,
                    egui::TextureOptions::LINEAR,
                ));
                self.texture_key = Some(key);
                if let Some((w, h)) = doc.page_size(page_index) {
                    self.state.on_page_loaded(w, h);
                }
            }
            Err(e) => {
                log::error!("ページ {} を描画できません: {:#}", page_index + 1, e);
                self.page_texture = None;
                self.texture_key = None;
                self.state.on_page_error();
            }
        }
    }

    // ----- 描画 -----

    /// UIを描画
    pub fn show(&mut self, ui: &mut egui::Ui) -> ViewerResult {
        let mut result = ViewerResult::default();

        self.ensure_document();
        self.ensure_page_texture(ui.ctx());

        self.toolbar(ui);
        ui.separator();

        if let Some(error) = self.state.error().cloned() {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.colored_label(ui.visuals().error_fg_color, error.to_string());
                ui.add_space(16.0);
                if ui.add(SignerButton::new("Reintentar")).clicked() {
                    self.retry();
                }
            });
            return result;
        }

        let recenter = self.state.take_recenter();
        let mut scroll = egui::ScrollArea::both().auto_shrink([false; 2]);
        if recenter {
            if let Some(offset) = self.state.centered_scroll_offset(ui.available_size()) {
                scroll = scroll.scroll_offset(offset);
            }
        }

        scroll.show(ui, |ui| {
            ui.vertical_centered(|ui| {
                result.confirmed = self.page_area(ui);
            });
        });

        result
    }

    /// ページ送りとズームのツールバー
    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add(SignerButton::icon(Icon::ChevronLeft).disabled(!self.state.can_go_previous()))
                .on_hover_text("Página anterior")
                .clicked()
            {
                self.previous_page();
            }

            let input = ui.add(
                egui::TextEdit::singleline(self.state.page_input_mut())
                    .id(self.id.with("page_input"))
                    .desired_width(36.0),
            );
            if input.lost_focus() {
                self.submit_page_input();
            }
            ui.label(self.state.page_count_label());

            if ui
                .add(SignerButton::icon(Icon::ChevronRight).disabled(!self.state.can_go_next()))
                .on_hover_text("Página siguiente")
                .clicked()
            {
                self.next_page();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let loading = self.state.is_loading();
                if ui
                    .add(SignerButton::icon(Icon::ZoomIn).disabled(loading))
                    .on_hover_text("Aumentar zoom")
                    .clicked()
                {
                    self.state.zoom_in();
                }
                ui.label(self.state.zoom_label());
                if ui
                    .add(SignerButton::icon(Icon::ZoomOut).disabled(loading))
                    .on_hover_text("Reducir zoom")
                    .clicked()
                {
                    self.state.zoom_out();
                }
            });
        });
    }

    /// ページ画像と選択オーバーレイ
    fn page_area(&mut self, ui: &mut egui::Ui) -> Option<PdfClick> {
        let Some(texture) = self.page_texture.clone() else {
            let color = ui.visuals().weak_text_color();
            ui.add_space(48.0);
            Icon::Loader.show(ui, 32.0, color);
            return None;
        };

        let size = texture.size_vec2();
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());
        ui.painter().image(
            texture.id(),
            rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        if self.state.is_loading() {
            ui.painter()
                .rect_filled(rect, 0.0, Color32::from_white_alpha(200));
            Icon::Loader.paint(
                ui.painter(),
                Rect::from_center_size(rect.center(), Vec2::splat(32.0)),
                Color32::GRAY,
                ui.input(|i| i.time) as f32,
            );
            ui.ctx().request_repaint();
        }

        if !self.signing {
            return None;
        }

        // マウス追従プレビュー
        self.selection
            .hover(response.hover_pos().map(|p| (p - rect.min).to_pos2()));
        if let Some(at) = self.hover_preview() {
            let preview = Rect::from_center_size(rect.min + at.to_vec2(), self.box_size);
            draw_signature_box(ui.painter(), preview, Color32::from_rgb(59, 130, 246), 40);
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.click((pos - rect.min).to_pos2());
            }
        }

        let mut confirmed = None;

        if let Some(at) = self.selection.pending() {
            let anchor = rect.min + at.to_vec2();
            draw_signature_box(
                ui.painter(),
                Rect::from_center_size(anchor, self.box_size),
                Color32::from_rgb(59, 130, 246),
                80,
            );

            egui::Area::new(self.id.with("pending_controls"))
                .order(egui::Order::Tooltip)
                .fixed_pos(anchor + egui::vec2(-self.box_size.x / 2.0, self.box_size.y / 2.0 + 4.0))
                .show(ui.ctx(), |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            if ui.add(SignerButton::new("Confirmar")).clicked() {
                                confirmed = self.confirm();
                            }
                            if ui.add(SignerButton::new("Cancelar")).clicked() {
                                self.cancel();
                            }
                        });
                    });
                });
        }

        if let Some(placed) = self.selection.confirmed() {
            if placed.page == self.state.current_page() {
                let center = rect.min + egui::vec2(placed.x, placed.y) * self.state.scale();
                let placed_rect = Rect::from_center_size(center, self.box_size);
                draw_signature_box(ui.painter(), placed_rect, Color32::from_rgb(22, 163, 74), 60);

                egui::Area::new(self.id.with("placed_controls"))
                    .order(egui::Order::Tooltip)
                    .fixed_pos(placed_rect.left_bottom() + egui::vec2(0.0, 4.0))
                    .show(ui.ctx(), |ui| {
                        if ui.add(SignerButton::new("Quitar").left_icon(Icon::Close)).clicked() {
                            self.remove_signature();
                        }
                    });
            }
        }

        confirmed
    }
}

/// 署名枠を描画
fn draw_signature_box(painter: &egui::Painter, rect: Rect, color: Color32, fill_alpha: u8) {
    let fill = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), fill_alpha);
    painter.rect_filled(rect, 2.0, fill);
    painter.rect_stroke(rect, 2.0, Stroke::new(2.0, color));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::ObjectUrl;
    use eframe::egui::pos2;

    fn viewer() -> (PageViewer, ObjectUrl) {
        let url = ObjectUrl::create(b"%PDF-1.4".to_vec());
        let viewer = PageViewer::signing(
            DocumentSource::ObjectUrl(url.clone()),
            1.0,
            Vec2::new(100.0, 50.0),
        );
        (viewer, url)
    }

    fn loaded(pages: usize) -> (PageViewer, ObjectUrl) {
        let (mut viewer, url) = viewer();
        viewer.state_mut().on_document_loaded(pages);
        viewer.state_mut().on_page_loaded(612.0, 792.0);
        (viewer, url)
    }

    #[test]
    fn clicks_ignored_while_loading() {
        let (mut viewer, url) = viewer();
        assert!(!viewer.click(pos2(10.0, 10.0)));
        assert!(viewer.selection.pending().is_none());
        url.revoke();
    }

    #[test]
    fn confirm_uses_current_scale_and_page() {
        let (mut viewer, url) = loaded(3);
        viewer.next_page();
        viewer.state_mut().on_page_loaded(612.0, 792.0);
        viewer.state_mut().zoom_in();
        viewer.state_mut().zoom_in();

        assert!(viewer.click(pos2(240.0, 120.0)));
        let click = viewer.confirm().unwrap();
        assert_eq!(click.page, 2);
        assert!((click.x - 200.0).abs() < 1e-3);
        assert!((click.y - 100.0).abs() < 1e-3);
        url.revoke();
    }

    #[test]
    fn page_change_drops_pending_point() {
        let (mut viewer, url) = loaded(2);
        viewer.click(pos2(5.0, 5.0));
        viewer.next_page();
        assert!(viewer.selection.pending().is_none());
        assert!(viewer.selection.is_armed());
        url.revoke();
    }

    #[test]
    fn hover_preview_hidden_while_loading() {
        let (mut viewer, url) = loaded(2);
        viewer.selection.hover(Some(pos2(30.0, 40.0)));
        assert_eq!(viewer.hover_preview(), Some(pos2(30.0, 40.0)));

        viewer.next_page();
        assert!(viewer.state().is_loading());
        assert_eq!(viewer.hover_preview(), None);

        viewer.state_mut().on_page_loaded(612.0, 792.0);
        assert_eq!(viewer.hover_preview(), Some(pos2(30.0, 40.0)));
        url.revoke();
    }

    fn run_frame(ctx: &egui::Context, viewer: &mut PageViewer, input: egui::RawInput) {
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                viewer.show(ui);
            });
        });
    }

    #[test]
    fn enter_in_page_input_jumps_to_page() {
        let ctx = egui::Context::default();
        let (mut viewer, url) = loaded(3);
        let input_id = viewer.id.with("page_input");

        ctx.memory_mut(|m| m.request_focus(input_id));
        run_frame(&ctx, &mut viewer, egui::RawInput::default());
        assert!(ctx.memory(|m| m.has_focus(input_id)));

        *viewer.state_mut().page_input_mut() = "2".to_string();
        let enter = egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::Enter,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        };
        run_frame(&ctx, &mut viewer, enter);

        assert!(!ctx.memory(|m| m.has_focus(input_id)));
        assert_eq!(viewer.state().current_page(), 2);
        url.revoke();
    }

    #[test]
    fn read_only_viewer_never_selects() {
        let url = ObjectUrl::create(b"%PDF-1.4".to_vec());
        let mut viewer = PageViewer::read_only(DocumentSource::ObjectUrl(url.clone()), 1.0);
        viewer.state_mut().on_document_loaded(1);
        assert!(!viewer.click(pos2(5.0, 5.0)));
        assert!(viewer.confirm().is_none());
        url.revoke();
    }

    #[test]
    fn unreadable_source_shows_document_error_and_retry() {
        let (mut viewer, url) = viewer();
        url.revoke();

        viewer.ensure_document();
        assert_eq!(
            viewer.state().error(),
            Some(&crate::error::SignerError::DocumentLoad)
        );

        viewer.retry();
        assert!(viewer.state().error().is_none());
        assert!(viewer.state().is_loading());
    }
}
