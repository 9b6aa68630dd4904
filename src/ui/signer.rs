//! 署名ウィジェット - アップロード、モーダル、ビューアーの組み合わせ

use crate::error::SignerError;
use crate::pdf::{DocumentSource, ObjectUrl, ObjectUrlGuard, UploadedFile};
use crate::ui::modal::Modal;
use crate::ui::page_viewer::PageViewer;
use crate::ui::upload::UploadTrigger;
use crate::viewer::PdfClick;
use eframe::egui::{self, Vec2};

/// モーダルのタイトル
const MODAL_TITLE: &str = "Firmar PDF";

/// PDF署名位置の選択ウィジェット
pub struct PdfSigner {
    on_pdf_click: Box<dyn FnMut(PdfClick)>,
    upload: UploadTrigger,
    modal: Modal,
    container_frame: Option<egui::Frame>,

    /// モーダル表示中のみ存在
    viewer: Option<PageViewer>,
    object_url: Option<ObjectUrlGuard>,
    error: Option<SignerError>,

    initial_scale: f32,
    box_size: Vec2,
}

impl PdfSigner {
    /// 確定した位置を受け取るコールバックを指定して作成
    pub fn new(on_pdf_click: impl FnMut(PdfClick) + 'static) -> Self {
        Self {
            on_pdf_click: Box::new(on_pdf_click),
            upload: UploadTrigger::new(),
            modal: Modal::new("pdf_signer_modal").title(MODAL_TITLE),
            container_frame: None,
            viewer: None,
            object_url: None,
            error: None,
            initial_scale: 1.0,
            box_size: Vec2::new(100.0, 50.0),
        }
    }

    /// ボタン周りの枠
    pub fn container_frame(mut self, frame: egui::Frame) -> Self {
        self.container_frame = Some(frame);
        self
    }

    /// モーダルの枠
    pub fn modal_frame(mut self, frame: egui::Frame) -> Self {
        self.modal = self.modal.frame(frame);
        self
    }

    /// ボタンの表示内容
    pub fn trigger_content(mut self, content: impl Into<String>) -> Self {
        self.upload = self.upload.content(content);
        self
    }

    /// ビューアーの初期倍率と署名枠サイズ
    pub fn viewer_options(mut self, initial_scale: f32, box_size: Vec2) -> Self {
        self.initial_scale = initial_scale;
        self.box_size = box_size;
        self
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn error(&self) -> Option<&SignerError> {
        self.error.as_ref()
    }

    /// ファイルが選ばれた
    pub fn handle_file_change(&mut self, ctx: &egui::Context, file: Option<UploadedFile>) {
        let Some(file) = file else {
            return;
        };

        if !file.is_pdf() {
            log::warn!("PDF以外のファイルを拒否: {} ({})", file.name, file.mime);
            self.error = Some(SignerError::InvalidFileType);
            return;
        }

        let url = ObjectUrl::create(file.bytes);
        log::info!("PDFを開く: {} → {}", file.name, url);
        self.viewer = Some(PageViewer::signing(
            DocumentSource::ObjectUrl(url.clone()),
            self.initial_scale,
            self.box_size,
        ));
        // 前回の URL はここで失効する
        self.object_url = Some(ObjectUrlGuard::new(url));
        self.modal.open(ctx);
        self.error = None;
    }

    /// ビューアーで確定した位置を外部に渡してモーダルを閉じる
    fn handle_pdf_click(&mut self, ctx: &egui::Context, click: PdfClick) {
        (self.on_pdf_click)(click);
        self.close(ctx);
    }

    /// モーダルを閉じ、ドキュメントを破棄
    pub fn close(&mut self, ctx: &egui::Context) {
        self.modal.close(ctx);
        self.viewer = None;
        if let Some(guard) = self.object_url.take() {
            log::debug!("URLを失効: {}", guard.url());
        }
    }

    /// UIを描画
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let frame = self.container_frame.unwrap_or_else(egui::Frame::none);
        let picked = frame
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    // モーダル表示中はドロップを受け付けない
                    let accept_drops = !self.modal.is_open();
                    let loading = self.viewer.as_ref().is_some_and(|v| v.state().is_loading());
                    let mut upload = std::mem::take(&mut self.upload)
                        .accept_drops(accept_drops)
                        .loading(loading);
                    let picked = upload.show(ui);
                    self.upload = upload;

                    if let Some(error) = &self.error {
                        ui.colored_label(ui.visuals().error_fg_color, error.to_string());
                    }
                    picked
                })
                .inner
            })
            .inner;

        let ctx = ui.ctx().clone();
        self.handle_file_change(&ctx, picked);

        let viewer = &mut self.viewer;
        let response = self.modal.show(&ctx, |ui| {
            viewer.as_mut().map(|viewer| viewer.show(ui))
        });

        if let Some(click) = response.inner.flatten().and_then(|result| result.confirmed) {
            self.handle_pdf_click(&ctx, click);
        } else if response.close_requested {
            log::info!("署名をキャンセル");
            self.close(&ctx);
        }
    }
}
