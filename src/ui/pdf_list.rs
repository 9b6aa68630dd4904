//! PDF一覧 - サンプルのプレビューとダウンロード

use crate::pdf::{DocumentSource, PdfOperations};
use crate::resources::SamplePdf;
use crate::ui::button::SignerButton;
use crate::ui::icons::Icon;
use crate::ui::modal::Modal;
use crate::ui::page_viewer::PageViewer;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::path::PathBuf;

/// 一覧操作の結果
#[derive(Debug, Default)]
pub struct PdfListResult {
    /// ダウンロード保存先 (成功時)
    pub downloaded: Option<PathBuf>,
    /// 失敗時のメッセージ
    pub error: Option<String>,
}

/// 一覧内の操作
enum ListAction {
    Select(usize),
    Download(usize),
}

/// プレビュー中のPDF
struct SelectedPdf {
    index: usize,
    viewer: PageViewer,
}

/// PDF一覧ウィジェット
pub struct PdfList {
    pdfs: Vec<SamplePdf>,
    modal: Modal,
    selected: Option<SelectedPdf>,
    initial_scale: f32,
}

impl PdfList {
    pub fn new(pdfs: Vec<SamplePdf>) -> Self {
        Self {
            pdfs,
            modal: Modal::new("pdf_list_modal").title("Lista de PDFs"),
            selected: None,
            initial_scale: 1.0,
        }
    }

    pub fn initial_scale(mut self, scale: f32) -> Self {
        self.initial_scale = scale;
        self
    }

    pub fn pdfs(&self) -> &[SamplePdf] {
        &self.pdfs
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    /// プレビューを開く
    fn select(&mut self, index: usize) {
        let Some(pdf) = self.pdfs.get(index) else {
            return;
        };
        log::info!("プレビュー: {}", pdf.name);
        self.selected = Some(SelectedPdf {
            index,
            viewer: PageViewer::read_only(DocumentSource::DataUrl(pdf.data_url()), self.initial_scale),
        });
    }

    /// 一覧に戻る
    fn deselect(&mut self) {
        self.selected = None;
    }

    fn close(&mut self, ctx: &egui::Context) {
        self.modal.close(ctx);
        self.selected = None;
    }

    /// 保存先を尋ねてダウンロード
    fn download(&self, index: usize) -> PdfListResult {
        let Some(pdf) = self.pdfs.get(index) else {
            return PdfListResult::default();
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_file_name(PdfOperations::download_file_name(&pdf.name))
            .save_file()
        else {
            return PdfListResult::default();
        };

        match PdfOperations::save_data_url(&pdf.data_url(), &path) {
            Ok(()) => PdfListResult {
                downloaded: Some(path),
                error: None,
            },
            Err(e) => {
                log::error!("ダウンロードエラー: {:#}", e);
                PdfListResult {
                    downloaded: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// UIを描画 - ボタンとモーダル
    pub fn show(&mut self, ui: &mut egui::Ui) -> PdfListResult {
        let mut result = PdfListResult::default();
        let ctx = ui.ctx().clone();

        if ui
            .add(
                SignerButton::new("Mostrar PDFs")
                    .left_icon(Icon::Document)
                    .right_icon(Icon::ChevronRight),
            )
            .clicked()
        {
            self.modal.open(&ctx);
        }

        let pdfs = &self.pdfs;
        let selected = &mut self.selected;
        let response = self.modal.show(&ctx, |ui| match selected {
            Some(selected) => {
                let name = pdfs.get(selected.index).map(|p| p.name.as_str()).unwrap_or_default();
                let back = show_preview(ui, name, &mut selected.viewer);
                (back, None)
            }
            None => (false, show_table(ui, pdfs)),
        });

        if let Some((back, action)) = response.inner {
            if back {
                self.deselect();
            }
            match action {
                Some(ListAction::Select(index)) => self.select(index),
                Some(ListAction::Download(index)) => result = self.download(index),
                None => {}
            }
        }
        if response.close_requested {
            self.close(&ctx);
        }

        result
    }
}

/// プレビュー表示 - 戻るボタンが押されたら true
fn show_preview(ui: &mut egui::Ui, name: &str, viewer: &mut PageViewer) -> bool {
    let mut back = false;
    ui.horizontal(|ui| {
        back = ui
            .add(SignerButton::icon(Icon::ChevronLeft))
            .on_hover_text("Volver")
            .clicked();
        ui.strong(name);
    });
    ui.separator();
    viewer.show(ui);
    back
}

/// 一覧テーブル
fn show_table(ui: &mut egui::Ui, pdfs: &[SamplePdf]) -> Option<ListAction> {
    let mut action = None;
    let icon_color = ui.visuals().weak_text_color();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto())
        .body(|mut body| {
            for (index, pdf) in pdfs.iter().enumerate() {
                body.row(40.0, |mut row| {
                    row.col(|ui| {
                        Icon::Document.show(ui, 20.0, icon_color);
                        ui.strong(&pdf.name);
                    });
                    row.col(|ui| {
                        if ui.add(SignerButton::new("Ver").left_icon(Icon::Eye)).clicked() {
                            action = Some(ListAction::Select(index));
                        }
                        if ui
                            .add(SignerButton::new("Descargar").left_icon(Icon::Download))
                            .clicked()
                        {
                            action = Some(ListAction::Download(index));
                        }
                    });
                });
            }
        });

    action
}
