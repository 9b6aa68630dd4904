//! アプリケーションの状態管理

use crate::config::SignerConfig;
use crate::resources;
use crate::ui::{PdfList, PdfSigner};
use crate::viewer::PdfClick;
use chrono::{DateTime, Local};
use eframe::egui::{self, Color32, Stroke, Vec2};
use egui_extras::{Column, TableBuilder};
use std::cell::RefCell;
use std::rc::Rc;

/// 受け取った署名位置
#[derive(Debug, Clone)]
pub struct PlacedSignature {
    pub click: PdfClick,
    pub placed_at: DateTime<Local>,
}

/// アプリケーション全体の状態
pub struct PdfSignerApp {
    config: SignerConfig,
    signer: PdfSigner,
    pdf_list: PdfList,

    /// コールバックから追加される
    placements: Rc<RefCell<Vec<PlacedSignature>>>,

    // ステータスメッセージ
    status_message: String,
}

impl PdfSignerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = SignerConfig::load(cc.storage);
        cc.egui_ctx.set_visuals(if config.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        Self::with_config(config)
    }

    pub fn with_config(config: SignerConfig) -> Self {
        let placements = Rc::new(RefCell::new(Vec::new()));
        let signer = build_signer(&config, Rc::clone(&placements));
        let pdf_list = PdfList::new(resources::catalog_or_builtin(config.samples_path.as_deref()))
            .initial_scale(config.initial_scale);

        log::info!("{} 件のサンプルPDF", pdf_list.pdfs().len());

        Self {
            config,
            signer,
            pdf_list,
            placements,
            status_message: "Listo".to_string(),
        }
    }

    /// 表示モードを切り替え
    fn set_dark_mode(&mut self, ctx: &egui::Context, dark: bool) {
        self.config.dark_mode = dark;
        ctx.set_visuals(if dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        // モーダルの枠も作り直す (開いている間は次回に持ち越し)
        if !self.signer.is_open() {
            self.signer = build_signer(&self.config, Rc::clone(&self.placements));
        }
    }

    /// 受信した署名位置の一覧 (モーダル表示中はスクロールしない)
    fn placements_table(&self, ui: &mut egui::Ui, scroll_locked: bool) {
        let placements = self.placements.borrow();
        if placements.is_empty() {
            ui.weak("Aún no se ha seleccionado ninguna posición de firma.");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .vscroll(!scroll_locked)
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(80.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["Página", "X", "Y", "Hora"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for placed in placements.iter().rev() {
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            ui.label(placed.click.page.to_string());
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.1}", placed.click.x));
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.1}", placed.click.y));
                        });
                        row.col(|ui| {
                            ui.label(placed.placed_at.format("%H:%M:%S").to_string());
                        });
                    });
                }
            });
    }
}

/// 表示モードに合わせたモーダル枠
fn modal_frame(dark_mode: bool) -> egui::Frame {
    let (fill, border) = if dark_mode {
        (Color32::from_gray(32), Color32::from_gray(70))
    } else {
        (Color32::from_gray(250), Color32::from_gray(200))
    };
    egui::Frame::none()
        .fill(fill)
        .stroke(Stroke::new(1.0, border))
        .rounding(8.0)
        .inner_margin(24.0)
}

/// コールバック付きの署名ウィジェットを作成
fn build_signer(config: &SignerConfig, placements: Rc<RefCell<Vec<PlacedSignature>>>) -> PdfSigner {
    let [w, h] = config.signature_box;
    let signer = PdfSigner::new(move |click| {
        log::info!("署名位置を受信: {:?}", click);
        placements.borrow_mut().push(PlacedSignature {
            click,
            placed_at: Local::now(),
        });
    })
    .container_frame(egui::Frame::none().inner_margin(4.0))
    .modal_frame(modal_frame(config.dark_mode))
    .viewer_options(config.initial_scale, Vec2::new(w, h));

    match &config.trigger_label {
        Some(label) => signer.trigger_content(label.clone()),
        None => signer,
    }
}

impl eframe::App for PdfSignerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // メニューバー
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Archivo", |ui| {
                    if ui.button("🗑 Borrar posiciones").clicked() {
                        self.placements.borrow_mut().clear();
                        self.status_message = "Posiciones borradas".to_string();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("❌ Salir").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Ver", |ui| {
                    if ui.button("🌙 Modo oscuro").clicked() {
                        self.set_dark_mode(ctx, true);
                        ui.close_menu();
                    }
                    if ui.button("☀ Modo claro").clicked() {
                        self.set_dark_mode(ctx, false);
                        ui.close_menu();
                    }
                });
            });
        });

        // ステータスバー
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} posiciones", self.placements.borrow().len()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("PDF Signer");
            ui.add_space(12.0);

            let before = self.placements.borrow().len();
            let had_error = self.signer.error().is_some();
            ui.horizontal(|ui| {
                self.signer.show(ui);
                if let (false, Some(error)) = (had_error, self.signer.error()) {
                    self.status_message = error.to_string();
                }

                let list = self.pdf_list.show(ui);
                if let Some(path) = list.downloaded {
                    self.status_message = format!("Descargado: {}", path.display());
                }
                if let Some(error) = list.error {
                    self.status_message = error;
                }
            });

            if let Some(latest) = self.placements.borrow().last() {
                if self.placements.borrow().len() > before {
                    self.status_message = format!(
                        "Firma en página {} ({:.1}, {:.1})",
                        latest.click.page, latest.click.x, latest.click.y
                    );
                }
            }

            ui.add_space(16.0);
            ui.separator();
            let scroll_locked = self.signer.is_open() || self.pdf_list.is_open();
            self.placements_table(ui, scroll_locked);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.config.save(storage);
    }
}
