//! PDF Signer - PDF署名位置選択アプリケーション
//!
//! 機能:
//! - PDFのアップロード (ファイル選択 / ドラッグ&ドロップ)
//! - モーダル内のページビューアー (ページ送り、ズーム)
//! - クリックで署名位置を選択し、確定/取消
//! - サンプルPDFの一覧、プレビュー、ダウンロード

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod error;
mod pdf;
mod resources;
mod ui;
mod viewer;

use anyhow::Result;
use eframe::egui;

fn main() -> Result<()> {
    // ロギング初期化
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("PDF Signer を起動中...");

    // eframe オプション設定
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 850.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_title("PDF Signer"),
        ..Default::default()
    };

    // アプリケーション起動
    eframe::run_native(
        "PDF Signer",
        options,
        Box::new(|cc| Ok(Box::new(app::PdfSignerApp::new(cc)))),
    )
    .map_err(|e| anyhow::anyhow!("アプリケーションエラー: {}", e))
}
