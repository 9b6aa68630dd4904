//! アップロードボタン - ファイル選択ダイアログとドロップ受付

use crate::pdf::UploadedFile;
use crate::ui::button::SignerButton;
use crate::ui::icons::Icon;
use eframe::egui;

/// 既定のボタン表示
const DEFAULT_LABEL: &str = "Firmar PDF";

/// ファイル選択のトリガー
pub struct UploadTrigger {
    /// ボタンの表示内容 (None なら既定のアイコン+ラベル)
    content: Option<String>,
    accept_drops: bool,
    /// ドキュメント読み込み中
    loading: bool,
}

impl Default for UploadTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadTrigger {
    pub fn new() -> Self {
        Self {
            content: None,
            accept_drops: true,
            loading: false,
        }
    }

    /// ボタンの表示内容を差し替える
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// ウィンドウへのドロップを受け付けるか
    pub fn accept_drops(mut self, accept: bool) -> Self {
        self.accept_drops = accept;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn button(&self) -> SignerButton {
        let button = match &self.content {
            Some(content) => SignerButton::new(content.clone()),
            None => SignerButton::new(DEFAULT_LABEL).left_icon(Icon::Upload),
        };
        button.loading(self.loading)
    }

    /// UIを描画 - 選択/ドロップされたファイルを返す
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<UploadedFile> {
        let mut picked = None;

        if ui.add(self.button()).clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("PDF", &["pdf"])
                .pick_file()
            {
                picked = read_upload(|| UploadedFile::from_path(&path));
            }
        }

        if self.accept_drops && picked.is_none() {
            let dropped = ui.ctx().input(|i| i.raw.dropped_files.first().cloned());
            if let Some(file) = dropped {
                picked = read_upload(|| UploadedFile::from_dropped(&file));
            }
        }

        picked
    }
}

/// 読み込みエラーはログに残して無視する
fn read_upload(read: impl FnOnce() -> anyhow::Result<UploadedFile>) -> Option<UploadedFile> {
    match read() {
        Ok(file) => {
            log::info!("ファイルを選択: {} ({})", file.name, file.mime);
            Some(file)
        }
        Err(e) => {
            log::error!("ファイルを読み込めません: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn default_button_uses_upload_icon() {
        let trigger = UploadTrigger::new();
        assert!(trigger.content.is_none());
        assert!(trigger.accept_drops);
    }

    #[test]
    fn loading_trigger_ignores_clicks() {
        let trigger = UploadTrigger::new().loading(true);
        assert!(!trigger.button().is_enabled());
        assert!(UploadTrigger::new().button().is_enabled());
    }

    #[test]
    fn dropped_file_is_picked_up() {
        let ctx = egui::Context::default();
        let mut trigger = UploadTrigger::new();
        let input = egui::RawInput {
            dropped_files: vec![egui::DroppedFile {
                name: "firmado.pdf".to_string(),
                bytes: Some(Arc::from(&b"%PDF-1.4\n"[..])),
                ..Default::default()
            }],
            ..Default::default()
        };

        let mut picked = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                picked = trigger.show(ui);
            });
        });

        let file = picked.unwrap();
        assert_eq!(file.name, "firmado.pdf");
        assert!(file.is_pdf());
    }

    #[test]
    fn drops_ignored_when_disabled() {
        let ctx = egui::Context::default();
        let mut trigger = UploadTrigger::new().content("Subir").accept_drops(false);
        let input = egui::RawInput {
            dropped_files: vec![egui::DroppedFile {
                name: "x.pdf".to_string(),
                bytes: Some(Arc::from(&b"%PDF-1.4\n"[..])),
                ..Default::default()
            }],
            ..Default::default()
        };

        let mut picked = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                picked = trigger.show(ui);
            });
        });
        assert!(picked.is_none());
    }
}
