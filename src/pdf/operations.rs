//! PDF操作 - アップロード読み込み、ダウンロード保存

use crate::pdf::{data_url, mime};
use anyhow::{Context, Result};
use eframe::egui;
use std::path::Path;

/// アップロードされたファイル
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// ディスク上のファイルを読み込み、内容から MIME を判定
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("ファイルを読み込めませんでした: {}", path.display()))?;
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(Self {
            name,
            mime: mime::sniff(&bytes).to_string(),
            bytes,
        })
    }

    /// ドロップされたファイルを変換
    ///
    /// プラットフォームが MIME を渡さない場合は内容から判定する。
    pub fn from_dropped(file: &egui::DroppedFile) -> Result<Self> {
        let bytes = match (&file.bytes, &file.path) {
            (Some(bytes), _) => bytes.to_vec(),
            (None, Some(path)) => std::fs::read(path)
                .with_context(|| format!("ファイルを読み込めませんでした: {}", path.display()))?,
            (None, None) => anyhow::bail!("ドロップされたファイルに内容がありません"),
        };

        let name = match &file.path {
            Some(path) if file.name.is_empty() => path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            _ => file.name.clone(),
        };

        let mime = if file.mime.is_empty() {
            mime::sniff(&bytes).to_string()
        } else {
            file.mime.clone()
        };

        Ok(Self { name, mime, bytes })
    }

    /// MIME が PDF か
    pub fn is_pdf(&self) -> bool {
        mime::is_pdf(&self.mime)
    }
}

/// ダウンロードのユーティリティ
pub struct PdfOperations;

impl PdfOperations {
    /// ダウンロード時の既定ファイル名
    pub fn download_file_name(name: &str) -> String {
        if name.to_lowercase().ends_with(".pdf") {
            name.to_string()
        } else {
            format!("{}.pdf", name)
        }
    }

    /// data: URL の内容をファイルに保存
    pub fn save_data_url(url: &str, output_path: &Path) -> Result<()> {
        let bytes = data_url::decode(url)?;
        std::fs::write(output_path, &bytes)
            .with_context(|| format!("PDFを保存できませんでした: {}", output_path.display()))?;

        log::info!(
            "{} バイトを {} に保存",
            bytes.len(),
            output_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignerError;
    use std::sync::Arc;

    #[test]
    fn reads_and_sniffs_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let pdf_path = dir.path().join("contrato.pdf");
        std::fs::write(&pdf_path, b"%PDF-1.4\n%%EOF\n").unwrap();
        let txt_path = dir.path().join("notas.pdf");
        std::fs::write(&txt_path, b"just text").unwrap();

        let pdf = UploadedFile::from_path(&pdf_path).unwrap();
        assert_eq!(pdf.name, "contrato.pdf");
        assert!(pdf.is_pdf());

        // 拡張子ではなく内容で判定する
        let txt = UploadedFile::from_path(&txt_path).unwrap();
        assert!(!txt.is_pdf());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(UploadedFile::from_path(&dir.path().join("nope.pdf")).is_err());
    }

    #[test]
    fn dropped_file_keeps_platform_mime() {
        let file = egui::DroppedFile {
            name: "foto.png".to_string(),
            mime: "image/png".to_string(),
            bytes: Some(Arc::from(&b"%PDF-1.4"[..])),
            ..Default::default()
        };
        let uploaded = UploadedFile::from_dropped(&file).unwrap();
        assert_eq!(uploaded.mime, "image/png");
        assert!(!uploaded.is_pdf());
    }

    #[test]
    fn dropped_file_without_mime_is_sniffed() {
        let file = egui::DroppedFile {
            name: "doc.pdf".to_string(),
            bytes: Some(Arc::from(&b"%PDF-1.4\n"[..])),
            ..Default::default()
        };
        assert!(UploadedFile::from_dropped(&file).unwrap().is_pdf());
    }

    #[test]
    fn download_name_gets_pdf_extension() {
        assert_eq!(PdfOperations::download_file_name("User Manual"), "User Manual.pdf");
        assert_eq!(PdfOperations::download_file_name("a.PDF"), "a.PDF");
    }

    #[test]
    fn saves_decoded_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.pdf");
        let url = data_url::pdf_data_url("JVBERi0xLjQgc2F2ZWQ=");

        PdfOperations::save_data_url(&url, &out).unwrap();
        assert_eq!(std::fs::read(&out).unwrap(), b"%PDF-1.4 saved");
    }

    #[test]
    fn invalid_data_url_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.pdf");
        let err = PdfOperations::save_data_url("data:application/pdf;base64,@@", &out)
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<SignerError>(),
            Some(&SignerError::InvalidDataUrl)
        );
        assert!(!out.exists());
    }
}
