//! PDF ドキュメント管理

use crate::pdf::{data_url, ObjectUrl};
use anyhow::{anyhow, Context, Result};
use eframe::egui;
use pdfium_render::prelude::*;
use std::sync::Arc;

/// PDFiumライブラリを取得
fn get_pdfium() -> Result<Pdfium> {
    // 実行ファイルと同じディレクトリからPDFiumを読み込み
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .context("PDFiumライブラリを読み込めませんでした")?;
    Ok(Pdfium::new(bindings))
}

/// ドキュメントの取得元
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// アップロードされたファイル
    ObjectUrl(ObjectUrl),
    /// Base64 埋め込みデータ
    DataUrl(String),
}

impl DocumentSource {
    /// バイト列を取得
    pub fn load(&self) -> Result<Arc<[u8]>> {
        match self {
            DocumentSource::ObjectUrl(url) => url
                .resolve()
                .ok_or_else(|| anyhow!("オブジェクトURLは失効しています: {}", url)),
            DocumentSource::DataUrl(url) => {
                let bytes = data_url::decode(url).context("data: URLを解釈できませんでした")?;
                Ok(bytes.into())
            }
        }
    }
}

/// PDFドキュメントのラッパー
#[derive(Clone)]
pub struct PdfDocument {
    bytes: Arc<[u8]>,
    page_count: usize,
    page_sizes: Vec<(f32, f32)>,
}

impl PdfDocument {
    /// メモリ上のPDFを開く
    pub fn from_bytes(bytes: Arc<[u8]>) -> Result<Self> {
        let pdfium = get_pdfium()?;

        let document = pdfium
            .load_pdf_from_byte_slice(&bytes, None)
            .context("PDFを開けませんでした")?;

        // 各ページのサイズを取得 (ポイント単位)
        let page_sizes: Vec<(f32, f32)> = document
            .pages()
            .iter()
            .map(|page| (page.width().value, page.height().value))
            .collect();
        drop(document);

        Ok(Self {
            page_count: page_sizes.len(),
            page_sizes,
            bytes,
        })
    }

    /// 取得元からPDFを開く
    pub fn open(source: &DocumentSource) -> Result<Self> {
        Self::from_bytes(source.load()?)
    }

    /// ページ数を取得
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// ページサイズを取得 (ポイント単位, 0-indexed)
    pub fn page_size(&self, page_index: usize) -> Option<(f32, f32)> {
        self.page_sizes.get(page_index).copied()
    }

    /// ページを指定倍率でレンダリング (1pt = 1px at scale 1.0)
    pub fn render_page(&self, page_index: usize, scale: f32) -> Result<egui::ColorImage> {
        let (page_width, page_height) = self
            .page_size(page_index)
            .ok_or_else(|| anyhow!("ページ {} は存在しません", page_index + 1))?;

        let pdfium = get_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .context("PDFを開けませんでした")?;

        let index = u16::try_from(page_index).context("ページ番号が大きすぎます")?;
        let page = document
            .pages()
            .get(index)
            .with_context(|| format!("ページ {} を取得できませんでした", page_index + 1))?;

        let render_width = ((page_width * scale).round() as i32).max(1);
        let render_height = ((page_height * scale).round() as i32).max(1);

        // ページをレンダリング
        let render_config = PdfRenderConfig::new()
            .set_target_width(render_width)
            .set_target_height(render_height)
            .render_form_data(true)
            .render_annotations(false);

        let bitmap = page
            .render_with_config(&render_config)
            .with_context(|| format!("ページ {} を描画できませんでした", page_index + 1))?;

        // egui::ColorImage に変換
        let rgba = bitmap.as_image().to_rgba8();
        let (img_width, img_height) = rgba.dimensions();

        Ok(egui::ColorImage::from_rgba_unmultiplied(
            [img_width as usize, img_height as usize],
            rgba.as_raw(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_object_url_fails_to_load() {
        let url = ObjectUrl::create(b"%PDF-1.4".to_vec());
        let source = DocumentSource::ObjectUrl(url.clone());
        assert_eq!(&*source.load().unwrap(), b"%PDF-1.4");

        url.revoke();
        assert!(source.load().is_err());
    }

    #[test]
    fn data_url_source_decodes_payload() {
        let source = DocumentSource::DataUrl(data_url::pdf_data_url("JVBERi0xLjU="));
        assert_eq!(&*source.load().unwrap(), b"%PDF-1.5");

        let broken = DocumentSource::DataUrl(data_url::pdf_data_url("base64EncodedPdfData3"));
        assert!(broken.load().is_err());
    }
}
