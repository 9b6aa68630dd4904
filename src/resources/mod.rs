//! リソース管理モジュール - サンプルPDF一覧

use crate::pdf::data_url;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 埋め込みサンプル一覧
const SAMPLES_JSON: &str = include_str!("../../assets/samples.json");

/// 埋め込みサンプルPDF
pub static SAMPLE_PDFS: Lazy<Vec<SamplePdf>> = Lazy::new(|| {
    parse_catalog(SAMPLES_JSON).unwrap_or_else(|e| {
        log::error!("埋め込みサンプルを読み込めません: {:#}", e);
        Vec::new()
    })
});

/// 一覧に表示するPDF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePdf {
    pub id: u32,
    pub name: String,
    /// Base64 エンコードされた PDF
    pub data: String,
}

impl SamplePdf {
    /// プレビュー/ダウンロード用の data: URL
    pub fn data_url(&self) -> String {
        data_url::pdf_data_url(&self.data)
    }
}

/// JSON 文字列から一覧を読み込む
pub fn parse_catalog(json: &str) -> Result<Vec<SamplePdf>> {
    serde_json::from_str(json).context("サンプル一覧のJSONが不正です")
}

/// ファイルから一覧を読み込む
pub fn load_catalog(path: &Path) -> Result<Vec<SamplePdf>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("サンプル一覧を読み込めません: {}", path.display()))?;
    let catalog = parse_catalog(&json)?;
    log::info!("{} 件のサンプルを読み込み: {}", catalog.len(), path.display());
    Ok(catalog)
}

/// 設定に応じた一覧 - ファイル指定がなければ埋め込みを使う
pub fn catalog_or_builtin(path: Option<&Path>) -> Vec<SamplePdf> {
    match path {
        Some(path) => load_catalog(path).unwrap_or_else(|e| {
            log::error!("{:#}", e);
            SAMPLE_PDFS.clone()
        }),
        None => SAMPLE_PDFS.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::mime;

    #[test]
    fn builtin_catalog_has_three_entries() {
        let names: Vec<&str> = SAMPLE_PDFS.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Sample Document 1", "User Manual", "Technical Specification"]
        );
    }

    #[test]
    fn first_sample_decodes_to_pdf() {
        let bytes = data_url::decode(&SAMPLE_PDFS[0].data_url()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(mime::is_pdf(mime::sniff(&bytes)));
    }

    #[test]
    fn loads_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.json");
        std::fs::write(&path, r#"[{"id": 7, "name": "Contrato", "data": "JVBERi0="}]"#).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].data_url(), "data:application/pdf;base64,JVBERi0=");
    }

    #[test]
    fn broken_catalog_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_catalog(&path).is_err());
        assert_eq!(catalog_or_builtin(Some(&path)), *SAMPLE_PDFS);
    }
}
