//! data: URL の生成と解釈

use crate::error::SignerError;
use base64::{engine::general_purpose, Engine};

/// PDF 用 data: URL の接頭辞
pub const PDF_DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

/// Base64 文字列から PDF の data: URL を作成
pub fn pdf_data_url(base64_data: &str) -> String {
    format!("{}{}", PDF_DATA_URL_PREFIX, base64_data)
}

/// data: URL を解釈してバイト列を取り出す
///
/// `data:<mime>;base64,<payload>` 形式のみ受け付ける。
pub fn decode(url: &str) -> Result<Vec<u8>, SignerError> {
    let rest = url.strip_prefix("data:").ok_or(SignerError::InvalidDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(SignerError::InvalidDataUrl)?;
    if !header.ends_with(";base64") {
        return Err(SignerError::InvalidDataUrl);
    }

    general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| {
            log::warn!("Base64デコードエラー: {}", e);
            SignerError::InvalidDataUrl
        })
}
