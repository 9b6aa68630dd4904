//! アップロードファイルの MIME 判定

/// PDF の MIME タイプ
pub const PDF_MIME: &str = "application/pdf";

/// 判定できなかった場合の MIME タイプ
pub const OCTET_STREAM: &str = "application/octet-stream";

/// ファイル内容から MIME タイプを推定
pub fn sniff(bytes: &[u8]) -> &'static str {
    infer::get(bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or(OCTET_STREAM)
}

/// MIME タイプが PDF と完全一致するか
pub fn is_pdf(mime: &str) -> bool {
    mime == PDF_MIME
}
