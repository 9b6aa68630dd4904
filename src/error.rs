//! ユーザー向けエラー定義

use thiserror::Error;

/// 画面に表示するエラー
///
/// Display の文字列はそのまま UI に表示される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    /// アップロードされたファイルが PDF ではない
    #[error("Solo se permiten archivos PDF.")]
    InvalidFileType,

    /// ドキュメントの読み込みに失敗
    #[error("Error al cargar el PDF. Por favor, inténtelo de nuevo.")]
    DocumentLoad,

    /// ページの描画に失敗 (1-indexed)
    #[error("Error al cargar la página {page}. Por favor, inténtelo de nuevo.")]
    PageLoad { page: usize },

    /// data: URL を解釈できない
    #[error("URL de datos inválida.")]
    InvalidDataUrl,
}
