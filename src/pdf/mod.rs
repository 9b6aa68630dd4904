//! PDF処理モジュール

pub mod data_url;
mod document;
pub mod mime;
mod object_url;
mod operations;

pub use document::{DocumentSource, PdfDocument};
pub use object_url::{ObjectUrl, ObjectUrlGuard};
pub use operations::{PdfOperations, UploadedFile};
