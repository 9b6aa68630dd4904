//! UI モジュール

mod button;
mod icons;
mod modal;
mod page_viewer;
mod pdf_list;
mod signer;
mod upload;

pub use pdf_list::PdfList;
pub use signer::PdfSigner;
