//! ページビューアーの状態モデル

mod selection;
mod state;

pub use selection::{PdfClick, Selection};
pub use state::{ViewState, MAX_SCALE, MIN_SCALE};
