//! ページ表示状態 - ページ番号、ズーム、読み込み状態

use crate::error::SignerError;
use eframe::egui::Vec2;

/// 最小ズーム倍率
pub const MIN_SCALE: f32 = 0.5;
/// 最大ズーム倍率
pub const MAX_SCALE: f32 = 3.0;
/// ズームの刻み
pub const SCALE_STEP: f32 = 0.1;

/// ビューアーの表示状態
#[derive(Debug, Clone)]
pub struct ViewState {
    /// 現在のページ (1-indexed)
    current_page: usize,
    /// ドキュメント読み込み後に確定するページ数
    page_count: Option<usize>,
    /// ページ番号入力欄の内容
    page_input: String,
    scale: f32,
    loading: bool,
    error: Option<SignerError>,
    /// 直近に読み込んだページサイズ (ポイント単位)
    page_size: Option<Vec2>,
    /// 次のフレームでスクロール位置を中央に戻す
    recenter: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ViewState {
    pub fn new(initial_scale: f32) -> Self {
        Self {
            current_page: 1,
            page_count: None,
            page_input: "1".to_string(),
            scale: clamp_scale(initial_scale),
            loading: true,
            error: None,
            page_size: None,
            recenter: false,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&SignerError> {
        self.error.as_ref()
    }

    /// 倍率を掛けたページサイズ (画面ピクセル)
    pub fn scaled_page_size(&self) -> Option<Vec2> {
        self.page_size.map(|size| size * self.scale)
    }

    /// ズーム表示用ラベル ("110%")
    pub fn zoom_label(&self) -> String {
        format!("{}%", (self.scale * 100.0).round() as i32)
    }

    /// ページ数ラベル ("de 3" / "de --")
    pub fn page_count_label(&self) -> String {
        match self.page_count {
            Some(count) => format!("de {}", count),
            None => "de --".to_string(),
        }
    }

    // ----- ドキュメント/ページ読み込みの通知 -----

    /// ドキュメントの読み込みに成功
    pub fn on_document_loaded(&mut self, page_count: usize) {
        if page_count == 0 {
            log::error!("ページが1つもないPDFです");
            self.on_document_error();
            return;
        }
        self.page_count = Some(page_count);
        self.loading = false;
        if self.current_page > page_count {
            self.set_page(page_count);
        }
    }

    /// ドキュメントの読み込みに失敗
    pub fn on_document_error(&mut self) {
        self.error = Some(SignerError::DocumentLoad);
        self.loading = false;
    }

    /// ページの描画に成功
    pub fn on_page_loaded(&mut self, width: f32, height: f32) {
        let size = Vec2::new(width, height);
        if self.page_size != Some(size) {
            self.recenter = true;
        }
        self.page_size = Some(size);
        self.loading = false;
    }

    /// ページの描画に失敗
    pub fn on_page_error(&mut self) {
        self.error = Some(SignerError::PageLoad {
            page: self.current_page,
        });
        self.loading = false;
    }

    /// 再試行 - エラーを消して読み込み中に戻す
    pub fn retry(&mut self) {
        self.error = None;
        self.loading = true;
    }

    // ----- ページ移動 -----

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1 && !self.loading
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.page_count, Some(count) if self.current_page < count) && !self.loading
    }

    /// 前のページへ
    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.set_page(self.current_page - 1);
            true
        } else {
            false
        }
    }

    /// 次のページへ
    pub fn next_page(&mut self) -> bool {
        match self.page_count {
            Some(count) if self.current_page < count => {
                self.set_page(self.current_page + 1);
                true
            }
            _ => false,
        }
    }

    /// 入力欄の編集用バッファ
    pub fn page_input_mut(&mut self) -> &mut String {
        &mut self.page_input
    }

    /// 入力欄の確定 (Enter / フォーカス喪失)
    ///
    /// 範囲外や数値でない入力は現在のページ番号に戻す。
    pub fn submit_page_input(&mut self) -> bool {
        let requested = parse_page_number(&self.page_input);
        match (requested, self.page_count) {
            (Some(page), Some(count)) if page >= 1 && page <= count as i64 => {
                self.set_page(page as usize);
                self.page_input = self.current_page.to_string();
                true
            }
            _ => {
                self.page_input = self.current_page.to_string();
                false
            }
        }
    }

    fn set_page(&mut self, page: usize) {
        if page == self.current_page {
            return;
        }
        log::debug!("ページ {} → {}", self.current_page, page);
        self.current_page = page;
        self.loading = true;
        self.error = None;
        self.page_input = page.to_string();
    }

    // ----- ズーム -----

    pub fn zoom_in(&mut self) {
        self.set_scale(self.scale + SCALE_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_scale(self.scale - SCALE_STEP);
    }

    fn set_scale(&mut self, scale: f32) {
        let scale = clamp_scale(scale);
        if scale != self.scale {
            log::debug!("ズーム {} → {}", self.scale, scale);
            self.scale = scale;
            self.recenter = true;
        }
    }

    // ----- スクロール -----

    /// 中央寄せが要求されていれば取り出す
    pub fn take_recenter(&mut self) -> bool {
        std::mem::take(&mut self.recenter)
    }

    /// ページがビューポートより大きい場合の中央寄せスクロール位置
    pub fn centered_scroll_offset(&self, viewport: Vec2) -> Option<Vec2> {
        let scaled = self.scaled_page_size()?;
        if scaled.x > viewport.x || scaled.y > viewport.y {
            Some(Vec2::new(
                ((scaled.x - viewport.x) / 2.0).max(0.0),
                ((scaled.y - viewport.y) / 2.0).max(0.0),
            ))
        } else {
            None
        }
    }
}

/// 倍率を範囲内に収め、小数第1位に丸める
fn clamp_scale(scale: f32) -> f32 {
    let rounded = (scale * 10.0).round() / 10.0;
    if rounded.is_nan() {
        1.0
    } else {
        rounded.clamp(MIN_SCALE, MAX_SCALE)
    }
}

/// 先頭の整数部分だけを読み取る ("3abc" → 3, " -2" → -2)
pub fn parse_page_number(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}
