//! 署名位置の選択状態

use eframe::egui::Pos2;

/// 確定した署名位置 (ページ座標, ページは 1-indexed)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfClick {
    pub x: f32,
    pub y: f32,
    pub page: usize,
}

/// 選択状態
///
/// 座標はページ左上を原点とした画面ピクセル。確定時に倍率で割ってページ座標に変換する。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Selection {
    /// 未選択 - マウス追従プレビューのみ
    #[default]
    Idle,
    /// マウスがページ上にある
    Hovering { at: Pos2 },
    /// クリック済み、確定待ち
    Pending { at: Pos2 },
    /// 確定済み (ページ座標)
    Confirmed { at: PdfClick },
}

impl Selection {
    /// マウス位置を更新 (未選択時のみ有効)
    pub fn hover(&mut self, pos: Option<Pos2>) {
        if self.is_armed() {
            *self = match pos {
                Some(at) => Selection::Hovering { at },
                None => Selection::Idle,
            };
        }
    }

    /// クリック - 未選択なら確定待ちにする
    pub fn click(&mut self, at: Pos2) -> bool {
        if self.is_armed() {
            *self = Selection::Pending { at };
            true
        } else {
            false
        }
    }

    /// 確定 - 画面座標を倍率で割ってページ座標にする
    pub fn confirm(&mut self, scale: f32, page: usize) -> Option<PdfClick> {
        let Selection::Pending { at } = *self else {
            return None;
        };

        let click = PdfClick {
            x: at.x / scale,
            y: at.y / scale,
            page,
        };
        *self = Selection::Confirmed { at: click };
        Some(click)
    }

    /// 確定待ちを取り消す
    pub fn cancel(&mut self) {
        if self.pending().is_some() {
            *self = Selection::Idle;
        }
    }

    /// 確定済みの位置を削除して選択をやり直せるようにする
    pub fn remove(&mut self) {
        if self.confirmed().is_some() {
            *self = Selection::Idle;
        }
    }

    /// 新しい選択を受け付けるか
    pub fn is_armed(&self) -> bool {
        matches!(self, Selection::Idle | Selection::Hovering { .. })
    }

    pub fn hover_position(&self) -> Option<Pos2> {
        match self {
            Selection::Hovering { at } => Some(*at),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<Pos2> {
        match self {
            Selection::Pending { at } => Some(*at),
            _ => None,
        }
    }

    pub fn confirmed(&self) -> Option<PdfClick> {
        match self {
            Selection::Confirmed { at } => Some(*at),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    fn assert_exclusive(selection: &Selection) {
        assert!(!(selection.pending().is_some() && selection.confirmed().is_some()));
    }

    #[test]
    fn hover_tracks_pointer_while_idle() {
        let mut selection = Selection::default();
        selection.hover(Some(pos2(10.0, 20.0)));
        assert_eq!(selection.hover_position(), Some(pos2(10.0, 20.0)));
        selection.hover(None);
        assert_eq!(selection, Selection::Idle);
    }

    #[test]
    fn click_then_confirm_divides_by_scale() {
        let mut selection = Selection::default();
        assert!(selection.click(pos2(150.0, 90.0)));
        assert_eq!(selection.pending(), Some(pos2(150.0, 90.0)));

        let click = selection.confirm(1.5, 2).unwrap();
        assert_eq!(click, PdfClick { x: 100.0, y: 60.0, page: 2 });
        assert_eq!(selection.confirmed(), Some(click));
        assert!(selection.pending().is_none());
    }

    #[test]
    fn second_click_is_ignored_while_pending_or_confirmed() {
        let mut selection = Selection::default();
        selection.click(pos2(1.0, 1.0));
        assert!(!selection.click(pos2(5.0, 5.0)));
        assert_eq!(selection.pending(), Some(pos2(1.0, 1.0)));

        selection.confirm(1.0, 1);
        assert!(!selection.click(pos2(5.0, 5.0)));
        selection.hover(Some(pos2(7.0, 7.0)));
        assert!(selection.hover_position().is_none());
        assert_exclusive(&selection);
    }

    #[test]
    fn cancel_discards_pending_point() {
        let mut selection = Selection::default();
        selection.click(pos2(3.0, 4.0));
        selection.cancel();
        assert_eq!(selection, Selection::Idle);
        assert!(selection.confirm(1.0, 1).is_none());
    }

    #[test]
    fn cancel_does_not_touch_confirmed_point() {
        let mut selection = Selection::default();
        selection.click(pos2(3.0, 4.0));
        selection.confirm(1.0, 1);
        selection.cancel();
        assert!(selection.confirmed().is_some());
    }

    #[test]
    fn remove_rearms_selection() {
        let mut selection = Selection::default();
        selection.click(pos2(3.0, 4.0));
        selection.confirm(2.0, 1);
        selection.remove();
        assert!(selection.is_armed());
        assert!(selection.click(pos2(8.0, 8.0)));
        assert_exclusive(&selection);
    }
}
