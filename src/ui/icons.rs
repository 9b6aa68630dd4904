//! アイコン - Painter で描くベクターグリフ

use eframe::egui::{self, Color32, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Vec2};

/// 使用するアイコン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Upload,
    Close,
    Loader,
    ChevronLeft,
    ChevronRight,
    ZoomIn,
    ZoomOut,
    Document,
    Eye,
    Download,
}

impl Icon {
    /// アイコンを配置して描画
    pub fn show(self, ui: &mut egui::Ui, size: f32, color: Color32) -> Response {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
        if ui.is_rect_visible(rect) {
            let time = ui.input(|i| i.time) as f32;
            self.paint(ui.painter(), rect, color, time);
            if self == Icon::Loader {
                ui.ctx().request_repaint();
            }
        }
        response
    }

    /// 指定矩形に描画 (24x24 のグリッド基準)
    pub fn paint(self, painter: &Painter, rect: Rect, color: Color32, time: f32) {
        let unit = rect.width().min(rect.height()) / 24.0;
        let stroke = Stroke::new((2.0 * unit).max(1.0), color);
        let p = |x: f32, y: f32| -> Pos2 { rect.min + Vec2::new(x, y) * unit };
        let polyline = |points: &[(f32, f32)]| {
            let points: Vec<Pos2> = points.iter().map(|&(x, y)| p(x, y)).collect();
            painter.add(Shape::line(points, stroke));
        };

        match self {
            Icon::Upload => {
                polyline(&[(4.0, 15.0), (4.0, 20.0), (20.0, 20.0), (20.0, 15.0)]);
                polyline(&[(7.0, 8.0), (12.0, 3.0), (17.0, 8.0)]);
                polyline(&[(12.0, 3.0), (12.0, 15.0)]);
            }
            Icon::Download => {
                polyline(&[(4.0, 15.0), (4.0, 20.0), (20.0, 20.0), (20.0, 15.0)]);
                polyline(&[(7.0, 10.0), (12.0, 15.0), (17.0, 10.0)]);
                polyline(&[(12.0, 15.0), (12.0, 3.0)]);
            }
            Icon::Close => {
                polyline(&[(6.0, 6.0), (18.0, 18.0)]);
                polyline(&[(18.0, 6.0), (6.0, 18.0)]);
            }
            Icon::ChevronLeft => polyline(&[(15.0, 6.0), (9.0, 12.0), (15.0, 18.0)]),
            Icon::ChevronRight => polyline(&[(9.0, 6.0), (15.0, 12.0), (9.0, 18.0)]),
            Icon::ZoomIn | Icon::ZoomOut => {
                painter.circle_stroke(p(11.0, 11.0), 7.0 * unit, stroke);
                polyline(&[(21.0, 21.0), (16.0, 16.0)]);
                polyline(&[(8.0, 11.0), (14.0, 11.0)]);
                if self == Icon::ZoomIn {
                    polyline(&[(11.0, 8.0), (11.0, 14.0)]);
                }
            }
            Icon::Document => {
                polyline(&[
                    (14.0, 2.0),
                    (6.0, 2.0),
                    (6.0, 22.0),
                    (18.0, 22.0),
                    (18.0, 6.0),
                    (14.0, 2.0),
                    (14.0, 6.0),
                    (18.0, 6.0),
                ]);
                polyline(&[(9.0, 13.0), (15.0, 13.0)]);
                polyline(&[(9.0, 17.0), (15.0, 17.0)]);
            }
            Icon::Eye => {
                let outline: Vec<(f32, f32)> = (0..=16)
                    .map(|i| {
                        let t = i as f32 / 16.0 * std::f32::consts::PI;
                        (12.0 - 10.0 * t.cos(), 12.0 - 6.0 * t.sin())
                    })
                    .chain((0..=16).map(|i| {
                        let t = i as f32 / 16.0 * std::f32::consts::PI;
                        (12.0 + 10.0 * t.cos(), 12.0 + 6.0 * t.sin())
                    }))
                    .collect();
                polyline(&outline);
                painter.circle_stroke(p(12.0, 12.0), 3.0 * unit, stroke);
            }
            Icon::Loader => {
                // 3/4 円弧を回転させる
                let start = time * std::f32::consts::TAU;
                let arc: Vec<Pos2> = (0..=24)
                    .map(|i| {
                        let a = start + i as f32 / 24.0 * std::f32::consts::PI * 1.5;
                        p(12.0, 12.0) + Vec2::angled(a) * 9.0 * unit
                    })
                    .collect();
                painter.add(Shape::line(arc, stroke));
            }
        }
    }
}

/// アイコン用の正方形を中心から作成
pub fn icon_rect(center: Pos2, size: f32) -> Rect {
    Rect::from_center_size(center, Vec2::splat(size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn icon_rect_is_centered() {
        let rect = icon_rect(pos2(10.0, 10.0), 8.0);
        assert_eq!(rect.min, pos2(6.0, 6.0));
        assert_eq!(rect.max, pos2(14.0, 14.0));
    }
}
