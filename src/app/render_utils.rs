use eframe::egui::{Color32, Painter, Pos2, Rect};

use watch_constellation::constellation::{ItemKind, edge_strength};

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(7, 9, 20));
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let min_x = start.x.min(end.x) - padding;
    let max_x = start.x.max(end.x) + padding;
    let min_y = start.y.min(end.y) - padding;
    let max_y = start.y.max(end.y) + padding;

    !(max_x < rect.left() || min_x > rect.right() || max_y < rect.top() || min_y > rect.bottom())
}

pub(super) fn kind_color(kind: ItemKind) -> Color32 {
    match kind {
        ItemKind::Movie => Color32::from_rgb(255, 196, 120),
        ItemKind::Tv => Color32::from_rgb(132, 196, 255),
    }
}

pub(super) fn link_alpha(weight: u32) -> f32 {
    0.1 + edge_strength(weight)
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;

    #[test]
    fn visibility_checks_respect_padding() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));

        assert!(circle_visible(rect, pos2(-5.0, 50.0), 6.0));
        assert!(!circle_visible(rect, pos2(-10.0, 50.0), 6.0));
        assert!(edge_visible(rect, pos2(-50.0, 50.0), pos2(-1.0, 50.0), 2.0));
        assert!(!edge_visible(rect, pos2(-50.0, 50.0), pos2(-10.0, 60.0), 2.0));
    }

    #[test]
    fn heavier_links_are_brighter_up_to_a_cap() {
        assert!(link_alpha(2) > link_alpha(1));
        assert_eq!(link_alpha(40), link_alpha(4));
    }
}
