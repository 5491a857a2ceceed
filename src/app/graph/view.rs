use std::collections::HashMap;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, vec2};

use watch_constellation::constellation::{ScreenNode, TickOutcome};

use super::super::ViewModel;
use super::super::render_utils::{
    blend_color, circle_visible, draw_background, edge_visible, kind_color, link_alpha, with_alpha,
};
use super::{NODE_CORE_RADIUS, NODE_GLOW_RADIUS, SKELETON_NODE_RADIUS};

const SELECTED_COLOR: Color32 = Color32::from_rgb(245, 206, 93);
const SELECTED_LINK_COLOR: Color32 = Color32::from_rgb(241, 146, 94);

impl ViewModel {
    pub(in crate::app) fn draw_constellation(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let origin = rect.center();

        draw_background(&painter, rect);
        self.starfield.advance(rect.size());
        self.starfield.draw(&painter, rect);

        let before_tick = self.scene.snapshot().project_items(
            self.scene.viewport(),
            origin,
            self.selected.as_deref(),
        );
        let hovered = self.hovered_item(ui, rect, &before_tick);
        self.handle_constellation_input(ui, rect, &response, hovered.as_deref());
        self.advance_simulation();
        ui.ctx().request_repaint();

        if hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        } else if self.scene.viewport().is_dragging() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::Grabbing);
        }

        if self.show_skeleton {
            self.draw_skeleton(&painter, rect, origin);
        }

        let items = self.scene.snapshot().project_items(
            self.scene.viewport(),
            origin,
            self.selected.as_deref(),
        );
        if self.show_links || self.selected.is_some() {
            self.draw_similarity_links(&painter, rect, &items);
        }
        self.draw_items(ui, &painter, rect, &items, hovered.as_deref());

        if self.scene.items().is_empty() {
            painter.text(
                origin,
                Align2::CENTER_CENTER,
                "Your sky is empty. Add titles from the catalog to light it up.",
                FontId::proportional(15.0),
                Color32::from_gray(170),
            );
        }

        if let Some(id) = hovered.as_deref()
            && let Some(node) = items.iter().find(|node| node.id == id)
            && let Some(item) = self.scene.item(id)
        {
            let galley = painter.layout_no_wrap(
                item.title.clone(),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
            let anchor =
                node.position + vec2(NODE_GLOW_RADIUS, -NODE_GLOW_RADIUS - galley.size().y);
            let frame = Rect::from_min_size(anchor, galley.size()).expand(4.0);
            painter.rect_filled(frame, 4.0, Color32::from_rgba_unmultiplied(16, 20, 36, 220));
            painter.galley(anchor, galley, Color32::from_gray(240));
        }
    }

    fn advance_simulation(&mut self) {
        if !self.live_physics {
            if self.scene.is_running() {
                self.scene.stop();
            }
            self.ticket = None;
            return;
        }

        if self.ticket.is_none() {
            self.ticket = self.scene.start();
        }
        let Some(ticket) = self.ticket.take() else {
            return;
        };

        match self.scene.tick(ticket) {
            TickOutcome::Advanced { next, .. } => self.ticket = Some(next),
            TickOutcome::Dropped => {}
        }
    }

    fn draw_skeleton(&self, painter: &egui::Painter, rect: Rect, origin: Pos2) {
        let nodes = self
            .scene
            .snapshot()
            .project_skeleton(self.scene.viewport(), origin);
        let positions = nodes
            .iter()
            .map(|node| (node.id.as_str(), node.position))
            .collect::<HashMap<_, _>>();

        let edge_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(150, 170, 230, 60));
        for edge in self.scene.skeleton_edges() {
            let (Some(&start), Some(&end)) = (
                positions.get(edge.source.as_str()),
                positions.get(edge.target.as_str()),
            ) else {
                continue;
            };
            if edge_visible(rect, start, end, 2.0) {
                painter.line_segment([start, end], edge_stroke);
            }
        }

        let dot = Color32::from_rgba_unmultiplied(205, 215, 255, 150);
        for node in &nodes {
            if circle_visible(rect, node.position, SKELETON_NODE_RADIUS) {
                painter.circle_filled(node.position, SKELETON_NODE_RADIUS, dot);
            }
        }

        for cluster in &self.clusters {
            let center = self.scene.viewport().project(origin, cluster.center());
            if !rect.expand(120.0).contains(center) {
                continue;
            }
            painter.text(
                center,
                Align2::CENTER_CENTER,
                cluster.name.as_str(),
                FontId::proportional(12.0),
                Color32::from_rgba_unmultiplied(170, 180, 220, 90),
            );
        }
    }

    fn draw_similarity_links(&self, painter: &egui::Painter, rect: Rect, items: &[ScreenNode]) {
        let positions = items
            .iter()
            .map(|node| (node.id.as_str(), node.position))
            .collect::<HashMap<_, _>>();
        let selected = self.selected.as_deref();

        for edge in self.scene.similarity_edges() {
            let touches_selected = selected.is_some_and(|id| edge.touches(id));
            if !self.show_links && !touches_selected {
                continue;
            }
            let (Some(&start), Some(&end)) = (
                positions.get(edge.source.as_str()),
                positions.get(edge.target.as_str()),
            ) else {
                continue;
            };
            if !edge_visible(rect, start, end, 2.0) {
                continue;
            }

            let stroke = if touches_selected {
                Stroke::new(1.2 + edge.weight as f32 * 0.4, with_alpha(SELECTED_LINK_COLOR, 0.85))
            } else if selected.is_some() {
                Stroke::new(0.8, with_alpha(Color32::from_rgb(120, 140, 200), 0.08))
            } else {
                Stroke::new(
                    0.6 + edge.weight as f32 * 0.3,
                    with_alpha(Color32::from_rgb(140, 170, 255), link_alpha(edge.weight)),
                )
            };
            painter.line_segment([start, end], stroke);
        }
    }

    fn draw_items(
        &self,
        ui: &Ui,
        painter: &egui::Painter,
        rect: Rect,
        items: &[ScreenNode],
        hovered: Option<&str>,
    ) {
        for node in items {
            if !circle_visible(rect, node.position, NODE_GLOW_RADIUS) {
                continue;
            }
            let Some(item) = self.scene.item(&node.id) else {
                continue;
            };

            let selection_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("item-selection", node.id.as_str())),
                node.selected,
            );
            let is_hovered = hovered == Some(node.id.as_str());
            let base = kind_color(item.kind);
            let color = blend_color(base, SELECTED_COLOR, selection_mix);

            let glow = NODE_GLOW_RADIUS + selection_mix * 6.0 + if is_hovered { 3.0 } else { 0.0 };
            painter.circle_filled(
                node.position,
                glow,
                with_alpha(color, 0.14 + selection_mix * 0.1),
            );
            painter.circle_filled(node.position, glow * 0.55, with_alpha(color, 0.22));
            painter.circle_filled(node.position, NODE_CORE_RADIUS, color);

            if selection_mix > 0.0 {
                painter.circle_stroke(
                    node.position,
                    NODE_GLOW_RADIUS + 4.0,
                    Stroke::new(
                        1.0 + selection_mix,
                        with_alpha(SELECTED_COLOR, 0.6 * selection_mix),
                    ),
                );
            }

            if is_hovered {
                continue;
            }
            let label_color = if node.selected {
                SELECTED_COLOR
            } else {
                Color32::from_rgba_unmultiplied(220, 225, 240, 150)
            };
            painter.text(
                node.position + vec2(0.0, NODE_GLOW_RADIUS + 4.0),
                Align2::CENTER_TOP,
                item.title.as_str(),
                FontId::proportional(11.0),
                label_color,
            );
        }
    }
}
