use eframe::egui::{self, Rect, Response, Ui};
use log::{debug, trace};

use watch_constellation::constellation::{PointerEvent, SceneEvent, ScreenNode};

use super::super::ViewModel;
use super::NODE_HIT_RADIUS;

impl ViewModel {
    pub(in crate::app) fn hovered_item(
        &self,
        ui: &Ui,
        rect: Rect,
        nodes: &[ScreenNode],
    ) -> Option<String> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        nodes
            .iter()
            .filter_map(|node| {
                let distance = node.position.distance(pointer);
                (distance <= NODE_HIT_RADIUS).then_some((node, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, _distance)| node.id.clone())
    }

    pub(in crate::app) fn handle_constellation_input(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &Response,
        hovered: Option<&str>,
    ) {
        let (pressed, released, press_position, hover_position, escape) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.press_origin(),
                input.pointer.hover_pos(),
                input.key_pressed(egui::Key::Escape),
            )
        });

        if pressed
            && response.hovered()
            && let Some(position) = press_position
        {
            self.dispatch_pointer(PointerEvent::Down {
                position,
                target: hovered.map(str::to_owned),
            });
        }

        if self.scene.viewport().is_dragging() {
            match hover_position {
                Some(position) if rect.contains(position) => {
                    self.dispatch_pointer(PointerEvent::Move { position });
                }
                _ => self.dispatch_pointer(PointerEvent::Leave),
            }
        }

        if released {
            match hover_position {
                Some(position) => self.dispatch_pointer(PointerEvent::Up { position }),
                None => self.dispatch_pointer(PointerEvent::Leave),
            }
        }

        if response.double_clicked() && hovered.is_none() {
            self.scene.reset_camera();
            debug!("event=camera_reset trigger=double_click");
        }

        if escape {
            self.set_selected(None);
        }
    }

    fn dispatch_pointer(&mut self, event: PointerEvent) {
        match self.scene.handle_pointer(event) {
            Some(SceneEvent::NodePressed(id)) => self.set_selected(Some(id)),
            Some(SceneEvent::CameraMoved(offset)) => {
                trace!("event=camera_moved x={:.1} y={:.1}", offset.x, offset.y);
            }
            None => {}
        }
    }
}
