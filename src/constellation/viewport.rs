use eframe::egui::{Pos2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { pointer_start: Pos2, camera_start: Vec2 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Down { position: Pos2, target: Option<String> },
    Move { position: Pos2 },
    Up { position: Pos2 },
    Leave,
}

#[derive(Clone, Debug)]
pub struct Viewport {
    offset: Vec2,
    home: Vec2,
    drag: DragState,
}

impl Viewport {
    pub fn new(offset: Vec2) -> Self {
        Self {
            offset,
            home: offset,
            drag: DragState::Idle,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn begin_drag(&mut self, pointer: Pos2) {
        self.drag = DragState::Dragging {
            pointer_start: pointer,
            camera_start: self.offset,
        };
    }

    pub fn drag_to(&mut self, pointer: Pos2) -> bool {
        let DragState::Dragging {
            pointer_start,
            camera_start,
        } = self.drag
        else {
            return false;
        };

        let next = camera_start + (pointer - pointer_start);
        let moved = next != self.offset;
        self.offset = next;
        moved
    }

    pub fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    pub fn reset(&mut self) {
        self.offset = self.home;
        self.drag = DragState::Idle;
    }

    pub fn project(&self, origin: Pos2, world: Vec2) -> Pos2 {
        origin + self.offset + world
    }

    pub fn unproject(&self, origin: Pos2, screen: Pos2) -> Vec2 {
        screen - origin - self.offset
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn drag_moves_camera_by_pointer_delta() {
        let mut viewport = Viewport::new(Vec2::ZERO);

        viewport.begin_drag(pos2(100.0, 100.0));
        viewport.drag_to(pos2(140.0, 130.0));
        assert_eq!(viewport.offset(), vec2(40.0, 30.0));

        viewport.end_drag();
        assert!(!viewport.drag_to(pos2(400.0, 400.0)));
        assert_eq!(viewport.offset(), vec2(40.0, 30.0));
    }

    #[test]
    fn consecutive_drags_accumulate() {
        let mut viewport = Viewport::new(vec2(-10.0, 5.0));

        viewport.begin_drag(pos2(0.0, 0.0));
        viewport.drag_to(pos2(20.0, 0.0));
        viewport.end_drag();
        viewport.begin_drag(pos2(50.0, 50.0));
        viewport.drag_to(pos2(50.0, 80.0));

        assert_eq!(viewport.offset(), vec2(10.0, 35.0));
        assert!(viewport.is_dragging());
    }

    #[test]
    fn project_and_unproject_are_inverse() {
        let mut viewport = Viewport::new(vec2(12.0, -7.0));
        let origin = pos2(400.0, 300.0);
        let world = vec2(-35.0, 90.0);

        let screen = viewport.project(origin, world);
        assert_eq!(screen, pos2(377.0, 383.0));
        assert_eq!(viewport.unproject(origin, screen), world);

        viewport.begin_drag(pos2(0.0, 0.0));
        viewport.drag_to(pos2(5.0, 5.0));
        viewport.reset();
        assert_eq!(viewport.offset(), vec2(12.0, -7.0));
        assert_eq!(viewport.drag_state(), DragState::Idle);
    }
}
