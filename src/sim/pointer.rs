//! Pointer position shared between input handlers and the constellation

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

/// Last known pointer position in surface-local CSS pixels.
///
/// Written by pointer-move/leave handlers, read by the simulation on the
/// next tick. Cloning shares the same cell.
#[derive(Debug, Clone, Default)]
pub struct SharedPointer(Rc<Cell<Option<Vec2>>>);

impl SharedPointer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pos: Vec2) {
        self.0.set(Some(pos));
    }

    /// Pointer left the surface
    pub fn clear(&self) {
        self.0.set(None);
    }

    pub fn get(&self) -> Option<Vec2> {
        self.0.get()
    }

    /// Pointer position, or the surface center when absent
    pub fn resolve(&self, bounds: Vec2) -> Vec2 {
        self.get().unwrap_or(bounds * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_center() {
        let p = SharedPointer::new();
        assert_eq!(p.resolve(Vec2::new(800.0, 600.0)), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_clones_share_state() {
        let writer = SharedPointer::new();
        let reader = writer.clone();
        writer.set(Vec2::new(10.0, 20.0));
        assert_eq!(reader.resolve(Vec2::new(800.0, 600.0)), Vec2::new(10.0, 20.0));
        writer.clear();
        assert_eq!(reader.get(), None);
    }
}
