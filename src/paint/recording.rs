//! Surface that records draw calls instead of rasterizing them

use glam::Vec2;

use super::color::Rgba;
use super::surface::{RadialGradient, Surface};

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Circle { center: Vec2, radius: f32, color: Rgba },
    GradientCircle { center: Vec2, radius: f32, gradient: RadialGradient },
    Ring { center: Vec2, radius: f32, line_width: f32, color: Rgba },
    Line { from: Vec2, to: Vec2, line_width: f32, color: Rgba },
    Text { text: String, at: Vec2, size_px: f32, color: Rgba },
}

/// Headless surface used by tests and the native smoke run.
///
/// Tracks backing size and the accumulated transform scale so resize
/// behavior can be checked without a browser.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    pub backing_size: (u32, u32),
    pub transform_scale: f64,
    pub commands: Vec<DrawCommand>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            backing_size: (0, 0),
            transform_scale: 1.0,
            commands: Vec::new(),
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded commands, keeping size and transform
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded link lines
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Recorded labels in draw order
    pub fn labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing_size = (width, height);
    }

    fn reset_transform(&mut self) {
        self.transform_scale = 1.0;
    }

    fn scale(&mut self, factor: f64) {
        self.transform_scale *= factor;
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_circle_gradient(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::GradientCircle {
            center,
            radius,
            gradient: gradient.clone(),
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            line_width,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, line_width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            line_width,
            color,
        });
    }

    fn text(&mut self, text: &str, at: Vec2, size_px: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            size_px,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_compounds_without_reset() {
        let mut surface = RecordingSurface::new();
        surface.scale(2.0);
        surface.scale(2.0);
        assert_eq!(surface.transform_scale, 4.0);
        surface.reset_transform();
        assert_eq!(surface.transform_scale, 1.0);
    }

    #[test]
    fn test_take_commands() {
        let mut surface = RecordingSurface::new();
        surface.clear(10.0, 10.0);
        surface.text("Rust", Vec2::ZERO, 12.0, Rgba::WHITE);
        assert_eq!(surface.labels(), vec!["Rust"]);
        assert_eq!(surface.take_commands().len(), 2);
        assert!(surface.commands.is_empty());
    }
}
