//! Rendering seam. The world issues one call per live entity; what a surface
//! does with them is its own business.

use foxhollow_data::Position;

pub trait DrawSurface {
    fn draw_rabbit(&mut self, position: Position, size: f64);
    fn draw_fox(&mut self, position: Position, size: f64);
    fn draw_food(&mut self, position: Position);
}

/// Surface for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn draw_rabbit(&mut self, _position: Position, _size: f64) {}
    fn draw_fox(&mut self, _position: Position, _size: f64) {}
    fn draw_food(&mut self, _position: Position) {}
}
