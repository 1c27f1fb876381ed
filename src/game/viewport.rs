//! Viewport control: the core asks for a size and adopts whatever was applied.

use bevy::prelude::*;

pub trait Viewport {
    /// Requests a viewport of `size` logical pixels and returns the size actually applied.
    fn resize(&mut self, size: Vec2) -> Vec2;
}

/// Viewport that accepts every request unchanged.
#[cfg(test)]
#[derive(Default, Debug, Clone, Copy)]
pub struct UnboundedViewport;

#[cfg(test)]
impl Viewport for UnboundedViewport {
    fn resize(&mut self, size: Vec2) -> Vec2 {
        size
    }
}

/// Viewport that clamps requests to a maximum size.
#[derive(Debug, Clone, Copy)]
pub struct ClampedViewport {
    pub max: Vec2,
}

impl Viewport for ClampedViewport {
    fn resize(&mut self, size: Vec2) -> Vec2 {
        size.min(self.max)
    }
}

/// Primary window adapter. Resolution changes take effect on the OS window next frame.
pub struct WindowViewport<'a> {
    pub window: &'a mut Window,
    pub max: Vec2,
}

impl Viewport for WindowViewport<'_> {
    fn resize(&mut self, size: Vec2) -> Vec2 {
        let applied = size.min(self.max);
        if applied != size {
            debug!("viewport request {size} clamped to {applied}");
        }
        self.window.resolution.set(applied.x, applied.y);
        let read_back = Vec2::new(self.window.resolution.width(), self.window.resolution.height());
        settle(applied, read_back)
    }
}

/// Snaps the read-back size to the request when the two differ by less than a
/// pixel. Fractional scale factors truncate the physical size on the way in.
fn settle(requested: Vec2, read_back: Vec2) -> Vec2 {
    let close = (read_back - requested).abs().cmplt(Vec2::ONE);
    Vec2::select(close, requested, read_back)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CELL_SIZE, Grid, INITIAL_VIEWPORT, MAX_VIEWPORT, VIEWPORT_GROWTH};
    use bevy::window::WindowResolution;

    fn scaled_window(scale: f32) -> Window {
        Window {
            resolution: WindowResolution::new(INITIAL_VIEWPORT.x as u32, INITIAL_VIEWPORT.y as u32)
                .with_scale_factor_override(scale),
            ..default()
        }
    }

    #[test]
    fn fractional_scale_keeps_requested_size() {
        let mut window = scaled_window(1.1);
        let mut viewport = WindowViewport {
            window: &mut window,
            max: MAX_VIEWPORT,
        };
        let mut size = INITIAL_VIEWPORT;
        for _ in 0..4 {
            size += VIEWPORT_GROWTH;
            assert_eq!(viewport.resize(size), size);
        }
        assert_eq!(Grid::from_viewport(size), Grid::new(22, 17));
        assert!((viewport.window.resolution.width() - size.x).abs() < 1.0);
    }

    #[test]
    fn requests_past_the_maximum_are_clamped() {
        let mut window = scaled_window(1.0);
        let mut viewport = WindowViewport {
            window: &mut window,
            max: MAX_VIEWPORT,
        };
        let applied = viewport.resize(MAX_VIEWPORT + Vec2::splat(CELL_SIZE));
        assert_eq!(applied, MAX_VIEWPORT);
    }

    #[test]
    fn whole_pixel_differences_are_kept() {
        let requested = Vec2::new(656.0, 496.0);
        assert_eq!(settle(requested, Vec2::new(655.4, 496.0)), requested);
        assert_eq!(settle(requested, Vec2::new(640.0, 495.5)), Vec2::new(640.0, 496.0));
    }
}
