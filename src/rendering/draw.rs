//! Draw directives emitted by the core each frame, and captured frames.

use bevy::prelude::*;

use super::font;

/// One renderer instruction, in pixel space with y pointing down.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    Text {
        text: String,
        origin: Vec2,
        scale: f32,
        color: Color,
    },
}

impl DrawCommand {
    /// The same directive scaled by `factor` around `pivot`.
    pub fn scaled_about(&self, pivot: Vec2, factor: f32) -> Self {
        match self {
            DrawCommand::Rect { min, size, color } => DrawCommand::Rect {
                min: pivot + (*min - pivot) * factor,
                size: *size * factor,
                color: *color,
            },
            DrawCommand::Text {
                text,
                origin,
                scale,
                color,
            } => DrawCommand::Text {
                text: text.clone(),
                origin: pivot + (*origin - pivot) * factor,
                scale: scale * factor,
                color: *color,
            },
        }
    }
}

/// Ordered directives for one frame. Later directives draw on top.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { min, size, color });
    }

    /// Square of edge `size` centered on `center`.
    pub fn square_centered(&mut self, center: Vec2, size: f32, color: Color) {
        self.rect(center - Vec2::splat(size / 2.0), Vec2::splat(size), color);
    }

    pub fn text(&mut self, text: impl Into<String>, origin: Vec2, scale: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            origin,
            scale,
            color,
        });
    }

    /// Text whose bounding box is centered on `center`.
    pub fn text_centered(
        &mut self,
        text: impl Into<String>,
        center: Vec2,
        scale: f32,
        color: Color,
    ) {
        let text = text.into();
        let origin = center - font::text_size(&text, scale) / 2.0;
        self.text(text, origin, scale, color);
    }

    /// Redraws a captured frame scaled around `pivot`.
    pub fn snapshot(&mut self, snapshot: &FrameSnapshot, pivot: Vec2, factor: f32) {
        self.commands.extend(
            snapshot
                .commands
                .iter()
                .map(|command| command.scaled_about(pivot, factor)),
        );
    }
}

/// Opaque still of a rendered frame, reused as a static backdrop.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    commands: Vec<DrawCommand>,
    size: Vec2,
}

impl FrameSnapshot {
    pub fn capture(list: &DrawList, size: Vec2) -> Self {
        FrameSnapshot {
            commands: list.commands.clone(),
            size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_about_pivot_keeps_pivot_fixed() {
        let pivot = Vec2::new(100.0, 100.0);
        let rect = DrawCommand::Rect {
            min: Vec2::new(90.0, 80.0),
            size: Vec2::new(20.0, 40.0),
            color: Color::WHITE,
        };
        let DrawCommand::Rect { min, size, .. } = rect.scaled_about(pivot, 2.0) else {
            panic!("rect stays a rect");
        };
        assert_eq!(min, Vec2::new(80.0, 60.0));
        assert_eq!(size, Vec2::new(40.0, 80.0));
        // The rect still straddles the pivot symmetrically.
        assert_eq!(min + size / 2.0, pivot);
    }

    #[test]
    fn snapshot_redraw_preserves_order() {
        let mut list = DrawList::default();
        list.rect(Vec2::ZERO, Vec2::ONE, Color::BLACK);
        list.text("SCORE", Vec2::ONE, 2.0, Color::WHITE);
        let snapshot = FrameSnapshot::capture(&list, Vec2::new(640.0, 480.0));

        let mut redraw = DrawList::default();
        redraw.snapshot(&snapshot, Vec2::ZERO, 1.0);
        assert_eq!(redraw.iter().collect::<Vec<_>>(), list.iter().collect::<Vec<_>>());
        assert_eq!(snapshot.len(), 2);
    }
}
