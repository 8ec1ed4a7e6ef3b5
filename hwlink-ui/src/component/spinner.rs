//! Spinning progress indicator.
//!
//! The spinner holds no animation state: the caller owns the rotation and advances it on a
//! timer, see [`Spinner::advance`].
use std::f32::consts::PI;

use iced::{
    mouse,
    widget::canvas::{self, path::Arc, Canvas, Frame, Geometry, LineCap, Path, Stroke},
    Length, Radians, Rectangle, Renderer,
};

use crate::{theme::Theme, widget::Element};

/// Portion of the circle covered by the arc.
const ARC_LENGTH: f32 = 1.5 * PI;
const STEP: f32 = PI / 12.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spinner {
    rotation: f32,
}

impl Spinner {
    pub fn advance(self) -> Self {
        Self {
            rotation: (self.rotation + STEP) % (2.0 * PI),
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn view<'a, Message: 'a>(self, size: f32) -> Element<'a, Message> {
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message, Theme> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &(),
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let stroke_width = (bounds.width.min(bounds.height) / 8.0).max(2.0);
        let arc = Path::new(|b| {
            b.arc(Arc {
                center: frame.center(),
                radius: (bounds.width.min(bounds.height) - stroke_width) / 2.0,
                start_angle: Radians(self.rotation),
                end_angle: Radians(self.rotation + ARC_LENGTH),
            })
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_color(theme.colors.buttons.primary.active.background)
                .with_width(stroke_width)
                .with_line_cap(LineCap::Round),
        );
        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps() {
        let mut spinner = Spinner::default();
        for _ in 0..24 {
            spinner = spinner.advance();
        }
        assert!(spinner.rotation() < STEP);
        assert!(Spinner::default().advance().rotation() > 0.0);
    }
}
