use iced::mouse::Cursor;
use iced::widget::canvas::{self, Program};
use iced::{Color, Point, Rectangle, Renderer, Theme};

use crate::confetti::{Confetti, PALETTE};
use crate::Message;

/// Thin drawing adapter over the confetti simulation.
///
/// All movement happens in `Confetti::advance`, driven by the frame
/// subscription; this program only clears the banner and paints one filled
/// circle per particle at its current position.
pub struct ConfettiView<'a> {
    pub confetti: &'a Confetti,
}

impl<'a> Program<Message> for ConfettiView<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        for particle in self.confetti.particles() {
            // Still above the top edge; nothing to paint yet
            if particle.y < -particle.radius {
                continue;
            }
            let (r, g, b) = PALETTE[particle.color % PALETTE.len()];
            frame.fill(
                &canvas::Path::circle(Point::new(particle.x, particle.y), particle.radius),
                Color::from_rgba8(r, g, b, 0.8),
            );
        }

        vec![frame.into_geometry()]
    }
}
