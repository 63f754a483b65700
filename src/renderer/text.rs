//! Phase messages rasterised into an RGBA canvas
//!
//! The canvas covers the whole window and is redrawn only when the phase
//! changes; the renderer then re-uploads it as the `Text` texture.

use std::convert::Infallible;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use image::{Rgba, RgbaImage};

use crate::sim::GamePhase;

pub const WHITE: Rgb888 = Rgb888::new(255, 255, 255);
pub const RED: Rgb888 = Rgb888::new(230, 41, 55);
pub const GREEN: Rgb888 = Rgb888::new(0, 228, 48);

/// Vertical gap between the headline and the restart hint
const LINE_SPACING: i32 = 40;

/// One line of text, top-left anchored
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: &'static str,
    pub x: i32,
    pub y: i32,
    pub color: Rgb888,
}

/// Messages shown for `phase` on a `width` x `height` window
pub fn phase_lines(phase: GamePhase, width: u32, height: u32) -> Vec<TextLine> {
    let cx = width as i32 / 2;
    let cy = height as i32 / 2;
    let headline = |text, color| TextLine {
        text,
        x: cx - 50,
        y: cy,
        color,
    };
    let restart = TextLine {
        text: "Press R to restart",
        x: cx - 50,
        y: cy + LINE_SPACING,
        color: WHITE,
    };

    match phase {
        GamePhase::Intro => vec![TextLine {
            text: "Press ENTER to start...",
            x: 10,
            y: cy + 20,
            color: WHITE,
        }],
        GamePhase::Playing => Vec::new(),
        GamePhase::GameOver => vec![headline("Game Over!", RED), restart],
        GamePhase::Win => vec![headline("You Win!", GREEN), restart],
    }
}

pub struct TextOverlay {
    pub canvas: RgbaImage,
    shown: Option<GamePhase>,
}

impl TextOverlay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::new(width.max(1), height.max(1)),
            shown: None,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    /// Redraw for `phase` if it differs from the last one drawn.
    /// Returns true when the canvas changed.
    pub fn update(&mut self, phase: GamePhase) -> bool {
        if self.shown == Some(phase) {
            return false;
        }
        self.shown = Some(phase);

        let (width, height) = self.size();
        self.canvas.fill(0);
        let mut target = Canvas(&mut self.canvas);
        for line in phase_lines(phase, width, height) {
            let style = MonoTextStyle::new(&FONT_10X20, line.color);
            let Ok(_) = Text::with_baseline(line.text, Point::new(line.x, line.y), style, Baseline::Top)
                .draw(&mut target);
        }
        log::debug!("Text overlay redrawn for {}", phase.as_str());
        true
    }
}

/// `DrawTarget` over an RGBA image; anything outside the image is clipped
struct Canvas<'a>(&'a mut RgbaImage);

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.0.width(), self.0.height())
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.0.dimensions();
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x < width && y < height {
                self.0
                    .put_pixel(x, y, Rgba([color.r(), color.g(), color.b(), 255]));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_color_in(canvas: &RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb888) -> bool {
        let want = Rgba([color.r(), color.g(), color.b(), 255]);
        (y0..y0 + h).any(|y| (x0..x0 + w).any(|x| *canvas.get_pixel(x, y) == want))
    }

    #[test]
    fn test_intro_line() {
        let lines = phase_lines(GamePhase::Intro, 1024, 760);
        assert_eq!(lines.len(), 1);
        assert_eq!((lines[0].x, lines[0].y), (10, 400));
        assert_eq!(lines[0].text, "Press ENTER to start...");
    }

    #[test]
    fn test_end_screens() {
        let over = phase_lines(GamePhase::GameOver, 1024, 760);
        assert_eq!(over[0].text, "Game Over!");
        assert_eq!(over[0].color, RED);
        assert_eq!((over[0].x, over[0].y), (462, 380));
        assert_eq!((over[1].x, over[1].y), (462, 420));

        let win = phase_lines(GamePhase::Win, 1024, 760);
        assert_eq!(win[0].text, "You Win!");
        assert_eq!(win[0].color, GREEN);
        assert_eq!(win[1].text, "Press R to restart");

        assert!(phase_lines(GamePhase::Playing, 1024, 760).is_empty());
    }

    #[test]
    fn test_canvas_is_drawn_once_per_phase() {
        let mut overlay = TextOverlay::new(1024, 760);
        assert!(overlay.update(GamePhase::Intro));
        assert!(has_color_in(&overlay.canvas, 10, 400, 230, 20, WHITE));
        assert!(!overlay.update(GamePhase::Intro));

        assert!(overlay.update(GamePhase::GameOver));
        assert!(has_color_in(&overlay.canvas, 462, 380, 100, 20, RED));
        // Previous message is gone
        assert!(!has_color_in(&overlay.canvas, 10, 400, 230, 20, WHITE));
    }

    #[test]
    fn test_tiny_canvas_clips() {
        let mut overlay = TextOverlay::new(8, 8);
        assert!(overlay.update(GamePhase::Win));
        assert_eq!(overlay.size(), (8, 8));
    }
}
