//! Display layers
//!
//! A tiny subset of a retained-mode layer tree: one full-screen bitmap and
//! text labels stacked on top of it.

use embedded_graphics::{
    image::{Image, ImageDrawableExt, ImageRaw},
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::{BinaryColor, Rgb565},
    prelude::*,
    primitives::Rectangle,
    text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder},
};

use crate::clock::Digits;

/// 1-bit image layer; set bits are drawn white, cleared bits black.
pub struct BitmapLayer {
    image: ImageRaw<'static, BinaryColor>,
    bounds: Rectangle,
}

impl BitmapLayer {
    pub fn new(image: ImageRaw<'static, BinaryColor>, position: Point) -> Self {
        let bounds = Rectangle::new(position, image.size());
        Self { image, bounds }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn draw<D>(&self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.draw_area(display, &self.bounds)
    }

    /// Redraw only the part of the bitmap underneath `area`
    pub fn draw_area<D>(&self, display: &mut D, area: &Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = area.intersection(&self.bounds);
        if area.is_zero_sized() {
            return Ok(());
        }

        let source = Rectangle::new(area.top_left - self.bounds.top_left, area.size);
        let sub_image = self.image.sub_image(&source);
        Image::new(&sub_image, area.top_left).draw(&mut display.color_converted::<BinaryColor>())
    }
}

/// Centre aligned label with a transparent background.
pub struct TextLayer {
    bounds: Rectangle,
    text: Digits,
    character_style: MonoTextStyle<'static, Rgb565>,
    dirty: bool,
}

impl TextLayer {
    /// Create a label as wide as `width` and as tall as one line of `font`
    pub fn new(top_left: Point, width: u32, font: &'static MonoFont<'static>, color: Rgb565) -> Self {
        Self {
            bounds: Rectangle::new(top_left, Size::new(width, font.character_size.height)),
            text: Digits::default(),
            character_style: MonoTextStyle::new(font, color),
            dirty: true,
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Replace the label text, marking the layer for redraw if it changed
    pub fn set_text(&mut self, text: Digits) {
        if text != self.text {
            self.text = text;
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Restore the background under the label and draw the text over it
    pub fn draw<D>(&mut self, display: &mut D, background: &BitmapLayer) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        background.draw_area(display, &self.bounds)?;

        let anchor = Point::new(self.bounds.center().x, self.bounds.top_left.y);
        Text::with_text_style(self.text.as_str(), anchor, self.character_style, text_style())
            .draw(display)?;

        self.dirty = false;
        Ok(())
    }
}

fn text_style() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Top)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_display::FrameBuffer;
    use embedded_graphics::mono_font::ascii::FONT_10X20;

    // 16x2 pixels, left half set
    const HALF: [u8; 4] = [0xff, 0x00, 0xff, 0x00];

    #[test]
    fn bitmap_maps_bits_to_black_and_white() {
        let mut display = FrameBuffer::new(Rgb565::RED);
        let layer = BitmapLayer::new(ImageRaw::new(&HALF, 16), Point::new(10, 10));
        layer.draw(&mut display).unwrap();

        assert_eq!(display.pixel(Point::new(10, 10)), Rgb565::WHITE);
        assert_eq!(display.pixel(Point::new(25, 11)), Rgb565::BLACK);
        assert_eq!(display.pixel(Point::new(9, 10)), Rgb565::RED);
    }

    #[test]
    fn partial_redraw_stays_inside_the_area() {
        let mut display = FrameBuffer::new(Rgb565::RED);
        let layer = BitmapLayer::new(ImageRaw::new(&HALF, 16), Point::zero());
        layer
            .draw_area(&mut display, &Rectangle::new(Point::new(6, 0), Size::new(4, 1)))
            .unwrap();

        assert_eq!(display.writes, 4);
        assert_eq!(display.pixel(Point::new(7, 0)), Rgb565::WHITE);
        assert_eq!(display.pixel(Point::new(8, 0)), Rgb565::BLACK);
        assert_eq!(display.pixel(Point::new(7, 1)), Rgb565::RED);
    }

    #[test]
    fn redraw_only_when_text_changes() {
        let mut label = TextLayer::new(Point::zero(), 100, &FONT_10X20, Rgb565::BLACK);
        assert!(label.is_dirty());
        assert_eq!(label.text(), "00");

        let mut display = FrameBuffer::new(Rgb565::WHITE);
        let background = BitmapLayer::new(ImageRaw::new(&[0xff; 13 * 20], 100), Point::zero());
        label.draw(&mut display, &background).unwrap();
        assert!(!label.is_dirty());

        label.set_text(Digits::new(0));
        assert!(!label.is_dirty());

        label.set_text(Digits::new(42));
        assert!(label.is_dirty());
        assert_eq!(label.text(), "42");
    }

    #[test]
    fn text_is_drawn_inside_the_label() {
        let mut label = TextLayer::new(Point::new(0, 20), 100, &FONT_10X20, Rgb565::BLACK);
        let background = BitmapLayer::new(ImageRaw::new(&[0xff; 13 * 60], 100), Point::zero());
        let mut display = FrameBuffer::new(Rgb565::WHITE);
        label.draw(&mut display, &background).unwrap();

        let bounds = label.bounds();
        assert!(display.count_in(&bounds, Rgb565::BLACK) > 0);
        let above = Rectangle::new(Point::zero(), Size::new(100, 20));
        assert_eq!(display.count_in(&above, Rgb565::BLACK), 0);
    }
}
