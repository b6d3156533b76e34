//! Digital watchface: hours above minutes over a background image

use chrono::NaiveDateTime;
use embedded_graphics::{
    image::ImageRaw,
    pixelcolor::{BinaryColor, Rgb565},
    prelude::*,
};
use profont::PROFONT_24_POINT;

use super::{
    layer::{BitmapLayer, TextLayer},
    ClockSettings, WatchFace,
};
use crate::clock::{self, ClockState};

const BACKGROUND_WIDTH: u32 = 240;
static BACKGROUND: &[u8] = include_bytes!("../../assets/background.raw");

const WINDOW_COLOR: Rgb565 = Rgb565::BLACK;
const TEXT_COLOR: Rgb565 = Rgb565::BLACK;

/// Horizontal inset of both labels
const LABEL_INSET: i32 = 4;
const HOUR_TOP: i32 = 37;
const MINUTE_TOP: i32 = 140;

/// Layers of the started watchface
pub struct ScreenState {
    background: BitmapLayer,
    hour_layer: TextLayer,
    minute_layer: TextLayer,
    clock: ClockState,
}

impl ScreenState {
    /// Lay out the layers for a display of the given bounds
    pub fn new(size: Size) -> Self {
        let background = BitmapLayer::new(
            ImageRaw::<BinaryColor>::new(BACKGROUND, BACKGROUND_WIDTH),
            Point::zero(),
        );
        let label_width = size.width.saturating_sub(LABEL_INSET as u32);

        Self {
            background,
            hour_layer: TextLayer::new(
                Point::new(LABEL_INSET, HOUR_TOP),
                label_width,
                &PROFONT_24_POINT,
                TEXT_COLOR,
            ),
            minute_layer: TextLayer::new(
                Point::new(LABEL_INSET, MINUTE_TOP),
                label_width,
                &PROFONT_24_POINT,
                TEXT_COLOR,
            ),
            clock: ClockState::default(),
        }
    }

    pub fn clock(&self) -> ClockState {
        self.clock
    }

    pub fn hour_layer(&self) -> &TextLayer {
        &self.hour_layer
    }

    pub fn minute_layer(&self) -> &TextLayer {
        &self.minute_layer
    }

    fn set_clock(&mut self, clock: ClockState) {
        self.clock = clock;
        self.hour_layer.set_text(clock.hour);
        self.minute_layer.set_text(clock.minute);
    }

    /// Paint the whole window
    fn draw<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        display.clear(WINDOW_COLOR)?;
        self.background.draw(display)?;
        self.hour_layer.draw(display, &self.background)?;
        self.minute_layer.draw(display, &self.background)
    }

    /// Repaint labels whose text changed
    fn draw_dirty<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.hour_layer.is_dirty() {
            self.hour_layer.draw(display, &self.background)?;
        }
        if self.minute_layer.is_dirty() {
            self.minute_layer.draw(display, &self.background)?;
        }
        Ok(())
    }
}

/// Basic digital watchface
#[derive(Default)]
pub struct DigitalWatchFace {
    screen: Option<ScreenState>,
}

impl DigitalWatchFace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen layers, if started
    pub fn screen(&self) -> Option<&ScreenState> {
        self.screen.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.screen.is_some()
    }
}

impl<D> WatchFace<D> for DigitalWatchFace
where
    D: DrawTarget<Color = Rgb565>,
{
    fn on_start(
        &mut self,
        display: &mut D,
        now: &NaiveDateTime,
        settings: &dyn ClockSettings,
    ) -> Result<(), D::Error> {
        if self.screen.is_some() {
            debug!("Watchface already started, rebuilding screen");
        }

        let mut screen = ScreenState::new(display.bounding_box().size);
        // Show the time right away instead of waiting for the first tick
        screen.set_clock(clock::format(now, settings.display_preference()));
        let result = screen.draw(display);
        self.screen = Some(screen);

        info!("Watchface started");
        result
    }

    fn on_tick(
        &mut self,
        display: &mut D,
        now: &NaiveDateTime,
        settings: &dyn ClockSettings,
    ) -> Result<(), D::Error> {
        let Some(screen) = self.screen.as_mut() else {
            debug!("Tick ignored, watchface not started");
            return Ok(());
        };

        let state = clock::format(now, settings.display_preference());
        screen.set_clock(state);
        debug!("Showing {}", state);

        screen.draw_dirty(display)
    }

    fn on_stop(&mut self, display: &mut D) -> Result<(), D::Error> {
        if self.screen.take().is_none() {
            return Ok(());
        }

        info!("Watchface stopped");
        display.clear(WINDOW_COLOR)
    }
}
