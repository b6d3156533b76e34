//! Button control module for PineTime

use debouncr::{debounce_2, Debouncer, Edge, Repeat2};
use embassy_nrf::{
    gpio::{Input, Output},
    peripherals::{P0_13, P0_15},
};
use embassy_time::{Duration, Instant, Timer};

/// A completed button press
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum Press {
    Short,
    Long,
}

struct ButtonConfig<'a> {
    /// Button detection pin (high/low)
    pin_button: Input<'a, P0_13>,
    /// Button enable pin
    pin_enable: Output<'a, P0_15>,
    /// Debouncer for button
    debouncer: Debouncer<u8, Repeat2>,
    /// Minimum hold time of a long press
    long_press: Duration,
}

pub struct Button {
    /// Button configuration
    config: ButtonConfig<'static>,
    /// When the current press started
    pressed_at: Option<Instant>,
}

impl Button {
    /// Configure button on boot
    pub fn init(
        button_pin: Input<'static, P0_13>,
        enable_pin: Output<'static, P0_15>,
        long_press: Duration,
    ) -> Self {
        Self {
            config: ButtonConfig {
                pin_button: button_pin,
                pin_enable: enable_pin,
                debouncer: debounce_2(false),
                long_press,
            },
            pressed_at: None,
        }
    }

    /// Sample the button once, reporting a press when it is released
    pub async fn poll(&mut self) -> Option<Press> {
        let config = &mut self.config;

        // Enable button
        config.pin_enable.set_high();
        // The button needs a short time to give stable outputs
        Timer::after(Duration::from_nanos(1)).await;

        let edge = config.debouncer.update(config.pin_button.is_high());

        // Button consumes around 34µA when P0.15 is left high.
        // To reduce current consumption, set it low most of the time.
        config.pin_enable.set_low();

        match edge {
            Some(Edge::Rising) => {
                self.pressed_at = Some(Instant::now());
                None
            }
            Some(Edge::Falling) => self.pressed_at.take().map(|start| {
                if start.elapsed() >= config.long_press {
                    Press::Long
                } else {
                    Press::Short
                }
            }),
            None => None,
        }
    }
}
