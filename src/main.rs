#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::{unwrap, Display2Format};

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel};
use embassy_time::{Instant, Timer};

bind_interrupts!(struct Irqs {
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{
    backlight::Backlight,
    button::{Button, Press},
    display::Display,
};
use system::{
    config::{self, SystemConfig},
    settings::SystemSettings,
    time,
};

// Watchface
use watchface_core::{
    time::{until_next_minute, TimeManager},
    DigitalWatchFace, WatchFace,
};

/// Events handled by the watchface runner
#[derive(Clone, Copy, defmt::Format)]
enum WatchEvent {
    /// A full minute has passed
    Tick,
    /// Settings changed, redraw with the current time
    Refresh,
    /// Turn the screen on or off
    ToggleScreen,
}

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, WatchEvent, 4> = Channel::new();

static SETTINGS: SystemSettings = SystemSettings::new(config::DEFAULT_DISPLAY_PREFERENCE);

/// Sends a tick at every full minute.
#[embassy_executor::task(pool_size = 1)]
async fn minute_tick(clock: TimeManager) {
    loop {
        let now = clock.get_time(Instant::now());
        Timer::after(until_next_minute(&now)).await;
        EVENTS.send(WatchEvent::Tick).await;
    }
}

/// Polls the button state every 10ms
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button) {
    loop {
        match button.poll().await {
            Some(Press::Short) => EVENTS.send(WatchEvent::ToggleScreen).await,
            Some(Press::Long) => {
                let preference = SETTINGS.toggle_clock_format();
                defmt::info!("Clock format changed: {}", preference);
                EVENTS.send(WatchEvent::Refresh).await;
            }
            None => {}
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(config::BUTTON_POLL_INTERVAL).await;
    }
}

/// Owns the screen and drives the watchface lifecycle.
#[embassy_executor::task(pool_size = 1)]
async fn run_watchface(
    mut display: Display<'static, SPI2>,
    mut backlight: Backlight<'static>,
    clock: TimeManager,
) {
    let mut watchface = DigitalWatchFace::new();

    if let Err(e) = watchface.on_start(&mut display, &time::now(&clock), &SETTINGS) {
        defmt::warn!("Drawing watchface failed: {}", e);
    }
    if let Err(e) = backlight.set(config::BACKLIGHT_LEVEL) {
        defmt::warn!("Backlight unavailable: {}", e);
    }

    loop {
        let event = EVENTS.receive().await;
        defmt::debug!("Event: {}", event);

        let result = match event {
            WatchEvent::Tick | WatchEvent::Refresh => {
                watchface.on_tick(&mut display, &time::now(&clock), &SETTINGS)
            }
            WatchEvent::ToggleScreen if watchface.is_started() => {
                backlight.off();
                watchface.on_stop(&mut display)
            }
            WatchEvent::ToggleScreen => {
                let result = watchface.on_start(&mut display, &time::now(&clock), &SETTINGS);
                if let Err(e) = backlight.set(config::BACKLIGHT_LEVEL) {
                    defmt::warn!("Backlight unavailable: {}", e);
                }
                result
            }
        };

        if let Err(e) = result {
            defmt::warn!("Drawing watchface failed: {}", e);
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize Backlight, off until the first frame is drawn
    let backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        0,
    ));

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
        config::LONG_PRESS,
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));

    // Initialize clock
    let clock = unwrap!(time::init());
    defmt::info!("Local time: {}", Display2Format(&time::now(&clock)));

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(run_watchface(display, backlight, clock)));
    unwrap!(spawner.spawn(minute_tick(clock)));
    unwrap!(spawner.spawn(poll_button(button)));
}
