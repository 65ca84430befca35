#![no_std]
#![no_main]

use core::fmt::Write;

use debounced_button::{
    ClickEvent, ClickTimings, Clock, DebouncedButton, EventQueue, Interval, Pulse,
};
use defmt_rtt as _;
use embedded_hal::digital::OutputPin;
use heapless::String;
use panic_halt as _;
use rp2040_hal::{
    clocks::init_clocks_and_plls, gpio::PinState, pac, sio::Sio, watchdog::Watchdog, Timer,
};
use usb_device::{class_prelude::*, prelude::*};
use usbd_serial::{SerialPort, USB_CLASS_CDC};

const CRYSTAL_FREQ: u32 = 12_000_000; // System frequency in Hz

// LED on for the first 50 ms of every second
const BLINK_PERIOD_MS: u32 = 1_000;
const BLINK_WIDTH_MS: u32 = 50;

// Heartbeat on the debug probe
const HEARTBEAT_MS: u32 = 10_000;

// USB polls spent on a full CDC FIFO before an event line is given up
const SERIAL_WRITE_ATTEMPTS: u32 = 1_000;

const BUTTON_TIMINGS: ClickTimings = ClickTimings::DEFAULT;

#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

/// Millisecond view of the 1 MHz system timer. Wraps after ~49 days.
struct BoardClock(Timer);

impl Clock for BoardClock {
    fn now_ms(&mut self) -> u32 {
        (self.0.get_counter().ticks() / 1_000) as u32
    }
}

fn event_line(event: ClickEvent) -> &'static str {
    match event {
        ClickEvent::Click => "onClick called",
        ClickEvent::LongClick => "onLongClick called",
        ClickEvent::DoubleClick => "onDoubleClick called",
    }
}

#[rp2040_hal::entry]
fn main() -> ! {
    /////////////////////////////////////
    // Setup Hardware
    /////////////////////////////////////

    let mut pac = pac::Peripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Initialise System Clock
    let sys_clocks = init_clocks_and_plls(
        CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .unwrap();

    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &sys_clocks);
    let mut clock = BoardClock(timer);

    let sio = Sio::new(pac.SIO);
    let pins = rp2040_hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    /////////////////////////////////////
    // Setup USB
    /////////////////////////////////////

    let usb_bus = UsbBusAllocator::new(rp2040_hal::usb::UsbBus::new(
        pac.USBCTRL_REGS,
        pac.USBCTRL_DPRAM,
        sys_clocks.usb_clock,
        true,
        &mut pac.RESETS,
    ));

    let mut serial = SerialPort::new(&usb_bus);
    let mut usb_dev = UsbDeviceBuilder::new(&usb_bus, UsbVidPid(0x16c0, 0x27dd))
        .device_class(USB_CLASS_CDC)
        .build();

    /////////////////////////////////////
    // Setup Pins
    /////////////////////////////////////

    // On-Board LED
    let mut led_pin = pins.gpio25.into_push_pull_output_in_state(PinState::Low);

    // Pushbutton to GND, idles high through the internal pull-up
    let button_pin = pins.gpio14.into_pull_up_input();

    /////////////////////////////////////
    // "Connect" Pins to Logic
    /////////////////////////////////////

    let mut button = DebouncedButton::new(button_pin, BUTTON_TIMINGS).unwrap();
    let mut events: EventQueue<4> = EventQueue::new();

    let blink = Pulse::new(BLINK_PERIOD_MS, BLINK_WIDTH_MS);
    let mut heartbeat = Interval::new(clock.now_ms(), HEARTBEAT_MS);
    let mut lost_lines: u32 = 0;

    defmt::info!("button ready, timings {}", button.timings());

    /////////////////////////////////////
    // Main Loop
    /////////////////////////////////////

    loop {
        let now = clock.now_ms();

        // handle button
        button.poll_notify(now, &mut events).unwrap();

        // handle blinking LED
        if blink.is_on(now) {
            led_pin.set_high().unwrap();
        } else {
            led_pin.set_low().unwrap();
        }

        if heartbeat.is_due(now) {
            defmt::debug!(
                "alive at {} ms, {} events dropped, {} lines lost",
                now,
                events.dropped(),
                lost_lines
            );
        }

        // handle USB communication
        usb_dev.poll(&mut [&mut serial]);

        // report events
        while let Some(event) = events.pop() {
            defmt::info!("{} at {} ms", event, now);
            let mut line: String<48> = String::new();
            if write!(line, "{} at {} ms\r\n", event_line(event), now).is_err() {
                continue;
            }
            // bounded wait, nobody may be reading the port
            let mut buf = line.as_bytes();
            let mut attempts = 0;
            while !buf.is_empty() {
                match serial.write(buf) {
                    Ok(n) if n > 0 => buf = &buf[n..],
                    Ok(_) | Err(UsbError::WouldBlock) if attempts < SERIAL_WRITE_ATTEMPTS => {
                        attempts += 1;
                    }
                    _ => {
                        lost_lines = lost_lines.wrapping_add(1);
                        defmt::warn!("{} line lost, {} bytes unsent", event, buf.len());
                        break;
                    }
                }
                // let the USB stack move the IN packet to the host
                usb_dev.poll(&mut [&mut serial]);
            }
        }
    }
}
