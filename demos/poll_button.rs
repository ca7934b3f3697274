//! A polled debounced button toggling an led on every press.
//! Target board: STM32F3DISCOVERY

// Handle the cases where the example is build with the wrong target architecture
#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_main)]
#![cfg_attr(all(target_arch = "arm", target_os = "none"), no_std)]

#[cfg(not(all(target_arch = "arm", target_os = "none")))]
fn main() {
    eprintln!("Error:");
    eprintln!("\tExample does not work with choosen target_arch.");
    eprintln!("\tBuild with for example --target thumbv7em-none-eabihf instead!");
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
use {
    core::sync::atomic::{AtomicU32, Ordering},
    cortex_m::peripheral::syst::SystClkSource,
    cortex_m_rt::{entry, exception},
    debounced_button::prelude::*,
    debounced_button::MillisClock,
    panic_halt as _,
    stm32f3xx_hal::{hal::digital::v2::OutputPin, prelude::*, stm32},
};

/// Milliseconds since boot, counted by the SysTick exception.
#[cfg(all(target_arch = "arm", target_os = "none"))]
static MILLIS: AtomicU32 = AtomicU32::new(0);

#[cfg(all(target_arch = "arm", target_os = "none"))]
struct SysTickClock;

#[cfg(all(target_arch = "arm", target_os = "none"))]
impl MillisClock for SysTickClock {
    fn now_millis(&self) -> u32 {
        MILLIS.load(Ordering::Relaxed)
    }
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
#[entry]
fn main() -> ! {
    let dp = stm32::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    let mut rcc = dp.RCC.constrain();
    let mut flash = dp.FLASH.constrain();
    let mut gpioe = dp.GPIOE.split(&mut rcc.ahb);
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    let clocks = rcc.cfgr.freeze(&mut flash.acr);

    // 1 kHz tick
    let mut syst = cp.SYST;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(clocks.sysclk().0 / 1_000 - 1);
    syst.clear_current();
    syst.enable_counter();
    syst.enable_interrupt();

    // Configure led, which is the "south" led on the stm32 discovery board
    let mut led = gpioe
        .pe13
        .into_push_pull_output(&mut gpioe.moder, &mut gpioe.otyper);
    led.set_low().unwrap();
    let mut led_state = false;

    // The mode is fixed by the HAL's type state.
    let user_button = gpioa
        .pa0
        .into_floating_input(&mut gpioa.moder, &mut gpioa.pupdr);

    // button is externally pulled down, and is pulled up via a button press
    let mut user_button = DebouncedInput::with_pullup(
        Preconfigured::new(user_button),
        Timer::new(SysTickClock),
        false,
    )
    .unwrap();
    user_button.set_debounce_timeout(20);

    loop {
        if user_button.on_pressed().unwrap() {
            // Toggle the led
            if led_state {
                led.set_low().unwrap();
            } else {
                led.set_high().unwrap();
            }
            led_state = !led_state
        }
    }
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
#[exception]
fn SysTick() {
    MILLIS.fetch_add(1, Ordering::Relaxed);
}
