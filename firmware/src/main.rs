#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// RISC-V runtime
use riscv_rt as _;

// Panic handler
use panic_halt as _;

use embassy_executor::Spawner;
use static_cell::StaticCell;

use morsekey_core::*;
use morsekey_firmware::*;

// Static resources
static BOARD: StaticCell<MockBoard> = StaticCell::new();

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("🔧 Morsekey firmware starting...");

    // Board bring-up (mock until the target HAL lands)
    let board = BOARD.init(MockBoard::new());
    #[cfg(feature = "defmt")]
    defmt::info!("✅ Board initialized");

    // Timing thresholds for the ~63 Hz tick
    let config = default_config();
    #[cfg(feature = "defmt")]
    defmt::info!(
        "⚙️ Decoder config: dot/dash {} ticks, gap {} ticks",
        config.dot_dash_ticks,
        config.symbol_gap_ticks
    );

    #[cfg(feature = "defmt")]
    defmt::info!("🚀 Spawning keyboard task...");
    spawner.must_spawn(keyboard_task(board, config));

    #[cfg(feature = "defmt")]
    defmt::info!("✨ Morsekey ready!");

    // Main supervision loop
    loop {
        embassy_time::Timer::after(embassy_time::Duration::from_secs(1)).await;
        #[cfg(feature = "defmt")]
        defmt::trace!("💓 Heartbeat");
    }
}
