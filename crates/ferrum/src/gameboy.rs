//! Contains the main entry point of this library.

use crate::{bus::Bus, cpu::Cpu, error::CoreError, joypad::GbKey};

/// T-cycles to execute per frame.
const CYCLES_PER_FRAME: u32 = (4194304.0 / 59.73) as u32;

/// Wraps all the individual components of the console.
pub struct GameBoy {
    /// The Sharp LR35902 CPU.
    cpu: Cpu,

    /// The memory bus interface.
    bus: Bus,
}

impl GameBoy {
    /// Create a new `GameBoy` instance from a pre-loaded ROM buffer.
    /// Every serial transfer hands its byte to `serial_callback`.
    ///
    /// Execution starts inside the bootrom; call `skip_bootrom` to
    /// start at the cartridge entry point instead.
    pub fn new(rom: &[u8], serial_callback: Box<dyn FnMut(u8)>) -> Result<Self, CoreError> {
        let gb = Self {
            cpu: Cpu::new(),
            bus: Bus::new(rom, serial_callback)?,
        };

        log::info!("loaded cartridge: {}", gb.game_title());

        Ok(gb)
    }

    /// Return the title of the game.
    pub fn game_title(&self) -> String {
        self.bus.cartridge.game_title()
    }

    /// Skip the bootrom, and initialize CPU registers and the
    /// boot latch to their post-boot values.
    pub fn skip_bootrom(&mut self) {
        self.cpu.skip_bootrom();
        self.bus.skip_bootrom();
    }

    /// Run one instruction (or service one interrupt), tick the
    /// peripherals by the consumed T-cycles and return them.
    pub fn step(&mut self) -> Result<u32, CoreError> {
        let cycles = self.cpu.execute_next(&mut self.bus)?;

        self.bus.tick_components(cycles);

        Ok(cycles)
    }

    /// Execute one frame's worth of instructions.
    /// Call this at a rate of 59.73 Hz.
    pub fn execute_frame(&mut self) -> Result<(), CoreError> {
        let mut cycles = 0;

        while cycles <= CYCLES_PER_FRAME {
            cycles += self.step()?;
        }

        Ok(())
    }

    /// Redirects to the joypad interface.
    pub fn key_down(&mut self, key: GbKey) {
        self.bus.joypad.key_down(key);
    }

    /// Redirects to the joypad interface.
    pub fn key_up(&mut self, key: GbKey) {
        self.bus.joypad.key_up(key);
    }

    /// Ask the emulation loop to stop.
    pub fn request_exit(&mut self) {
        self.bus.joypad.request_exit();
    }

    /// Has the host asked the emulation loop to stop?
    pub fn exit_requested(&self) -> bool {
        self.bus.joypad.exit_requested()
    }
}
