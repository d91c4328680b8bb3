use crate::{
    apu::Apu,
    cartridge::{self, Cartridge},
    error::CoreError,
    joypad::Joypad,
    ppu::Ppu,
    serial::Serial,
    timer::Timer,
};

mod bootrom;

use self::bootrom::DMG_BOOT_ROM;

/// Implementation of the memory bus.
pub(crate) struct Bus {
    // The inserted cartridge.
    pub cartridge: Box<dyn Cartridge>,

    // 8 KB of Work RAM.
    pub work_ram: Box<[u8; 0x2000]>,

    // High RAM.
    pub high_ram: Box<[u8; 0x7F]>,

    // Object attribute memory, consumed by the PPU.
    pub oam: Box<[u8; 0xA0]>,

    /// The timer apparatus.
    /// DIV, TIMA and co.
    pub timer: Timer,

    /// The PPU stub.
    /// Contains VRAM and the LCD register file.
    pub ppu: Ppu,

    /// The APU stub.
    /// Contains NR** registers.
    pub apu: Apu,

    /// The serial port link.
    pub serial: Serial,

    /// The joypad subsystem.
    pub joypad: Joypad,

    /// $FF0F - IF register. (Set bits here to request interrupts).
    pub if_reg: u8,

    /// $FFFF - IE register. (Set bits here to enable interrupts).
    pub ie_reg: u8,

    /// $FF50 - BOOT register. Set to non-zero value to un-map bootrom.
    pub boot_reg: u8,
}

impl Bus {
    /// Create a new `Bus` instance.
    pub fn new(rom: &[u8], serial_callback: Box<dyn FnMut(u8)>) -> Result<Self, CoreError> {
        let cartridge = cartridge::make_cartridge(rom)?;

        Ok(Self {
            cartridge,
            work_ram: Box::new([0; 0x2000]),
            high_ram: Box::new([0; 0x7F]),
            oam: Box::new([0; 0xA0]),
            timer: Timer::new(),
            ppu: Ppu::new(),
            apu: Apu::new(),
            serial: Serial::new(serial_callback),
            joypad: Joypad::new(),
            if_reg: 0,
            ie_reg: 0,
            boot_reg: 0,
        })
    }

    /// Un-map the bootrom without executing it.
    pub fn skip_bootrom(&mut self) {
        self.boot_reg = 1;
    }

    /// Tick the components on the bus by the given amount of T-cycles,
    /// gathering their pending interrupts into IF.
    pub fn tick_components(&mut self, cycles: u32) {
        self.timer.tick(&mut self.if_reg, cycles);
        self.serial.update_interrupt_state(&mut self.if_reg);
        self.joypad.update_interrupt_state(&mut self.if_reg);
    }

    /// Read a byte from the given address.
    pub fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            // First 256 bytes map to the bootrom until it is disabled.
            0x0000..=0x00FF if self.boot_reg == 0 => DMG_BOOT_ROM[addr as usize],

            // ROM banks.
            0x0000..=0x7FFF => self.cartridge.read_byte(addr),

            // Video RAM, rerouted to the PPU stub.
            0x8000..=0x9FFF => self.ppu.read_byte(addr),

            // External RAM.
            0xA000..=0xBFFF => self.cartridge.read_byte(addr),

            // Work RAM and Echo RAM.
            0xC000..=0xDFFF | 0xE000..=0xFDFF => self.work_ram[(addr & 0x1FFF) as usize],

            // OAM RAM.
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],

            // Not usable.
            0xFEA0..=0xFEFF => 0xFF,

            // P1 - JOYP register.
            0xFF00 => self.joypad.read_byte(addr),

            // SB and SC.
            0xFF01..=0xFF02 => self.serial.read_byte(addr),

            // DIV, TIMA and co.
            0xFF04..=0xFF07 => self.timer.read_byte(addr),

            // IF register. The upper three bits are wired high.
            0xFF0F => self.if_reg | 0xE0,

            // APU's IO registers.
            0xFF10..=0xFF3F => self.apu.read_byte(addr),

            // PPU's IO registers.
            0xFF40..=0xFF4B => self.ppu.read_byte(addr),

            // BOOT register.
            0xFF50 => {
                if self.boot_reg != 0 {
                    0xFF
                } else {
                    0x00
                }
            }

            // High RAM.
            0xFF80..=0xFFFE => self.high_ram[(addr - 0xFF80) as usize],

            // IE register.
            0xFFFF => self.ie_reg,

            _ => 0xFF,
        }
    }

    /// Write a byte to the given address.
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        match addr {
            // The bootrom overlay is read-only.
            0x0000..=0x00FF if self.boot_reg == 0 => {}

            // ROM banks (MBC registers).
            0x0000..=0x7FFF => self.cartridge.write_byte(addr, value),

            // Video RAM, rerouted to the PPU stub.
            0x8000..=0x9FFF => self.ppu.write_byte(addr, value),

            // External RAM.
            0xA000..=0xBFFF => self.cartridge.write_byte(addr, value),

            // Work RAM and Echo RAM.
            0xC000..=0xDFFF | 0xE000..=0xFDFF => self.work_ram[(addr & 0x1FFF) as usize] = value,

            // OAM RAM.
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = value,

            // Not usable.
            0xFEA0..=0xFEFF => {}

            // P1 - JOYP register.
            0xFF00 => self.joypad.write_byte(addr, value),

            // SB and SC.
            0xFF01..=0xFF02 => self.serial.write_byte(addr, value),

            // DIV, TIMA and co.
            0xFF04..=0xFF07 => self.timer.write_byte(addr, value),

            // IF register.
            0xFF0F => self.if_reg = value | 0xE0,

            // APU's IO registers.
            0xFF10..=0xFF3F => self.apu.write_byte(addr, value),

            // PPU's IO registers.
            0xFF40..=0xFF4B => self.ppu.write_byte(addr, value),

            // BOOT register. Writing a non-zero value un-maps the
            // bootrom; it cannot be mapped back.
            0xFF50 => {
                if self.boot_reg == 0 {
                    self.boot_reg = value;
                }
            }

            // High RAM.
            0xFF80..=0xFFFE => self.high_ram[(addr - 0xFF80) as usize] = value,

            // IE register.
            0xFFFF => self.ie_reg = value,

            _ => {}
        }
    }

    /// Read a little-endian word from the given address.
    /// No alignment is required.
    pub fn read_word(&self, addr: u16) -> u16 {
        (self.read_byte(addr) as u16) | ((self.read_byte(addr.wrapping_add(1)) as u16) << 8)
    }

    /// Write a little-endian word to the given address.
    pub fn write_word(&mut self, addr: u16, value: u16) {
        self.write_byte(addr, value as u8);
        self.write_byte(addr.wrapping_add(1), (value >> 8) as u8);
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};

    use super::*;

    fn test_bus() -> Bus {
        let mut rom = vec![0u8; 0x8000];

        rom[0x000] = 0xAA;
        rom[0x0FF] = 0xBB;
        rom[0x147] = 0x00;

        Bus::new(&rom, Box::new(|_| {})).unwrap()
    }

    #[test]
    fn bootrom_overlays_the_cartridge_until_disabled() {
        let mut bus = test_bus();

        assert_eq!(bus.read_byte(0x0000), 0x31);
        assert_eq!(bus.read_byte(0x00FF), 0x50);

        // Reads past the overlay come from the cartridge.
        assert_eq!(bus.read_byte(0x0100), 0x00);

        bus.write_byte(0xFF50, 0x01);

        assert_eq!(bus.read_byte(0x0000), 0xAA);
        assert_eq!(bus.read_byte(0x00FF), 0xBB);
    }

    #[test]
    fn boot_latch_reads_back_its_state() {
        let mut bus = test_bus();

        assert_eq!(bus.read_byte(0xFF50), 0x00);

        bus.write_byte(0xFF50, 0x01);

        assert_eq!(bus.read_byte(0xFF50), 0xFF);
    }

    #[test]
    fn echo_ram_mirrors_work_ram() {
        let mut bus = test_bus();

        for addr in (0xE000u16..=0xFDFF).step_by(0x101) {
            bus.write_byte(addr - 0x2000, 0x5A);
            assert_eq!(bus.read_byte(addr), 0x5A);

            bus.write_byte(addr, 0xA5);
            assert_eq!(bus.read_byte(addr - 0x2000), 0xA5);
        }
    }

    #[test]
    fn prohibited_region_reads_open_bus_and_discards_writes() {
        let mut bus = test_bus();

        for addr in 0xFEA0u16..=0xFEFF {
            bus.write_byte(addr, 0x00);
            assert_eq!(bus.read_byte(addr), 0xFF);
        }
    }

    #[test]
    fn if_upper_bits_are_wired_high() {
        let mut bus = test_bus();

        bus.write_byte(0xFF0F, 0x04);
        assert_eq!(bus.read_byte(0xFF0F), 0xE4);

        bus.if_reg = 0x01;
        assert_eq!(bus.read_byte(0xFF0F), 0xE1);
    }

    #[test]
    fn byte_round_trips_in_writable_regions() {
        let mut bus = test_bus();
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x42);

        for _ in 0..256 {
            let value: u8 = rng.gen();

            let wram = rng.gen_range(0xC000..=0xDFFF);
            bus.write_byte(wram, value);
            assert_eq!(bus.read_byte(wram), value);

            let hram = rng.gen_range(0xFF80..=0xFFFE);
            bus.write_byte(hram, value);
            assert_eq!(bus.read_byte(hram), value);

            let oam = rng.gen_range(0xFE00..=0xFE9F);
            bus.write_byte(oam, value);
            assert_eq!(bus.read_byte(oam), value);
        }
    }

    #[test]
    fn word_access_is_little_endian_and_unaligned() {
        let mut bus = test_bus();

        bus.write_word(0xC001, 0xBEEF);

        assert_eq!(bus.read_byte(0xC001), 0xEF);
        assert_eq!(bus.read_byte(0xC002), 0xBE);
        assert_eq!(bus.read_word(0xC001), 0xBEEF);
    }

    #[test]
    fn peripheral_interrupts_gather_into_if() {
        let mut bus = test_bus();

        // Timer primed one tick from overflow.
        bus.write_byte(0xFF06, 0x00);
        bus.write_byte(0xFF05, 0xFF);
        bus.write_byte(0xFF07, 0x05);

        bus.tick_components(16);

        assert_eq!(bus.if_reg & 0x04, 0x04);
    }
}
