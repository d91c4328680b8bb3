use super::Cartridge;

/// Cartridge with no MBC chip, just two ROM banks.
pub struct Mbc0 {
    /// Two ROM banks each of 16 KB.
    rom: Vec<u8>,
}

impl Mbc0 {
    /// Create a new `Mbc0` instance.
    pub fn new(rom: &[u8]) -> Self {
        Self { rom: rom.to_vec() }
    }
}

impl Cartridge for Mbc0 {
    fn read_byte(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.rom.get(addr as usize).copied().unwrap_or(0xFF),

            // There is no external RAM.
            _ => 0xFF,
        }
    }

    fn write_byte(&mut self, _: u16, _: u8) {
        /* writes are ignored when there is no MBC */
    }

    fn game_title(&self) -> String {
        super::title_from_header(&self.rom)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::blank_rom;
    use super::*;

    #[test]
    fn rom_reads_are_direct_and_writes_are_ignored() {
        let mut image = blank_rom(0x00, 0, 0);
        image[0x0000] = 0x12;
        image[0x7FFF] = 0x34;

        let mut cartridge = Mbc0::new(&image);

        cartridge.write_byte(0x0000, 0xFF);
        cartridge.write_byte(0x2000, 0x05);

        assert_eq!(cartridge.read_byte(0x0000), 0x12);
        assert_eq!(cartridge.read_byte(0x7FFF), 0x34);
    }

    #[test]
    fn ram_region_reads_open_bus() {
        let cartridge = Mbc0::new(&blank_rom(0x00, 0, 0));

        assert_eq!(cartridge.read_byte(0xA000), 0xFF);
        assert_eq!(cartridge.read_byte(0xBFFF), 0xFF);
    }
}
