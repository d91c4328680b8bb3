use crate::error::CoreError;

mod mbc0;
mod mbc1;

/// Trait implemented by all cartridges.
pub trait Cartridge {
    /// Read a byte from the given address.
    fn read_byte(&self, addr: u16) -> u8;

    /// Write a byte to the given address.
    fn write_byte(&mut self, addr: u16, value: u8);

    /// Return the title of the game from the cartridge header.
    fn game_title(&self) -> String;
}

/// Number of 16 KB ROM banks for a header size code.
pub(crate) fn rom_banks(code: u8) -> usize {
    match code {
        0..=8 => 2 << code,
        _ => 1,
    }
}

/// Number of 8 KB RAM banks for a header size code.
pub(crate) fn ram_banks(code: u8) -> usize {
    match code {
        1 | 2 => 1,
        3 => 4,
        4 => 16,
        5 => 8,
        _ => 0,
    }
}

/// Printable title bytes from header 0x134..0x143.
pub(crate) fn title_from_header(rom: &[u8]) -> String {
    String::from_utf8_lossy(&rom[0x134..0x143])
        .trim_end_matches('\0')
        .into()
}

/// Validate the cartridge header and build the matching MBC.
pub fn make_cartridge(rom: &[u8]) -> Result<Box<dyn Cartridge>, CoreError> {
    if rom.len() < 0x150 {
        return Err(CoreError::CartridgeTooShort { len: rom.len() });
    }

    match rom[0x0147] {
        0x00 => Ok(Box::new(mbc0::Mbc0::new(rom))),
        0x01..=0x03 => Ok(Box::new(mbc1::Mbc1::new(rom))),

        code => Err(CoreError::UnsupportedMbc { code }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn blank_rom(mbc: u8, rom_code: u8, ram_code: u8) -> Vec<u8> {
        let mut rom = vec![0u8; 0x4000 * rom_banks(rom_code)];

        rom[0x134..0x13D].copy_from_slice(b"TEST CART");
        rom[0x147] = mbc;
        rom[0x148] = rom_code;
        rom[0x149] = ram_code;

        rom
    }

    #[test]
    fn short_image_is_rejected() {
        let rom = vec![0u8; 0x14F];

        assert!(matches!(
            make_cartridge(&rom),
            Err(CoreError::CartridgeTooShort { len: 0x14F })
        ));
    }

    #[test]
    fn unsupported_mbc_is_rejected() {
        let rom = blank_rom(0x19, 0, 0);

        assert!(matches!(
            make_cartridge(&rom),
            Err(CoreError::UnsupportedMbc { code: 0x19 })
        ));
    }

    #[test]
    fn supported_types_are_accepted() {
        for mbc in [0x00, 0x01, 0x02, 0x03] {
            assert!(make_cartridge(&blank_rom(mbc, 1, 2)).is_ok());
        }
    }

    #[test]
    fn bank_count_decoding() {
        assert_eq!(rom_banks(0), 2);
        assert_eq!(rom_banks(5), 64);
        assert_eq!(rom_banks(8), 512);
        assert_eq!(rom_banks(0x52), 1);

        assert_eq!(ram_banks(0), 0);
        assert_eq!(ram_banks(1), 1);
        assert_eq!(ram_banks(2), 1);
        assert_eq!(ram_banks(3), 4);
        assert_eq!(ram_banks(4), 16);
        assert_eq!(ram_banks(5), 8);
        assert_eq!(ram_banks(9), 0);
    }

    #[test]
    fn title_is_read_from_header() {
        let cartridge = make_cartridge(&blank_rom(0x00, 0, 0)).unwrap();

        assert_eq!(cartridge.game_title(), "TEST CART");
    }
}
