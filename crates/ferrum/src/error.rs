use thiserror::Error;

/// Enumerates all the fatal faults the core can report.
///
/// Load-time errors surface from `GameBoy::new`, runtime errors from
/// `GameBoy::step`. Invalid memory accesses are never errors; prohibited
/// regions read 0xFF and discard writes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The ROM image ends before the cartridge header does.
    #[error("cartridge image is too short ({len} bytes, the header needs 0x150)")]
    CartridgeTooShort { len: usize },

    /// The cartridge requires an MBC this core does not implement.
    #[error("unsupported cartridge type {code:#04X}")]
    UnsupportedMbc { code: u8 },

    /// The CPU fetched an opcode with no defined behaviour.
    /// Real hardware freezes here; we abort instead.
    #[error("illegal opcode {opcode:#04X} at {pc:#06X}")]
    IllegalOpcode { opcode: u8, pc: u16 },
}
