use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use ferrum::GameBoy;

const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[clap(name = "Ferrum GB")]
#[clap(version = PKG_VERSION, about = "A simple Game Boy (DMG) emulator.")]
struct Opt {
    /// The Game Boy ROM file to execute.
    rom_file: PathBuf,

    /// Execute the bootrom instead of skipping straight
    /// to the cartridge.
    #[clap(short, long)]
    bootrom: bool,

    /// Turn on basic logging support.
    #[clap(short, long)]
    logging: bool,
}

/// Load the ROM and run the emulation loop.
/// Serial output goes to stdout, one byte at a time.
fn run(opts: &Opt) -> Result<(), String> {
    let rom = std::fs::read(&opts.rom_file)
        .map_err(|e| format!("failed to read {}: {}", opts.rom_file.display(), e))?;

    let serial_sink = Box::new(|byte: u8| {
        let mut stdout = io::stdout();

        let _ = stdout.write_all(&[byte]);
        let _ = stdout.flush();
    });

    let mut gb = GameBoy::new(&rom, serial_sink).map_err(|e| e.to_string())?;

    if !opts.bootrom {
        gb.skip_bootrom();
    }

    log::info!("running {}", gb.game_title());

    while !gb.exit_requested() {
        gb.execute_frame().map_err(|e| e.to_string())?;
    }

    Ok(())
}

pub fn main() {
    let opts = Opt::parse();

    if opts.logging {
        env_logger::builder()
            .target(env_logger::Target::Stderr)
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    if let Err(message) = run(&opts) {
        eprintln!("[ERROR] {}", message);
        process::exit(1);
    }
}
