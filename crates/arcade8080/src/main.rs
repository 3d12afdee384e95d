use std::time::Duration;

use anyhow::{bail, Context, Result};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(rom_path) = args.next() else {
        bail!(
            "No ROM path provided.\n\
             Usage: arcade8080 <rom> [seconds]\n\
             for example: arcade8080 assets/roms/space_invaders/invaders.rom 10"
        );
    };
    let limit = args
        .next()
        .map(|secs| {
            secs.parse::<f64>()
                .with_context(|| format!("invalid run time '{}'", secs))
                .and_then(|secs| {
                    Duration::try_from_secs_f64(secs)
                        .with_context(|| format!("invalid run time '{}'", secs))
                })
        })
        .transpose()?;

    log::info!("Playing ROM path: '{}'", rom_path);
    let rom =
        std::fs::read(&rom_path).with_context(|| format!("failed to read ROM '{}'", rom_path))?;

    arcade8080::run(&rom, limit)
}
