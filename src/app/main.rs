//! Driver binary: loads a cartridge image, wires up a `Machine`, and runs
//! it to completion or until a shutdown signal arrives.

use dmg_core::machine::Machine;
use log::{error, info, warn};
use std::env;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

const DEFAULT_CARTRIDGE_PATH: &str = "roms/test.gb";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let cartridge_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CARTRIDGE_PATH);

    let mut machine = Machine::new();
    match fs::read(cartridge_path) {
        Ok(data) => {
            info!("loaded cartridge {} ({} bytes)", cartridge_path, data.len());
            machine.load_cartridge(&data);
        }
        Err(e) => {
            warn!("could not read cartridge {}: {} - running with empty RAM", cartridge_path, e);
        }
    }

    let running = Arc::new(AtomicBool::new(true));
    let handler_flag = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        handler_flag.store(false, Ordering::SeqCst);
    }) {
        warn!("failed to install signal handler: {}", e);
    }

    let fatal = machine.run(|| running.load(Ordering::SeqCst));

    if let Some(msg) = fatal {
        error!("{}", msg);
        std::process::exit(1);
    }
    info!("emulation stopped");
}
