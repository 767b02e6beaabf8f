//! Cycle-accurate core: bus, flat memory, and the CPU fetch/decode/execute
//! state machine. See `app` for the driver binary that wires these
//! together into a running emulator.

pub mod bus;
pub mod cpu;
pub mod machine;
pub mod memory;
