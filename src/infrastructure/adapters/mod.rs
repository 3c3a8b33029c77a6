//! Session provider adapters

pub mod console;
#[cfg(test)]
pub mod memory;
