//! In-memory stand-ins for the bus and the delay source.
//!
//! `MockBus` behaves like a flat register file. Reads of a register can be
//! scripted with a queue of results that is drained before falling back to
//! the register file, which is enough to model a chip that disappears during
//! a reset. Every access is recorded so tests can check the exact traffic.

use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::fmt;

use crate::bus::RegisterBus;
use crate::delay::DelayMs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockBusError(pub String);

impl fmt::Display for MockBusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mock bus error: {}", self.0)
    }
}

impl StdError for MockBusError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Read(u8),
    Write(u8, u8),
}

#[derive(Debug)]
pub struct MockBus {
    regmap: [u8; 256],
    scripted: HashMap<u8, VecDeque<Result<u8, MockBusError>>>,
    failing_writes: HashSet<u8>,
    ops: Vec<BusOp>,
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBus {
    pub fn new() -> Self {
        MockBus {
            regmap: [0; 256],
            scripted: HashMap::new(),
            failing_writes: HashSet::new(),
            ops: Vec::new(),
        }
    }

    /// Stores `data` in the register file starting at `offset`.
    pub fn write_regs(&mut self, offset: u8, data: &[u8]) {
        let start = offset as usize;
        self.regmap[start..start + data.len()].copy_from_slice(data);
    }

    /// Queues a value for the next unscripted read of `register`.
    pub fn queue_read(&mut self, register: u8, value: u8) {
        self.scripted
            .entry(register)
            .or_default()
            .push_back(Ok(value));
    }

    /// Queues a failure for the next unscripted read of `register`.
    pub fn queue_read_error(&mut self, register: u8) {
        self.scripted
            .entry(register)
            .or_default()
            .push_back(Err(MockBusError(format!("read of {:#04x} failed", register))));
    }

    /// Makes every write to `register` fail.
    pub fn fail_writes_to(&mut self, register: u8) {
        self.failing_writes.insert(register);
    }

    pub fn ops(&self) -> &[BusOp] {
        &self.ops
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                BusOp::Write(register, value) => Some((register, value)),
                BusOp::Read(_) => None,
            })
            .collect()
    }

    pub fn reads_of(&self, register: u8) -> usize {
        self.ops
            .iter()
            .filter(|op| **op == BusOp::Read(register))
            .count()
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl RegisterBus for MockBus {
    type Error = MockBusError;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        self.ops.push(BusOp::Read(register));
        if let Some(result) = self
            .scripted
            .get_mut(&register)
            .and_then(|queue| queue.pop_front())
        {
            return result;
        }
        Ok(self.regmap[register as usize])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.ops.push(BusOp::Write(register, value));
        if self.failing_writes.contains(&register) {
            return Err(MockBusError(format!("write of {:#04x} failed", register)));
        }
        self.regmap[register as usize] = value;
        Ok(())
    }
}

/// Records requested delays instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub calls: Vec<u32>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.calls.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayMs for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
    }
}
