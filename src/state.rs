// Machine state: program tape, work tape, weight bank, pointers.

use serde::Serialize;

use crate::config::MachineConfig;
use crate::halt::{Halt, Result};

/// Fixed bound on values entering the weight bank, independent of
/// `maxint`.
pub const WEIGHT_BOUND: i64 = 10_000;

/// The complete state of one program run.
///
/// Addresses are signed. `0..=max` indexes the program tape; `-1` down to
/// `min` indexes the work tape, cell `-k` being work tape entry `k - 1`.
/// `max = -1` denotes the empty program, `min = 0` an empty work tape.
#[derive(Clone, Debug)]
pub struct State {
    pub program_tape_size: usize,
    pub work_tape_size: usize,
    pub maxint: i64,
    pub n_weights: usize,
    pub halt: Option<Halt>,
    pub instruction_pointer: i64,
    pub min: i64,
    pub current_runtime: u64,
    pub weight_pointer: usize,
    pub jumped: bool,
    pub weights: Vec<i16>,
    pub program_tape: Vec<i64>,
    pub work_tape: Vec<i64>,
}

impl State {
    pub fn new(limits: &MachineConfig) -> State {
        State {
            program_tape_size: limits.program_tape_size,
            work_tape_size: limits.work_tape_size,
            maxint: limits.maxint,
            n_weights: limits.n_weights,
            halt: None,
            instruction_pointer: 0,
            min: 0,
            current_runtime: 0,
            weight_pointer: 0,
            jumped: false,
            weights: vec![0; limits.n_weights],
            program_tape: Vec::new(),
            work_tape: Vec::new(),
        }
    }

    /// Fresh state with the given program loaded. Keeping `program` within
    /// `program_tape_size` is the caller's contract.
    pub fn with_program(limits: &MachineConfig, program: Vec<i64>) -> State {
        debug_assert!(program.len() <= limits.program_tape_size);
        let mut state = State::new(limits);
        state.program_tape = program;
        state
    }

    /// Highest valid address; `-1` when the program tape is empty.
    pub fn max(&self) -> i64 {
        self.program_tape.len() as i64 - 1
    }

    /// The address one past the program. The instruction pointer reaching
    /// it signals CONTINUE.
    pub fn oracle_address(&self) -> i64 {
        self.max() + 1
    }

    pub fn read(&self, i: i64) -> Result<i64> {
        if i < self.min || i > self.max() {
            return Err(Halt::IllegalRead);
        }
        if i < 0 {
            Ok(self.work_tape[(-i - 1) as usize])
        } else {
            Ok(self.program_tape[i as usize])
        }
    }

    /// Store into a work tape cell, saturating to `[-maxint, maxint]`.
    pub fn write(&mut self, i: i64, value: i64) -> Result<()> {
        if i < self.min || i > -1 {
            return Err(Halt::IllegalWrite);
        }
        self.work_tape[(-i - 1) as usize] = value.max(-self.maxint).min(self.maxint);
        Ok(())
    }

    /// Extend the work tape with `count` zeroed cells. Bounds are checked
    /// by ALLOCATE before the call.
    pub fn alloc(&mut self, count: usize) {
        self.work_tape.extend(std::iter::repeat(0).take(count));
        self.min -= count as i64;
    }

    /// Drop the last `count` work tape cells; their contents are lost.
    pub fn free(&mut self, count: usize) {
        let keep = self.work_tape.len() - count;
        self.work_tape.truncate(keep);
        self.min += count as i64;
    }

    /// One observation line for the JSONL trace.
    pub fn to_json(&self) -> String {
        let snapshot = Snapshot {
            state: Meta {
                min: self.min,
                max: self.max(),
                halt: self.halt.map(Halt::name),
                instruction_pointer: self.instruction_pointer,
                current_runtime: self.current_runtime,
                weight_pointer: self.weight_pointer,
            },
            storage: Storage {
                program_tape: &self.program_tape,
                work_tape: &self.work_tape,
                weights: &self.weights,
            },
        };
        serde_json::to_string(&snapshot).expect("state snapshot serializes")
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    state: Meta,
    storage: Storage<'a>,
}

#[derive(Serialize)]
struct Meta {
    min: i64,
    max: i64,
    halt: Option<&'static str>,
    instruction_pointer: i64,
    current_runtime: u64,
    weight_pointer: usize,
}

#[derive(Serialize)]
struct Storage<'a> {
    program_tape: &'a [i64],
    work_tape: &'a [i64],
    weights: &'a [i16],
}
