// The halting taxonomy.
//
// Every way a run of the universal machine can end, normal or abnormal,
// is a halting code. The machine never raises an error to its caller; it
// parks one of these on the final state instead, and the search driver
// steers on it.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Halt {
    Stop,
    // Ran out of program, not out of time: the instruction pointer
    // reached the oracle address. The program may be extended and rerun.
    Continue,
    InvalidInstructionPointer,
    CurrentTimeLimit,
    InstructionOutOfSet,
    InvalidJump,
    WeightSizeOutBounds,
    WeightPointerOutBounds,
    IllegalRead,
    IllegalWrite,
    InputOutBounds,
    AllocateOutBounds,
    FreeOutBounds,
    Overflow,
}

// The result of any primitive operation.
pub type Result<T> = core::result::Result<T, Halt>;

impl Halt {
    /// Canonical name, as written to search logs and traces.
    pub fn name(self) -> &'static str {
        match self {
            Halt::Stop => "STOP",
            Halt::Continue => "CONTINUE",
            Halt::InvalidInstructionPointer => "ERROR_INVALID_INSTRUCTION_POINTER",
            Halt::CurrentTimeLimit => "ERROR_CURRENT_TIME_LIMIT",
            Halt::InstructionOutOfSet => "ERROR_INSTRUCTION_OUT_OF_SET",
            Halt::InvalidJump => "ERROR_INVALID_JUMP",
            Halt::WeightSizeOutBounds => "ERROR_WEIGHT_SIZE_OUT_BOUNDS",
            Halt::WeightPointerOutBounds => "ERROR_WEIGHT_POINTER_OUT_BOUNDS",
            Halt::IllegalRead => "ERROR_ILLEGAL_READ",
            Halt::IllegalWrite => "ERROR_ILLEGAL_WRITE",
            Halt::InputOutBounds => "ERROR_INPUT_OUT_BOUNDS",
            Halt::AllocateOutBounds => "ERROR_ALLOCATE_OUT_BOUNDS",
            Halt::FreeOutBounds => "ERROR_FREE_OUT_BOUNDS",
            Halt::Overflow => "ERROR_OVERFLOW",
        }
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
