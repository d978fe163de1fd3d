// levin: searching for low-complexity programs.
//
// Copyright (C) 2020  Brandon Lewis
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public License
// as published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this program.  If not, see
// <https://www.gnu.org/licenses/>.

// Replay a recorded program and stream its per-step trace:
//
//     replay 1,0,2,0 trace.jsonl [INITIAL|WEIGHT] [machine.ron]
//
// The optional RON file replays the program under the machine limits it
// was found with instead of the search defaults.

use std::env::args;
use std::fs::File;
use std::path::Path;

use levin::config::MachineConfig;
use levin::machine::UniversalMachine;
use levin::primitives::PrimitiveSet;
use levin::search::run_program;
use levin::trace::MachineTrace;
use levin::util::parse_program;

/// Replays get a flat budget instead of a search phase's.
const REPLAY_TIME_LIMIT: u64 = 1 << 20;

fn main() {
    let program = parse_program(&args().nth(1).expect("no program given"))
        .expect("program must be comma separated integers");
    let trace_path = args().nth(2).expect("no trace file given");
    let primitives = match args().nth(3).as_deref() {
        None | Some("INITIAL") => PrimitiveSet::Initial,
        Some("WEIGHT") => PrimitiveSet::Weight,
        Some(other) => panic!("unknown primitive set: {}", other),
    };

    let limits: MachineConfig = match args().nth(4) {
        Some(path) => {
            let reader = File::open(&path).expect("couldn't open machine config");
            ron::de::from_reader(reader).expect("couldn't parse machine config")
        }
        None => MachineConfig::default(),
    };
    assert!(
        program.len() <= limits.program_tape_size,
        "program exceeds the tape"
    );

    let machine = UniversalMachine::new(primitives);
    let mut trace =
        MachineTrace::create(Path::new(&trace_path)).expect("couldn't open trace file");
    let state = run_program(&machine, &limits, program, REPLAY_TIME_LIMIT, &mut trace);

    let halt = state.halt.expect("machine runs always halt");
    println!("halted with {} after {} steps", halt, state.current_runtime);
    println!("weights: {:?}", state.weights);
}
