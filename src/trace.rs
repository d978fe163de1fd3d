// File-backed trace sinks: the per-step JSONL machine trace, the
// per-candidate CSV search log, and the JSON artifacts written after a
// search. Logging is best-effort; a failed write never alters a run.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::halt::Halt;
use crate::machine::Observer;
use crate::search::{SearchState, SearchTrace, Solution};
use crate::state::State;

/// Streams one JSON snapshot per machine step.
pub struct MachineTrace<W: Write> {
    out: W,
}

impl MachineTrace<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<MachineTrace<BufWriter<File>>> {
        Ok(MachineTrace::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> MachineTrace<W> {
    pub fn new(out: W) -> MachineTrace<W> {
        MachineTrace { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Observer for MachineTrace<W> {
    fn observe(&mut self, state: &State) {
        let _ = writeln!(self.out, "{}", state.to_json());
    }
}

/// Appends one `program;halt;limit;phase` line per candidate run.
pub struct SearchLog<W: Write> {
    out: W,
}

impl SearchLog<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<SearchLog<BufWriter<File>>> {
        let mut out = BufWriter::new(File::create(path)?);
        writeln!(out, "Program;Halting Status;Current Runtime Limit;Phase")?;
        Ok(SearchLog::new(out))
    }
}

impl<W: Write> SearchLog<W> {
    pub fn new(out: W) -> SearchLog<W> {
        SearchLog { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SearchTrace for SearchLog<W> {
    fn record(&mut self, program: &[i64], halt: Halt, time_limit: u64, phase: u32) {
        let _ = writeln!(self.out, "{:?};{};{};{}", program, halt, time_limit, phase);
    }
}

/// Companion JSON dump of the final counters, written beside the CSV.
pub fn write_search_state(path: &Path, search: &SearchState) -> io::Result<()> {
    let json = serde_json::to_string(search).expect("search state serializes");
    fs::write(path, json)
}

/// One JSON file per solution, named `phase{P}_solution{K}.json` with `K`
/// counting within each phase.
pub fn write_solutions(dir: &Path, solutions: &[Solution]) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut counters: HashMap<u32, u32> = HashMap::new();
    for solution in solutions {
        let counter = counters.entry(solution.phase).or_insert(0);
        let name = format!("phase{}_solution{}.json", solution.phase, counter);
        *counter += 1;
        let json = serde_json::to_string(solution).expect("solution serializes");
        fs::write(dir.join(name), json)?;
    }
    Ok(())
}
