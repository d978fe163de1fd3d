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

use std::env::args;
use std::path::Path;

use levin::config;
use levin::machine::UniversalMachine;
use levin::search::{levin_search, SearchState, SearchTrace};
use levin::task::Task;
use levin::trace::{write_search_state, write_solutions, SearchLog};
use levin::util::format_program;

fn main() {
    let path = args().nth(1).expect("no config file given");
    let config = config::load(Path::new(&path)).expect("couldn't load config");

    let task = Task::new(config.task);
    let machine = UniversalMachine::new(config.primitives);

    println!(
        "Levin search for task {} up to length {}",
        config.task, config.search_length
    );

    let search = match &config.search_log {
        Some(log_path) => {
            let mut log = SearchLog::create(log_path).expect("couldn't open search log");
            let search = run_search(&config, &task, &machine, &mut log);
            write_search_state(&log_path.with_extension("json"), &search)
                .expect("couldn't write search state");
            search
        }
        None => run_search(&config, &task, &machine, &mut ()),
    };

    write_solutions(&config.solutions_dir, &search.solutions)
        .expect("couldn't write solutions");

    for solution in search.solutions.iter().filter(|s| s.generalizes) {
        println!(
            "phase {}: {} (complexity {:.2})",
            solution.phase,
            format_program(&solution.program, ","),
            solution.complexity
        );
    }

    let generalizing = search.solutions.iter().filter(|s| s.generalizes).count();
    println!(
        "{} programs run over a space of {}; {} solutions, {} generalize",
        search.n_runs,
        search.space_size,
        search.solutions.len(),
        generalizing
    );
}

fn run_search(
    config: &config::SearchConfig,
    task: &Task,
    machine: &UniversalMachine,
    trace: &mut impl SearchTrace,
) -> SearchState {
    levin_search(task, machine, &config.machine, config.search_length, trace)
}
