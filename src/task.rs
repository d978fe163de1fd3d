// Target sequences and their match predicates.

use std::fmt;

use serde::Deserialize;

/// The built-in target sequences.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    Position,
    Count,
    Even,
    Odd,
    Fizz,
    FizzComplete,
    Buzz,
    BuzzComplete,
    Fizzbuzz,
    FizzbuzzComplete,
    NegativeOne,
    NegativeOneTwoThree,
}

impl TaskKind {
    pub fn name(self) -> &'static str {
        match self {
            TaskKind::Position => "POSITION",
            TaskKind::Count => "COUNT",
            TaskKind::Even => "EVEN",
            TaskKind::Odd => "ODD",
            TaskKind::Fizz => "FIZZ",
            TaskKind::FizzComplete => "FIZZ_COMPLETE",
            TaskKind::Buzz => "BUZZ",
            TaskKind::BuzzComplete => "BUZZ_COMPLETE",
            TaskKind::Fizzbuzz => "FIZZBUZZ",
            TaskKind::FizzbuzzComplete => "FIZZBUZZ_COMPLETE",
            TaskKind::NegativeOne => "NEGATIVE_ONE",
            TaskKind::NegativeOneTwoThree => "NEGATIVE_ONE_TWO_THREE",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Default target length; the training probe reaches index 94.
const TARGET_SIZE: usize = 100;

/// Training probe indices, three triples.
const SAMPLES: [[usize; 3]; 3] = [[5, 17, 86], [13, 55, 58], [40, 87, 94]];

/// A target sequence together with its match predicates. A candidate
/// counts as a solution when its weight bank matches the probe cells; it
/// generalizes when the whole bank reproduces the target.
pub struct Task {
    pub kind: TaskKind,
    pub target: Vec<i16>,
}

impl Task {
    pub fn new(kind: TaskKind) -> Task {
        Task::with_size(kind, TARGET_SIZE)
    }

    pub fn with_size(kind: TaskKind, size: usize) -> Task {
        let target = (1..=size as i64)
            .map(|x| match kind {
                TaskKind::Position => x as i16,
                TaskKind::Count => 1,
                TaskKind::Even => (x % 2 == 0) as i16,
                TaskKind::Odd => ((x + 1) % 2 == 0) as i16,
                TaskKind::Fizz => (x % 3 == 0) as i16,
                TaskKind::FizzComplete => {
                    if x % 3 != 0 {
                        x as i16
                    } else {
                        -1
                    }
                }
                TaskKind::Buzz => (x % 5 == 0) as i16,
                TaskKind::BuzzComplete => {
                    if x % 5 != 0 {
                        x as i16
                    } else {
                        -1
                    }
                }
                TaskKind::Fizzbuzz => (x % 3 == 0) as i16 + 2 * (x % 5 == 0) as i16,
                TaskKind::FizzbuzzComplete => {
                    if x % 3 == 0 || x % 5 == 0 {
                        -((x % 3 == 0) as i16 + 2 * (x % 5 == 0) as i16)
                    } else {
                        x as i16
                    }
                }
                TaskKind::NegativeOne => -1,
                TaskKind::NegativeOneTwoThree => -(((x - 1) % 3) as i16 + 1),
            })
            .collect();
        Task { kind, target }
    }

    /// Do the nine probe cells match the target?
    pub fn matches_samples(&self, weights: &[i16]) -> bool {
        SAMPLES
            .iter()
            .flatten()
            .all(|&i| weights.get(i).copied() == Some(self.target[i]))
    }

    /// Does the bank reproduce the whole target? Compared in ten
    /// contiguous segments so a mismatch is found early.
    pub fn matches_all(&self, weights: &[i16]) -> bool {
        if weights.len() < self.target.len() {
            return false;
        }
        let chunk = self.target.len() / 10;
        (0..10).all(|i| {
            let j = i * chunk;
            weights[j..j + chunk] == self.target[j..j + chunk]
        })
    }
}
