use std::num::ParseIntError;

#[macro_export]
macro_rules! trace(
    ( $($thing:expr),* ) => { if cfg!(test) { println! { $($thing),* } } };
);

// Parse a comma separated program of integers, e.g. "1,0,2,0".
pub fn parse_program(text: &str) -> Result<Vec<i64>, ParseIntError> {
    text.split(',').map(|cell| cell.trim().parse()).collect()
}

pub fn format_program(program: &[i64], sep: &str) -> String {
    program
        .iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}
