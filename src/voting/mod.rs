pub mod tally;

pub use tally::{compare, tally};

// Per-contestant counts for one fight at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub a: String,
    pub b: String,
    pub count_a: usize,
    pub count_b: usize,
    pub total: usize,
}

// Judgment derived from a tally. Equal counts are always a tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Empty,
    Tie,
    Winner {
        label: String,
        winning_count: usize,
        losing_label: String,
        losing_count: usize,
    },
}
