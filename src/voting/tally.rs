use crate::models::Fight;
use crate::voting::{Comparison, Tally};
use std::cmp::Ordering;

pub fn tally(fight: Option<&Fight>) -> Tally {
    let Some(fight) = fight else {
        return Tally::default();
    };

    let [a, b] = &fight.foods;
    // A stored value matching neither contestant is counted in `total` only.
    let count_a = fight.votes.values().filter(|choice| *choice == a).count();
    let count_b = fight.votes.values().filter(|choice| *choice == b).count();

    Tally {
        a: a.clone(),
        b: b.clone(),
        count_a,
        count_b,
        total: fight.votes.len(),
    }
}

pub fn compare(tally: &Tally) -> Comparison {
    if tally.a.is_empty() || tally.b.is_empty() {
        return Comparison::Empty;
    }

    let (winner, loser) = match tally.count_a.cmp(&tally.count_b) {
        Ordering::Equal => return Comparison::Tie,
        Ordering::Greater => ((&tally.a, tally.count_a), (&tally.b, tally.count_b)),
        Ordering::Less => ((&tally.b, tally.count_b), (&tally.a, tally.count_a)),
    };

    Comparison::Winner {
        label: winner.0.clone(),
        winning_count: winner.1,
        losing_label: loser.0.clone(),
        losing_count: loser.1,
    }
}
