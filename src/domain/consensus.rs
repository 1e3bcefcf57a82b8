//! Pure consensus evaluation over a round's normalized vote tokens.

use std::collections::HashMap;

use crate::domain::room::Mode;

/// Outcome of evaluating one round of votes. `value` is set only when `met`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consensus {
    pub met: bool,
    pub value: Option<String>,
}

impl Consensus {
    fn not_met() -> Self {
        Self {
            met: false,
            value: None,
        }
    }

    fn on(value: &str) -> Self {
        Self {
            met: true,
            value: Some(value.to_string()),
        }
    }
}

/// Evaluate the room's policy against the full vote set.
///
/// Unanimity: every token identical. AbsoluteMajority: a single voter is
/// trivially a majority; with N > 1 voters some token's count must strictly
/// exceed N/2. An empty vote set never reaches consensus; the coordinator
/// only calls this once every registered player has voted.
pub fn evaluate(mode: Mode, votes: &[String]) -> Consensus {
    let Some(first) = votes.first() else {
        return Consensus::not_met();
    };

    match mode {
        Mode::Unanimity => {
            if votes.iter().all(|v| v == first) {
                Consensus::on(first)
            } else {
                Consensus::not_met()
            }
        }
        Mode::AbsoluteMajority => {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for vote in votes {
                *counts.entry(vote.as_str()).or_insert(0) += 1;
            }
            let (value, count) = counts
                .into_iter()
                .max_by_key(|(_, count)| *count)
                .unwrap_or((first.as_str(), 1));
            if count * 2 > votes.len() {
                Consensus::on(value)
            } else {
                Consensus::not_met()
            }
        }
    }
}
