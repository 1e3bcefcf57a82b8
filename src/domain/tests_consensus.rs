use crate::domain::consensus::evaluate;
use crate::domain::room::Mode;

fn votes(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn unanimity_met_when_all_votes_identical() {
    let result = evaluate(Mode::Unanimity, &votes(&["5", "5"]));
    assert!(result.met);
    assert_eq!(result.value.as_deref(), Some("5"));
}

#[test]
fn unanimity_not_met_on_any_disagreement() {
    let result = evaluate(Mode::Unanimity, &votes(&["3", "5"]));
    assert!(!result.met);
    assert_eq!(result.value, None);
}

#[test]
fn unanimity_with_single_voter_is_met() {
    let result = evaluate(Mode::Unanimity, &votes(&["8"]));
    assert!(result.met);
    assert_eq!(result.value.as_deref(), Some("8"));
}

#[test]
fn majority_with_single_voter_is_trivially_met() {
    let result = evaluate(Mode::AbsoluteMajority, &votes(&["13"]));
    assert!(result.met);
    assert_eq!(result.value.as_deref(), Some("13"));
}

#[test]
fn majority_two_of_three_is_met() {
    // 2 of 3 > 1.5
    let result = evaluate(Mode::AbsoluteMajority, &votes(&["3", "3", "5"]));
    assert!(result.met);
    assert_eq!(result.value.as_deref(), Some("3"));
}

#[test]
fn majority_exact_half_is_not_met() {
    // 2 of 4 is not strictly more than half
    let result = evaluate(Mode::AbsoluteMajority, &votes(&["3", "3", "5", "8"]));
    assert!(!result.met);
    assert_eq!(result.value, None);
}

#[test]
fn majority_tie_between_two_values_is_not_met() {
    let result = evaluate(Mode::AbsoluteMajority, &votes(&["3", "3", "5", "5"]));
    assert!(!result.met);
}

#[test]
fn empty_vote_set_never_reaches_consensus() {
    assert!(!evaluate(Mode::Unanimity, &[]).met);
    assert!(!evaluate(Mode::AbsoluteMajority, &[]).met);
}
