use crate::domain::backlog::{Backlog, BacklogItem};

fn backlog(features: &[&str]) -> Backlog {
    Backlog::new(features.iter().map(|f| BacklogItem::new(*f)).collect())
}

#[test]
fn pop_front_assigns_priority_and_moves_item_to_finalized() {
    let mut backlog = backlog(&["login", "search"]);

    let finalized = backlog.pop_front_with_priority("5").unwrap();
    assert_eq!(finalized.feature, "login");
    assert_eq!(finalized.priority.as_deref(), Some("5"));

    // The next pending item took the front; finalized holds the popped one.
    assert_eq!(backlog.peek_front().unwrap().feature, "search");
    assert_eq!(backlog.pending_len(), 1);
    assert_eq!(backlog.finalized_snapshot(), vec![finalized]);
}

#[test]
fn pending_and_finalized_partition_the_item_set() {
    let mut backlog = backlog(&["a", "b", "c"]);
    let total = backlog.pending_len();

    backlog.pop_front_with_priority("3");
    backlog.pop_front_with_priority("8");

    assert_eq!(
        backlog.pending_len() + backlog.finalized_snapshot().len(),
        total
    );
}

#[test]
fn pop_on_empty_pending_is_none_and_keeps_finalized_intact() {
    let mut backlog = backlog(&["only"]);
    backlog.pop_front_with_priority("1");
    assert!(backlog.is_empty());

    assert!(backlog.pop_front_with_priority("2").is_none());
    assert_eq!(backlog.finalized_snapshot().len(), 1);
}

#[test]
fn finalized_snapshot_preserves_estimation_order() {
    let mut backlog = backlog(&["first", "second"]);
    backlog.pop_front_with_priority("2");
    backlog.pop_front_with_priority("5");

    let features: Vec<String> = backlog
        .finalized_snapshot()
        .into_iter()
        .map(|i| i.feature)
        .collect();
    assert_eq!(features, vec!["first", "second"]);
}

#[test]
fn item_deserializes_without_priority_and_serializes_it_once_set() {
    let item: BacklogItem = serde_json::from_str(r#"{"feature": "Ajout au panier"}"#).unwrap();
    assert_eq!(item.feature, "Ajout au panier");
    assert_eq!(item.priority, None);

    let mut backlog = Backlog::new(vec![item]);
    backlog.pop_front_with_priority("8");
    let json = serde_json::to_value(backlog.finalized_snapshot()).unwrap();
    assert_eq!(json[0]["priority"], "8");
}
