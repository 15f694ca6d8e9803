//! Behavioural contract of the task store and edit session

mod common;

use rstest::rstest;
use todo_day_core::{EditSession, TaskId};

use common::{memory_store, texts};

#[rstest]
#[case("buy milk", "buy milk")]
#[case("  padded  ", "padded")]
#[case("\ttabbed\n", "tabbed")]
#[case("inner  spaces kept", "inner  spaces kept")]
fn add_appends_trimmed_incomplete_task(#[case] raw: &str, #[case] expected: &str) {
    let mut store = memory_store();
    store.add("existing").unwrap();

    let id = store.add(raw).expect("non-blank text is added");

    assert_eq!(store.len(), 2);
    let task = store.tasks().last().unwrap();
    assert_eq!(task.id, id);
    assert_eq!(task.text, expected);
    assert!(!task.completed);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\t ")]
fn add_ignores_blank_text(#[case] raw: &str) {
    let mut store = memory_store();
    store.add("keep").unwrap();
    let before = store.tasks().to_vec();

    assert_eq!(store.add(raw), None);
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn unknown_ids_are_noops() {
    let mut store = memory_store();
    store.add("a").unwrap();
    store.add("b").unwrap();
    let before = store.tasks().to_vec();
    let missing = TaskId::new(4242);

    assert!(!store.delete(missing));
    assert!(!store.toggle_completed(missing));
    assert!(!store.update_text(missing, "changed"));

    assert_eq!(store.tasks(), before.as_slice());
    assert!(store.save_warning().is_none());
}

#[test]
fn toggle_is_an_involution() {
    let mut store = memory_store();
    let id = store.add("flip me").unwrap();
    let original = store.get(id).unwrap().completed;

    store.toggle_completed(id);
    assert_ne!(store.get(id).unwrap().completed, original);
    store.toggle_completed(id);
    assert_eq!(store.get(id).unwrap().completed, original);
}

#[test]
fn delete_removes_only_the_matching_task() {
    let mut store = memory_store();
    let a = store.add("a").unwrap();
    let b = store.add("b").unwrap();
    let c = store.add("c").unwrap();

    assert!(store.delete(b));
    assert_eq!(texts(&store), vec!["a", "c"]);
    assert!(store.contains(a));
    assert!(store.contains(c));
}

#[test]
fn insertion_order_is_display_order() {
    let mut store = memory_store();
    for text in ["one", "two", "three"] {
        store.add(text);
    }
    let id = store.tasks()[1].id;
    store.toggle_completed(id);
    store.update_text(id, "TWO");
    assert_eq!(texts(&store), vec!["one", "TWO", "three"]);
}

#[test]
fn begin_then_commit_without_changes_keeps_text() {
    let mut store = memory_store();
    let id = store.add("unchanged").unwrap();
    let mut session = EditSession::new();

    session.begin_edit(store.get(id).unwrap());
    session.commit(&mut store);

    assert_eq!(store.get(id).unwrap().text, "unchanged");
    assert_eq!(session, EditSession::Idle);
}

#[test]
fn commit_updates_exactly_the_edited_task() {
    let mut store = memory_store();
    let a = store.add("a").unwrap();
    let b = store.add("b").unwrap();
    store.toggle_completed(a);
    let before_a = store.get(a).unwrap().clone();

    let mut session = EditSession::new();
    session.begin_edit(store.get(b).unwrap());
    assert!(session.update_draft_text("bee"));
    assert_eq!(session.commit(&mut store), Some(b));

    assert_eq!(store.get(b).unwrap().text, "bee");
    assert!(!store.get(b).unwrap().completed);
    assert_eq!(store.get(a).unwrap(), &before_a);
    assert_eq!(session, EditSession::Idle);
}

#[test]
fn buy_milk_scenario() {
    let mut store = memory_store();
    let mut session = EditSession::new();

    let id = store.add("buy milk").unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].text, "buy milk");
    assert!(!store.tasks()[0].completed);

    store.toggle_completed(id);
    assert!(store.get(id).unwrap().completed);

    session.begin_edit(store.get(id).unwrap());
    session.update_draft_text("buy oat milk");
    session.commit(&mut store);
    let task = store.get(id).unwrap();
    assert_eq!(task.text, "buy oat milk");
    assert!(task.completed);
    assert!(!session.is_editing());

    store.delete(id);
    assert!(store.is_empty());
}

#[test]
fn ids_are_unique_across_many_adds() {
    let mut store = memory_store();
    let mut ids: Vec<_> = (0..200)
        .map(|i| store.add(&format!("task {i}")).unwrap())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}
