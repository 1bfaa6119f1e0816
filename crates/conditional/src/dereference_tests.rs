use super::*;
use crate::manual::ManualCondition;

#[tokio::test]
async fn operations_forward_to_the_wrapped_condition() {
    let manual = ManualCondition::new(false);
    let handle = Dereference::new(Arc::new(manual.clone()));

    assert!(!handle.watch().0);

    let signal = handle.wait_for(true);
    manual.set(true);
    assert_eq!(signal.await, Ok(()));
}

#[tokio::test]
async fn close_is_a_no_op() {
    let manual = ManualCondition::new(false);
    let handle = Dereference::new(Arc::new(manual.clone()));

    handle.close();

    // The owner's condition is untouched.
    let signal = manual.wait_for(true);
    manual.set(true);
    assert_eq!(signal.await, Ok(()));
}

#[tokio::test]
async fn settable_capability_forwards() {
    let manual = ManualCondition::new(false);
    let handle = Dereference::new(Arc::new(manual.clone()));

    let settable = handle.as_settable().expect("wrapped manual is settable");
    settable.set(true);

    assert!(manual.watch().0);
}
