use super::*;
use futures::FutureExt;

#[tokio::test]
async fn named_conditions_are_reachable_by_reference() {
    let registry = Registry::load(
        r#"
conditions:
  - { name: switch, type: manual, state: true }
  - { name: inverted, type: inverse, condition: switch }
"#,
    )
    .await
    .unwrap();

    let switch = registry.get("switch").unwrap();
    let inverted = registry.get("inverted").unwrap();

    assert!(switch.watch().0);
    assert!(!inverted.watch().0);

    registry.close();
}

#[tokio::test]
async fn unknown_names_return_nothing() {
    let registry = Registry::new();

    assert!(registry.get("missing").is_none());
}

#[tokio::test]
async fn handles_are_non_owning() {
    let registry = Registry::load("conditions: [{ name: switch, type: manual }]")
        .await
        .unwrap();

    let handle = registry.get("switch").unwrap();
    handle.close();

    // The registry still owns a live condition.
    let handle = registry.get("switch").unwrap();
    let settable = handle.as_settable().unwrap();
    settable.set(true);
    assert!(handle.watch().0);

    registry.close();
}

#[tokio::test]
async fn close_tears_the_graph_down() {
    let registry = Registry::load("conditions: [{ name: switch, type: manual }]")
        .await
        .unwrap();

    let handle = registry.get("switch").unwrap();
    let pending = handle.wait_for(true);

    registry.close();

    assert!(pending.await.is_err());
    assert!(registry.get("switch").is_none());
}

#[tokio::test]
async fn duplicate_names_are_rejected() {
    let result = Registry::load(
        r#"
conditions:
  - { name: switch, type: manual }
  - { name: switch, type: manual }
"#,
    )
    .await;

    assert!(matches!(result, Err(ConfigError::DuplicateCondition(name)) if name == "switch"));
}

#[tokio::test]
async fn unknown_references_are_rejected() {
    let result = Registry::load(
        r#"
conditions:
  - { name: pair, type: and, conditions: [nowhere] }
"#,
    )
    .await;

    assert!(matches!(result, Err(ConfigError::UnknownCondition(name)) if name == "nowhere"));
}

#[tokio::test]
async fn empty_composites_are_rejected() {
    let result = Registry::load("conditions: [{ name: all, type: and, conditions: [] }]").await;

    assert!(matches!(result, Err(ConfigError::Composite(_))));
}

#[tokio::test]
async fn unparseable_times_are_rejected() {
    let result = Registry::load(
        "conditions: [{ name: window, type: time, start: \"not a time\", stop: \"17:00\" }]",
    )
    .await;

    assert!(matches!(result, Err(ConfigError::Time(_))));
}

#[tokio::test]
async fn invalid_documents_are_rejected() {
    let result = Registry::load("conditions: [{ name: x, type: quantum }]").await;

    assert!(matches!(result, Err(ConfigError::Yaml(_))));
}

#[tokio::test]
async fn actions_require_a_command() {
    let result = Registry::load(
        r#"
conditions:
  - { name: switch, type: manual }
triggers:
  - condition: switch
    up: { type: command, command: "" }
"#,
    )
    .await;

    assert!(matches!(result, Err(ConfigError::MissingCommand)));
}

#[tokio::test]
async fn composite_graphs_react_through_references() {
    let registry = Registry::load(
        r#"
conditions:
  - { name: a, type: manual }
  - { name: b, type: manual }
  - { name: both, type: and, conditions: [a, b] }
"#,
    )
    .await
    .unwrap();

    let a = registry.get("a").unwrap();
    let b = registry.get("b").unwrap();
    let both = registry.get("both").unwrap();

    assert!(!both.watch().0);

    a.as_settable().unwrap().set(true);
    let pending = both.wait_for(true);
    b.as_settable().unwrap().set(true);
    pending.await.unwrap();

    registry.close();
}

#[tokio::test]
async fn cut_off_without_executor_defaults_down() {
    let registry = Registry::load(
        "conditions: [{ name: probe, type: cut-off, period: 10ms }]",
    )
    .await
    .unwrap();

    let probe = registry.get("probe").unwrap();
    assert!(!probe.watch().0);

    registry.close();
}

#[tokio::test]
async fn watch_runs_trigger_actions() {
    let registry = Registry::load(
        r#"
conditions:
  - { name: switch, type: manual }
triggers:
  - condition: switch
    up: { type: command, command: /bin/sh, args: ["-c", "exit 0"] }
    down: { type: command, command: /bin/sh, args: ["-c", "exit 1"] }
"#,
    )
    .await
    .unwrap();

    let registry = Arc::new(registry);
    let (stop, shutdown) = signal::pair();

    let watcher = tokio::spawn({
        let registry = Arc::clone(&registry);
        async move { registry.watch(shutdown).await }
    });

    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    let switch = registry.get("switch").unwrap();
    switch.as_settable().unwrap().set(true);

    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    stop.release();
    watcher.await.unwrap().unwrap();

    // The failing down action is fatal once it actually runs.
    let (stop, shutdown) = signal::pair();
    let _stop = stop;

    let watcher = tokio::spawn({
        let registry = Arc::clone(&registry);
        async move { registry.watch(shutdown).await }
    });

    for _ in 0..8 {
        tokio::task::yield_now().await;
    }

    switch.as_settable().unwrap().set(false);

    let result = watcher.await.unwrap();
    assert!(matches!(result, Err(WatchError::Down(_))));

    registry.close();
}

#[tokio::test]
async fn watch_with_no_triggers_has_nothing_to_supervise() {
    let registry = Registry::load("conditions: [{ name: switch, type: manual }]")
        .await
        .unwrap();

    let (_stop, shutdown) = signal::pair();

    registry.watch(shutdown).now_or_never().unwrap().unwrap();
}
