use super::*;
use gtm_time::Frequency;

#[test]
fn string_declarations_are_references() {
    let decl: ConditionDecl = serde_yaml::from_str("backup-window").unwrap();

    assert!(matches!(decl, ConditionDecl::Reference(name) if name == "backup-window"));
}

#[test]
fn manual_condition_with_default_state() {
    let decl: ConditionDecl = serde_yaml::from_str("{ type: manual }").unwrap();

    let ConditionDecl::Inline(inline) = decl else {
        panic!("expected an inline declaration");
    };
    assert!(inline.name.is_none());
    assert!(matches!(inline.kind, ConditionKind::Manual { state: false }));
}

#[test]
fn named_manual_condition() {
    let decl: ConditionDecl =
        serde_yaml::from_str("{ name: switch, type: manual, state: true }").unwrap();

    let ConditionDecl::Inline(inline) = decl else {
        panic!("expected an inline declaration");
    };
    assert_eq!(inline.name.as_deref(), Some("switch"));
    assert!(matches!(inline.kind, ConditionKind::Manual { state: true }));
}

#[test]
fn delay_parses_humantime_durations() {
    let decl: ConditionDecl = serde_yaml::from_str(
        "{ type: delay, delay: 1s 500ms, condition: { type: manual } }",
    )
    .unwrap();

    let ConditionDecl::Inline(inline) = decl else {
        panic!("expected an inline declaration");
    };
    let ConditionKind::Delay { delay, .. } = inline.kind else {
        panic!("expected a delay declaration");
    };
    assert_eq!(delay, Duration::from_millis(1500));
}

#[test]
fn composite_nests_declarations() {
    let decl: ConditionDecl = serde_yaml::from_str(
        r#"
type: and
conditions:
  - first
  - { type: manual, state: true }
"#,
    )
    .unwrap();

    let ConditionDecl::Inline(inline) = decl else {
        panic!("expected an inline declaration");
    };
    let ConditionKind::And { conditions } = inline.kind else {
        panic!("expected an and declaration");
    };
    assert_eq!(conditions.len(), 2);
    assert!(matches!(&conditions[0], ConditionDecl::Reference(name) if name == "first"));
}

#[test]
fn time_condition_defaults_to_yearly() {
    let decl: ConditionDecl =
        serde_yaml::from_str("{ type: time, start: \"09:00\", stop: \"17:00\" }").unwrap();

    let ConditionDecl::Inline(inline) = decl else {
        panic!("expected an inline declaration");
    };
    let ConditionKind::Time {
        start,
        stop,
        frequency,
    } = inline.kind
    else {
        panic!("expected a time declaration");
    };
    assert_eq!(start, "09:00");
    assert_eq!(stop, "17:00");
    assert_eq!(frequency, Frequency::Year);
}

#[test]
fn cut_off_defaults() {
    let decl: ConditionDecl = serde_yaml::from_str("{ type: cut-off }").unwrap();

    let ConditionDecl::Inline(inline) = decl else {
        panic!("expected an inline declaration");
    };
    let ConditionKind::CutOff {
        up,
        down,
        period,
        executor,
    } = inline.kind
    else {
        panic!("expected a cut-off declaration");
    };
    assert_eq!(up, 0);
    assert_eq!(down, 3);
    assert_eq!(period, Duration::from_secs(5));
    assert!(executor.is_none());
}

#[test]
fn http_executor_defaults() {
    let decl: ExecutorDecl =
        serde_yaml::from_str("{ type: http, url: \"http://localhost/health\" }").unwrap();

    let ExecutorDecl::Http {
        method,
        url,
        status_codes,
        timeout,
    } = decl
    else {
        panic!("expected an http executor");
    };
    assert_eq!(method, "GET");
    assert_eq!(url, "http://localhost/health");
    assert_eq!(status_codes, vec![200, 201]);
    assert_eq!(timeout, Duration::from_secs(1));
}

#[test]
fn cmd_executor_declaration() {
    let decl: ExecutorDecl =
        serde_yaml::from_str("{ type: cmd, command: ping, args: [\"-c1\", host] }").unwrap();

    let ExecutorDecl::Cmd { command, args, .. } = decl else {
        panic!("expected a cmd executor");
    };
    assert_eq!(command, "ping");
    assert_eq!(args, vec!["-c1".to_string(), "host".to_string()]);
}

#[test]
fn trigger_declaration_with_env() {
    let document: Document = serde_yaml::from_str(
        r#"
conditions:
  - { name: switch, type: manual }
triggers:
  - condition: switch
    up:
      type: command
      command: notify
      env:
        CHANNEL: ops
"#,
    )
    .unwrap();

    assert_eq!(document.triggers.len(), 1);
    let trigger = &document.triggers[0];
    assert!(trigger.down.is_none());

    let Some(ActionDecl::Command { command, env, .. }) = &trigger.up else {
        panic!("expected a command action");
    };
    assert_eq!(command, "notify");
    assert_eq!(env.get("CHANNEL").map(String::as_str), Some("ops"));
}

#[test]
fn json_documents_parse_too() {
    let document: Document = serde_yaml::from_str(
        r#"{"conditions": [{"name": "switch", "type": "manual", "state": true}]}"#,
    )
    .unwrap();

    assert_eq!(document.conditions.len(), 1);
}

#[test]
fn unknown_condition_types_are_rejected() {
    let result: Result<ConditionDecl, _> = serde_yaml::from_str("{ type: quantum }");

    assert!(result.is_err());
}
