use super::*;

#[tokio::test]
async fn successful_command_probes_true() {
    let executor = CommandExecutor::new("sh", vec!["-c".to_string(), "exit 0".to_string()]);

    assert!(executor.probe().await.unwrap());
}

#[tokio::test]
async fn failing_command_probes_false() {
    let executor = CommandExecutor::new("sh", vec!["-c".to_string(), "exit 3".to_string()]);

    assert!(!executor.probe().await.unwrap());
}

#[tokio::test]
async fn missing_command_is_an_error() {
    let executor = CommandExecutor::new("gtm-definitely-not-a-command", Vec::new());

    assert!(matches!(executor.probe().await, Err(ProbeError::Io(_))));
}
