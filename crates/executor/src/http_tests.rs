use super::*;

#[tokio::test]
async fn invalid_method_is_an_error() {
    let executor = HttpExecutor::new(
        "NOT A METHOD",
        "http://127.0.0.1:1/never",
        vec![200],
        Duration::from_millis(100),
    )
    .unwrap();

    assert!(matches!(
        executor.probe().await,
        Err(ProbeError::Request(_))
    ));
}

#[tokio::test]
async fn unreachable_url_is_an_error() {
    // Port 1 is essentially never listening; the connect fails fast.
    let executor = HttpExecutor::new(
        "GET",
        "http://127.0.0.1:1/never",
        vec![200],
        Duration::from_millis(200),
    )
    .unwrap();

    assert!(matches!(
        executor.probe().await,
        Err(ProbeError::Request(_))
    ));
}
