//! Exchange manager scenarios through the public API and the testkit.

use std::time::Duration;

use futures_util::future::join_all;

use exgate::domain::{CredentialFailure, CredentialTestOutcome, ProviderName};
use exgate::error::ConnectorError;
use exgate::port::same_handle;
use exgate::testkit::harness::Harness;

#[tokio::test(start_paused = true)]
async fn empty_api_key_yields_none_without_network() {
    let h = Harness::new("binance");
    h.credentials.set("x", "", "secret", None);
    let x = ProviderName::from("x");

    assert!(h.manager.start_exchange_provider(&x).await.is_none());

    assert_eq!(h.manager.attempt_state(&x).attempt_count, 1);
    assert_eq!(h.factory.script().builds(), 0);
    assert_eq!(h.factory.script().validate_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn valid_credentials_pass_without_touching_cache() {
    let h = Harness::new("binance");
    h.credentials.set("y", "key", "secret", Some("pass"));
    h.manager.start_exchange().await.unwrap();
    let cached = h.manager.cache_len();

    let outcome = h
        .manager
        .test_exchange_credentials(&ProviderName::from("y"))
        .await
        .unwrap();

    assert!(outcome.status);
    assert_eq!(
        outcome.message,
        "API credentials are valid and connection successful"
    );
    assert_eq!(outcome.message, CredentialTestOutcome::SUCCESS_MESSAGE);
    assert_eq!(h.manager.cache_len(), cached);
    assert_eq!(h.manager.cached_providers(), vec![ProviderName::from("binance")]);
}

#[tokio::test(start_paused = true)]
async fn many_callers_one_connection() {
    let h = Harness::new("binance");
    h.factory.script().set_load_delay(Duration::from_millis(500));

    let managers: Vec<_> = (0..16).map(|_| h.manager.clone()).collect();
    let results = join_all(
        managers
            .iter()
            .map(|manager| async move { manager.start_exchange().await }),
    )
    .await;

    let first = results[0].clone().unwrap();
    for result in &results {
        assert!(same_handle(result.as_ref().unwrap(), &first));
    }
    assert_eq!(h.factory.script().builds(), 1);
    assert_eq!(h.factory.script().load_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn rate_limit_window_is_shared_by_every_operation() {
    let h = Harness::new("binance");
    h.factory
        .script()
        .push_auth_load(Err(ConnectorError::RateLimited("418".into())));

    let manager = h.manager.clone();
    let background = tokio::spawn(async move { manager.start_exchange().await });
    tokio::time::sleep(Duration::from_secs(5)).await;

    let outcome = h
        .manager
        .test_exchange_credentials(&ProviderName::from("binance"))
        .await
        .unwrap();
    assert_eq!(outcome.failure, Some(CredentialFailure::RateLimited));
    assert!(h
        .manager
        .start_exchange_provider(&ProviderName::from("binance"))
        .await
        .is_none());

    let handle = background.await.unwrap();
    assert!(handle.is_some());
    assert!(h.stored_ban().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn active_provider_switch_after_refresh() {
    let h = Harness::new("binance");
    h.credentials.set("okx", "k", "s", Some("p"));
    let binance = h.manager.start_exchange().await.unwrap();

    h.catalog.set_active(Some("okx"));
    assert!(same_handle(&h.manager.start_exchange().await.unwrap(), &binance));

    h.manager.refresh_provider();
    let okx = h.manager.start_exchange().await.unwrap();

    assert_eq!(okx.provider(), &ProviderName::from("okx"));
    assert_eq!(h.manager.cache_len(), 2);
}
