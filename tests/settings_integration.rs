//! Integration tests for per-document settings on the file-backed store.
//!
//! Covers the reload scenario: settings saved in one session are restored in
//! the next, but only once the result payload is available to derive a key.

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use digest_client::adapters::FileKeyValueStore;
use digest_client::application::DocumentSettingsStore;
use digest_client::domain::settings::{CardMode, DocumentSettings, ResultPayload};
use digest_client::ports::KeyValueStore;

fn settings_on(dir: &TempDir) -> (DocumentSettingsStore, Arc<FileKeyValueStore>) {
    let backing = Arc::new(FileKeyValueStore::new(dir.path().join("local_storage.json")));
    (DocumentSettingsStore::new(backing.clone()), backing)
}

fn risk_settings() -> DocumentSettings {
    DocumentSettings::new()
        .with_card_mode(CardMode::Risk)
        .with_insights_chart_type("bubble")
        .with_show_insights_charts(false)
        .with_risk_category_filter("security")
}

#[tokio::test]
async fn settings_survive_reload_once_results_arrive() {
    let dir = TempDir::new().unwrap();
    let results = ResultPayload::from_value(&json!({
        "document_id": "test-doc-123",
        "filename": "test-document.pdf",
        "insights": []
    }))
    .unwrap();

    {
        let (store, _) = settings_on(&dir);
        let key = store.derive_key(Some(&results)).unwrap();
        assert_eq!(key.as_str(), "enhancedDocViewer_analysisControls_test-doc-123");
        store.save(&key, &risk_settings()).await.unwrap();
    }

    // New session over the same file.
    let (store, _) = settings_on(&dir);

    // Before results load there is no key and the default card mode applies.
    let early = store.restore(None).await;
    assert_eq!(early, None);
    assert_eq!(
        early.unwrap_or_default().effective_card_mode(),
        CardMode::Insights
    );

    let restored = store.restore(Some(&results)).await.unwrap();
    assert_eq!(restored, risk_settings());
}

#[tokio::test]
async fn documents_do_not_share_settings() {
    let dir = TempDir::new().unwrap();
    let (store, _) = settings_on(&dir);

    let doc1 = ResultPayload::default().with_document_id("doc-1");
    let doc2 = ResultPayload::default().with_document_id("doc-2");
    let key1 = store.derive_key(Some(&doc1)).unwrap();
    let key2 = store.derive_key(Some(&doc2)).unwrap();

    store
        .save(&key1, &DocumentSettings::new().with_card_mode(CardMode::Insights))
        .await
        .unwrap();
    store
        .save(&key2, &DocumentSettings::new().with_card_mode(CardMode::Risk))
        .await
        .unwrap();

    assert_eq!(
        store.restore(Some(&doc1)).await.unwrap().effective_card_mode(),
        CardMode::Insights
    );
    assert_eq!(
        store.restore(Some(&doc2)).await.unwrap().effective_card_mode(),
        CardMode::Risk
    );

    store.clear(&key1).await.unwrap();
    assert_eq!(store.restore(Some(&doc1)).await, None);
    assert!(store.restore(Some(&doc2)).await.is_some());
}

#[tokio::test]
async fn id_and_filename_fall_back_in_order() {
    let dir = TempDir::new().unwrap();
    let (store, backing) = settings_on(&dir);

    let by_id = ResultPayload::from_value(&json!({ "document_id": "", "id": 42 })).unwrap();
    let key = store.derive_key(Some(&by_id)).unwrap();
    assert_eq!(key.as_str(), "enhancedDocViewer_analysisControls_42");

    store
        .save(&key, &DocumentSettings::new().with_show_insights_charts(true))
        .await
        .unwrap();

    let raw = backing.get(key.as_str()).await.unwrap().unwrap();
    assert_eq!(raw, r#"{"showInsightsCharts":true}"#);

    let by_filename = ResultPayload::default().with_filename("report.pdf");
    assert_eq!(
        store.derive_key(Some(&by_filename)).unwrap().as_str(),
        "enhancedDocViewer_analysisControls_report.pdf"
    );
}

#[tokio::test]
async fn corrupt_blob_is_ignored_and_replaced() {
    let dir = TempDir::new().unwrap();
    let (store, backing) = settings_on(&dir);
    let key = store.key_for_identifier("doc-1").unwrap();

    backing.set(key.as_str(), "{\"cardMode\":").await.unwrap();
    assert_eq!(store.load(&key).await, None);

    store.save(&key, &risk_settings()).await.unwrap();
    assert_eq!(store.load(&key).await, Some(risk_settings()));
}
