//! End-to-end monitoring runs against a mock marketplace and Telegram API

mod common;

use ad_radar::monitor::Monitor;
use ad_radar::storage::{RunStatus, SqliteStorage, Storage};
use common::{ad_page, listing_page, test_config, with_telegram, CATEGORY_PATH};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEND_PATH: &str = "/bot123:abc/sendMessage";

/// Mounts a two-page listing with three distinct ads
async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &["/d/ad-1.html", "/d/ad-2.html", "/d/ad-2.html"],
            Some(2),
        )))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(CATEGORY_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(
            &["/d/ad-3.html", "/d/ad-1.html"],
            Some(2),
        )))
        .mount(server)
        .await;
}

async fn mount_ads(server: &MockServer, ad_1_hits: u64) {
    Mock::given(method("GET"))
        .and(path("/d/ad-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ad_page(
            "Already seen",
            Some("10 lei"),
            "Nu ar trebui descarcat.",
            None,
        )))
        .expect(ad_1_hits)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/d/ad-2.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ad_page(
            "iPhone 12 mini",
            Some("1 200 lei"),
            "Impecabil, folosit cu husa.",
            Some("Mihai"),
        )))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/d/ad-3.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ad_page(
            "iPhone 11",
            None,
            "Pret la cerere, doar schimb.",
            None,
        )))
        .mount(server)
        .await;
}

fn open_store(dir: &TempDir) -> SqliteStorage {
    SqliteStorage::new(&dir.path().join("radar.db")).expect("Failed to open store")
}

#[tokio::test]
async fn test_new_ads_are_extracted_notified_and_recorded() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = with_telegram(test_config(&server, "unused.db"), &server);

    mount_listing(&server).await;
    mount_ads(&server, 0).await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_string_contains("chat_id=42"))
        .and(body_string_contains("iPhone+12+mini"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let target = format!("{}{}?sort=new", server.uri(), CATEGORY_PATH);
    let mut storage = open_store(&dir);
    storage
        .record(&format!("{}/d/ad-1.html", server.uri()), &target)
        .unwrap();

    let mut monitor = Monitor::new(&config, storage).unwrap();
    let counters = monitor.run(&[target.clone()], "hash").await.unwrap();

    assert_eq!(counters.targets, 1);
    assert_eq!(counters.ads_found, 3);
    assert_eq!(counters.new_ads, 2);
    assert_eq!(counters.ads_extracted, 1);
    assert_eq!(counters.notifications, 1);

    let storage = monitor.into_storage();
    assert!(storage.exists(&format!("{}/d/ad-2.html", server.uri())).unwrap());
    assert!(storage.exists(&format!("{}/d/ad-3.html", server.uri())).unwrap());
    assert_eq!(storage.count_seen().unwrap(), 3);

    let run = storage.get_latest_run().unwrap().unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.counters, counters);
}

#[tokio::test]
async fn test_second_run_offers_nothing_new() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, "unused.db");

    mount_listing(&server).await;
    mount_ads(&server, 1).await;

    let target = format!("{}{}", server.uri(), CATEGORY_PATH);
    let mut monitor = Monitor::new(&config, open_store(&dir)).unwrap();

    let first = monitor.run(&[target.clone()], "hash").await.unwrap();
    assert_eq!(first.new_ads, 3);
    assert_eq!(first.ads_extracted, 2);

    let second = monitor.run(&[target], "hash").await.unwrap();
    assert_eq!(second.ads_found, 3);
    assert_eq!(second.new_ads, 0);
    assert_eq!(second.ads_extracted, 0);
    assert_eq!(second.notifications, 0);

    assert_eq!(monitor.storage().count_runs().unwrap(), 2);
}

#[tokio::test]
async fn test_failed_delivery_still_records_offered_ads() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = with_telegram(test_config(&server, "unused.db"), &server);

    mount_listing(&server).await;
    mount_ads(&server, 1).await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    let target = format!("{}{}", server.uri(), CATEGORY_PATH);
    let mut monitor = Monitor::new(&config, open_store(&dir)).unwrap();
    let report = monitor.process_target(&target).await.unwrap();

    assert!(!report.delivered);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.counters.notifications, 0);
    assert_eq!(monitor.storage().count_seen().unwrap(), 3);
    for n in 1..=3 {
        let url = format!("{}/d/ad-{}.html", server.uri(), n);
        assert!(monitor.storage().exists(&url).unwrap());
    }

    // The next pass finds nothing to offer
    let again = monitor.process_target(&target).await.unwrap();
    assert_eq!(again.counters.new_ads, 0);
}

#[tokio::test]
async fn test_foreign_target_is_counted_and_skipped() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, "unused.db");

    mount_listing(&server).await;
    mount_ads(&server, 1).await;

    let targets = vec![
        "https://www.other.test/category/phones/".to_string(),
        format!("{}{}", server.uri(), CATEGORY_PATH),
    ];
    let mut monitor = Monitor::new(&config, open_store(&dir)).unwrap();
    let counters = monitor.run(&targets, "hash").await.unwrap();

    assert_eq!(counters.invalid_targets, 1);
    assert_eq!(counters.targets, 1);
    assert_eq!(counters.ads_extracted, 2);
}
