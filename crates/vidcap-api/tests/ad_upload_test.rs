//! `/ad` integration tests.

mod helpers;

use axum_test::multipart::MultipartForm;
use helpers::forms::ad_form;
use helpers::{setup_test_app, setup_test_app_with, TestAppOptions};
use vidcap_core::models::AdvertisementRecord;

#[tokio::test]
async fn test_upload_ad_success() {
    let app = setup_test_app().await;

    let response = app.client().post("/ad").multipart(ad_form()).await;

    assert_eq!(response.text(), "Ad Upload Successful");
    assert_eq!(app.log.calls(), vec!["db:ad"]);
    assert_eq!(
        app.database.ads(),
        vec![AdvertisementRecord {
            name: "Spring Sale".to_string(),
            image_link: "https://cdn.example.com/ads/spring.png".to_string(),
            object: "bicycle".to_string(),
            redirect_url: "https://shop.example.com/spring".to_string(),
        }]
    );
    assert!(app.storage.uploads().is_empty());
    assert!(app.transport.attempts().is_empty());
    assert_eq!(app.executor.pending_count(), 0);
    assert!(app.staged_files().is_empty());
}

#[tokio::test]
async fn test_ad_missing_fields_default_to_empty() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("adName", "Minimal");
    let response = app.client().post("/ad").multipart(form).await;

    assert_eq!(response.text(), "Ad Upload Successful");
    let ads = app.database.ads();
    assert_eq!(ads[0].name, "Minimal");
    assert_eq!(ads[0].image_link, "");
    assert_eq!(ads[0].redirect_url, "");
}

#[tokio::test]
async fn test_ad_unparsable_body() {
    let app = setup_test_app().await;

    let response = app.client().post("/ad").text("adName=oops").await;

    assert_eq!(response.text(), "Unable to parse Request");
    assert!(app.log.calls().is_empty());
}

#[tokio::test]
async fn test_ad_database_failure() {
    let app = setup_test_app_with(TestAppOptions {
        database_fails: true,
        ..Default::default()
    })
    .await;

    let response = app.client().post("/ad").multipart(ad_form()).await;

    assert_eq!(response.text(), "Ad Upload Failed");
    assert_eq!(app.log.calls(), vec!["db:ad"]);
}

#[tokio::test]
async fn test_delete_ad_is_not_supported() {
    let app = setup_test_app().await;

    let response = app.client().delete("/ad").await;

    assert_eq!(response.text(), "Only POST method supported");
}
