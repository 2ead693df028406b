mod common;

use common::{MockResponse, catch_json, catch_list_json, harness};
use data::CatchRepositoryImpl;
use domain::{CatchRepository, DataError, NetworkError, SubmitCatchEntity, TokenStorage};

#[tokio::test]
async fn catches_fall_back_to_cache_when_backend_fails() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    h.backend
        .enqueue(MockResponse::json(&catch_list_json(&[
            catch_json("1", "Bass", "2024-06-01T07:30:00Z"),
            catch_json("2", "Pike", "2024-06-03T18:00:00Z"),
        ])))
        .await;
    let fresh = repo.catches().await.unwrap();
    assert_eq!(fresh.len(), 2);
    assert_eq!(fresh[0].name, "Bass");
    assert_eq!(fresh[0].date_caught, "2024-06-01");

    h.backend.enqueue(MockResponse::error(503, "maintenance")).await;
    let cached = repo.catches().await.unwrap();
    assert_eq!(cached.len(), 2);
    // cache is ordered by capture time, newest first
    assert_eq!(cached[0].id, "2");
}

#[tokio::test]
async fn empty_cache_surfaces_network_error() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    h.backend.enqueue(MockResponse::status(500, "boom")).await;
    let err = repo.catches().await.unwrap_err();
    assert!(matches!(
        err,
        DataError::Network(NetworkError::Http { status: 500, .. })
    ));
    assert_eq!(err.to_string(), "[500 Internal Server Error] boom");
}

#[tokio::test]
async fn details_are_served_from_cache_first() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    h.backend
        .enqueue(MockResponse::json(&catch_list_json(&[catch_json(
            "1",
            "Bass",
            "2024-06-01T07:30:00Z",
        )])))
        .await;
    repo.catches().await.unwrap();

    let details = repo.catch_details("1").await.unwrap();
    assert_eq!(details.species, "Bass");
    assert_eq!(details.weather.get("temp_c").map(String::as_str), Some("21"));
    assert_eq!(h.backend.captured().await.len(), 1);
}

#[tokio::test]
async fn details_are_fetched_and_cached_when_missing() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    h.backend
        .enqueue(MockResponse::json(&format!(
            r#"{{"user_catch": {}}}"#,
            catch_json("9", "Trout", "2024-07-04T05:00:00Z")
        )))
        .await;
    let details = repo.catch_details("9").await.unwrap();
    assert_eq!(details.species, "Trout");
    assert_eq!(details.date_caught, "2024-07-04");

    let requests = h.backend.captured().await;
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/user_catches/9");
    assert!(h.cache.by_id("9").await.unwrap().is_some());
}

#[tokio::test]
async fn submit_uploads_multipart_with_bearer_token() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());
    h.tokens.save_token("tok-123").await.unwrap();

    h.backend
        .enqueue(MockResponse::json(&format!(
            r#"{{"user_catch": {}}}"#,
            catch_json("55", "Walleye", "2024-08-10T06:00:00Z")
        )))
        .await;

    let id = repo
        .submit_catch(SubmitCatchEntity {
            species: "Walleye".to_string(),
            weight: Some(4.2),
            length: Some(22.0),
            location: Some("Lake Erie".to_string()),
            caught_at: Some("2024-08-10T06:00:00Z".to_string()),
            // FF D8 FF D9
            image_base64: Some("/9j/2Q==".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(id, "55");

    let requests = h.backend.captured().await;
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/user_catches");
    assert_eq!(request.header("authorization"), Some("Bearer tok-123"));
    assert!(
        request
            .header("content-type")
            .is_some_and(|ct| ct.starts_with("multipart/form-data"))
    );
    let body = request.body_text();
    assert!(body.contains(r#"name="user_catch[species]""#));
    assert!(body.contains("Walleye"));
    assert!(body.contains(r#"name="user_catch[weight]""#));
    assert!(body.contains(r#"filename="catch.jpg""#));
    assert!(body.contains("image/jpeg"));
    assert!(!body.contains("user_catch[notes]"));
}

#[tokio::test]
async fn submit_leaves_missing_fields_to_the_caller() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    h.backend
        .enqueue(MockResponse::json(&format!(
            r#"{{"user_catch": {}}}"#,
            catch_json("56", "Perch", "2024-08-11T06:00:00Z")
        )))
        .await;

    repo.submit_catch(SubmitCatchEntity {
        species: "Perch".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();

    let body = h.backend.captured().await[0].body_text();
    assert!(body.contains(r#"name="user_catch[species]""#));
    assert!(!body.contains("user_catch[location]"));
    assert!(!body.contains("user_catch[caught_at]"));
}

#[tokio::test]
async fn submit_rejects_corrupt_image_before_sending() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    let err = repo
        .submit_catch(SubmitCatchEntity {
            species: "Bass".to_string(),
            image_base64: Some("%%% not base64".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Image(_)));
    assert!(h.backend.captured().await.is_empty());
}

#[tokio::test]
async fn delete_evicts_cached_row() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    h.backend
        .enqueue(MockResponse::json(&catch_list_json(&[
            catch_json("1", "Bass", "2024-06-01T07:30:00Z"),
            catch_json("2", "Pike", "2024-06-03T18:00:00Z"),
        ])))
        .await;
    repo.catches().await.unwrap();

    h.backend.enqueue(MockResponse::status(204, "")).await;
    repo.delete_catch("1").await.unwrap();

    let requests = h.backend.captured().await;
    assert_eq!(requests[1].method, "DELETE");
    assert_eq!(requests[1].path, "/user_catches/1");
    assert!(h.cache.by_id("1").await.unwrap().is_none());
    assert!(h.cache.by_id("2").await.unwrap().is_some());
}

#[tokio::test]
async fn failed_delete_keeps_cache() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    h.backend
        .enqueue(MockResponse::json(&catch_list_json(&[catch_json(
            "1",
            "Bass",
            "2024-06-01T07:30:00Z",
        )])))
        .await;
    repo.catches().await.unwrap();

    h.backend.enqueue(MockResponse::error(403, "forbidden")).await;
    assert!(repo.delete_catch("1").await.is_err());
    assert!(h.cache.by_id("1").await.unwrap().is_some());
}

#[tokio::test]
async fn refresh_replaces_cache_and_does_not_fall_back() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    h.backend
        .enqueue(MockResponse::json(&catch_list_json(&[
            catch_json("1", "Bass", "2024-06-01T07:30:00Z"),
            catch_json("2", "Pike", "2024-06-03T18:00:00Z"),
        ])))
        .await;
    repo.catches().await.unwrap();

    h.backend
        .enqueue(MockResponse::json(&catch_list_json(&[catch_json(
            "3",
            "Carp",
            "2024-06-05T09:00:00Z",
        )])))
        .await;
    let refreshed = repo.refresh_catches().await.unwrap();
    assert_eq!(refreshed.len(), 1);
    assert_eq!(h.cache.all().await.unwrap().len(), 1);

    h.backend.enqueue(MockResponse::error(503, "down")).await;
    assert!(repo.refresh_catches().await.is_err());
}

#[tokio::test]
async fn stats_and_insights() {
    let h = harness().await;
    let repo = CatchRepositoryImpl::new(h.api.clone(), h.cache.clone());

    h.backend
        .enqueue(MockResponse::json(&catch_list_json(&[
            catch_json("1", "Bass", "2024-06-01T07:30:00Z"),
            catch_json("2", "Bass", "2024-06-03T18:00:00Z"),
            catch_json("3", "Pike", "2024-06-02T18:00:00Z"),
        ])))
        .await;
    let stats = repo.catch_stats().await.unwrap();
    assert_eq!(stats.total_catches, 3);
    assert_eq!(stats.unique_species, 2);
    assert_eq!(stats.average_weight, Some(3.5));
    assert_eq!(stats.most_recent_catch.map(|c| c.id), Some("2".to_string()));

    h.backend
        .enqueue(MockResponse::json(r#"{"insights": "Bass bite at dawn"}"#))
        .await;
    let insights = repo.fishing_insights().await.unwrap();
    assert_eq!(insights.insights, "Bass bite at dawn");
    assert_eq!(h.backend.captured().await[1].path, "/ai/insights");
}
