mod common;

use common::TestApp;
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_restaurant_crud() {
    let app = TestApp::new().await;
    let token = app.register_and_login("test").await;

    let id = app.create_restaurant(&token, "Noodle House", 23.0, 120.0).await;

    let (status, body) = app.get("/api/restaurants", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let uri = format!("/api/restaurants/{id}");
    let (status, body) = app
        .request(
            Method::PUT,
            &uri,
            Some(json!({ "name": "Noodle Palace", "phone": "02-1234" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Noodle Palace");
    assert_eq!(body["address"], "1 Main St");
    assert!(body["updated_at"].is_i64());

    let (status, body) = app.request(Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (status, body) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn test_create_restaurant_validation() {
    let app = TestApp::new().await;
    let token = app.register_and_login("test").await;

    let (status, body) = app
        .post(
            "/api/restaurants",
            json!({ "name": "A", "address": "x", "lat": 95.0, "lng": 0.0 }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3003);

    let (status, _) = app
        .post(
            "/api/restaurants",
            json!({ "name": "", "address": "x", "lat": 0.0, "lng": 0.0 }),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_open_times_lifecycle() {
    let app = TestApp::new().await;
    let token = app.register_and_login("test").await;
    let id = app.create_restaurant(&token, "Noodle House", 23.0, 120.0).await;

    let uri = format!("/api/restaurants/{id}/open-times");
    let (status, body) = app
        .post(
            &uri,
            json!([
                { "day_of_week": 1, "open_time": "08:00", "close_time": "22:00" },
                { "day_of_week": 2, "open_time": "11:00", "close_time": "14:00" }
            ]),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let created = body.as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["open_time"], "08:00:00");
    let ot_id = created[1]["id"].as_i64().unwrap();

    let (status, body) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = app.get(&format!("/api/restaurants/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["open_times"].as_array().unwrap().len(), 2);

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/open-times/{ot_id}"),
            Some(json!({ "close_time": "15:30" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["close_time"], "15:30:00");
    assert_eq!(body["open_time"], "11:00:00");

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/open-times/{ot_id}"), None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(Method::DELETE, &format!("/api/open-times/{ot_id}"), None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3002);

    let (status, _) = app.post(&uri, json!([]), Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/restaurants/999/open-times",
            json!([{ "day_of_week": 1, "open_time": "08:00", "close_time": "22:00" }]),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_random_near_and_far() {
    let app = TestApp::new().await;
    let token = app.register_and_login("test").await;
    let near = app.create_restaurant(&token, "near", 23.001, 120.001).await;
    let far = app.create_restaurant(&token, "far", 23.05, 120.03).await;

    let (status, body) = app
        .get("/api/restaurants/random?lat=23.0&lng=120.0&radius=5&limit=10", None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![near]);

    let (_, body) = app
        .get("/api/restaurants/random?lat=23.0&lng=120.0&radius=10&limit=10", None)
        .await;
    let mut ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    ids.sort();
    assert_eq!(ids, vec![near, far]);

    // default limit is 1
    let (_, body) = app
        .get("/api/restaurants/random?lat=23.0&lng=120.0&radius=10", None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_random_skips_disabled() {
    let app = TestApp::new().await;
    let token = app.register_and_login("test").await;
    let id = app.create_restaurant(&token, "closed", 23.001, 120.001).await;
    app.request(
        Method::PUT,
        &format!("/api/restaurants/{id}"),
        Some(json!({ "enabled": false })),
        Some(&token),
    )
    .await;

    let (status, body) = app
        .get("/api/restaurants/random?lat=23.0&lng=120.0&radius=5&limit=5", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_random_with_open_time() {
    let app = TestApp::new().await;
    let token = app.register_and_login("test").await;
    let id = app.create_restaurant(&token, "near", 23.001, 120.001).await;
    app.post(
        &format!("/api/restaurants/{id}/open-times"),
        json!([
            { "day_of_week": 1, "open_time": "08:00", "close_time": "22:00" },
            { "day_of_week": 3, "open_time": "08:00", "close_time": "22:00" }
        ]),
        Some(&token),
    )
    .await;

    let (status, body) = app
        .get(
            "/api/restaurants/random?lat=23.0&lng=120.0&radius=5&limit=5&day_of_week=1&time=09:00",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let picked = body.as_array().unwrap();
    assert_eq!(picked.len(), 1);
    let open_times = picked[0]["open_times"].as_array().unwrap();
    assert_eq!(open_times.len(), 1);
    assert_eq!(open_times[0]["day_of_week"], 1);

    let (status, body) = app
        .get(
            "/api/restaurants/random?lat=23.0&lng=120.0&radius=5&limit=5&day_of_week=2&time=09:00",
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_random_rejects_bad_queries() {
    let app = TestApp::new().await;

    for (query, code) in [
        ("lat=23.0&lng=120.0&radius=0", 9),
        ("lat=23.0&lng=120.0&radius=-3", 9),
        ("lat=23.0&lng=120.0&radius=5&limit=0", 8),
        ("lat=23.0&lng=120.0&radius=5&limit=51", 8),
        ("lat=99.0&lng=120.0&radius=5", 3003),
        ("lat=23.0&lng=120.0&radius=5&day_of_week=1", 2),
        ("lat=23.0&lng=120.0&radius=5&time=09:00", 2),
        ("lat=23.0&lng=120.0&radius=5&day_of_week=1&time=9am", 3004),
        ("lng=120.0&radius=5", 2),
    ] {
        let (status, body) = app
            .get(&format!("/api/restaurants/random?{query}"), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}: {body}");
        assert_eq!(body["code"], code, "{query}");
    }
}

#[tokio::test]
async fn test_random_with_no_restaurants_is_empty() {
    let app = TestApp::new().await;

    let (status, body) = app
        .get("/api/restaurants/random?lat=23.0&lng=120.0&radius=5", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_random_diagonal_far_restaurant() {
    let app = TestApp::new().await;
    let token = app.register_and_login("test").await;
    let near = app.create_restaurant(&token, "near", 23.001, 120.001).await;
    app.create_restaurant(&token, "far", 23.050, 120.050).await;

    for _ in 0..8 {
        let (status, body) = app
            .get("/api/restaurants/random?lat=23.000&lng=120.000&radius=5.0&limit=1", None)
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let picked = body.as_array().unwrap();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0]["id"].as_i64(), Some(near));
    }
}

#[tokio::test]
async fn test_random_default_limit_above_max_is_capped() {
    let app = TestApp::with_random_limits(5, 3).await;
    let token = app.register_and_login("test").await;
    for i in 0..4 {
        app.create_restaurant(&token, &format!("R{i}"), 23.0 + i as f64 * 0.0001, 120.0)
            .await;
    }

    let (status, body) = app
        .get("/api/restaurants/random?lat=23.0&lng=120.0&radius=5", None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_update_can_clear_phone() {
    let app = TestApp::new().await;
    let token = app.register_and_login("test").await;
    let id = app.create_restaurant(&token, "Noodle House", 23.0, 120.0).await;
    let uri = format!("/api/restaurants/{id}");

    let (_, body) = app
        .request(Method::PUT, &uri, Some(json!({ "phone": "02-1234" })), Some(&token))
        .await;
    assert_eq!(body["phone"], "02-1234");

    let (_, body) = app
        .request(Method::PUT, &uri, Some(json!({ "name": "Noodle Palace" })), Some(&token))
        .await;
    assert_eq!(body["phone"], "02-1234");

    let (status, body) = app
        .request(Method::PUT, &uri, Some(json!({ "phone": null })), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["phone"].is_null());
    assert_eq!(body["name"], "Noodle Palace");
}
