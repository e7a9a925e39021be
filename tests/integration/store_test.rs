//! Entity store integration tests
//!
//! The generic store over a real HTTP round trip: list fetches with
//! filters and pagination, optimistic local mutation after writes, and
//! state preservation on failure.

use crate::common::{client_for, user_json, user_list_json};
use campusync::api::users::{CreateUser, UpdateUser};
use campusync::models::Role;
use campusync::store::{NotificationStore, UserStore};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_list_replaces_items_and_pagination() {
    let server = MockServer::start().await;
    let (client, _tokens) = client_for(&server);
    let mut store = UserStore::for_client(client);

    let body = user_list_json(&[user_json(1, "ada", "student"), user_json(2, "grace", "teacher")]);
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    assert_ok!(store.fetch_list().await);
    assert_eq!(store.items.len(), 2);
    assert_eq!(store.pagination.total, 2);
    assert!(!store.is_loading);
    assert!(store.error.is_none());
}

#[tokio::test]
async fn test_set_filters_resets_page_and_sends_them() {
    let server = MockServer::start().await;
    let (client, _tokens) = client_for(&server);
    let mut store = UserStore::for_client(client);
    store.pagination.page = 3;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "1"))
        .and(query_param("role", "teacher"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_list_json(&[user_json(2, "grace", "teacher")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    store.set_filters(vec![("role".to_string(), "teacher".to_string())]);
    assert_eq!(store.pagination.page, 1);

    store.fetch_list().await.unwrap();
    assert_eq!(store.items.len(), 1);
    assert_eq!(store.items[0].role, Role::Teacher);
}

#[tokio::test]
async fn test_failed_fetch_keeps_items_and_records_error() {
    let server = MockServer::start().await;
    let (client, _tokens) = client_for(&server);
    let mut store = UserStore::for_client(client);

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_list_json(&[user_json(1, "ada", "student")])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "database unavailable",
        })))
        .mount(&server)
        .await;

    store.fetch_list().await.unwrap();
    assert_eq!(store.items.len(), 1);

    let error = store.fetch_list().await.unwrap_err();
    assert_eq!(error.status(), Some(500));
    assert_eq!(store.items.len(), 1, "stale data beats no data");
    assert_eq!(store.error.as_deref(), Some("database unavailable"));
    assert!(!store.is_loading);
}

#[tokio::test]
async fn test_create_prepends_and_bumps_total() {
    let server = MockServer::start().await;
    let (client, _tokens) = client_for(&server);
    let mut store = UserStore::for_client(client);

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_list_json(&[user_json(1, "ada", "student")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": user_json(2, "grace", "teacher"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    store.fetch_list().await.unwrap();
    store
        .create(&CreateUser {
            username: "grace".to_string(),
            password: "hopper".to_string(),
            role: Role::Teacher,
            email: None,
            department_id: None,
            class_id: None,
            full_name: None,
        })
        .await
        .unwrap();

    assert_eq!(store.items.len(), 2);
    assert_eq!(store.items[0].username, "grace", "new entity leads the list");
    assert_eq!(store.pagination.total, 2);
}

#[tokio::test]
async fn test_update_replaces_in_place_and_syncs_selected() {
    let server = MockServer::start().await;
    let (client, _tokens) = client_for(&server);
    let mut store = UserStore::for_client(client);

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_list_json(&[
            user_json(1, "ada", "student"),
            user_json(2, "grace", "teacher"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(2, "grace", "teacher")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(2, "grace", "hod")))
        .mount(&server)
        .await;

    store.fetch_list().await.unwrap();
    store.fetch_one(2).await.unwrap();
    store
        .update(
            2,
            &UpdateUser {
                role: Some(Role::Hod),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(store.items.len(), 2);
    assert_eq!(store.items[1].role, Role::Hod);
    assert_eq!(store.selected.as_ref().unwrap().role, Role::Hod);
}

#[tokio::test]
async fn test_remove_drops_locally_and_clears_selection() {
    let server = MockServer::start().await;
    let (client, _tokens) = client_for(&server);
    let mut store = UserStore::for_client(client);

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_list_json(&[
            user_json(1, "ada", "student"),
            user_json(2, "grace", "teacher"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(1, "ada", "student")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store.fetch_list().await.unwrap();
    store.fetch_one(1).await.unwrap();
    store.remove(1).await.unwrap();

    assert_eq!(store.items.len(), 1);
    assert_eq!(store.items[0].id, 2);
    assert_eq!(store.pagination.total, 1);
    assert!(store.selected.is_none());
}

fn notification_json(id: i64, read: bool) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": 1,
        "title": format!("Notification {}", id),
        "message": "CSC201 results are out",
        "read": read,
    })
}

#[tokio::test]
async fn test_notification_store_acknowledges_in_place() {
    let server = MockServer::start().await;
    let (client, _tokens) = client_for(&server);
    let mut store = NotificationStore::for_client(client);

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [notification_json(1, false), notification_json(2, false)],
            "pagination": {"page": 1, "limit": 10, "total": 2, "total_pages": 1},
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/notifications/1/read"))
        .respond_with(ResponseTemplate::new(200).set_body_json(notification_json(1, true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/notifications/read-all"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/notifications/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store.fetch_list().await.unwrap();
    assert_eq!(store.unread_count(), 2);

    store.mark_read(1).await.unwrap();
    assert!(store.items[0].read);
    assert_eq!(store.unread_count(), 1);

    store.mark_all_read().await.unwrap();
    assert_eq!(store.unread_count(), 0);

    store.remove(2).await.unwrap();
    assert_eq!(store.items.len(), 1);
    assert_eq!(store.pagination.total, 1);
    assert!(store.error.is_none());
}

#[tokio::test]
async fn test_remove_many_hits_bulk_endpoint() {
    let server = MockServer::start().await;
    let (client, _tokens) = client_for(&server);
    let mut store = UserStore::for_client(client);

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_list_json(&[
            user_json(1, "ada", "student"),
            user_json(2, "grace", "teacher"),
            user_json(3, "alan", "student"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/bulk"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    store.fetch_list().await.unwrap();
    store.remove_many(&[1, 3]).await.unwrap();

    assert_eq!(store.items.len(), 1);
    assert_eq!(store.items[0].id, 2);
    assert_eq!(store.pagination.total, 1);
}
