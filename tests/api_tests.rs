//! End-to-end tests of the REST API over in-memory storage
//!
//! The server clock is pinned to 19-10-2026 so booking dates are stable.

use axum::http::StatusCode;
use axum_test::TestServer;
use car_rental::prelude::*;
use serde_json::{Value, json};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

/// `today + days` as `DD-MM-YYYY`
fn day(days: i64) -> String {
    (today() + chrono::Duration::days(days))
        .format("%d-%m-%Y")
        .to_string()
}

fn server_with(config: AppConfig) -> TestServer {
    let app = ServerBuilder::new()
        .with_config(config)
        .with_stores(Stores::in_memory())
        .with_clock(FixedClock::at_date(today()))
        .build()
        .expect("router should build");
    TestServer::new(app)
}

fn server() -> TestServer {
    server_with(AppConfig::default())
}

async fn create_car(server: &TestServer, model: &str) -> String {
    let response = server
        .post("/cars")
        .json(&json!({
            "model": model,
            "specs": ["5 seats", "Automatic"],
            "rent": 49.5,
            "photo": "https://img.example/car.jpg"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["acknowledged"], true);
    body["insertedId"].as_str().unwrap().to_string()
}

async fn submit(server: &TestServer, car_id: &str, from: &str, to: &str) -> axum_test::TestResponse {
    server
        .post("/cars/request")
        .json(&json!({
            "carId": car_id,
            "customerName": "Ada Lovelace",
            "customerPhone": "555-0100",
            "fromDate": from,
            "toDate": to
        }))
        .await
}

async fn submit_ok(server: &TestServer, car_id: &str) -> String {
    let response = submit(server, car_id, &day(1), &day(4)).await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["insertedId"].as_str().unwrap().to_string()
}

// =============================================================================
// Catalog
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_car() {
        let server = server();
        let id = create_car(&server, "Corolla").await;

        let response = server.get(&format!("/cars/{}", id)).await;
        response.assert_status_ok();

        let car: Value = response.json();
        assert_eq!(car["id"], id);
        assert_eq!(car["model"], "Corolla");
        assert_eq!(car["rent"], 49.5);
        assert_eq!(car["photo"], "https://img.example/car.jpg");
        assert_eq!(car["specs"], json!(["5 seats", "Automatic"]));
        assert_eq!(car["rentedOut"], false);
    }

    #[tokio::test]
    async fn test_create_forces_rented_out_false() {
        let server = server();
        let response = server
            .post("/cars")
            .json(&json!({
                "model": "Civic",
                "rent": "35",
                "rentedOut": true
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let id = response.json::<Value>()["insertedId"].as_str().unwrap().to_string();

        let car: Car = server.get(&format!("/cars/{}", id)).await.json();
        assert!(!car.rented_out);
        assert_eq!(car.daily_rate, 35.0);
    }

    #[tokio::test]
    async fn test_list_cars() {
        let server = server();
        create_car(&server, "Corolla").await;
        create_car(&server, "Civic").await;

        let cars: Vec<Car> = server.get("/cars").await.json();
        let models: Vec<&str> = cars.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["Corolla", "Civic"]);
    }

    #[tokio::test]
    async fn test_get_unknown_and_invalid_ids() {
        let server = server();

        let response = server.get(&format!("/cars/{}", Uuid::new_v4())).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["code"], "ENTITY_NOT_FOUND");

        let response = server.get("/cars/xyz").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_ID");
    }

    #[tokio::test]
    async fn test_update_allow_list() {
        let server = server();
        let id = create_car(&server, "Corolla").await;

        let response = server
            .put(&format!("/cars/{}", id))
            .json(&json!({
                "model": "Corolla Hybrid",
                "rent": 55,
                "owner": "someone",
                "id": Uuid::new_v4()
            }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["message"], "Car updated successfully");

        let car: Car = server.get(&format!("/cars/{}", id)).await.json();
        assert_eq!(car.id.to_string(), id);
        assert_eq!(car.model, "Corolla Hybrid");
        assert_eq!(car.daily_rate, 55.0);
    }

    #[tokio::test]
    async fn test_update_without_changes() {
        let server = server();
        let id = create_car(&server, "Corolla").await;

        let response = server
            .put(&format!("/cars/{}", id))
            .json(&json!({ "model": "Corolla" }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["message"], "No changes made");
    }

    #[tokio::test]
    async fn test_update_unknown_car() {
        let server = server();
        let response = server
            .put(&format!("/cars/{}", Uuid::new_v4()))
            .json(&json!({ "model": "Ghost" }))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_car() {
        let server = server();
        let id = create_car(&server, "Corolla").await;

        let response = server.delete(&format!("/cars/{}", id)).await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "acknowledged": true, "deletedCount": 1 })
        );

        let response = server.delete(&format!("/cars/{}", id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["deletedCount"], 0);

        server
            .get(&format!("/cars/{}", id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = server();
        let response = server
            .post("/cars")
            .content_type("application/json")
            .bytes("{\"model\": ".into())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_JSON");
    }
}

// =============================================================================
// Requests
// =============================================================================

mod request_dates {
    use super::*;

    #[tokio::test]
    async fn test_fourteen_day_span_accepted() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;

        submit(&server, &car_id, &day(1), &day(15))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_fifteen_day_span_rejected() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;

        let response = submit(&server, &car_id, &day(1), &day(16)).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "SPAN_TOO_LONG");
    }

    #[tokio::test]
    async fn test_rejection_reasons() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;

        let cases = [
            (day(0), day(3), "START_NOT_FUTURE"),
            (day(-2), day(3), "START_NOT_FUTURE"),
            (day(3), day(3), "END_BEFORE_START"),
            (day(5), day(3), "END_BEFORE_START"),
            ("31-02-2027".to_string(), "03-03-2027".to_string(), "BAD_DATE_FORMAT"),
            ("2026/10/25".to_string(), day(8), "BAD_DATE_FORMAT"),
            ("aa-bb-cccc".to_string(), day(8), "BAD_DATE_FORMAT"),
            (String::new(), day(8), "MISSING_FIELD"),
        ];

        for (from, to, code) in cases {
            let response = submit(&server, &car_id, &from, &to).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let body: Value = response.json();
            assert_eq!(body["code"], code, "{} → {}", from, to);
            assert_eq!(body["details"]["reason"], code);
        }

        let requests: Vec<Value> = server.get("/cars/getrequests").await.json();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_missing_dates_reported_first() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;

        let response = server
            .post("/cars/request")
            .json(&json!({ "carId": car_id, "customerPhone": "1" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "MISSING_FIELD");
    }

    #[tokio::test]
    async fn test_customer_fields_optional() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;

        server
            .post("/cars/request")
            .json(&json!({
                "carId": car_id,
                "customerName": "Ada Lovelace",
                "customerPhone": "",
                "fromDate": day(1),
                "toDate": day(3)
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_missing_car_id_uses_wire_name() {
        let server = server();

        let response = server
            .post("/cars/request")
            .json(&json!({ "fromDate": day(1), "toDate": day(3) }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"]["fields"][0]["field"], "carId");
    }

    #[tokio::test]
    async fn test_unknown_car() {
        let server = server();
        let response = submit(&server, &Uuid::new_v4().to_string(), &day(1), &day(3)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

mod requests {
    use super::*;

    #[tokio::test]
    async fn test_submitted_request_is_listed() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;
        let request_id = submit_ok(&server, &car_id).await;

        let requests: Vec<Value> = server.get("/cars/getrequests").await.json();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["id"], request_id);
        assert_eq!(requests[0]["carId"], car_id);
        assert_eq!(requests[0]["customerName"], "Ada Lovelace");
        assert_eq!(requests[0]["customerPhone"], "555-0100");
        assert_eq!(requests[0]["fromDate"], day(1));
        assert_eq!(requests[0]["toDate"], day(4));
        assert!(requests[0]["requestTime"].is_string());
    }

    #[tokio::test]
    async fn test_delete_request_by_key() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;
        submit_ok(&server, &car_id).await;

        let key = json!({
            "carId": car_id,
            "customerName": "Ada Lovelace",
            "customerPhone": "555-0100"
        });

        server
            .delete("/cars/deleterequest")
            .json(&key)
            .await
            .assert_status_ok();

        let requests: Vec<Value> = server.get("/cars/getrequests").await.json();
        assert!(requests.is_empty());

        server
            .delete("/cars/deleterequest")
            .json(&key)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_reject_by_id() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;
        let request_id = submit_ok(&server, &car_id).await;

        server
            .delete(&format!("/cars/requests/{}", request_id))
            .await
            .assert_status_ok();

        server
            .delete(&format!("/cars/requests/{}", request_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let car: Car = server.get(&format!("/cars/{}", car_id)).await.json();
        assert!(!car.rented_out);
    }

    #[tokio::test]
    async fn test_overlap_rejected_when_enabled() {
        let mut config = AppConfig::default();
        config.booking.reject_overlaps = true;
        let server = server_with(config);
        let car_id = create_car(&server, "Corolla").await;

        submit(&server, &car_id, &day(1), &day(5))
            .await
            .assert_status(StatusCode::CREATED);

        let response = submit(&server, &car_id, &day(3), &day(7)).await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["code"], "BOOKING_OVERLAP");

        submit(&server, &car_id, &day(5), &day(7))
            .await
            .assert_status(StatusCode::CREATED);
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn test_accept_then_return() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;
        let request_id = submit_ok(&server, &car_id).await;

        let response = server
            .post(&format!("/cars/requests/{}/accept", request_id))
            .await;
        response.assert_status(StatusCode::CREATED);

        let rental: Value = response.json();
        assert_eq!(rental["carId"], car_id);
        assert_eq!(rental["carModel"], "Corolla");
        assert_eq!(rental["carPhoto"], "https://img.example/car.jpg");
        assert_eq!(rental["customerName"], "Ada Lovelace");
        assert_eq!(rental["fromDate"], day(1));
        assert_eq!(rental["toDate"], day(4));
        assert!(rental["rentalTime"].is_string());

        let requests: Vec<Value> = server.get("/cars/getrequests").await.json();
        assert!(requests.is_empty());

        let car: Car = server.get(&format!("/cars/{}", car_id)).await.json();
        assert!(car.rented_out);

        let active: Vec<Value> = server.get("/cars/rentlist").await.json();
        assert_eq!(active.len(), 1);

        let response = server.post(&format!("/cars/{}/return", car_id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["rentedOut"], false);

        let active: Vec<Value> = server.get("/cars/rentlist").await.json();
        assert!(active.is_empty());

        let history: Vec<Value> = server
            .get("/cars/rentlist")
            .add_query_param("include_returned", true)
            .await
            .json();
        assert_eq!(history.len(), 1);
        assert!(history[0]["returnedAt"].is_string());
    }

    #[tokio::test]
    async fn test_return_with_delete_policy() {
        let mut config = AppConfig::default();
        config.booking.return_policy = ReturnPolicy::Delete;
        let server = server_with(config);

        let car_id = create_car(&server, "Corolla").await;
        let request_id = submit_ok(&server, &car_id).await;
        server
            .post(&format!("/cars/requests/{}/accept", request_id))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .post(&format!("/cars/{}/return", car_id))
            .await
            .assert_status_ok();

        let history: Vec<Value> = server
            .get("/cars/rentlist")
            .add_query_param("include_returned", true)
            .await
            .json();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_accept_rented_out_car_conflicts() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;
        let first = submit_ok(&server, &car_id).await;
        let second = submit_ok(&server, &car_id).await;

        server
            .post(&format!("/cars/requests/{}/accept", first))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(&format!("/cars/requests/{}/accept", second))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["code"], "CAR_ALREADY_RENTED");

        let requests: Vec<Value> = server.get("/cars/getrequests").await.json();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["id"], second);
    }

    #[tokio::test]
    async fn test_accept_when_car_deleted() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;
        let request_id = submit_ok(&server, &car_id).await;

        server
            .delete(&format!("/cars/{}", car_id))
            .await
            .assert_status_ok();

        server
            .post(&format!("/cars/requests/{}/accept", request_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let requests: Vec<Value> = server.get("/cars/getrequests").await.json();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn test_accept_unknown_request() {
        let server = server();
        server
            .post(&format!("/cars/requests/{}/accept", Uuid::new_v4()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_return_unknown_car() {
        let server = server();
        server
            .post(&format!("/cars/{}/return", Uuid::new_v4()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_manual_flow_through_rentlist() {
        let server = server();
        let car_id = create_car(&server, "Corolla").await;
        submit_ok(&server, &car_id).await;

        server
            .delete("/cars/deleterequest")
            .json(&json!({
                "carId": car_id,
                "customerName": "Ada Lovelace",
                "customerPhone": "555-0100"
            }))
            .await
            .assert_status_ok();

        server
            .put(&format!("/cars/{}", car_id))
            .json(&json!({ "rentedOut": true }))
            .await
            .assert_status_ok();

        let response = server
            .post("/cars/rentlist")
            .json(&json!({
                "carId": car_id,
                "carModel": "Corolla",
                "carPhoto": "https://img.example/car.jpg",
                "fromDate": day(1),
                "toDate": day(4),
                "customerName": "Ada Lovelace"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["acknowledged"], true);

        let active: Vec<Value> = server.get("/cars/rentlist").await.json();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0]["carModel"], "Corolla");
    }

    #[tokio::test]
    async fn test_rentlist_insert_checks_presence_and_format() {
        let server = server();

        let response = server
            .post("/cars/rentlist")
            .json(&json!({
                "carId": Uuid::new_v4(),
                "carModel": "Corolla",
                "fromDate": day(1),
                "toDate": day(4),
                "customerName": "Ada Lovelace"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");

        let response = server
            .post("/cars/rentlist")
            .json(&json!({
                "carId": Uuid::new_v4(),
                "carModel": "Corolla",
                "carPhoto": "https://img.example/car.jpg",
                "fromDate": "2026-10-20",
                "toDate": day(4),
                "customerName": "Ada Lovelace"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "BAD_DATE_FORMAT");
    }

    #[tokio::test]
    async fn test_rentlist_bad_query() {
        let server = server();

        let response = server
            .get("/cars/rentlist")
            .add_query_param("include_returned", "yes")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_QUERY");
    }
}

#[tokio::test]
async fn test_health() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}
