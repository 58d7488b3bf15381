//! Endpoint tests for skier intake and association wiring, run against the
//! assembled API over an in-memory store.

mod support;

use actix_web::test;
use serde_json::{Value, json};

use skistation::domain::TRACE_ID_HEADER;
use support::{station_app, station_state};

const BASE: &str = "/api/v1/skiers";

fn skier_payload(first_name: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Moreau",
        "dateOfBirth": "1995-04-12",
        "city": "Annecy",
    })
}

fn course_payload() -> Value {
    json!({
        "level": 2,
        "courseType": "COLLECTIVE_ADULT",
        "support": "SKI",
        "price": 45.0,
        "timeSlot": 3,
    })
}

#[actix_web::test]
async fn adding_with_a_nested_subscription_composes_the_view() {
    let app = test::init_service(station_app(station_state())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("{BASE}/add"))
            .set_json(json!({
                "firstName": "Nora",
                "lastName": "Moreau",
                "dateOfBirth": "1995-04-12",
                "city": "Annecy",
                "subscription": {
                    "subscriptionType": "MONTHLY",
                    "startDate": "2024-01-10",
                    "price": 90.0,
                },
            }))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["subscription"]["endDate"], "2024-02-10");
    assert_eq!(body["registrations"], json!([]));
    assert!(
        body.get("subscriptionId").is_none(),
        "the view nests the subscription instead of exposing its key"
    );
}

#[actix_web::test]
async fn plain_add_ignores_enrolment_weeks() {
    let app = test::init_service(station_app(station_state())).await;

    let mut payload = skier_payload("Luc");
    payload["registrations"] = json!([{ "numWeek": 5 }]);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("{BASE}/add"))
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["registrations"], json!([]));

    let all: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/registrations/all")
            .to_request(),
    )
    .await;
    assert_eq!(all, json!([]), "no enrolment rows without a course");
}

#[actix_web::test]
async fn add_and_assign_enrols_one_registration_per_week() {
    let app = test::init_service(station_app(station_state())).await;
    let course: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/courses/add")
            .set_json(course_payload())
            .to_request(),
    )
    .await;
    let course_id = course["id"].as_i64().expect("course id");

    let mut payload = skier_payload("Nora");
    payload["registrations"] = json!([{ "numWeek": 1 }, { "numWeek": 3 }]);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("{BASE}/add-and-assign-to-course/{course_id}"))
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = test::read_body_json(resp).await;
    let registrations = body["registrations"].as_array().expect("array");
    assert_eq!(registrations.len(), 2);
    let weeks: Vec<i64> = registrations
        .iter()
        .filter_map(|row| row["numWeek"].as_i64())
        .collect();
    assert_eq!(weeks, vec![1, 3]);
    for row in registrations {
        assert_eq!(row["courseId"].as_i64(), Some(course_id));
        assert!(
            row.get("skierId").is_none(),
            "nested rows stay free of back references"
        );
    }
}

#[actix_web::test]
async fn assigning_to_a_subscription_links_the_view() {
    let app = test::init_service(station_app(station_state())).await;
    let skier: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("{BASE}/add"))
            .set_json(skier_payload("Nora"))
            .to_request(),
    )
    .await;
    let subscription: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/subscriptions/add")
            .set_json(json!({
                "subscriptionType": "ANNUAL",
                "startDate": "2024-01-10",
                "price": 640.0,
            }))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!(
                "{BASE}/assign-to-subscription/{}/{}",
                skier["id"], subscription["id"]
            ))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["subscription"]["id"], subscription["id"]);
}

#[actix_web::test]
async fn assigning_to_a_missing_subscription_is_a_structured_404() {
    let app = test::init_service(station_app(station_state())).await;
    let skier: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("{BASE}/add"))
            .set_json(skier_payload("Nora"))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("{BASE}/assign-to-subscription/{}/999", skier["id"]))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status().as_u16(), 404);
    assert!(resp.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["details"]["subscriptionId"], 999);
}

#[actix_web::test]
async fn assigning_a_missing_skier_is_a_structured_404() {
    let app = test::init_service(station_app(station_state())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("{BASE}/assign-to-subscription/999/1"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["details"]["skierId"], 999);
}

#[actix_web::test]
async fn piste_links_are_recorded_but_not_rendered() {
    let app = test::init_service(station_app(station_state())).await;
    let skier: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("{BASE}/add"))
            .set_json(skier_payload("Nora"))
            .to_request(),
    )
    .await;
    let piste: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/pistes/add")
            .set_json(json!({
                "name": "La Verte",
                "color": "GREEN",
                "length": 1200,
                "slope": 12,
            }))
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!(
                "{BASE}/assign-to-piste/{}/{}",
                skier["id"], piste["id"]
            ))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("pistes").is_none(), "views leave piste usage out");

    // The link is still held: the piste cannot be removed while in use.
    let blocked = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/pistes/delete/{}", piste["id"]))
            .to_request(),
    )
    .await;
    assert_eq!(blocked.status().as_u16(), 409);
}

#[actix_web::test]
async fn by_subscription_type_filters_the_composed_views() {
    let app = test::init_service(station_app(station_state())).await;
    for (name, plan) in [("Nora", "ANNUAL"), ("Luc", "MONTHLY")] {
        let mut payload = skier_payload(name);
        payload["subscription"] = json!({
            "subscriptionType": plan,
            "startDate": "2024-01-10",
            "price": 90.0,
        });
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("{BASE}/add"))
                .set_json(payload)
                .to_request(),
        )
        .await;
        assert_eq!(resp.status().as_u16(), 201);
    }

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("{BASE}/by-subscription-type?typeSubscription=ANNUAL"))
            .to_request(),
    )
    .await;

    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["firstName"], "Nora");
    assert_eq!(rows[0]["subscription"]["subscriptionType"], "ANNUAL");
}

#[actix_web::test]
async fn deleting_a_skier_cascades_to_their_registrations() {
    let app = test::init_service(station_app(station_state())).await;
    let course: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/courses/add")
            .set_json(course_payload())
            .to_request(),
    )
    .await;
    let mut payload = skier_payload("Nora");
    payload["registrations"] = json!([{ "numWeek": 2 }]);
    let skier: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri(&format!("{BASE}/add-and-assign-to-course/{}", course["id"]))
            .set_json(payload)
            .to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("{BASE}/delete/{}", skier["id"]))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 204);

    let all: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/registrations/all")
            .to_request(),
    )
    .await;
    assert_eq!(all, json!([]), "enrolments leave with their skier");
}

#[actix_web::test]
async fn requesting_an_absent_skier_is_an_empty_204() {
    let app = test::init_service(station_app(station_state())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{BASE}/get/4242"))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status().as_u16(), 204);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}
