//! Resource service routes and wire format.

mod common;

use lobby::auth::Session;
use lobby::resources::{CreateActivityBooking, CreateRoomBooking, UpdateRoomBooking};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::Harness;

fn room_booking_json(id: i64) -> serde_json::Value {
    json!({
        "reservaId": id,
        "huespedId": 42,
        "habitacionId": 101,
        "fechaCheckIn": "2026-03-01T00:00:00",
        "fechaCheckOut": "2026-03-04T00:00:00",
        "numeroHuespedes": 2,
        "numeroNinos": 1,
        "montoTotal": 450.0,
        "montoPagado": 150.0,
        "estado": "Confirmada"
    })
}

#[tokio::test]
async fn bearer_header_attached_to_every_call() {
    let h = Harness::start(Some(Session::new("live", "r1"))).await;
    Mock::given(method("GET"))
        .and(path("/api/Reservas/huesped/42"))
        .and(header("authorization", "Bearer live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([room_booking_json(5)])))
        .expect(1)
        .mount(&h.api)
        .await;

    let bookings = h.client.room_bookings().by_guest(42).await.expect("by guest");

    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].room_id, 101);
    assert_eq!(bookings[0].balance_due(), 300.0);
}

#[tokio::test]
async fn no_session_sends_no_authorization_header() {
    let h = Harness::start(None).await;
    Mock::given(method("GET"))
        .and(path("/api/ActividadesRecreativas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.api)
        .await;

    h.client.activities().list().await.expect("list");
    assert_eq!(h.api_authorizations().await, vec![None]);
}

#[tokio::test]
async fn create_room_booking_posts_resource_field_names() {
    let h = Harness::start(Some(Session::new("live", "r1"))).await;
    Mock::given(method("POST"))
        .and(path("/api/Reservas"))
        .and(body_json(json!({
            "huespedId": 42,
            "habitacionId": 101,
            "fechaCheckIn": "2026-03-01T00:00:00",
            "fechaCheckOut": "2026-03-04T00:00:00",
            "numeroHuespedes": 2,
            "numeroNinos": 1,
            "montoTotal": 450.0,
            "montoPagado": 150.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(room_booking_json(9)))
        .expect(1)
        .mount(&h.api)
        .await;

    let created = h
        .client
        .room_bookings()
        .create(&CreateRoomBooking {
            guest_id: 42,
            room_id: 101,
            check_in: "2026-03-01T00:00:00".to_string(),
            check_out: "2026-03-04T00:00:00".to_string(),
            guests: 2,
            children: 1,
            total_amount: 450.0,
            amount_paid: 150.0,
            created_by: None,
            notes: None,
        })
        .await
        .expect("create");

    assert_eq!(created.id, 9);
}

#[tokio::test]
async fn update_and_delete_target_the_record_path() {
    let h = Harness::start(Some(Session::new("live", "r1"))).await;
    Mock::given(method("PUT"))
        .and(path("/api/Reservas/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.api)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/Reservas/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.api)
        .await;

    let service = h.client.room_bookings();
    service
        .update(&UpdateRoomBooking {
            id: 9,
            room_id: 102,
            check_in: "2026-03-01T00:00:00".to_string(),
            check_out: "2026-03-05T00:00:00".to_string(),
            guests: 2,
            children: 0,
            total_amount: 600.0,
            amount_paid: 600.0,
            status: "Pagada".to_string(),
            checked_in_at: None,
            checked_out_at: None,
            notes: Some("late arrival".to_string()),
        })
        .await
        .expect("update");
    service.delete(9).await.expect("delete");
}

#[tokio::test]
async fn activity_booking_create_round_trip() {
    let h = Harness::start(Some(Session::new("live", "r1"))).await;
    Mock::given(method("POST"))
        .and(path("/api/ReservasActividades"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "reservaActividadId": 3,
            "actividadId": 7,
            "huespedId": 42,
            "fechaReserva": "2026-03-02",
            "horaReserva": "10:00:00",
            "numeroPersonas": 2,
            "estado": "Pendiente",
            "montoTotal": 51.0,
            "recordatorioEnviado": false
        })))
        .expect(1)
        .mount(&h.api)
        .await;

    let booking = h
        .client
        .activity_bookings()
        .create(&CreateActivityBooking {
            activity_id: 7,
            guest_id: 42,
            date: "2026-03-02".to_string(),
            time: "10:00:00".to_string(),
            party_size: 2,
            total_amount: 51.0,
            special_notes: None,
        })
        .await
        .expect("create");

    assert_eq!(booking.id, 3);
    assert_eq!(booking.status, "Pendiente");
    assert!(!booking.reminder_sent);
}

#[tokio::test]
async fn not_found_is_an_api_error() {
    let h = Harness::start(Some(Session::new("live", "r1"))).await;
    Mock::given(method("GET"))
        .and(path("/api/ActividadesRecreativas/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&h.api)
        .await;

    let err = h.client.activities().get(404).await.unwrap_err();
    assert_eq!(err.category(), lobby::error::ErrorCategory::NotFound);
}
