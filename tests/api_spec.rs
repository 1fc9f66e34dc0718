use axum::http::StatusCode;
use axum_test::TestServer;
use roomdesk::api::create_router;
use roomdesk::booking::{BookingService, ServiceConfig};
use roomdesk::db::Database;
use roomdesk::models::*;
use serde_json::json;

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let service = BookingService::new(db, ServiceConfig::default());
    let app = create_router(service);
    TestServer::new(app).expect("Failed to create test server")
}

async fn seed_catalog(server: &TestServer) {
    for (id, name) in [("r1", "Falcon"), ("r2", "Eagle")] {
        server
            .post("/api/v1/rooms")
            .json(&json!({ "id": id, "name": name }))
            .await
            .assert_status(StatusCode::CREATED);
    }
    for (id, full_name) in [("s7", "John Smith"), ("s8", "Ana Lovelace")] {
        server
            .post("/api/v1/staff")
            .json(&json!({ "id": id, "full_name": full_name }))
            .await
            .assert_status(StatusCode::CREATED);
    }
}

fn book_meeting_payload() -> serde_json::Value {
    json!({
        "intent": "BookMeeting",
        "slots": {
            "Room": "Falcon",
            "MeetingDate": "2024-05-01",
            "MeetingTime": "09:00",
            "Duration": 30,
            "Attendees": "John Smith, Ana Lovelace"
        }
    })
}

mod fulfillment {
    use super::*;

    #[tokio::test]
    async fn books_a_meeting_from_an_intent_payload() {
        let server = setup();
        seed_catalog(&server).await;

        let response = server
            .post("/api/v1/fulfillment")
            .json(&book_meeting_payload())
            .await;

        response.assert_status_ok();
        let reply: FulfillmentResponse = response.json();
        assert_eq!(reply.state, FulfillmentState::Fulfilled);
        assert_eq!(
            reply.message,
            "Booking confirmed for room Falcon at 09:00 on 2024-05-01 with attendees: John Smith, Ana Lovelace."
        );
    }

    #[tokio::test]
    async fn accepts_duration_sent_as_a_string() {
        let server = setup();
        seed_catalog(&server).await;

        let mut payload = book_meeting_payload();
        payload["slots"]["Duration"] = json!("45");

        let reply: FulfillmentResponse = server
            .post("/api/v1/fulfillment")
            .json(&payload)
            .await
            .json();
        assert_eq!(reply.state, FulfillmentState::Fulfilled);
    }

    #[tokio::test]
    async fn rejects_an_overlapping_booking() {
        let server = setup();
        seed_catalog(&server).await;

        server
            .post("/api/v1/fulfillment")
            .json(&book_meeting_payload())
            .await
            .assert_status_ok();

        let mut payload = book_meeting_payload();
        payload["slots"]["MeetingTime"] = json!("09:15");
        payload["slots"]["Attendees"] = json!("");

        let reply: FulfillmentResponse = server
            .post("/api/v1/fulfillment")
            .json(&payload)
            .await
            .json();
        assert_eq!(reply.state, FulfillmentState::Failed);
        assert_eq!(reply.message, "Room already booked. Suggest another slot.");
    }

    #[tokio::test]
    async fn reports_a_missing_slot_before_any_work() {
        let server = setup();
        seed_catalog(&server).await;

        let mut payload = book_meeting_payload();
        payload["slots"]
            .as_object_mut()
            .unwrap()
            .remove("MeetingTime");

        let reply: FulfillmentResponse = server
            .post("/api/v1/fulfillment")
            .json(&payload)
            .await
            .json();
        assert_eq!(reply.state, FulfillmentState::Failed);
        assert!(reply.message.contains("MeetingTime"), "{}", reply.message);

        let bookings: Vec<Booking> = server.get("/api/v1/bookings").await.json();
        assert!(bookings.is_empty());
    }

    #[tokio::test]
    async fn hides_internal_detail_for_malformed_slots() {
        let server = setup();
        seed_catalog(&server).await;

        let mut payload = book_meeting_payload();
        payload["slots"]["MeetingDate"] = json!("sometime next week");

        let reply: FulfillmentResponse = server
            .post("/api/v1/fulfillment")
            .json(&payload)
            .await
            .json();
        assert_eq!(reply.state, FulfillmentState::Failed);
        assert_eq!(
            reply.message,
            "Something went wrong on our side. Please try again later."
        );
    }

    #[tokio::test]
    async fn answers_check_availability() {
        let server = setup();
        seed_catalog(&server).await;

        let check = json!({
            "intent": "CheckAvailability",
            "slots": { "Room": "Falcon", "CheckDate": "2024-05-01", "CheckTime": "09:15" }
        });

        let reply: FulfillmentResponse = server.post("/api/v1/fulfillment").json(&check).await.json();
        assert_eq!(reply.state, FulfillmentState::Fulfilled);
        assert_eq!(reply.message, "Room Falcon is available at 09:15.");

        server
            .post("/api/v1/fulfillment")
            .json(&book_meeting_payload())
            .await
            .assert_status_ok();

        let reply: FulfillmentResponse = server.post("/api/v1/fulfillment").json(&check).await.json();
        assert_eq!(reply.state, FulfillmentState::Failed);
        assert_eq!(reply.message, "Room not available at the requested time.");
    }

    #[tokio::test]
    async fn falls_back_on_an_unrecognized_intent() {
        let server = setup();

        let reply: FulfillmentResponse = server
            .post("/api/v1/fulfillment")
            .json(&json!({ "intent": "OrderPizza", "slots": {} }))
            .await
            .json();

        assert_eq!(reply.state, FulfillmentState::Failed);
        let prompts = [
            "I'm not sure what you're asking.",
            "Could you please rephrase that?",
            "I didn't quite catch that. Can you say it again?",
        ];
        assert!(prompts.contains(&reply.message.as_str()), "{}", reply.message);
    }
}

mod bookings {
    use super::*;

    #[tokio::test]
    async fn lists_committed_bookings_verbatim() {
        let server = setup();
        seed_catalog(&server).await;

        server
            .post("/api/v1/fulfillment")
            .json(&book_meeting_payload())
            .await
            .assert_status_ok();

        let response = server.get("/api/v1/bookings").await;
        response.assert_status_ok();

        let bookings: Vec<Booking> = response.json();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].room_id, "r1");
        assert_eq!(bookings[0].date.to_string(), "2024-05-01");
        assert_eq!(bookings[0].start_time.to_string(), "09:00");
        assert_eq!(bookings[0].end_time.to_string(), "09:30");
        assert_eq!(
            bookings[0].attendees,
            vec!["s7".to_string(), "s8".to_string()]
        );
    }

    #[tokio::test]
    async fn returns_empty_list_when_nothing_is_booked() {
        let server = setup();
        let bookings: Vec<Booking> = server.get("/api/v1/bookings").await.json();
        assert!(bookings.is_empty());
    }
}

mod catalog {
    use super::*;

    #[tokio::test]
    async fn lists_rooms_ordered_by_name() {
        let server = setup();
        seed_catalog(&server).await;

        let rooms: Vec<Room> = server.get("/api/v1/rooms").await.json();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name, "Eagle");
        assert_eq!(rooms[1].name, "Falcon");
    }

    #[tokio::test]
    async fn generates_an_id_when_the_catalog_writer_omits_one() {
        let server = setup();

        let response = server
            .post("/api/v1/staff")
            .json(&json!({ "full_name": "Grace Hopper" }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let member: StaffMember = response.json();
        assert!(!member.id.is_empty());

        let staff: Vec<StaffMember> = server.get("/api/v1/staff").await.json();
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].full_name, "Grace Hopper");
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();
        let response = server.get("/api/v1/health").await;
        response.assert_status_ok();
    }
}
