use std::sync::Arc;

use actix_web::http::header::LOCATION;
use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{
    AppendReservation, ClientDetails, ClientDetailsPatch, ClientId, GetAllClientsResponse,
    GetAllRoomsResponse, RoomDetails, RoomDetailsPatch, RoomId,
};
use crate::clients_repository::{ClientsRepository, ClientsRepositoryError};
use crate::reports::clients_report;
use crate::rooms_repository::{RoomsRepository, RoomsRepositoryError};
use crate::validation::{
    validate_client, validate_client_patch, validate_room, validate_room_patch,
};

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn get_all_rooms(
    rooms_repository: Data<Arc<dyn RoomsRepository>>,
) -> Result<HttpResponse, Error> {
    Ok(match rooms_repository.list_rooms().await {
        Ok(rooms) => HttpResponse::Ok().json(GetAllRoomsResponse { rooms }),
        Err(err) => {
            tracing::error!("Get all rooms failed {}", err);
            HttpResponse::InternalServerError().json(err.to_string())
        }
    })
}

#[api_v2_operation]
pub async fn add_room(
    rooms_repository: Data<Arc<dyn RoomsRepository>>,
    details: web::Json<RoomDetails>,
) -> Result<HttpResponse, Error> {
    let details = details.into_inner();
    if let Err(err) = validate_room(&details) {
        return Ok(HttpResponse::BadRequest().json(err.to_string()));
    }
    Ok(match rooms_repository.add_room(details).await {
        Ok(room_id) => HttpResponse::Ok()
            .append_header((LOCATION, format!("/api/room/{}", room_id)))
            .finish(),
        Err(err) => {
            tracing::error!("Add room failed {}", err);
            HttpResponse::InternalServerError().json(err.to_string())
        }
    })
}

#[api_v2_operation]
pub async fn update_room(
    rooms_repository: Data<Arc<dyn RoomsRepository>>,
    room_id: web::Path<RoomId>,
    patch: web::Json<RoomDetailsPatch>,
) -> Result<HttpResponse, Error> {
    let patch = patch.into_inner();
    if let Err(err) = validate_room_patch(&patch) {
        return Ok(HttpResponse::BadRequest().json(err.to_string()));
    }
    Ok(
        match rooms_repository
            .update_room(&room_id.into_inner(), patch)
            .await
        {
            Ok(true) => HttpResponse::Ok().finish(),
            Ok(false) => HttpResponse::NotFound().finish(),
            Err(err) => {
                tracing::error!("Update room failed {}", err);
                HttpResponse::InternalServerError().json(err.to_string())
            }
        },
    )
}

#[api_v2_operation]
pub async fn append_reservation(
    rooms_repository: Data<Arc<dyn RoomsRepository>>,
    room_id: web::Path<RoomId>,
    append: web::Json<AppendReservation>,
) -> Result<HttpResponse, Error> {
    let room_id = room_id.into_inner();
    Ok(
        match rooms_repository
            .append_reservation(&room_id, append.into_inner())
            .await
        {
            Ok(()) => {
                tracing::info!("Reservation appended to room {}", room_id);
                HttpResponse::Ok().finish()
            }
            Err(err @ RoomsRepositoryError::NotFound(_)) => {
                HttpResponse::NotFound().json(err.to_string())
            }
            Err(err @ RoomsRepositoryError::ReservationsChanged { .. }) => {
                tracing::warn!("Append reservation rejected {}", err);
                HttpResponse::Conflict().json(err.to_string())
            }
            Err(err) => {
                tracing::error!("Append reservation failed {}", err);
                HttpResponse::InternalServerError().json(err.to_string())
            }
        },
    )
}

#[api_v2_operation]
pub async fn get_room(
    rooms_repository: Data<Arc<dyn RoomsRepository>>,
    room_id: web::Path<RoomId>,
) -> Result<HttpResponse, Error> {
    Ok(match rooms_repository.get_room(&room_id.into_inner()).await {
        Ok(room) => HttpResponse::Ok().json(room),
        Err(RoomsRepositoryError::NotFound(_)) => HttpResponse::NotFound().finish(),
        Err(err) => {
            tracing::error!("Get room failed {}", err);
            HttpResponse::InternalServerError().json(err.to_string())
        }
    })
}

#[api_v2_operation]
pub async fn get_all_clients(
    clients_repository: Data<Arc<dyn ClientsRepository>>,
) -> Result<HttpResponse, Error> {
    Ok(match clients_repository.list_clients().await {
        Ok(clients) => HttpResponse::Ok().json(GetAllClientsResponse { clients }),
        Err(err) => {
            tracing::error!("Get all clients failed {}", err);
            HttpResponse::InternalServerError().json(err.to_string())
        }
    })
}

#[api_v2_operation]
pub async fn add_client(
    clients_repository: Data<Arc<dyn ClientsRepository>>,
    details: web::Json<ClientDetails>,
) -> Result<HttpResponse, Error> {
    let mut details = details.into_inner();
    if let Err(err) = validate_client(&details) {
        return Ok(HttpResponse::BadRequest().json(err.to_string()));
    }
    details
        .registered_on
        .get_or_insert_with(|| chrono::Local::now().date_naive());
    Ok(match clients_repository.add_client(details).await {
        Ok(client_id) => HttpResponse::Ok()
            .append_header((LOCATION, format!("/api/client/{}", client_id)))
            .finish(),
        Err(err) => {
            tracing::error!("Add client failed {}", err);
            HttpResponse::InternalServerError().json(err.to_string())
        }
    })
}

#[api_v2_operation]
pub async fn update_client(
    clients_repository: Data<Arc<dyn ClientsRepository>>,
    client_id: web::Path<ClientId>,
    patch: web::Json<ClientDetailsPatch>,
) -> Result<HttpResponse, Error> {
    let patch = patch.into_inner();
    if let Err(err) = validate_client_patch(&patch) {
        return Ok(HttpResponse::BadRequest().json(err.to_string()));
    }
    Ok(
        match clients_repository
            .update_client(&client_id.into_inner(), patch)
            .await
        {
            Ok(true) => HttpResponse::Ok().finish(),
            Ok(false) => HttpResponse::NotFound().finish(),
            Err(err) => {
                tracing::error!("Update client failed {}", err);
                HttpResponse::InternalServerError().json(err.to_string())
            }
        },
    )
}

#[api_v2_operation]
pub async fn delete_client(
    clients_repository: Data<Arc<dyn ClientsRepository>>,
    client_id: web::Path<ClientId>,
) -> Result<HttpResponse, Error> {
    Ok(
        match clients_repository
            .delete_client(&client_id.into_inner())
            .await
        {
            Ok(true) => HttpResponse::Ok().finish(),
            Ok(false) => HttpResponse::NotFound().finish(),
            Err(err) => {
                tracing::error!("Delete client failed {}", err);
                HttpResponse::InternalServerError().json(err.to_string())
            }
        },
    )
}

#[api_v2_operation]
pub async fn get_client(
    clients_repository: Data<Arc<dyn ClientsRepository>>,
    client_id: web::Path<ClientId>,
) -> Result<HttpResponse, Error> {
    Ok(
        match clients_repository.get_client(&client_id.into_inner()).await {
            Ok(client) => HttpResponse::Ok().json(client),
            Err(ClientsRepositoryError::NotFound(_)) => HttpResponse::NotFound().finish(),
            Err(err) => {
                tracing::error!("Get client failed {}", err);
                HttpResponse::InternalServerError().json(err.to_string())
            }
        },
    )
}

#[api_v2_operation]
pub async fn get_clients_report(
    clients_repository: Data<Arc<dyn ClientsRepository>>,
) -> Result<HttpResponse, Error> {
    Ok(match clients_repository.list_clients().await {
        Ok(clients) => HttpResponse::Ok().json(clients_report(
            &clients,
            chrono::Local::now().date_naive(),
        )),
        Err(err) => {
            tracing::error!("Clients report failed {}", err);
            HttpResponse::InternalServerError().json(err.to_string())
        }
    })
}

#[cfg(test)]
mod handlers_tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::NaiveDate;
    use paperclip::actix::OpenApiExt;

    use crate::api::{Reservation, Room};
    use crate::app_config::config_app;
    use crate::clients_repository::InMemoryClientsRepository;
    use crate::rooms_repository::InMemoryRoomsRepository;

    use super::*;

    fn room_details() -> RoomDetails {
        RoomDetails {
            name: "Standard".to_string(),
            description: "Queen bed".to_string(),
            max_occupancy: 2,
            nightly_price: 180.0,
            availability: true,
            amenities: vec!["wifi".to_string()],
            image_url: "".to_string(),
            reservations: vec![],
        }
    }

    macro_rules! init_app {
        () => {{
            let rooms: Arc<dyn RoomsRepository> = Arc::new(InMemoryRoomsRepository::default());
            let clients: Arc<dyn ClientsRepository> =
                Arc::new(InMemoryClientsRepository::default());
            test::init_service(
                App::new()
                    .wrap_api()
                    .app_data(Data::new(rooms))
                    .app_data(Data::new(clients))
                    .configure(config_app)
                    .build(),
            )
            .await
        }};
    }

    #[actix_web::test]
    /// Creates a room, reserves it through the append endpoint and reads it back
    async fn test_room_endpoints() {
        let app = init_app!();

        let invalid = test::TestRequest::post()
            .uri("/api/room")
            .set_json(RoomDetails {
                max_occupancy: 0,
                ..room_details()
            })
            .to_request();
        let response = test::call_service(&app, invalid).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let create = test::TestRequest::post()
            .uri("/api/room")
            .set_json(room_details())
            .to_request();
        let response = test::call_service(&app, create).await;
        assert!(response.status().is_success());
        let location = response
            .headers()
            .get(LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let reservation = Reservation {
            check_in: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2024, 8, 5).unwrap(),
            client_id: "C1".to_string(),
        };
        let append = test::TestRequest::post()
            .uri(&format!("{}/reservations", location))
            .set_json(AppendReservation {
                reservation: reservation.clone(),
                expected_reservations: Some(0),
            })
            .to_request();
        assert!(test::call_service(&app, append).await.status().is_success());

        let stale = test::TestRequest::post()
            .uri(&format!("{}/reservations", location))
            .set_json(AppendReservation {
                reservation: reservation.clone(),
                expected_reservations: Some(0),
            })
            .to_request();
        assert_eq!(
            test::call_service(&app, stale).await.status(),
            StatusCode::CONFLICT
        );

        let room: Room =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri(&location).to_request())
                .await;
        assert!(!room.details.availability);
        assert_eq!(room.details.reservations, vec![reservation]);

        let missing = test::TestRequest::get().uri("/api/room/999").to_request();
        assert_eq!(
            test::call_service(&app, missing).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    /// Rooms can not be created with reservations already inside,
    /// amenities typed as comma separated text are stored as a list
    async fn test_room_create_payloads() {
        let app = init_app!();

        let prefilled = test::TestRequest::post()
            .uri("/api/room")
            .set_json(RoomDetails {
                reservations: vec![Reservation {
                    check_in: NaiveDate::from_ymd_opt(2030, 1, 10).unwrap(),
                    check_out: NaiveDate::from_ymd_opt(2030, 1, 5).unwrap(),
                    client_id: "ghost".to_string(),
                }],
                ..room_details()
            })
            .to_request();
        let response = test::call_service(&app, prefilled).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let rooms: GetAllRoomsResponse =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/rooms").to_request())
                .await;
        assert!(rooms.rooms.is_empty());

        let from_form = test::TestRequest::post()
            .uri("/api/room")
            .set_json(serde_json::json!({
                "name": "Family",
                "description": "Two rooms",
                "max_occupancy": 4,
                "nightly_price": 320.0,
                "availability": true,
                "amenities": "wifi, crib ,tv",
                "image_url": ""
            }))
            .to_request();
        let response = test::call_service(&app, from_form).await;
        assert!(response.status().is_success());
        let location = response
            .headers()
            .get(LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let patch = test::TestRequest::patch()
            .uri(&location)
            .set_json(serde_json::json!({ "amenities": "wifi,balcony" }))
            .to_request();
        assert!(test::call_service(&app, patch).await.status().is_success());

        let room: Room =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri(&location).to_request())
                .await;
        assert_eq!(room.details.amenities, vec!["wifi", "balcony"]);
        assert!(room.details.reservations.is_empty());
    }

    #[actix_web::test]
    /// Registers, edits, lists and deletes a client
    async fn test_client_endpoints() {
        let app = init_app!();

        let create = test::TestRequest::post()
            .uri("/api/client")
            .set_json(ClientDetails {
                name: "Ana".to_string(),
                cpf: "123".to_string(),
                email: "ana@example.com".to_string(),
                registered_on: None,
            })
            .to_request();
        let response = test::call_service(&app, create).await;
        assert!(response.status().is_success());
        let location = response
            .headers()
            .get(LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let edit = test::TestRequest::patch()
            .uri(&location)
            .set_json(ClientDetailsPatch {
                email: Some("ana@hotel.com".to_string()),
                ..ClientDetailsPatch::default()
            })
            .to_request();
        assert!(test::call_service(&app, edit).await.status().is_success());

        let all: GetAllClientsResponse = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/clients").to_request(),
        )
        .await;
        assert_eq!(all.clients.len(), 1);
        assert_eq!(all.clients[0].details.email, "ana@hotel.com");
        assert!(all.clients[0].details.registered_on.is_some());

        let delete = test::TestRequest::delete().uri(&location).to_request();
        assert!(test::call_service(&app, delete).await.status().is_success());
        let delete_again = test::TestRequest::delete().uri(&location).to_request();
        assert_eq!(
            test::call_service(&app, delete_again).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
