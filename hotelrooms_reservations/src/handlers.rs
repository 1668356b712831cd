use std::sync::Arc;

use actix_web::web::Data;
use actix_web::Error;
use actix_web::HttpResponse;
use paperclip::actix::{
    api_v2_operation,
    web::{self},
};

use crate::api::{ProposalRequest, ProposedReservation, SearchRequest, SearchResponse};
use crate::availability::{find_available, is_room_available, DateRange};
use crate::reservation_protocol::{confirm, propose};
use crate::rooms_gateway::{RoomsGateway, StoreError};
use crate::search_validation::{validate_search, ValidationError};
use crate::settings::ReservationsSettings;

#[api_v2_operation]
pub async fn health() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok().finish())
}

#[api_v2_operation]
pub async fn search(
    gateway: Data<Arc<dyn RoomsGateway>>,
    request: web::Json<SearchRequest>,
) -> Result<HttpResponse, Error> {
    let request = request.into_inner();
    let today = chrono::Local::now().date_naive();
    if let Err(err) = validate_search(
        request.start,
        request.end,
        request.client_id.as_deref(),
        today,
    ) {
        return Ok(HttpResponse::BadRequest().json(err.to_string()));
    }
    let (start, end) = match (request.start, request.end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Ok(
                HttpResponse::BadRequest().json(ValidationError::IncompleteSelection.to_string())
            )
        }
    };

    Ok(match gateway.fetch_all_rooms().await {
        Ok(rooms) => HttpResponse::Ok().json(SearchResponse {
            rooms: find_available(&rooms, start, end),
        }),
        Err(err) => {
            tracing::error!("Fetching rooms for search failed {}", err);
            HttpResponse::BadGateway().json(err.to_string())
        }
    })
}

#[api_v2_operation]
pub async fn create_proposal(
    gateway: Data<Arc<dyn RoomsGateway>>,
    settings: Data<ReservationsSettings>,
    request: web::Json<ProposalRequest>,
) -> Result<HttpResponse, Error> {
    let request = request.into_inner();
    let proposal = match propose(
        &request.room_id,
        request.check_in,
        request.check_out,
        &request.client_id,
    ) {
        Ok(proposal) => proposal,
        Err(err) => return Ok(HttpResponse::BadRequest().json(err.to_string())),
    };
    if !settings.commit_guard {
        return Ok(HttpResponse::Ok().json(proposal));
    }

    // the snapshot fetched for the guard also rejects stays that already clash
    Ok(match gateway.fetch_all_rooms().await {
        Ok(rooms) => match rooms.iter().find(|room| room.room_id == proposal.room_id) {
            Some(room)
                if !is_room_available(
                    room,
                    DateRange::new(proposal.check_in, proposal.check_out),
                ) =>
            {
                HttpResponse::Conflict().json(format!(
                    "Room {} is already reserved between {} and {}",
                    room.room_id, proposal.check_in, proposal.check_out
                ))
            }
            Some(room) => HttpResponse::Ok().json(proposal.guarded_by(room)),
            None => HttpResponse::NotFound().json(format!("Room {} not found", request.room_id)),
        },
        Err(err) => {
            tracing::error!("Fetching room for proposal failed {}", err);
            HttpResponse::BadGateway().json(err.to_string())
        }
    })
}

#[api_v2_operation]
pub async fn confirm_reservation(
    gateway: Data<Arc<dyn RoomsGateway>>,
    proposal: web::Json<ProposedReservation>,
) -> Result<HttpResponse, Error> {
    let posted = proposal.into_inner();
    // posted proposals come from outside, so the propose rules are checked again
    let proposal = match propose(
        &posted.room_id,
        posted.check_in,
        posted.check_out,
        &posted.client_id,
    ) {
        Ok(proposal) => ProposedReservation {
            expected_reservations: posted.expected_reservations,
            ..proposal
        },
        Err(err) => return Ok(HttpResponse::BadRequest().json(err.to_string())),
    };

    Ok(match confirm(gateway.get_ref().as_ref(), &proposal).await {
        Ok(()) => {
            tracing::info!(
                "Room {} reserved for client {}",
                proposal.room_id,
                proposal.client_id
            );
            HttpResponse::Ok().json(proposal.reservation())
        }
        Err(err @ StoreError::Conflict(_)) => {
            tracing::warn!("Reservation of room {} rejected {}", proposal.room_id, err);
            HttpResponse::Conflict().json(err.to_string())
        }
        Err(err @ StoreError::Failure(_)) => {
            tracing::error!("Reservation of room {} failed {}", proposal.room_id, err);
            HttpResponse::BadGateway().json(err.to_string())
        }
    })
}
