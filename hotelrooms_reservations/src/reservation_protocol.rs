//! Propose / confirm / cancel cycle of a single reservation.
//!
//! A proposal is built without touching the store. Confirming it is the only
//! write, and a failed write leaves the flow back in `Idle` with nothing stored.

use chrono::NaiveDate;
use hotelrooms_store::api::{AppendReservation, ClientId, RoomId};

use crate::api::ProposedReservation;
use crate::rooms_gateway::{RoomsGateway, StoreError};
use crate::search_validation::ValidationError;

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum ReservationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cannot {0} from the current state")]
    InvalidTransition(&'static str),
}

/// Builds a proposal for the given stay, no store access
pub fn propose(
    room_id: &RoomId,
    check_in: NaiveDate,
    check_out: NaiveDate,
    client_id: &ClientId,
) -> Result<ProposedReservation, ValidationError> {
    if client_id.is_empty() {
        return Err(ValidationError::MissingClient);
    }
    if room_id.is_empty() {
        return Err(ValidationError::IncompleteSelection);
    }
    if check_in == check_out {
        return Err(ValidationError::EqualDates);
    }
    if check_in > check_out {
        return Err(ValidationError::StartAfterEnd);
    }
    Ok(ProposedReservation {
        room_id: room_id.clone(),
        check_in,
        check_out,
        client_id: client_id.clone(),
        expected_reservations: None,
    })
}

/// Stores the proposal with a single append on its room
pub async fn confirm(
    gateway: &dyn RoomsGateway,
    proposal: &ProposedReservation,
) -> Result<(), StoreError> {
    gateway
        .append_reservation(
            &proposal.room_id,
            AppendReservation {
                reservation: proposal.reservation(),
                expected_reservations: proposal.expected_reservations,
            },
        )
        .await
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum FlowState {
    #[default]
    Idle,
    Proposed(ProposedReservation),
    Committed(ProposedReservation),
}

/// Tracks one user's way through propose, confirm and cancel.
///
/// Library-level session API for callers that keep a user's proposal between steps.
/// The HTTP service is stateless: the proposal travels with the request, so its handlers
/// call [`propose`] and [`confirm`] directly.
#[derive(Debug, Default)]
pub struct ReservationFlow {
    state: FlowState,
}

impl ReservationFlow {
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn propose(
        &mut self,
        room_id: &RoomId,
        check_in: NaiveDate,
        check_out: NaiveDate,
        client_id: &ClientId,
    ) -> Result<ProposedReservation, ReservationError> {
        if self.state != FlowState::Idle {
            return Err(ReservationError::InvalidTransition("propose"));
        }
        let proposal = propose(room_id, check_in, check_out, client_id)?;
        self.state = FlowState::Proposed(proposal.clone());
        Ok(proposal)
    }

    pub async fn confirm(&mut self, gateway: &dyn RoomsGateway) -> Result<(), ReservationError> {
        let proposal = match std::mem::take(&mut self.state) {
            FlowState::Proposed(proposal) => proposal,
            other => {
                self.state = other;
                return Err(ReservationError::InvalidTransition("confirm"));
            }
        };

        match confirm(gateway, &proposal).await {
            Ok(()) => {
                tracing::info!(
                    "Room {} reserved for client {}",
                    proposal.room_id,
                    proposal.client_id
                );
                self.state = FlowState::Committed(proposal);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Reservation of room {} failed {}", proposal.room_id, err);
                Err(err.into())
            }
        }
    }

    pub fn cancel(&mut self) -> Result<(), ReservationError> {
        match self.state {
            FlowState::Proposed(_) => {
                self.state = FlowState::Idle;
                Ok(())
            }
            _ => Err(ReservationError::InvalidTransition("cancel")),
        }
    }
}
