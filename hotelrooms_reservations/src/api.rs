use chrono::NaiveDate;
use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

use hotelrooms_store::api::{ClientId, Reservation, Room, RoomId};

/// Room search as typed by the user, any field may still be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct SearchRequest {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub client_id: Option<ClientId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct SearchResponse {
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ProposalRequest {
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub client_id: ClientId,
}

/// Reservation reviewed by the user but not stored yet
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq, Apiv2Schema)]
pub struct ProposedReservation {
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub client_id: ClientId,
    /// Reservation count of the room when proposed, commits are refused if it changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_reservations: Option<usize>,
}

impl ProposedReservation {
    pub fn guarded_by(self, room: &Room) -> Self {
        Self {
            expected_reservations: Some(room.details.reservations.len()),
            ..self
        }
    }

    pub fn reservation(&self) -> Reservation {
        Reservation {
            check_in: self.check_in,
            check_out: self.check_out,
            client_id: self.client_id.clone(),
        }
    }
}
