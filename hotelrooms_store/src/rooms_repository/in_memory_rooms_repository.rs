use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use serde_json::json;

use crate::api::{AppendReservation, Room, RoomDetails, RoomDetailsPatch, RoomId};
use crate::rooms_repository::{RoomsRepository, RoomsRepositoryError};

/// Keeps rooms ordered by the sequence number they got on insertion
#[derive(Default)]
pub struct InMemoryRoomsRepository {
    room_sequence_generator: AtomicI32,
    rooms: parking_lot::RwLock<BTreeMap<i32, RoomDetails>>,
}

fn sequence_of(room_id: &RoomId) -> Option<i32> {
    room_id.parse().ok()
}

#[async_trait::async_trait]
impl RoomsRepository for InMemoryRoomsRepository {
    async fn add_room(&self, details: RoomDetails) -> Result<RoomId, RoomsRepositoryError> {
        let id = self.room_sequence_generator.fetch_add(1, Ordering::Relaxed);
        self.rooms.write().insert(id, details);
        Ok(id.to_string())
    }

    async fn update_room(
        &self,
        room_id: &RoomId,
        patch: RoomDetailsPatch,
    ) -> Result<bool, RoomsRepositoryError> {
        let Some(sequence) = sequence_of(room_id) else {
            return Ok(false);
        };
        let mut locked_rooms = self.rooms.write();
        if let Some(room) = locked_rooms.get_mut(&sequence) {
            let mut result_room = json!(room);
            json_patch::merge(&mut result_room, &json!(patch));
            let result_room: RoomDetails = serde_json::from_value(result_room)?;
            *room = result_room;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn append_reservation(
        &self,
        room_id: &RoomId,
        append: AppendReservation,
    ) -> Result<(), RoomsRepositoryError> {
        let sequence =
            sequence_of(room_id).ok_or_else(|| RoomsRepositoryError::NotFound(room_id.clone()))?;
        let mut locked_rooms = self.rooms.write();
        let room = locked_rooms
            .get_mut(&sequence)
            .ok_or_else(|| RoomsRepositoryError::NotFound(room_id.clone()))?;

        if let Some(expected) = append.expected_reservations {
            let actual = room.reservations.len();
            if actual != expected {
                return Err(RoomsRepositoryError::ReservationsChanged {
                    room_id: room_id.clone(),
                    expected,
                    actual,
                });
            }
        }

        room.reservations.push(append.reservation);
        room.availability = false;
        Ok(())
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RoomsRepositoryError> {
        sequence_of(room_id)
            .and_then(|sequence| self.rooms.read().get(&sequence).cloned())
            .map(|details| Room {
                room_id: room_id.clone(),
                details,
            })
            .ok_or_else(|| RoomsRepositoryError::NotFound(room_id.clone()))
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, RoomsRepositoryError> {
        Ok(self
            .rooms
            .read()
            .iter()
            .map(|(sequence, details)| Room {
                room_id: sequence.to_string(),
                details: details.clone(),
            })
            .collect())
    }
}
