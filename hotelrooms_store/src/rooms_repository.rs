pub use in_memory_rooms_repository::InMemoryRoomsRepository;
pub use postgres_rooms_repository::{PostgresRoomsRepository, PostgresRoomsRepositoryConfig};

use crate::api::{AppendReservation, Room, RoomDetails, RoomDetailsPatch, RoomId};

mod in_memory_rooms_repository;
mod postgres_rooms_repository;

#[derive(thiserror::Error, Debug)]
pub enum RoomsRepositoryError {
    #[error("Room {0} not found")]
    NotFound(RoomId),

    #[error("Room {room_id} holds {actual} reservations, expected {expected}")]
    ReservationsChanged {
        room_id: RoomId,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to deserialize room: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait RoomsRepository: Send + Sync {
    /// Adds room to repository, returns an id assigned to the room
    async fn add_room(&self, details: RoomDetails) -> Result<RoomId, RoomsRepositoryError>;
    /// Updates room details, returns true if room was updated and false if it was not found
    async fn update_room(
        &self,
        room_id: &RoomId,
        patch: RoomDetailsPatch,
    ) -> Result<bool, RoomsRepositoryError>;
    /// Appends reservation to the room and sets its availability flag to false
    async fn append_reservation(
        &self,
        room_id: &RoomId,
        append: AppendReservation,
    ) -> Result<(), RoomsRepositoryError>;
    /// Retrieves room from repository
    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RoomsRepositoryError>;
    /// Lists all rooms in the order they were added
    async fn list_rooms(&self) -> Result<Vec<Room>, RoomsRepositoryError>;
}
