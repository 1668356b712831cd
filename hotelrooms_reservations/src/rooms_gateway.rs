use hotelrooms_store::api::{AppendReservation, Room, RoomId};
use hotelrooms_store::client::{AppendOutcome, HotelRoomsStoreClient};

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum StoreError {
    /// Message of the failed store call, shown to the user as is
    #[error("{0}")]
    Failure(String),

    /// The room no longer holds the reservation count the proposal was made against
    #[error("{0}")]
    Conflict(String),
}

/// The part of the room store the reservation engine depends on
#[async_trait::async_trait]
pub trait RoomsGateway: Send + Sync {
    async fn fetch_all_rooms(&self) -> Result<Vec<Room>, StoreError>;

    /// Single write appending the reservation and clearing the availability flag
    async fn append_reservation(
        &self,
        room_id: &RoomId,
        append: AppendReservation,
    ) -> Result<(), StoreError>;
}

/// Gateway talking to the store service over HTTP
pub struct StoreRoomsGateway {
    client: HotelRoomsStoreClient,
}

impl StoreRoomsGateway {
    pub fn new(store_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: HotelRoomsStoreClient::new(store_url)?,
        })
    }
}

#[async_trait::async_trait]
impl RoomsGateway for StoreRoomsGateway {
    async fn fetch_all_rooms(&self) -> Result<Vec<Room>, StoreError> {
        self.client
            .list_rooms()
            .await
            .map_err(|err| StoreError::Failure(err.to_string()))
    }

    async fn append_reservation(
        &self,
        room_id: &RoomId,
        append: AppendReservation,
    ) -> Result<(), StoreError> {
        match self.client.append_reservation(room_id, &append).await {
            Ok(AppendOutcome::Appended) => Ok(()),
            Ok(AppendOutcome::Conflict(message)) => Err(StoreError::Conflict(message)),
            Err(err) => Err(StoreError::Failure(err.to_string())),
        }
    }
}
