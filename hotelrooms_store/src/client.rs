use anyhow::{bail, Context};
use reqwest::header::LOCATION;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use crate::api::{
    AppendReservation, Client, ClientDetails, ClientDetailsPatch, ClientId, ClientsReport,
    GetAllClientsResponse, GetAllRoomsResponse, Room, RoomDetails, RoomDetailsPatch, RoomId,
};

/// Outcome of appending a reservation that the caller may want to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    /// Reservation count guard did not match, message from the store
    Conflict(String),
}

pub struct HotelRoomsStoreClient {
    url: String,
    client: ClientWithMiddleware,
}

impl HotelRoomsStoreClient {
    pub fn new(url: &str) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .build()
            .context("Failed to build reqwest client")?;
        let client = ClientBuilder::new(reqwest_client)
            // Insert the tracing middleware
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            url: url.to_string(),
            client,
        })
    }

    fn id_from_location(response: &reqwest::Response, prefix: &str) -> anyhow::Result<String> {
        let location_header = response
            .headers()
            .get(LOCATION)
            .context("No location header")?;

        Ok(location_header
            .to_str()
            .context("Failed to convert header to str")?
            .strip_prefix(prefix)
            .context("Invalid location header")?
            .to_string())
    }

    /// Calls POST /api/room endpoint
    /// Returns room_id of added room
    pub async fn add_room(&self, room_details: RoomDetails) -> anyhow::Result<RoomId> {
        let response = self
            .client
            .post(format!("{}/api/room", self.url))
            .json(&room_details)
            .send()
            .await?;

        if !response.status().is_success() {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to add room {}", error)
        }
        Self::id_from_location(&response, "/api/room/")
    }

    /// Calls GET /api/room/{room_id} endpoint
    /// Returns None if room was not in the store
    pub async fn get_room(&self, room_id: &RoomId) -> anyhow::Result<Option<Room>> {
        let response = self
            .client
            .get(format!("{}/api/room/{}", self.url, room_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            Ok(Some(response.json().await?))
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to get room {}", error)
        }
    }

    /// Calls GET /api/rooms endpoint
    pub async fn list_rooms(&self) -> anyhow::Result<Vec<Room>> {
        let response = self
            .client
            .get(format!("{}/api/rooms", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            let body: GetAllRoomsResponse = response.json().await?;
            Ok(body.rooms)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to list rooms {}", error)
        }
    }

    /// Calls PATCH /api/room/{room_id} endpoint
    /// Returns false if room was not found
    pub async fn update_room(
        &self,
        room_id: &RoomId,
        patch: RoomDetailsPatch,
    ) -> anyhow::Result<bool> {
        let response = self
            .client
            .patch(format!("{}/api/room/{}", self.url, room_id))
            .json(&patch)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to update room {}", error)
        }
    }

    /// Calls POST /api/room/{room_id}/reservations endpoint
    /// Any failure other than a guard conflict is returned as error with the store message
    pub async fn append_reservation(
        &self,
        room_id: &RoomId,
        append: &AppendReservation,
    ) -> anyhow::Result<AppendOutcome> {
        let response = self
            .client
            .post(format!("{}/api/room/{}/reservations", self.url, room_id))
            .json(append)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(AppendOutcome::Appended);
        }
        let error: String = response.json().await.unwrap_or_default();
        if status == StatusCode::CONFLICT {
            Ok(AppendOutcome::Conflict(error))
        } else if status == StatusCode::NOT_FOUND {
            bail!("Room {} not found", room_id)
        } else {
            bail!("{}", error)
        }
    }

    /// Calls POST /api/client endpoint
    pub async fn add_client(&self, client_details: ClientDetails) -> anyhow::Result<ClientId> {
        let response = self
            .client
            .post(format!("{}/api/client", self.url))
            .json(&client_details)
            .send()
            .await?;

        if !response.status().is_success() {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to add client {}", error)
        }
        Self::id_from_location(&response, "/api/client/")
    }

    /// Calls GET /api/client/{client_id} endpoint
    pub async fn get_client(&self, client_id: &ClientId) -> anyhow::Result<Option<Client>> {
        let response = self
            .client
            .get(format!("{}/api/client/{}", self.url, client_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(None)
        } else if response.status().is_success() {
            Ok(Some(response.json().await?))
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to get client {}", error)
        }
    }

    /// Calls GET /api/clients endpoint
    pub async fn list_clients(&self) -> anyhow::Result<Vec<Client>> {
        let response = self
            .client
            .get(format!("{}/api/clients", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            let body: GetAllClientsResponse = response.json().await?;
            Ok(body.clients)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to list clients {}", error)
        }
    }

    /// Calls PATCH /api/client/{client_id} endpoint
    pub async fn update_client(
        &self,
        client_id: &ClientId,
        patch: ClientDetailsPatch,
    ) -> anyhow::Result<bool> {
        let response = self
            .client
            .patch(format!("{}/api/client/{}", self.url, client_id))
            .json(&patch)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to update client {}", error)
        }
    }

    /// Calls DELETE /api/client/{client_id} endpoint
    pub async fn delete_client(&self, client_id: &ClientId) -> anyhow::Result<bool> {
        let response = self
            .client
            .delete(format!("{}/api/client/{}", self.url, client_id))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            Ok(false)
        } else if response.status().is_success() {
            Ok(true)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to delete client {}", error)
        }
    }

    /// Calls GET /api/reports/clients endpoint
    pub async fn clients_report(&self) -> anyhow::Result<ClientsReport> {
        let response = self
            .client
            .get(format!("{}/api/reports/clients", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("Failed to get clients report {}", error)
        }
    }
}
