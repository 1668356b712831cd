use anyhow::{bail, Context};
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use hotelrooms_store::api::{Reservation, Room};

use crate::api::{ProposalRequest, ProposedReservation, SearchRequest, SearchResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed(Reservation),
    /// Room changed since the proposal was made, message from the service
    Conflict(String),
}

pub struct HotelRoomsReservationsClient {
    url: String,
    client: ClientWithMiddleware,
}

impl HotelRoomsReservationsClient {
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

    /// Calls POST /api/search endpoint
    /// Rejected searches are returned as error with the validation reason
    pub async fn search(&self, request: &SearchRequest) -> anyhow::Result<Vec<Room>> {
        let response = self
            .client
            .post(format!("{}/api/search", self.url))
            .json(request)
            .send()
            .await?;
        if response.status().is_success() {
            let body: SearchResponse = response.json().await?;
            Ok(body.rooms)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("{}", error)
        }
    }

    /// Calls POST /api/proposal endpoint
    pub async fn propose(&self, request: &ProposalRequest) -> anyhow::Result<ProposedReservation> {
        let response = self
            .client
            .post(format!("{}/api/proposal", self.url))
            .json(request)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let error: String = response.json().await.unwrap_or_default();
            bail!("{}", error)
        }
    }

    /// Calls POST /api/reservation endpoint
    pub async fn confirm(&self, proposal: &ProposedReservation) -> anyhow::Result<ConfirmOutcome> {
        let response = self
            .client
            .post(format!("{}/api/reservation", self.url))
            .json(proposal)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(ConfirmOutcome::Confirmed(response.json().await?));
        }
        let error: String = response.json().await.unwrap_or_default();
        if status == StatusCode::CONFLICT {
            Ok(ConfirmOutcome::Conflict(error))
        } else {
            bail!("{}", error)
        }
    }
}
