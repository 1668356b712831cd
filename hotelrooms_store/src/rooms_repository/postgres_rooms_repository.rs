use anyhow::Context;
use serde_json::json;
use tokio_postgres::{Client, NoTls, Statement};

use crate::api::{AppendReservation, Room, RoomDetails, RoomDetailsPatch, RoomId};
use crate::rooms_repository::{RoomsRepository, RoomsRepositoryError};

pub struct PostgresRoomsRepository {
    client: Client,
}

pub struct PostgresRoomsRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

/// Room ids are serial keys rendered as text, anything else can not exist in the table
fn serial_of(room_id: &RoomId) -> Option<i32> {
    room_id.parse().ok()
}

impl PostgresRoomsRepository {
    pub async fn init(config: PostgresRoomsRepositoryConfig) -> anyhow::Result<Self> {
        let connection_str = format!(
            "postgresql://{}:{}@{}",
            config.username, config.password, config.hostname
        );
        tracing::info!("Postgres connection to {}", config.hostname);
        let (client, connection) = tokio_postgres::connect(&connection_str, NoTls)
            .await
            .context("Failed to start postgres")?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("connection error: {}", e);
            }
        });

        client
            .batch_execute(
                "
        CREATE TABLE IF NOT EXISTS rooms (
            id              SERIAL PRIMARY KEY,
            params          JSONB
            )
        ",
            )
            .await
            .context("Failed to setup rooms table")?;
        Ok(Self { client })
    }

    async fn count_reservations(&self, id: i32) -> Result<Option<usize>, RoomsRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare(
                "SELECT jsonb_array_length(COALESCE(params->'reservations', '[]'::JSONB)) FROM rooms WHERE id = ($1)",
            )
            .await?;
        let rows = self.client.query(&stmt, &[&id]).await?;
        match rows.first() {
            Some(row) => {
                let count: i32 = row.try_get(0)?;
                Ok(Some(count as usize))
            }
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl RoomsRepository for PostgresRoomsRepository {
    async fn add_room(&self, details: RoomDetails) -> Result<RoomId, RoomsRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("INSERT INTO rooms (params) VALUES ($1) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[&json!(details)]).await?;

        let room_id: i32 = rows
            .first()
            .ok_or_else(|| RoomsRepositoryError::Other("Id not returned".to_string()))?
            .try_get(0)?;

        Ok(room_id.to_string())
    }

    async fn update_room(
        &self,
        room_id: &RoomId,
        patch: RoomDetailsPatch,
    ) -> Result<bool, RoomsRepositoryError> {
        let Some(id) = serial_of(room_id) else {
            return Ok(false);
        };
        let stmt: Statement = self
            .client
            .prepare("UPDATE rooms SET params = params || ($1)::JSONB WHERE id = ($2) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[&json!(patch), &id]).await?;
        Ok(!rows.is_empty())
    }

    async fn append_reservation(
        &self,
        room_id: &RoomId,
        append: AppendReservation,
    ) -> Result<(), RoomsRepositoryError> {
        let id = serial_of(room_id).ok_or_else(|| RoomsRepositoryError::NotFound(room_id.clone()))?;
        let expected = append.expected_reservations.map(|count| count as i32);

        // Append and availability flip happen in one statement, the guard is part of the filter
        let stmt: Statement = self
            .client
            .prepare(
                "UPDATE rooms SET params = jsonb_set(
                    jsonb_set(
                        params,
                        '{reservations}',
                        COALESCE(params->'reservations', '[]'::JSONB) || jsonb_build_array(($1)::JSONB)
                    ),
                    '{availability}',
                    'false'::JSONB
                )
                WHERE id = ($2)
                  AND (($3)::INTEGER IS NULL
                       OR jsonb_array_length(COALESCE(params->'reservations', '[]'::JSONB)) = ($3)::INTEGER)
                RETURNING id",
            )
            .await?;

        let rows = self
            .client
            .query(&stmt, &[&json!(append.reservation), &id, &expected])
            .await?;

        if !rows.is_empty() {
            return Ok(());
        }

        match (self.count_reservations(id).await?, append.expected_reservations) {
            (Some(actual), Some(expected)) => Err(RoomsRepositoryError::ReservationsChanged {
                room_id: room_id.clone(),
                expected,
                actual,
            }),
            _ => Err(RoomsRepositoryError::NotFound(room_id.clone())),
        }
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RoomsRepositoryError> {
        let id = serial_of(room_id).ok_or_else(|| RoomsRepositoryError::NotFound(room_id.clone()))?;
        let stmt: Statement = self
            .client
            .prepare("SELECT params FROM rooms WHERE id = ($1)")
            .await?;

        let rows = self.client.query(&stmt, &[&id]).await?;

        let details: serde_json::Value = rows
            .first()
            .ok_or_else(|| RoomsRepositoryError::NotFound(room_id.clone()))?
            .try_get(0)?;

        Ok(Room {
            room_id: room_id.clone(),
            details: serde_json::from_value(details)?,
        })
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, RoomsRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("SELECT id, params FROM rooms ORDER BY id")
            .await?;

        let rows = self.client.query(&stmt, &[]).await?;

        rows.iter()
            .map(|row| {
                let id: i32 = row.try_get(0)?;
                let details: serde_json::Value = row.try_get(1)?;

                Ok(Room {
                    room_id: id.to_string(),
                    details: serde_json::from_value(details)?,
                })
            })
            .collect()
    }
}
