use anyhow::Context;
use serde_json::json;
use tokio_postgres::{Client as PgClient, NoTls, Statement};

use crate::api::{Client, ClientDetails, ClientDetailsPatch, ClientId};
use crate::clients_repository::{ClientsRepository, ClientsRepositoryError};

pub struct PostgresClientsRepositoryConfig {
    pub hostname: String,
    pub username: String,
    pub password: String,
}

pub struct PostgresClientsRepository {
    client: PgClient,
}

fn serial_of(client_id: &ClientId) -> Option<i32> {
    client_id.parse().ok()
}

impl PostgresClientsRepository {
    pub async fn init(config: PostgresClientsRepositoryConfig) -> anyhow::Result<Self> {
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
        CREATE TABLE IF NOT EXISTS clients (
            id              SERIAL PRIMARY KEY,
            params          JSONB
            )
        ",
            )
            .await
            .context("Failed to setup clients table")?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ClientsRepository for PostgresClientsRepository {
    async fn add_client(&self, details: ClientDetails) -> Result<ClientId, ClientsRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("INSERT INTO clients (params) VALUES ($1) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[&json!(details)]).await?;

        let client_id: i32 = rows
            .first()
            .ok_or_else(|| ClientsRepositoryError::Other("Id not returned".to_string()))?
            .try_get(0)?;

        Ok(client_id.to_string())
    }

    async fn update_client(
        &self,
        client_id: &ClientId,
        patch: ClientDetailsPatch,
    ) -> Result<bool, ClientsRepositoryError> {
        let Some(id) = serial_of(client_id) else {
            return Ok(false);
        };
        let stmt: Statement = self
            .client
            .prepare("UPDATE clients SET params = params || ($1)::JSONB WHERE id = ($2) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[&json!(patch), &id]).await?;
        Ok(!rows.is_empty())
    }

    async fn delete_client(&self, client_id: &ClientId) -> Result<bool, ClientsRepositoryError> {
        let Some(id) = serial_of(client_id) else {
            return Ok(false);
        };
        let stmt: Statement = self
            .client
            .prepare("DELETE FROM clients WHERE id = ($1) RETURNING id")
            .await?;

        let rows = self.client.query(&stmt, &[&id]).await?;
        Ok(!rows.is_empty())
    }

    async fn get_client(&self, client_id: &ClientId) -> Result<Client, ClientsRepositoryError> {
        let id =
            serial_of(client_id).ok_or_else(|| ClientsRepositoryError::NotFound(client_id.clone()))?;
        let stmt: Statement = self
            .client
            .prepare("SELECT params FROM clients WHERE id = ($1)")
            .await?;

        let rows = self.client.query(&stmt, &[&id]).await?;

        let details: serde_json::Value = rows
            .first()
            .ok_or_else(|| ClientsRepositoryError::NotFound(client_id.clone()))?
            .try_get(0)?;

        Ok(Client {
            client_id: client_id.clone(),
            details: serde_json::from_value(details)?,
        })
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ClientsRepositoryError> {
        let stmt: Statement = self
            .client
            .prepare("SELECT id, params FROM clients ORDER BY id")
            .await?;
        let rows = self.client.query(&stmt, &[]).await?;

        rows.iter()
            .map(|row| {
                let id: i32 = row.try_get(0)?;
                let details: serde_json::Value = row.try_get(1)?;
                Ok(Client {
                    client_id: id.to_string(),
                    details: serde_json::from_value(details)?,
                })
            })
            .collect()
    }
}
