pub use in_memory_clients_repository::InMemoryClientsRepository;
pub use postgres_clients_repository::{
    PostgresClientsRepository, PostgresClientsRepositoryConfig,
};

use crate::api::{Client, ClientDetails, ClientDetailsPatch, ClientId};

mod in_memory_clients_repository;
mod postgres_clients_repository;

#[derive(thiserror::Error, Debug)]
pub enum ClientsRepositoryError {
    #[error("Client {0} not found")]
    NotFound(ClientId),

    #[error("Failed to deserialize client: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("DatabaseFailure failure {0}")]
    DatabaseFailure(#[from] tokio_postgres::Error),

    #[error("Other error {0}")]
    Other(String),
}

#[async_trait::async_trait]
pub trait ClientsRepository: Send + Sync {
    /// Adds client to repository, returns an id assigned to the client
    async fn add_client(&self, details: ClientDetails) -> Result<ClientId, ClientsRepositoryError>;
    /// Edits client fields in place, returns false if client was not found
    async fn update_client(
        &self,
        client_id: &ClientId,
        patch: ClientDetailsPatch,
    ) -> Result<bool, ClientsRepositoryError>;
    /// Removes client, returns false if client was not found.
    /// Reservations referring to the client are left as they are.
    async fn delete_client(&self, client_id: &ClientId) -> Result<bool, ClientsRepositoryError>;
    async fn get_client(&self, client_id: &ClientId) -> Result<Client, ClientsRepositoryError>;
    async fn list_clients(&self) -> Result<Vec<Client>, ClientsRepositoryError>;
}
