use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

use serde_json::json;

use crate::api::{Client, ClientDetails, ClientDetailsPatch, ClientId};
use crate::clients_repository::{ClientsRepository, ClientsRepositoryError};

#[derive(Default)]
pub struct InMemoryClientsRepository {
    client_sequence_generator: AtomicI32,
    clients: parking_lot::RwLock<BTreeMap<i32, ClientDetails>>,
}

fn sequence_of(client_id: &ClientId) -> Option<i32> {
    client_id.parse().ok()
}

#[async_trait::async_trait]
impl ClientsRepository for InMemoryClientsRepository {
    async fn add_client(&self, details: ClientDetails) -> Result<ClientId, ClientsRepositoryError> {
        let id = self.client_sequence_generator.fetch_add(1, Ordering::Relaxed);
        self.clients.write().insert(id, details);
        Ok(id.to_string())
    }

    async fn update_client(
        &self,
        client_id: &ClientId,
        patch: ClientDetailsPatch,
    ) -> Result<bool, ClientsRepositoryError> {
        let Some(sequence) = sequence_of(client_id) else {
            return Ok(false);
        };
        let mut locked_clients = self.clients.write();
        if let Some(client) = locked_clients.get_mut(&sequence) {
            let mut result_client = json!(client);
            json_patch::merge(&mut result_client, &json!(patch));
            *client = serde_json::from_value(result_client)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn delete_client(&self, client_id: &ClientId) -> Result<bool, ClientsRepositoryError> {
        Ok(sequence_of(client_id)
            .and_then(|sequence| self.clients.write().remove(&sequence))
            .is_some())
    }

    async fn get_client(&self, client_id: &ClientId) -> Result<Client, ClientsRepositoryError> {
        sequence_of(client_id)
            .and_then(|sequence| self.clients.read().get(&sequence).cloned())
            .map(|details| Client {
                client_id: client_id.clone(),
                details,
            })
            .ok_or_else(|| ClientsRepositoryError::NotFound(client_id.clone()))
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ClientsRepositoryError> {
        Ok(self
            .clients
            .read()
            .iter()
            .map(|(sequence, details)| Client {
                client_id: sequence.to_string(),
                details: details.clone(),
            })
            .collect())
    }
}
