use std::sync::Arc;

use tracing::info;

use crate::{
    errors::{MailingError, MailingResult},
    models::{
        client::{Client, ClientUpdate, CreateClientRequest, PrunedReferences, UpdateClientRequest},
        phone::PhoneNumber,
    },
    repository::ClientRepository,
};

/// Creates, updates and deletes clients.
///
/// Requests are validated into domain types here; the repository only
/// ever sees well-formed values.
#[derive(Clone)]
pub struct ClientService {
    repo: Arc<dyn ClientRepository>,
}

impl ClientService {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, request: CreateClientRequest) -> MailingResult<Client> {
        let new_client = request.validate()?;
        self.ensure_number_free(&new_client.number, None).await?;

        let client = self.repo.create_client(new_client).await?;
        info!(
            client_id = client.id,
            operator_code = %client.operator_code,
            "Client created"
        );

        Ok(client)
    }

    pub async fn update(&self, id: i32, request: UpdateClientRequest) -> MailingResult<Client> {
        let changes = request.validate()?;
        if let Some(number) = &changes.number {
            self.ensure_number_free(number, Some(id)).await?;
        }

        let ClientUpdate { client, pruned } = self
            .repo
            .update_client(id, changes)
            .await?
            .ok_or_else(|| client_not_found(id))?;
        log_pruned(id, &pruned);

        Ok(client)
    }

    pub async fn delete(&self, id: i32) -> MailingResult<()> {
        let pruned = self
            .repo
            .delete_client(id)
            .await?
            .ok_or_else(|| client_not_found(id))?;
        info!(client_id = id, "Client deleted");
        log_pruned(id, &pruned);

        Ok(())
    }

    async fn ensure_number_free(
        &self,
        number: &PhoneNumber,
        exclude_id: Option<i32>,
    ) -> MailingResult<()> {
        if self.repo.number_exists(number.clone(), exclude_id).await? {
            return Err(MailingError::validation(format!(
                "Client with number {number} already exists"
            )));
        }
        Ok(())
    }
}

fn client_not_found(id: i32) -> MailingError {
    MailingError::not_found(format!("Client with ID {id} not found"))
}

fn log_pruned(client_id: i32, pruned: &PrunedReferences) {
    if let Some(code) = pruned.operator_code {
        info!(client_id, operator_code = %code, "Removed unreferenced operator code");
    }
    if let Some(tag) = &pruned.tag {
        info!(client_id, tag = %tag, "Removed unreferenced tag");
    }
}
