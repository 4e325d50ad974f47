use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{
    Client, ClientRepository, ClientWithContact, ContactRepository, DatabaseError, NewClientData,
    UpdateClientData,
};

/// Orchestrates the client and contact repositories. Reads always resolve
/// the contact inline; create and update are two sequential writes with no
/// transaction around them, so a failure between the writes can leave a
/// contact row without an owning client.
#[derive(Clone)]
pub struct ClientService {
    clients: ClientRepository,
    contacts: ContactRepository,
}

impl ClientService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            clients: ClientRepository::new(pool.clone()),
            contacts: ContactRepository::new(pool),
        }
    }

    pub async fn get_all_clients(&self) -> Result<Vec<ClientWithContact>, DatabaseError> {
        self.clients.all().await
    }

    pub async fn get_client_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ClientWithContact>, DatabaseError> {
        self.clients.find_by_id(id).await
    }

    /// Creates the contact first, then the client referencing it.
    pub async fn create_client(
        &self,
        data: NewClientData,
    ) -> Result<ClientWithContact, DatabaseError> {
        let contact = self.contacts.create(&data.contact).await?;
        let client = self.clients.create(&data, contact.id).await?;
        Ok(ClientWithContact::from((client, contact)))
    }

    /// Loads the client to discover its contact reference, applies the
    /// contact fields to the contact row and the remaining fields to the
    /// client row, then returns the re-resolved client.
    pub async fn update_client(
        &self,
        id: Uuid,
        data: UpdateClientData,
    ) -> Result<Option<ClientWithContact>, DatabaseError> {
        let Some(existing) = self.clients.find_record(id).await? else {
            return Ok(None);
        };

        if let Some(contact_data) = &data.contact {
            self.contacts.update(existing.contact_id, contact_data).await?;
        }

        self.clients.update(id, &data).await?;
        self.clients.find_by_id(id).await
    }

    /// Removes the client row only. The referenced contact stays behind.
    pub async fn delete_client(&self, id: Uuid) -> Result<Option<Client>, DatabaseError> {
        self.clients.delete(id).await
    }
}
