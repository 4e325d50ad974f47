use serde::Deserialize;
use sqlx::types::Uuid;
use time::OffsetDateTime;

use super::contact::{Contact, NewContactData, UpdateContactData};

/// A bare client row. `contact_id` is the reference into the contacts
/// table and is never exposed over the API.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub contact_id: Uuid,
    pub logo: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A client row joined with its contact, as returned by every read path.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClientWithContact {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub contact_id: Uuid,
    pub contact_firstname: String,
    pub contact_lastname: String,
    pub contact_email: String,
    pub contact_phone_number: Option<String>,
}

impl From<(Client, Contact)> for ClientWithContact {
    fn from((client, contact): (Client, Contact)) -> Self {
        Self {
            id: client.id,
            name: client.name,
            description: client.description,
            logo: client.logo,
            created_at: client.created_at,
            updated_at: client.updated_at,
            contact_id: contact.id,
            contact_firstname: contact.firstname,
            contact_lastname: contact.lastname,
            contact_email: contact.email,
            contact_phone_number: contact.phone_number,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClientData {
    pub name: String,
    pub description: Option<String>,
    pub contact: NewContactData,
    pub logo: Option<String>,
}

/// Partial client update. The nested contact data is applied to the
/// referenced contact row, the remaining fields to the client row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClientData {
    pub name: Option<String>,
    pub description: Option<String>,
    pub contact: Option<UpdateContactData>,
    pub logo: Option<String>,
}
