use serde::Deserialize;
use sqlx::types::Uuid;
use time::OffsetDateTime;

/// A contact row. Contacts have no endpoint of their own; they are created
/// and updated through their owning client's lifecycle.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewContactData {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

/// Partial contact update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContactData {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
}
