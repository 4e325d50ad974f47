use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Contact, NewContactData, UpdateContactData};
use crate::db::DatabaseError;

/// Persistence for contact rows, constructed once at startup with its own
/// handle on the pool.
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: &NewContactData) -> Result<Contact, DatabaseError> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (id, firstname, lastname, email, phone_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, firstname, lastname, email, phone_number, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.firstname)
        .bind(&data.lastname)
        .bind(&data.email)
        .bind(data.phone_number.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(contact)
    }

    /// Partial merge: absent fields keep their stored value.
    pub async fn update(
        &self,
        contact_id: Uuid,
        data: &UpdateContactData,
    ) -> Result<Contact, DatabaseError> {
        sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET
                firstname = COALESCE($1, firstname),
                lastname = COALESCE($2, lastname),
                email = COALESCE($3, email),
                phone_number = COALESCE($4, phone_number),
                updated_at = now()
            WHERE id = $5
            RETURNING id, firstname, lastname, email, phone_number, created_at, updated_at
            "#,
        )
        .bind(data.firstname.as_deref())
        .bind(data.lastname.as_deref())
        .bind(data.email.as_deref())
        .bind(data.phone_number.as_deref())
        .bind(contact_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }
}
