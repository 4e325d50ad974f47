use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Client, ClientWithContact, NewClientData, UpdateClientData};
use crate::db::DatabaseError;

/// Every read path joins the contact inline so callers never see a bare
/// contact reference.
const SELECT_WITH_CONTACT: &str = r#"
SELECT
    cl.id, cl.name, cl.description, cl.logo, cl.created_at, cl.updated_at,
    co.id AS contact_id,
    co.firstname AS contact_firstname,
    co.lastname AS contact_lastname,
    co.email AS contact_email,
    co.phone_number AS contact_phone_number
FROM clients cl
JOIN contacts co ON co.id = cl.contact_id
"#;

/// Persistence for client rows, constructed once at startup with its own
/// handle on the pool.
#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn all(&self) -> Result<Vec<ClientWithContact>, DatabaseError> {
        let clients = sqlx::query_as::<_, ClientWithContact>(&format!(
            "{SELECT_WITH_CONTACT} ORDER BY cl.created_at, cl.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ClientWithContact>, DatabaseError> {
        let client = sqlx::query_as::<_, ClientWithContact>(&format!(
            "{SELECT_WITH_CONTACT} WHERE cl.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Bare row lookup, used by the update path to discover the contact
    /// reference before touching either table.
    pub async fn find_record(&self, id: Uuid) -> Result<Option<Client>, DatabaseError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, description, contact_id, logo, created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    pub async fn create(
        &self,
        data: &NewClientData,
        contact_id: Uuid,
    ) -> Result<Client, DatabaseError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, description, contact_id, logo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, contact_id, logo, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(data.description.as_deref())
        .bind(contact_id)
        .bind(data.logo.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }

    /// Partial merge of the client-level fields; the nested contact data is
    /// handled by the contact repository.
    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateClientData,
    ) -> Result<Option<Client>, DatabaseError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET
                name = COALESCE($1, name),
                description = COALESCE($2, description),
                logo = COALESCE($3, logo),
                updated_at = now()
            WHERE id = $4
            RETURNING id, name, description, contact_id, logo, created_at, updated_at
            "#,
        )
        .bind(data.name.as_deref())
        .bind(data.description.as_deref())
        .bind(data.logo.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Removes only the client row; the referenced contact is left behind.
    pub async fn delete(&self, id: Uuid) -> Result<Option<Client>, DatabaseError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            DELETE FROM clients
            WHERE id = $1
            RETURNING id, name, description, contact_id, logo, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }
}
