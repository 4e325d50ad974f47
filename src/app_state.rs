use sqlx::PgPool;

use crate::config;
use crate::modules::clients::service::ClientService;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: config::Config,
    pub clients: ClientService,
}

impl AppState {
    pub fn new(db: PgPool, env: config::Config) -> Self {
        let clients = ClientService::new(db.clone());
        Self { db, env, clients }
    }
}
