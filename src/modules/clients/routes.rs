use axum::{routing::get, Router};

use crate::app_state::AppState;

use super::handlers::{
    create_client, delete_client, get_all_clients, get_client_by_id, update_client,
};

pub fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_clients).post(create_client))
        .route(
            "/{id}",
            get(get_client_by_id).patch(update_client).delete(delete_client),
        )
}
