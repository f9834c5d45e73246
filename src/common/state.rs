use crate::api::graphql::{self, MessageSchema};
use crate::common::context::Context;
use sqlx::{Pool, Sqlite};

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub schema: MessageSchema,
}

impl AppState {
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self {
            db,
            schema: graphql::build_schema(),
        }
    }
}

impl Context for AppState {
    fn db(&self) -> &Pool<Sqlite> {
        &self.db
    }
}
