//! GraphQL schema and the HTTP handlers that execute it.
//!
//! POST runs any operation. GET without a query string serves the
//! playground; GET with one runs read-only operations only.

mod mutation;
mod query;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::api::{GRAPHQL_PATH, RequestContext};
use crate::common::error::AppError;
use crate::common::state::AppState;
use async_graphql::http::{GraphQLPlaygroundConfig, parse_query_string, playground_source};
use async_graphql::parser::parse_query;
use async_graphql::parser::types::OperationType;
use async_graphql::{EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::{RawQuery, State};
use axum::response::{Html, IntoResponse, Response};

pub type MessageSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The schema holds no data of its own; each request attaches its
/// [`RequestContext`].
pub fn build_schema() -> MessageSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription).finish()
}

pub async fn controller(
    State(state): State<AppState>,
    ctx: RequestContext,
    request: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(request.into_inner().data(ctx)).await.into()
}

pub async fn index(
    State(state): State<AppState>,
    ctx: RequestContext,
    RawQuery(query): RawQuery,
) -> Response {
    let query = match query {
        Some(query) if !query.is_empty() => query,
        _ => return playground().into_response(),
    };

    let request = match parse_query_string(&query) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!("Rejected GET query string: {e}");
            return AppError::DecodingRequestFailed.into_response();
        }
    };
    if !is_read_only(&request.query) {
        return AppError::MethodNotAllowed.into_response();
    }

    let response = state.schema.execute(request.data(ctx)).await;
    GraphQLResponse::from(response).into_response()
}

fn playground() -> Html<String> {
    Html(playground_source(GraphQLPlaygroundConfig::new(GRAPHQL_PATH)))
}

/// Unparseable documents count as read-only so execution reports the syntax
/// error in the usual GraphQL envelope.
fn is_read_only(query: &str) -> bool {
    match parse_query(query) {
        Ok(document) => document
            .operations
            .iter()
            .all(|(_, operation)| operation.node.ty == OperationType::Query),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queries_are_read_only() {
        assert!(is_read_only("{ getMessages { id } }"));
        assert!(is_read_only(
            "query One($id: String!) { getMessageById(id: $id) { id } }"
        ));
        assert!(is_read_only("{ __schema { queryType { name } } }"));
    }

    #[test]
    fn mutations_are_not_read_only() {
        assert!(!is_read_only(
            "mutation Delete($id: String!) { deleteMessage(id: $id) { id } }"
        ));
        assert!(!is_read_only(
            "query A { getMessages { id } } mutation B { deleteMessage(id: \"x\") { id } }"
        ));
    }

    #[test]
    fn sdl_matches_message_contract() {
        let sdl = build_schema().sdl();
        for line in [
            "\tid: String\n",
            "\tname: String\n",
            "\tcontent: String\n",
            "\tgetMessages: [Message]\n",
            "\tgetMessageById(id: String!): Message\n",
            "\tcreateMessage(input: MessageInput): Message\n",
            "\tupdateMessage(id: String!, input: MessageInput): Message\n",
            "\tdeleteMessage(id: String!): Message\n",
        ] {
            assert!(sdl.contains(line), "missing {line:?} in\n{sdl}");
        }
        assert!(!sdl.contains("String!\n"), "output fields must be nullable:\n{sdl}");
        assert!(sdl.contains("input MessageInput"));
    }
}
