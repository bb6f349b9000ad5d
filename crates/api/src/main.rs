//! CRM API - GraphQL service binary.
//!
//! Serves the CRM GraphQL schema on `/graphql` (POST for operations, GET
//! for the GraphiQL IDE). Configuration comes from the environment; see
//! [`crm_api::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crm_api::config::CrmConfig;
use crm_api::db;
use crm_api::graphql::{CrmSchema, build_schema};

async fn graphql_handler(State(schema): State<CrmSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = CrmConfig::from_env().expect("Failed to load configuration");

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "crm_api=info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let schema = build_schema(pool);

    let app = Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(schema);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(%addr, "CRM GraphQL API listening");

    axum::serve(listener, app).await.expect("server error");
}
