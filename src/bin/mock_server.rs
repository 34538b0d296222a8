//! Mock delivery backend for local development
//! In-memory state only, nothing survives a restart

use actix_web::web;
use pts_client::config::load_config;
use pts_client::mocks::mock_backend::{self, MockBackend};
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = load_config().map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let state = web::Data::new(MockBackend::new());
    let demo = state.seed_user("demo@pts.local", "demo", "Demo User");
    state.seed_order(1, &demo, "pending");
    state.seed_order(2, &demo, "delivered");

    let listener = TcpListener::bind(&config.mock_bind)?;
    log::info!("Mock backend listening on http://{}", listener.local_addr()?);
    log::info!("Demo account: demo@pts.local / demo");
    log::info!("POST /register, POST /login, POST /orders");
    log::info!("GET /users/{{user}}/orders, GET /orders/{{id}}, DELETE /orders/{{id}}");

    mock_backend::serve(listener, state)?.await
}
