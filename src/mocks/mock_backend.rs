//! In-memory stand-in for the delivery backend
//!
//! Serves the six endpoints the client consumes, with just enough state to
//! exercise every client path: accounts, bearer tokens and orders all live in
//! process memory. Used by the `mock_server` binary and the integration
//! tests.

use crate::types::{Credentials, OrderRequest, RegistrationRequest};
use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::net::TcpListener;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct MockUser {
    id: String,
    name: String,
    email: String,
    password: String,
    phone: String,
    location: Option<String>,
    created_at: DateTime<Utc>,
}

/// Stored order, serialised as the backend's order record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockOrder {
    pub id: u64,
    pub status: String,
    pub pickup: String,
    pub drop_off: String,
    pub delivery: String,
    pub package_details: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, MockUser>,
    tokens: HashMap<String, String>,
    orders: BTreeMap<u64, MockOrder>,
    next_order_id: u64,
    requests: Vec<String>,
}

/// Shared state of the mock backend
#[derive(Default)]
pub struct MockBackend {
    inner: Mutex<Inner>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Create an account directly; returns its id
    pub fn seed_user(&self, email: &str, password: &str, name: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.lock().users.insert(
            email.to_string(),
            MockUser {
                id: id.clone(),
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                phone: String::new(),
                location: None,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Issue a token for an existing user id without going through login
    pub fn seed_token(&self, user_id: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.lock().tokens.insert(token.clone(), user_id.to_string());
        token
    }

    /// Insert an order with a chosen id and status
    pub fn seed_order(&self, id: u64, user_id: &str, status: &str) {
        let mut inner = self.lock();
        inner.next_order_id = inner.next_order_id.max(id);
        inner.orders.insert(
            id,
            MockOrder {
                id,
                status: status.to_string(),
                pickup: "Tahrir Square".to_string(),
                drop_off: "Heliopolis".to_string(),
                delivery: "standard".to_string(),
                package_details: "Small parcel".to_string(),
                user_id: user_id.to_string(),
                created_at: Utc::now(),
            },
        );
    }

    pub fn is_token_valid(&self, token: &str) -> bool {
        self.lock().tokens.contains_key(token)
    }

    pub fn order(&self, id: u64) -> Option<MockOrder> {
        self.lock().orders.get(&id).cloned()
    }

    /// `METHOD path` of every request served so far
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    fn record(&self, req: &HttpRequest) {
        self.lock().requests.push(format!("{} {}", req.method(), req.path()));
    }

    /// User id behind the request's bearer token
    fn authenticate(&self, req: &HttpRequest) -> Option<String> {
        let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
        let token = header.strip_prefix("Bearer ")?;
        self.lock().tokens.get(token).cloned()
    }
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "message": "Invalid or missing token"
    }))
}

fn order_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "message": "Order not found"
    }))
}

/// User registration endpoint
async fn mock_register(
    req: HttpRequest,
    state: web::Data<MockBackend>,
    payload: web::Json<RegistrationRequest>,
) -> HttpResponse {
    state.record(&req);
    let payload = payload.into_inner();

    if payload.email.is_empty()
        || payload.password.is_empty()
        || payload.phone.is_empty()
        || payload.name.is_empty()
    {
        return HttpResponse::BadRequest().json(json!({
            "result": false,
            "message": "Missing required fields"
        }));
    }

    let mut inner = state.lock();
    if inner.users.contains_key(&payload.email) {
        return HttpResponse::Conflict().json(json!({
            "result": false,
            "message": "Email already registered"
        }));
    }

    let user = MockUser {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        email: payload.email.clone(),
        password: payload.password,
        phone: payload.phone,
        location: payload.location,
        created_at: Utc::now(),
    };
    log::info!("Mock registered {}", user.email);
    inner.users.insert(payload.email, user);

    HttpResponse::Created().json(json!({
        "result": true,
        "message": "User registered successfully"
    }))
}

/// Login endpoint - returns a bearer token and the user record
async fn mock_login(
    req: HttpRequest,
    state: web::Data<MockBackend>,
    payload: web::Json<Credentials>,
) -> HttpResponse {
    state.record(&req);

    let mut inner = state.lock();
    let user = match inner.users.get(&payload.email) {
        Some(user) if user.password == payload.password => user.clone(),
        _ => {
            return HttpResponse::Unauthorized().json(json!({
                "message": "Invalid credentials"
            }))
        },
    };

    let token = Uuid::new_v4().simple().to_string();
    inner.tokens.insert(token.clone(), user.id.clone());

    HttpResponse::Ok().json(json!({
        "token": token,
        "user": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "phone": user.phone,
            "location": user.location,
            "created_at": user.created_at,
        }
    }))
}

/// Order placement endpoint - bearer token required
async fn mock_place_order(
    req: HttpRequest,
    state: web::Data<MockBackend>,
    payload: web::Json<OrderRequest>,
) -> HttpResponse {
    state.record(&req);
    let Some(user_id) = state.authenticate(&req) else {
        return unauthorized();
    };

    let payload = payload.into_inner();
    if !payload.is_valid() {
        return HttpResponse::BadRequest().json(json!({
            "message": "Missing required fields",
            "fields": payload.invalid_fields()
        }));
    }

    let mut inner = state.lock();
    inner.next_order_id += 1;
    let id = inner.next_order_id;
    inner.orders.insert(
        id,
        MockOrder {
            id,
            status: "pending".to_string(),
            pickup: payload.pickup,
            drop_off: payload.drop_off,
            delivery: payload.delivery,
            package_details: payload.package_details,
            user_id,
            created_at: Utc::now(),
        },
    );

    HttpResponse::Created().json(json!({
        "id": id,
        "message": "Order placed successfully"
    }))
}

/// Order list endpoint - `me` resolves to the token's user
async fn mock_list_orders(
    req: HttpRequest,
    state: web::Data<MockBackend>,
    path: web::Path<String>,
) -> HttpResponse {
    state.record(&req);
    let Some(user_id) = state.authenticate(&req) else {
        return unauthorized();
    };

    let requested = path.into_inner();
    if requested != "me" && requested != user_id {
        return HttpResponse::Forbidden().json(json!({
            "message": "Cannot list another user's orders"
        }));
    }

    let orders: Vec<MockOrder> =
        state.lock().orders.values().filter(|o| o.user_id == user_id).cloned().collect();
    HttpResponse::Ok().json(orders)
}

/// Order detail endpoint
async fn mock_get_order(
    req: HttpRequest,
    state: web::Data<MockBackend>,
    path: web::Path<u64>,
) -> HttpResponse {
    state.record(&req);
    match state.order(path.into_inner()) {
        Some(order) => HttpResponse::Ok().json(order),
        None => order_not_found(),
    }
}

/// Order cancellation endpoint - only pending orders can be cancelled
async fn mock_cancel_order(
    req: HttpRequest,
    state: web::Data<MockBackend>,
    path: web::Path<u64>,
) -> HttpResponse {
    state.record(&req);
    let id = path.into_inner();

    let mut inner = state.lock();
    let Some(order) = inner.orders.get_mut(&id) else {
        return order_not_found();
    };
    if order.status != "pending" {
        return HttpResponse::Conflict().json(json!({
            "message": format!("Order is {} and can no longer be cancelled", order.status)
        }));
    }
    order.status = "cancelled".to_string();

    HttpResponse::Ok().json(json!({
        "id": id,
        "status": "cancelled",
        "message": "Order cancelled"
    }))
}

/// Configure all mock routes
pub fn configure_mock_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(mock_register))
        .route("/login", web::post().to(mock_login))
        .route("/orders", web::post().to(mock_place_order))
        .route("/users/{user}/orders", web::get().to(mock_list_orders))
        .route("/orders/{id}", web::get().to(mock_get_order))
        .route("/orders/{id}", web::delete().to(mock_cancel_order));
}

/// Build a server for `state` on an already bound listener
///
/// The returned server must be awaited or spawned to start serving.
pub fn serve(listener: TcpListener, state: web::Data<MockBackend>) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure_mock_routes)
    })
    .workers(1)
    .listen(listener)?
    .run();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_web::test]
    async fn test_register_then_login() {
        let state = web::Data::new(MockBackend::new());
        let app = test::init_service(
            App::new().app_data(state.clone()).configure(configure_mock_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({
                "email": "mona@pts.local",
                "password": "pw",
                "phone": "0122",
                "name": "Mona"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"Email": "mona@pts.local", "Password": "pw"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["token"].is_string());
        assert_eq!(body["user"]["name"], "Mona");
        assert_eq!(state.requests(), vec!["POST /register", "POST /login"]);
    }

    #[actix_web::test]
    async fn test_orders_need_a_token() {
        let state = web::Data::new(MockBackend::new());
        let app = test::init_service(
            App::new().app_data(state.clone()).configure(configure_mock_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/users/me/orders").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_only_pending_orders_cancel() {
        let state = web::Data::new(MockBackend::new());
        let user = state.seed_user("a@b.com", "x", "Ahmed");
        state.seed_order(42, &user, "pending");
        state.seed_order(43, &user, "delivered");
        let app = test::init_service(
            App::new().app_data(state.clone()).configure(configure_mock_routes),
        )
        .await;

        let req = test::TestRequest::delete().uri("/orders/42").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        assert_eq!(state.order(42).map(|o| o.status), Some("cancelled".to_string()));

        let req = test::TestRequest::delete().uri("/orders/43").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    }
}
