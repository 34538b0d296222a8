//! Scripted API double and recording UI for view tests

use crate::api::{ClientError, DeliveryApi};
use crate::router::Route;
use crate::session::SessionToken;
use crate::types::{
    Credentials, LoginOutcome, OrderConfirmation, OrderDetails, OrderId, OrderRequest,
    OrderSummary, RegistrationOutcome, RegistrationRequest,
};
use crate::ui::{Alerter, Navigator};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A call received by [`MockDeliveryApi`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Login(Credentials),
    Register(RegistrationRequest),
    PlaceOrder {
        token: SessionToken,
        order: OrderRequest,
    },
    ListOrders {
        token: SessionToken,
        user: String,
    },
    GetOrder(OrderId),
    CancelOrder(OrderId),
}

type Replies<T> = Arc<Mutex<VecDeque<Result<T, ClientError>>>>;

/// Replays queued replies per endpoint and records every call
///
/// An endpoint with nothing queued answers with a decode error.
#[derive(Clone, Default)]
pub struct MockDeliveryApi {
    login: Replies<LoginOutcome>,
    register: Replies<RegistrationOutcome>,
    place_order: Replies<OrderConfirmation>,
    list_orders: Replies<Vec<OrderSummary>>,
    get_order: Replies<OrderDetails>,
    cancel_order: Replies<()>,
    calls: Arc<Mutex<Vec<ApiCall>>>,
}

fn push<T>(queue: &Replies<T>, reply: Result<T, ClientError>) {
    queue.lock().unwrap_or_else(|e| e.into_inner()).push_back(reply);
}

fn pop<T>(queue: &Replies<T>, endpoint: &str) -> Result<T, ClientError> {
    queue
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .pop_front()
        .unwrap_or_else(|| Err(ClientError::Decode(format!("no scripted reply for {}", endpoint))))
}

impl MockDeliveryApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_login(&self, reply: Result<LoginOutcome, ClientError>) {
        push(&self.login, reply);
    }

    pub fn push_register(&self, reply: Result<RegistrationOutcome, ClientError>) {
        push(&self.register, reply);
    }

    pub fn push_place_order(&self, reply: Result<OrderConfirmation, ClientError>) {
        push(&self.place_order, reply);
    }

    pub fn push_list_orders(&self, reply: Result<Vec<OrderSummary>, ClientError>) {
        push(&self.list_orders, reply);
    }

    pub fn push_get_order(&self, reply: Result<OrderDetails, ClientError>) {
        push(&self.get_order, reply);
    }

    pub fn push_cancel_order(&self, reply: Result<(), ClientError>) {
        push(&self.cancel_order, reply);
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

#[async_trait]
impl DeliveryApi for MockDeliveryApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ClientError> {
        self.record(ApiCall::Login(credentials.clone()));
        pop(&self.login, "login")
    }

    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, ClientError> {
        self.record(ApiCall::Register(request.clone()));
        pop(&self.register, "register")
    }

    async fn place_order(
        &self,
        token: &SessionToken,
        order: &OrderRequest,
    ) -> Result<OrderConfirmation, ClientError> {
        self.record(ApiCall::PlaceOrder {
            token: token.clone(),
            order: order.clone(),
        });
        pop(&self.place_order, "place_order")
    }

    async fn list_orders(
        &self,
        token: &SessionToken,
        user: &str,
    ) -> Result<Vec<OrderSummary>, ClientError> {
        self.record(ApiCall::ListOrders {
            token: token.clone(),
            user: user.to_string(),
        });
        pop(&self.list_orders, "list_orders")
    }

    async fn get_order(&self, id: &OrderId) -> Result<OrderDetails, ClientError> {
        self.record(ApiCall::GetOrder(id.clone()));
        pop(&self.get_order, "get_order")
    }

    async fn cancel_order(&self, id: &OrderId) -> Result<(), ClientError> {
        self.record(ApiCall::CancelOrder(id.clone()));
        pop(&self.cancel_order, "cancel_order")
    }
}

/// Collects alerts and navigations instead of showing them
#[derive(Debug, Default)]
pub struct RecordingUi {
    alerts: Mutex<Vec<String>>,
    routes: Mutex<Vec<Route>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Alerter for RecordingUi {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap_or_else(|e| e.into_inner()).push(message.to_string());
    }
}

impl Navigator for RecordingUi {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap_or_else(|e| e.into_inner()).push(route);
    }
}
