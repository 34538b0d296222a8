//! Delivery backend API
//!
//! One typed async call per endpoint. The views only see the
//! [`DeliveryApi`] trait, so they can be driven by the HTTP implementation or
//! by a scripted double.

pub mod client;
pub mod error;

pub use client::HttpDeliveryApi;
pub use error::ClientError;

use crate::session::SessionToken;
use crate::types::{
    Credentials, LoginOutcome, OrderConfirmation, OrderDetails, OrderId, OrderRequest, OrderSummary,
    RegistrationOutcome, RegistrationRequest,
};
use async_trait::async_trait;

#[async_trait]
pub trait DeliveryApi: Send + Sync {
    /// `POST /login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ClientError>;

    /// `POST /register`
    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, ClientError>;

    /// `POST /orders` with a bearer token
    async fn place_order(
        &self,
        token: &SessionToken,
        order: &OrderRequest,
    ) -> Result<OrderConfirmation, ClientError>;

    /// `GET /users/{user}/orders` with a bearer token
    async fn list_orders(
        &self,
        token: &SessionToken,
        user: &str,
    ) -> Result<Vec<OrderSummary>, ClientError>;

    /// `GET /orders/{id}`
    async fn get_order(&self, id: &OrderId) -> Result<OrderDetails, ClientError>;

    /// `DELETE /orders/{id}`
    async fn cancel_order(&self, id: &OrderId) -> Result<(), ClientError>;
}
