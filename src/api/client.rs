//! HTTP implementation of the delivery API on top of reqwest

use super::{ClientError, DeliveryApi};
use crate::config::ClientConfig;
use crate::session::SessionToken;
use crate::types::{
    Credentials, LoginOutcome, LoginReply, OrderConfirmation, OrderDetails, OrderId, OrderRequest,
    OrderSummary, RegistrationOutcome, RegistrationReply, RegistrationRequest,
};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct HttpDeliveryApi {
    http: Client,
    base_url: String,
}

impl HttpDeliveryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and hand back the body of a success reply
    async fn execute(&self, request: RequestBuilder) -> Result<String, ClientError> {
        let response = request.header(ACCEPT, "application/json").send().await.map_err(|e| {
            log::warn!("Backend unreachable: {}", e);
            ClientError::Network(e.to_string())
        })?;

        // The backend answered, so a body that breaks off is a bad reply
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log::warn!("Unreadable {} reply: {}", status, e);
            ClientError::Decode(e.to_string())
        })?;

        if status.is_success() {
            Ok(body)
        } else {
            let error = ClientError::from_response(status, &body);
            log::debug!("Backend replied {}: {}", status, error);
            Err(error)
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Like [`decode`] but an empty body is the type's default
fn decode_or_default<T: DeserializeOwned + Default>(body: &str) -> Result<T, ClientError> {
    if body.trim().is_empty() {
        Ok(T::default())
    } else {
        decode(body)
    }
}

/// Decode a reply that is only meaningful as a JSON object; any other JSON
/// value yields the default
fn decode_object<T: DeserializeOwned + Default>(body: &str) -> Result<T, ClientError> {
    match decode::<Value>(body)? {
        object @ Value::Object(_) => {
            serde_json::from_value(object).map_err(|e| ClientError::Decode(e.to_string()))
        },
        _ => Ok(T::default()),
    }
}

/// Decode an order list entry by entry. `null` is an empty list; entries
/// that are not objects are dropped.
fn decode_order_list(body: &str) -> Result<Vec<OrderSummary>, ClientError> {
    let entries: Option<Vec<Value>> = decode(body)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(fields) => Some(OrderSummary::from_object(fields)),
            other => {
                log::warn!("Skipping order list entry {}", other);
                None
            },
        })
        .collect())
}

#[async_trait]
impl DeliveryApi for HttpDeliveryApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ClientError> {
        let body = self.execute(self.http.post(self.url("/login")).json(credentials)).await?;
        let reply: LoginReply = decode_object(&body)?;
        Ok(reply.into_outcome())
    }

    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationOutcome, ClientError> {
        let body = self.execute(self.http.post(self.url("/register")).json(request)).await?;
        let reply: RegistrationReply = decode_object(&body)?;
        Ok(reply.into_outcome())
    }

    async fn place_order(
        &self,
        token: &SessionToken,
        order: &OrderRequest,
    ) -> Result<OrderConfirmation, ClientError> {
        let request = self.http.post(self.url("/orders")).bearer_auth(token.as_str()).json(order);
        let body = self.execute(request).await?;
        decode_or_default(&body)
    }

    async fn list_orders(
        &self,
        token: &SessionToken,
        user: &str,
    ) -> Result<Vec<OrderSummary>, ClientError> {
        let request =
            self.http.get(self.url(&format!("/users/{}/orders", user))).bearer_auth(token.as_str());
        let body = self.execute(request).await?;
        decode_order_list(&body)
    }

    async fn get_order(&self, id: &OrderId) -> Result<OrderDetails, ClientError> {
        let body = self.execute(self.http.get(self.url(&format!("/orders/{}", id)))).await?;
        decode(&body)
    }

    async fn cancel_order(&self, id: &OrderId) -> Result<(), ClientError> {
        self.execute(self.http.delete(self.url(&format!("/orders/{}", id)))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;

    /// Serve one request with `reply` written as is, then hang up
    fn stub_backend(reply: String) -> HttpDeliveryApi {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line.trim().is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut body = vec![0; length];
            reader.read_exact(&mut body).unwrap();
            reader.get_mut().write_all(reply.as_bytes()).unwrap();
        });
        HttpDeliveryApi::new(format!("http://{}", addr))
    }

    fn json_reply(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let api = HttpDeliveryApi::new("http://localhost:8080/");
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(api.url("/orders"), "http://localhost:8080/orders");
    }

    #[test]
    fn test_decode_or_default_accepts_empty_body() {
        let confirmation: OrderConfirmation = decode_or_default("  ").unwrap();
        assert_eq!(confirmation, OrderConfirmation::default());
    }

    #[test]
    fn test_decode_object_ignores_non_objects() {
        let reply: LoginReply = decode_object(r#""ok""#).unwrap();
        assert!(reply.token.is_none());
        assert!(matches!(decode_object::<LoginReply>("<html>"), Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_network_error() {
        // nothing listens on the discard port
        let api = HttpDeliveryApi::new("http://127.0.0.1:9");
        let result = api.login(&Credentials::new("a@b.com", "x")).await;
        assert!(matches!(result, Err(ClientError::Network(_))));
    }

    #[tokio::test]
    async fn test_login_accepts_the_backend_user_record() {
        let api = stub_backend(json_reply(
            r#"{"token":"abc","user":{"ID":"u-1","Name":"Ahmed","Email":"a@b.com","Phone":201000000,"Location":{"lat":30.0,"lng":31.2},"CreatedAt":"2024-05-01T10:00:00Z"}}"#,
        ));

        match api.login(&Credentials::new("a@b.com", "x")).await.unwrap() {
            LoginOutcome::Authenticated {
                token,
                user,
            } => {
                assert_eq!(token.as_str(), "abc");
                assert_eq!(user.id.as_deref(), Some("u-1"));
                assert_eq!(user.name.as_deref(), Some("Ahmed"));
                assert_eq!(user.phone.as_deref(), Some("201000000"));
                assert!(user.location.is_none());
                assert_eq!(user.fields["Location"]["lng"], 31.2);
                assert_eq!(user.fields["CreatedAt"], "2024-05-01T10:00:00Z");
            },
            LoginOutcome::Rejected => panic!("a token and a user object must authenticate"),
        }
    }

    #[tokio::test]
    async fn test_order_list_accepts_alternate_id_keys() {
        let api = stub_backend(json_reply(
            r#"[{"orderId":7,"status":"pending"},{"ID":"8","Status":"delivered"},{"order_id":9},{"pickup":"Giza"}]"#,
        ));
        let orders = api.list_orders(&SessionToken::new("abc"), "me").await.unwrap();

        let ids: Vec<Option<&str>> =
            orders.iter().map(|o| o.id.as_ref().map(OrderId::as_str)).collect();
        assert_eq!(ids, vec![Some("7"), Some("8"), Some("9"), None]);
        assert_eq!(orders[0].status, Some(OrderStatus::Pending));
        assert_eq!(orders[1].status, Some(OrderStatus::Other("delivered".to_string())));
        assert_eq!(orders[3].fields["pickup"], "Giza");
    }

    #[tokio::test]
    async fn test_null_order_list_is_empty() {
        let api = stub_backend(json_reply("null"));
        let orders = api.list_orders(&SessionToken::new("abc"), "me").await.unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_truncated_body_is_not_a_network_error() {
        let api = stub_backend(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\nConnection: close\r\n\r\n[{\"id\""
                .to_string(),
        );
        let result = api.list_orders(&SessionToken::new("abc"), "me").await;
        assert!(matches!(result, Err(ClientError::Decode(_))), "{result:?}");
    }
}
