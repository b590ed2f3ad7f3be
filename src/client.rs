//! Bank backend client
//!
//! The four remote collaborators (auth, cards, transactions, credit) behind
//! one trait. `HttpBankApi` talks JSON over HTTP with a long-lived,
//! connection-pooled `reqwest::Client`.

use crate::config::Endpoints;
use crate::error::AssistantError;
use crate::models::{
    AuthRequest, AuthResponse, BankCard, CardCreatedResponse, CardsResponse, CreateCardRequest,
    CreditRequest, CreditResponse, ErrorResponse, MessageResponse, Transaction,
    TransactionsResponse, TransferRequest, TransferResponse,
};
use crate::Result;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Remote bank operations the dashboard depends on
#[async_trait::async_trait]
pub trait BankApi: Send + Sync {
    /// Log in, registering the phone number on first use
    async fn login(&self, request: &AuthRequest) -> Result<AuthResponse>;
    async fn delete_account(&self, user_id: i64) -> Result<MessageResponse>;
    async fn list_cards(&self, user_id: i64) -> Result<Vec<BankCard>>;
    async fn create_card(&self, request: &CreateCardRequest) -> Result<CardCreatedResponse>;
    /// Newest first
    async fn list_transactions(&self, card_id: i64) -> Result<Vec<Transaction>>;
    async fn transfer(&self, request: &TransferRequest) -> Result<TransferResponse>;
    async fn issue_credit(&self, request: &CreditRequest) -> Result<CreditResponse>;
}

pub struct HttpBankApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBankApi {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, endpoints })
    }

    /// Send and decode. Non-2xx responses become `AssistantError::Api`
    /// carrying the backend's `error` field when it has one.
    async fn send<T: DeserializeOwned>(&self, service: &str, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            error!(service, "Bank API request failed: {}", e);
            AssistantError::HttpError(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        debug!(service, status = status.as_u16(), "Bank API response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("{} service returned {}", service, status));
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl BankApi for HttpBankApi {
    async fn login(&self, request: &AuthRequest) -> Result<AuthResponse> {
        self.send("auth", self.client.post(&self.endpoints.auth).json(request))
            .await
    }

    async fn delete_account(&self, user_id: i64) -> Result<MessageResponse> {
        let request = self
            .client
            .delete(&self.endpoints.auth)
            .query(&[("user_id", user_id)]);
        self.send("auth", request).await
    }

    async fn list_cards(&self, user_id: i64) -> Result<Vec<BankCard>> {
        let request = self
            .client
            .get(&self.endpoints.cards)
            .query(&[("user_id", user_id)]);
        let response: CardsResponse = self.send("cards", request).await?;
        Ok(response.cards)
    }

    async fn create_card(&self, request: &CreateCardRequest) -> Result<CardCreatedResponse> {
        self.send("cards", self.client.post(&self.endpoints.cards).json(request))
            .await
    }

    async fn list_transactions(&self, card_id: i64) -> Result<Vec<Transaction>> {
        let request = self
            .client
            .get(&self.endpoints.transactions)
            .query(&[("card_id", card_id)]);
        let response: TransactionsResponse = self.send("transactions", request).await?;
        Ok(response.transactions)
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<TransferResponse> {
        self.send(
            "transactions",
            self.client.post(&self.endpoints.transactions).json(request),
        )
        .await
    }

    async fn issue_credit(&self, request: &CreditRequest) -> Result<CreditResponse> {
        self.send("credit", self.client.post(&self.endpoints.credit).json(request))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdentifierType;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn cards(Query(params): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
        match params.get("user_id").map(String::as_str) {
            Some("1") => (
                StatusCode::OK,
                Json(json!({"cards": [
                    {"id": 10, "card_number": "1111 2222 3333 4444", "card_type": "virtual",
                     "card_name": "Виртуальная карта", "card_category": "debit",
                     "is_child_card": false, "balance": 250.0, "created_at": null}
                ]})),
            ),
            _ => (StatusCode::BAD_REQUEST, Json(json!({"error": "user_id is required"}))),
        }
    }

    async fn transfer(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["amount"].as_f64().unwrap_or(0.0) > 250.0 {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": "Insufficient funds"})));
        }
        (
            StatusCode::OK,
            Json(json!({"message": "Transfer successful", "transaction_id": 77})),
        )
    }

    async fn auth(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        (
            StatusCode::CREATED,
            Json(json!({
                "user": {"id": 1, "phone": body["phone"], "name": body["name"]},
                "message": "Registration successful"
            })),
        )
    }

    async fn spawn_backend() -> Endpoints {
        let router = Router::new()
            .route("/auth", axum::routing::post(auth))
            .route("/cards", get(cards))
            .route("/transactions", axum::routing::post(transfer))
            .route("/credit", axum::routing::post(|| async { "not json" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Endpoints::under(&format!("http://{}", addr))
    }

    fn client(endpoints: Endpoints) -> HttpBankApi {
        HttpBankApi::new(endpoints, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_login_and_list_cards() {
        let api = client(spawn_backend().await);

        let auth = api
            .login(&AuthRequest {
                phone: "+79990000000".to_string(),
                name: "Иван".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(auth.user.id, 1);
        assert_eq!(auth.user.name, "Иван");

        let cards = api.list_cards(1).await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].balance, 250.0);
    }

    #[tokio::test]
    async fn test_backend_error_message_is_surfaced() {
        let api = client(spawn_backend().await);

        let err = api.list_cards(2).await.unwrap_err();
        match err {
            AssistantError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "user_id is required");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = api
            .transfer(&TransferRequest {
                from_card_id: 10,
                to_identifier: "5555 6666 7777 8888".to_string(),
                amount: 1000.0,
                identifier_type: IdentifierType::Card,
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Insufficient funds");
    }

    #[tokio::test]
    async fn test_transfer_success() {
        let api = client(spawn_backend().await);

        let response = api
            .transfer(&TransferRequest {
                from_card_id: 10,
                to_identifier: "+79991234567".to_string(),
                amount: 100.0,
                identifier_type: IdentifierType::Phone,
            })
            .await
            .unwrap();
        assert_eq!(response.transaction_id, 77);
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let api = client(spawn_backend().await);

        let err = api
            .issue_credit(&CreditRequest { card_id: 10, amount: 1.0 })
            .await
            .unwrap_err();
        assert!(matches!(err, AssistantError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_missing_route_without_error_body() {
        let api = client(spawn_backend().await);

        let err = api.delete_account(1).await.unwrap_err();
        assert!(matches!(err, AssistantError::Api { status: 405, .. }));
    }
}
