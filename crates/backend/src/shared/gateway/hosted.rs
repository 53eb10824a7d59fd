use async_trait::async_trait;
use contracts::dashboards::d400_data_browser::Row;
use contracts::enums::dataset_id::DatasetId;
use contracts::system::auth::{SessionTokens, UserInfo};
use reqwest::header::{AUTHORIZATION, CONTENT_RANGE};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use super::{AuthGateway, DataGateway, SearchPage, TableSearch};
use crate::shared::config::GatewayConfig;
use crate::shared::error::DashboardError;

/// HTTP client for the hosted REST (RPC) and auth APIs
pub struct HostedGateway {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct ColumnRow {
    col_name: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct GatewayUser {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl From<GatewayUser> for UserInfo {
    fn from(user: GatewayUser) -> Self {
        let avatar_url = user
            .user_metadata
            .get("avatar_url")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        UserInfo {
            id: user.id,
            email: user.email,
            avatar_url,
        }
    }
}

impl HostedGateway {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request authorized with the anon key
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
    }

    /// Request authorized with a user's access token
    fn user_request(&self, method: Method, path: &str, access_token: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, DashboardError> {
        request.send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "timed out"
            } else if e.is_connect() {
                "connection failed"
            } else {
                "request failed"
            };
            DashboardError::Remote(format!("Gateway {}: {}", reason, e))
        })
    }

    async fn rpc(&self, name: &str, body: serde_json::Value) -> Result<Response, DashboardError> {
        let response = self
            .send(
                self.request(Method::POST, &format!("/rest/v1/rpc/{}", name))
                    .header("Prefer", "count=exact")
                    .json(&body),
            )
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(DashboardError::Remote(format!(
                "RPC {} failed (HTTP {}): {}",
                name,
                status.as_u16(),
                gateway_error_message(&text)
            )));
        }

        Ok(response)
    }

    /// `POST /auth/v1/token` with the given grant
    async fn token_grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<SessionTokens, DashboardError> {
        let response = self
            .auth_call(
                self.request(Method::POST, "/auth/v1/token")
                    .query(&[("grant_type", grant_type)])
                    .json(&body),
            )
            .await?;

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| DashboardError::Remote(format!("Invalid token payload: {}", e)))?;

        Ok(SessionTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Auth endpoints report rejections as [`DashboardError::Auth`]
    async fn auth_call(&self, request: RequestBuilder) -> Result<Response, DashboardError> {
        let response = self.send(request).await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = gateway_error_message(&text);
        if status.is_server_error() {
            Err(DashboardError::Remote(format!(
                "Auth service error (HTTP {}): {}",
                status.as_u16(),
                message
            )))
        } else {
            Err(DashboardError::Auth(message))
        }
    }
}

#[async_trait]
impl DataGateway for HostedGateway {
    async fn table_columns(&self, table: DatasetId) -> Result<Vec<String>, DashboardError> {
        let response = self
            .rpc("get_table_columns", json!({ "p_table_name": table.code() }))
            .await?;

        let rows: Vec<ColumnRow> = response
            .json()
            .await
            .map_err(|e| DashboardError::Remote(format!("Invalid columns payload: {}", e)))?;

        Ok(rows.into_iter().map(|r| r.col_name).collect())
    }

    async fn search_table(&self, search: &TableSearch) -> Result<SearchPage, DashboardError> {
        let body = json!({
            "p_table_name": search.table.code(),
            "search_column": "",
            "search_value": "",
            "filters": search.filters.to_value(),
            "fetch_limit": search.limit,
            "fetch_offset": search.offset,
        });
        let response = self.rpc("search_table", body).await?;

        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);

        let rows: Vec<Row> = response
            .json()
            .await
            .map_err(|e| DashboardError::Remote(format!("Invalid search payload: {}", e)))?;

        Ok(SearchPage { rows, total })
    }
}

#[async_trait]
impl AuthGateway for HostedGateway {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<(), DashboardError> {
        self.auth_call(
            self.request(Method::POST, "/auth/v1/signup")
                .query(&[("redirect_to", redirect_to)])
                .json(&json!({ "email": email, "password": password })),
        )
        .await?;
        Ok(())
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionTokens, DashboardError> {
        self.token_grant("password", json!({ "email": email, "password": password }))
            .await
    }

    async fn get_user(&self, access_token: &str) -> Result<UserInfo, DashboardError> {
        let response = self
            .auth_call(self.user_request(Method::GET, "/auth/v1/user", access_token))
            .await
            .map_err(|e| match e {
                DashboardError::Auth(message) => DashboardError::Session(message),
                other => other,
            })?;

        let user: GatewayUser = response
            .json()
            .await
            .map_err(|e| DashboardError::Session(format!("Invalid user payload: {}", e)))?;

        Ok(user.into())
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), DashboardError> {
        self.auth_call(
            self.request(Method::POST, "/auth/v1/recover")
                .query(&[("redirect_to", redirect_to)])
                .json(&json!({ "email": email })),
        )
        .await?;
        Ok(())
    }

    async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<(), DashboardError> {
        self.auth_call(
            self.user_request(Method::PUT, "/auth/v1/user", access_token)
                .json(&json!({ "password": password })),
        )
        .await?;
        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), DashboardError> {
        self.auth_call(self.user_request(Method::POST, "/auth/v1/logout", access_token))
            .await?;
        Ok(())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, DashboardError> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
            .map_err(|e| match e {
                DashboardError::Auth(message) => DashboardError::Session(message),
                other => other,
            })
    }
}

/// Total from a `Content-Range: 0-49/1234` header; `None` when unknown (`*`)
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.trim().parse().ok()
}

/// Human-readable message from a gateway error body
pub fn gateway_error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    if let Some(value) = parsed {
        for key in ["msg", "error_description", "message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown gateway error".to_string()
    } else {
        trimmed.to_string()
    }
}
