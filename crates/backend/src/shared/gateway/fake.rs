//! In-memory gateway for handler tests

use async_trait::async_trait;
use contracts::dashboards::d400_data_browser::{cell_text, Row};
use contracts::enums::dataset_id::DatasetId;
use contracts::system::auth::{SessionTokens, UserInfo};
use std::collections::HashMap;
use std::sync::Mutex;

use super::{AuthGateway, DataGateway, SearchPage, TableSearch};
use crate::shared::error::DashboardError;

pub const VALID_TOKEN: &str = "valid-access-token";
pub const VALID_REFRESH_TOKEN: &str = "refresh";

#[derive(Default)]
pub struct FakeGateway {
    pub columns: HashMap<DatasetId, Vec<String>>,
    pub rows: Vec<Row>,
    pub fail_data: bool,
    /// Message returned by the auth provider for every auth action
    pub auth_rejection: Option<String>,
    /// Sign-in succeeds but the issued token is never accepted
    pub broken_sessions: bool,
    /// Search pages carry no total, like a response without `Content-Range`
    pub hide_total: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }

    pub fn recorded(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn reject(&self) -> Result<(), DashboardError> {
        match &self.auth_rejection {
            Some(message) => Err(DashboardError::Auth(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataGateway for FakeGateway {
    async fn table_columns(&self, table: DatasetId) -> Result<Vec<String>, DashboardError> {
        self.record(format!("columns:{}", table));
        if self.fail_data {
            return Err(DashboardError::Remote("rpc unavailable".into()));
        }
        Ok(self.columns.get(&table).cloned().unwrap_or_default())
    }

    async fn search_table(&self, search: &TableSearch) -> Result<SearchPage, DashboardError> {
        self.record(format!(
            "search:{}:{}:{}",
            search.table, search.limit, search.offset
        ));
        if self.fail_data {
            return Err(DashboardError::Remote("rpc unavailable".into()));
        }

        // Case-insensitive "contains" on every filter, AND-combined
        let matching: Vec<&Row> = self
            .rows
            .iter()
            .filter(|row| {
                search.filters.iter().all(|(column, value)| {
                    cell_text(row, column)
                        .to_lowercase()
                        .contains(&value.to_lowercase())
                })
            })
            .collect();

        let rows = matching
            .iter()
            .skip(search.offset)
            .take(search.limit)
            .map(|row| (*row).clone())
            .collect();

        Ok(SearchPage {
            rows,
            total: (!self.hide_total).then_some(matching.len() as u64),
        })
    }
}

#[async_trait]
impl AuthGateway for FakeGateway {
    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        redirect_to: &str,
    ) -> Result<(), DashboardError> {
        self.record(format!("sign_up:{}:{}", email, redirect_to));
        self.reject()
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<SessionTokens, DashboardError> {
        self.record(format!("sign_in:{}", email));
        self.reject()?;
        let access_token = if self.broken_sessions {
            "unretrievable".to_string()
        } else {
            VALID_TOKEN.to_string()
        };
        Ok(SessionTokens {
            access_token,
            refresh_token: VALID_REFRESH_TOKEN.to_string(),
        })
    }

    async fn get_user(&self, access_token: &str) -> Result<UserInfo, DashboardError> {
        if access_token != VALID_TOKEN {
            return Err(DashboardError::Session("invalid JWT".into()));
        }
        Ok(UserInfo {
            id: "user-1".to_string(),
            email: Some("ada@example.com".to_string()),
            avatar_url: None,
        })
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), DashboardError> {
        self.record(format!("recover:{}:{}", email, redirect_to));
        self.reject()
    }

    async fn update_password(
        &self,
        _access_token: &str,
        _password: &str,
    ) -> Result<(), DashboardError> {
        self.record("update_password".to_string());
        self.reject()
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), DashboardError> {
        self.record("sign_out".to_string());
        self.reject()
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, DashboardError> {
        self.record("refresh".to_string());
        if refresh_token != VALID_REFRESH_TOKEN {
            return Err(DashboardError::Session("Invalid Refresh Token".into()));
        }
        Ok(SessionTokens {
            access_token: VALID_TOKEN.to_string(),
            refresh_token: "rotated".to_string(),
        })
    }
}
