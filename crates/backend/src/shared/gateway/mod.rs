//! Hosted auth/database service ("gateway")
//!
//! Everything the dashboard stores or authenticates lives behind these two
//! traits. [`hosted::HostedGateway`] implements both over HTTP.

pub mod hosted;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use contracts::dashboards::d400_data_browser::{FilterSet, Row};
use contracts::enums::dataset_id::DatasetId;
use contracts::system::auth::{SessionTokens, UserInfo};

use crate::shared::error::DashboardError;

/// One page request of the search RPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSearch {
    pub table: DatasetId,
    pub filters: FilterSet,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub rows: Vec<Row>,
    /// Total matching rows across all pages, when the database reports it
    pub total: Option<u64>,
}

/// Column introspection and filtered search
#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn table_columns(&self, table: DatasetId) -> Result<Vec<String>, DashboardError>;

    async fn search_table(&self, search: &TableSearch) -> Result<SearchPage, DashboardError>;
}

/// Password authentication and session retrieval
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: &str,
    ) -> Result<(), DashboardError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionTokens, DashboardError>;

    /// Fails with [`DashboardError::Session`] when the token is not accepted
    async fn get_user(&self, access_token: &str) -> Result<UserInfo, DashboardError>;

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), DashboardError>;

    async fn update_password(
        &self,
        access_token: &str,
        password: &str,
    ) -> Result<(), DashboardError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), DashboardError>;

    /// New session tokens for a still valid refresh token
    async fn refresh_session(&self, refresh_token: &str) -> Result<SessionTokens, DashboardError>;
}
