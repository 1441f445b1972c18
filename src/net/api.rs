//! Typed calls, one per backend endpoint.
//!
//! Thin wrappers over [`RemoteClient::call`]. They never touch the cache or
//! post notifications; that belongs to the query layer.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::client::RemoteClient;
use super::endpoint::Endpoint;
use super::types::{
    AuthResponse, ChartData, ChartPeriod, CreateUserData, DashboardStats, LoginCredentials, RecentActivity,
    RegisterData, UpdateUserData, User,
};
use crate::error::ApiError;

// =============================================================================
// AUTH
// =============================================================================

/// `POST /auth/login`.
///
/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn login(client: &RemoteClient, credentials: LoginCredentials) -> Result<AuthResponse, ApiError> {
    client.call(&Endpoint::Login(credentials)).await
}

/// `POST /auth/register`.
///
/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn register(client: &RemoteClient, data: RegisterData) -> Result<AuthResponse, ApiError> {
    client.call(&Endpoint::Register(data)).await
}

/// `POST /auth/logout`. The response payload is ignored.
///
/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn logout(client: &RemoteClient) -> Result<(), ApiError> {
    client
        .call::<serde_json::Value>(&Endpoint::Logout)
        .await
        .map(|_| ())
}

// =============================================================================
// USERS
// =============================================================================

/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn list_users(client: &RemoteClient) -> Result<Vec<User>, ApiError> {
    client.call(&Endpoint::ListUsers).await
}

/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn get_user(client: &RemoteClient, id: &str) -> Result<User, ApiError> {
    client.call(&Endpoint::GetUser(id.to_owned())).await
}

/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn create_user(client: &RemoteClient, data: CreateUserData) -> Result<User, ApiError> {
    client.call(&Endpoint::CreateUser(data)).await
}

/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn update_user(client: &RemoteClient, id: &str, data: UpdateUserData) -> Result<User, ApiError> {
    client
        .call(&Endpoint::UpdateUser { id: id.to_owned(), data })
        .await
}

/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn delete_user(client: &RemoteClient, id: &str) -> Result<(), ApiError> {
    client
        .call::<serde_json::Value>(&Endpoint::DeleteUser(id.to_owned()))
        .await
        .map(|_| ())
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn dashboard_stats(client: &RemoteClient) -> Result<DashboardStats, ApiError> {
    client.call(&Endpoint::DashboardStats).await
}

/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn recent_activity(client: &RemoteClient) -> Result<Vec<RecentActivity>, ApiError> {
    client.call(&Endpoint::RecentActivity).await
}

/// # Errors
///
/// Propagates the client's [`ApiError`].
pub async fn chart_data(client: &RemoteClient, period: ChartPeriod) -> Result<Vec<ChartData>, ApiError> {
    client.call(&Endpoint::ChartData(period)).await
}
