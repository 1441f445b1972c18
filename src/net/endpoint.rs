//! One tagged variant per backend endpoint.
//!
//! Paths are relative to the configured base URL (`…/api`). User resources
//! live under `/users`, auth under `/auth`.

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod endpoint_test;

use crate::error::ApiError;
use crate::net::types::{ChartPeriod, CreateUserData, LoginCredentials, RegisterData, UpdateUserData};
use crate::platform::HttpMethod;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Login(LoginCredentials),
    Register(RegisterData),
    Logout,
    ListUsers,
    GetUser(String),
    CreateUser(CreateUserData),
    UpdateUser { id: String, data: UpdateUserData },
    DeleteUser(String),
    DashboardStats,
    RecentActivity,
    ChartData(ChartPeriod),
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Login(_) | Self::Register(_) | Self::Logout | Self::CreateUser(_) => HttpMethod::Post,
            Self::UpdateUser { .. } => HttpMethod::Put,
            Self::DeleteUser(_) => HttpMethod::Delete,
            Self::ListUsers | Self::GetUser(_) | Self::DashboardStats | Self::RecentActivity | Self::ChartData(_) => {
                HttpMethod::Get
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login(_) => "/auth/login".to_owned(),
            Self::Register(_) => "/auth/register".to_owned(),
            Self::Logout => "/auth/logout".to_owned(),
            Self::ListUsers | Self::CreateUser(_) => "/users".to_owned(),
            Self::GetUser(id) | Self::DeleteUser(id) | Self::UpdateUser { id, .. } => {
                format!("/users/{}", encode_segment(id))
            }
            Self::DashboardStats => "/dashboard/stats".to_owned(),
            Self::RecentActivity => "/dashboard/activity".to_owned(),
            Self::ChartData(period) => format!("/dashboard/charts?period={}", period.as_str()),
        }
    }

    /// JSON request body, if the endpoint takes one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if serialization fails.
    pub fn body(&self) -> Result<Option<serde_json::Value>, ApiError> {
        let value = match self {
            Self::Login(credentials) => serde_json::to_value(credentials),
            Self::Register(data) => serde_json::to_value(data),
            Self::CreateUser(data) => serde_json::to_value(data),
            Self::UpdateUser { data, .. } => serde_json::to_value(data),
            _ => return Ok(None),
        };
        value.map(Some).map_err(|e| ApiError::Encode(e.to_string()))
    }
}

/// Percent-encode characters that would break out of a single path segment.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
