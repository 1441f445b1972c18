use super::*;
use crate::net::types::Role;

#[test]
fn user_endpoints_map_to_rest_verbs() {
    assert_eq!(Endpoint::ListUsers.method(), HttpMethod::Get);
    assert_eq!(Endpoint::ListUsers.path(), "/users");
    assert_eq!(Endpoint::GetUser("u-1".to_owned()).path(), "/users/u-1");
    assert_eq!(Endpoint::DeleteUser("u-1".to_owned()).method(), HttpMethod::Delete);

    let update = Endpoint::UpdateUser { id: "u-2".to_owned(), data: UpdateUserData::default() };
    assert_eq!(update.method(), HttpMethod::Put);
    assert_eq!(update.path(), "/users/u-2");
}

#[test]
fn auth_endpoints_post_under_auth_prefix() {
    let login = Endpoint::Login(LoginCredentials { email: "a@b.c".to_owned(), password: "pw".to_owned() });
    assert_eq!(login.method(), HttpMethod::Post);
    assert_eq!(login.path(), "/auth/login");
    assert_eq!(Endpoint::Logout.path(), "/auth/logout");
    assert_eq!(Endpoint::Logout.body().unwrap(), None);
}

#[test]
fn chart_endpoint_carries_period_query() {
    assert_eq!(Endpoint::ChartData(ChartPeriod::Quarter).path(), "/dashboard/charts?period=90d");
}

#[test]
fn path_segments_are_percent_encoded() {
    assert_eq!(Endpoint::GetUser("a/b c".to_owned()).path(), "/users/a%2Fb%20c");
}

#[test]
fn create_body_serializes_payload() {
    let endpoint = Endpoint::CreateUser(CreateUserData {
        name: "Alice".to_owned(),
        email: "alice@example.com".to_owned(),
        role: Role::Manager,
        password: "hunter22".to_owned(),
    });
    let body = endpoint.body().unwrap().unwrap();
    assert_eq!(body["role"], "manager");
    assert_eq!(body["email"], "alice@example.com");
}
