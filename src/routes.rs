//! Route paths shared by the router and forced navigations.

pub struct Paths;

impl Paths {
    pub const LOGIN: &'static str = "/login";
    pub const DASHBOARD: &'static str = "/";
    pub const USERS: &'static str = "/users";
    pub const FORMS: &'static str = "/forms";
    pub const SETTINGS: &'static str = "/settings";
}
