pub mod appointments;
pub mod contacts;
pub mod customers;
pub mod divisions;

pub mod login_activity;
pub mod user_logins;
