use crate::schema::login_activity;
use chrono::NaiveDateTime;

#[derive(Insertable)]
#[table_name = "login_activity"]
pub struct NewLoginAttempt {
    pub user_name: String,
    pub attempt_time: NaiveDateTime,
    pub success: bool,
}
