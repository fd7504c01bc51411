use serde::Serialize;

use crate::appointment::AppointmentItem;

#[derive(Default, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub err: String,
    pub login_token: String,
    pub attempts_left: u32,
    pub upcoming: Vec<AppointmentItem>,
}

#[derive(Default, Serialize)]
pub struct ContactItem {
    pub contact_id: u64,
    pub contact_name: String,
    pub email: String,
}

#[derive(Default, Serialize)]
pub struct ListContactsResponse {
    pub success: bool,
    pub err: String,
    pub contacts: Vec<ContactItem>,
}

crate::impl_err_response! {
    LoginResponse,
    ListContactsResponse,
}
