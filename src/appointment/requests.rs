use serde::Deserialize;

/// Fields shared by the add and edit forms.
#[derive(Deserialize)]
pub struct AppointmentForm {
    pub login_token: String,
    pub customer_name: String,
    pub user_name: String,
    pub contact_name: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub vehicle: Option<String>,
    pub financing_option: Option<String>,
    pub service_cost: Option<f64>,
    pub service_type: Option<String>,
}

#[derive(Deserialize)]
pub struct EditAppointmentRequest {
    pub appointment_id: u64,
    #[serde(flatten)]
    pub form: AppointmentForm,
}

#[derive(Deserialize)]
pub struct DeleteAppointmentRequest {
    pub login_token: String,
    pub appointment_id: u64,
}

#[derive(Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    All,
    Month,
    Week,
}

impl Default for Period {
    fn default() -> Self {
        Period::All
    }
}

#[derive(Deserialize)]
pub struct SearchAppointRequest {
    pub login_token: String,
    pub title: Option<String>,
    #[serde(default)]
    pub period: Period,
}

#[derive(Deserialize)]
pub struct ByContactRequest {
    pub login_token: String,
    pub contact_name: String,
}

#[derive(Deserialize)]
pub struct TokenRequest {
    pub login_token: String,
}
