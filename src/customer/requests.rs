use serde::Deserialize;

#[derive(Deserialize)]
pub struct CustomerForm {
    pub login_token: String,
    pub customer_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub division_id: Option<u64>,
}

#[derive(Deserialize)]
pub struct EditCustomerRequest {
    pub customer_id: u64,
    #[serde(flatten)]
    pub form: CustomerForm,
}

#[derive(Deserialize)]
pub struct DeleteCustomerRequest {
    pub login_token: String,
    pub customer_id: u64,
}

#[derive(Deserialize)]
pub struct SearchCustomerRequest {
    pub login_token: String,
    pub customer_name: Option<String>,
}

#[derive(Deserialize)]
pub struct ListDivisionsRequest {
    pub login_token: String,
    pub country_id: u64,
}

#[derive(Deserialize)]
pub struct ListCountriesRequest {
    pub login_token: String,
}
