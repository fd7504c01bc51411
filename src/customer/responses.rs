use serde::Serialize;

#[derive(Default, Serialize)]
pub struct AddCustomerResponse {
    pub success: bool,
    pub err: String,
    pub customer_id: u64,
}

#[derive(Default, Serialize)]
pub struct SearchCustomerItem {
    pub customer_id: u64,
    pub customer_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub division_id: u64,
    pub division: String,
    pub country: String,
}

#[derive(Default, Serialize)]
pub struct SearchCustomerResponse {
    pub success: bool,
    pub err: String,
    pub customers: Vec<SearchCustomerItem>,
}

#[derive(Default, Serialize)]
pub struct DivisionItem {
    pub division_id: u64,
    pub division: String,
}

#[derive(Default, Serialize)]
pub struct ListDivisionsResponse {
    pub success: bool,
    pub err: String,
    pub divisions: Vec<DivisionItem>,
}

#[derive(Default, Serialize)]
pub struct CountryItem {
    pub country_id: u64,
    pub country: String,
}

#[derive(Default, Serialize)]
pub struct ListCountriesResponse {
    pub success: bool,
    pub err: String,
    pub countries: Vec<CountryItem>,
}

crate::impl_err_response! {
    AddCustomerResponse,
    SearchCustomerResponse,
    ListDivisionsResponse,
    ListCountriesResponse,
}
