use crate::schema::customers;
use chrono::NaiveDateTime;

#[derive(Queryable)]
pub struct CustomerData {
    pub customer_id: u64,
    pub customer_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub create_date: NaiveDateTime,
    pub created_by: String,
    pub last_update: NaiveDateTime,
    pub last_updated_by: String,
    pub division_id: u64,
}

#[derive(Insertable)]
#[table_name = "customers"]
pub struct NewCustomer {
    pub customer_id: u64,
    pub customer_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub create_date: NaiveDateTime,
    pub created_by: String,
    pub last_update: NaiveDateTime,
    pub last_updated_by: String,
    pub division_id: u64,
}

#[derive(AsChangeset)]
#[table_name = "customers"]
pub struct UpdateCustomer {
    pub customer_name: String,
    pub address: String,
    pub postal_code: String,
    pub phone: String,
    pub last_update: NaiveDateTime,
    pub last_updated_by: String,
    pub division_id: u64,
}
