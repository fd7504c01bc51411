#[derive(Queryable)]
pub struct ContactData {
    pub contact_id: u64,
    pub contact_name: String,
    pub email: String,
}
