#[derive(Queryable)]
pub struct DivisionData {
    pub division_id: u64,
    pub division: String,
    pub country_id: u64,
}

#[derive(Queryable)]
pub struct CountryData {
    pub country_id: u64,
    pub country: String,
}
