table! {
    appointments (appointment_id) {
        appointment_id -> Unsigned<Bigint>,
        title -> Varchar,
        description -> Varchar,
        location -> Varchar,
        category -> Varchar,
        start_time -> Datetime,
        end_time -> Datetime,
        create_date -> Datetime,
        created_by -> Varchar,
        last_update -> Datetime,
        last_updated_by -> Varchar,
        customer_id -> Unsigned<Bigint>,
        user_id -> Unsigned<Bigint>,
        contact_id -> Unsigned<Bigint>,
    }
}

table! {
    sales_appointments (appointment_id) {
        appointment_id -> Unsigned<Bigint>,
        vehicle -> Varchar,
        financing_option -> Varchar,
    }
}

table! {
    service_appointments (appointment_id) {
        appointment_id -> Unsigned<Bigint>,
        service_cost -> Double,
        service_type -> Varchar,
    }
}

table! {
    contacts (contact_id) {
        contact_id -> Unsigned<Bigint>,
        contact_name -> Varchar,
        email -> Varchar,
    }
}

table! {
    countries (country_id) {
        country_id -> Unsigned<Bigint>,
        country -> Varchar,
    }
}

table! {
    customers (customer_id) {
        customer_id -> Unsigned<Bigint>,
        customer_name -> Varchar,
        address -> Varchar,
        postal_code -> Varchar,
        phone -> Varchar,
        create_date -> Datetime,
        created_by -> Varchar,
        last_update -> Datetime,
        last_updated_by -> Varchar,
        division_id -> Unsigned<Bigint>,
    }
}

table! {
    first_level_divisions (division_id) {
        division_id -> Unsigned<Bigint>,
        division -> Varchar,
        country_id -> Unsigned<Bigint>,
    }
}

table! {
    login_activity (attempt_id) {
        attempt_id -> Unsigned<Bigint>,
        user_name -> Varchar,
        attempt_time -> Datetime,
        success -> Bool,
    }
}

table! {
    user_logins (token, user_name, login_time) {
        token -> Char,
        user_name -> Varchar,
        login_time -> Datetime,
    }
}

table! {
    users (user_id) {
        user_id -> Unsigned<Bigint>,
        user_name -> Varchar,
        password -> Char,
    }
}

joinable!(appointments -> contacts (contact_id));
joinable!(customers -> first_level_divisions (division_id));
joinable!(first_level_divisions -> countries (country_id));

allow_tables_to_appear_in_same_query!(
    appointments,
    contacts,
    countries,
    customers,
    first_level_divisions,
    login_activity,
    sales_appointments,
    service_appointments,
    user_logins,
    users,
);
