// Mirrors the upstream PLFS warehouse tables. The dashboard only reads them.

diesel::table! {
    plfs_fact (indicator_code, state_code, sector_code, gender_code, status_code, year) {
        indicator_code -> Text,
        state_code -> Text,
        sector_code -> Text,
        gender_code -> Text,
        status_code -> Text,
        year -> Int4,
        indicator_value -> Float8,
    }
}

diesel::table! {
    indicator (indicator_code) {
        indicator_code -> Text,
        indicator_name -> Text,
    }
}

diesel::table! {
    #[sql_name = "state"]
    states (state_code) {
        state_code -> Text,
        state_name -> Text,
    }
}

diesel::table! {
    sector (sector_code) {
        sector_code -> Text,
        sector_name -> Text,
    }
}

diesel::table! {
    gender (gender_code) {
        gender_code -> Text,
        gender_name -> Text,
    }
}

diesel::table! {
    #[sql_name = "status_code"]
    statuses (status_code) {
        status_code -> Text,
        status_name -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(plfs_fact, indicator, states, sector, gender, statuses,);
