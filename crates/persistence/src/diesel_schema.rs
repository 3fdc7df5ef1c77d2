// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    sites (site_id) {
        site_id -> BigInt,
        name -> Text,
    }
}

diesel::table! {
    teams (team_id) {
        team_id -> BigInt,
        name -> Text,
    }
}

diesel::table! {
    departments (department_id) {
        department_id -> BigInt,
        name -> Text,
    }
}

diesel::table! {
    team_rates (rate_id) {
        rate_id -> BigInt,
        team_id -> BigInt,
        mason_full_rate -> BigInt,
        helper_full_rate -> BigInt,
        from_date -> Text,
        is_locked -> Integer,
    }
}

diesel::table! {
    default_rates (rate_id) {
        rate_id -> BigInt,
        department_id -> BigInt,
        full_day_rate -> BigInt,
        is_locked -> Integer,
    }
}

diesel::table! {
    civil_daily_work (work_id) {
        work_id -> BigInt,
        site_id -> BigInt,
        team_id -> BigInt,
        work_date -> Text,
        mason_full -> BigInt,
        mason_half -> BigInt,
        helper_full -> BigInt,
        helper_half -> BigInt,
        labour_amount -> Double,
        total_amount -> Double,
    }
}

diesel::table! {
    civil_advances (advance_id) {
        advance_id -> BigInt,
        site_id -> BigInt,
        team_id -> BigInt,
        work_date -> Text,
        amount -> Double,
    }
}

diesel::table! {
    department_work (work_id) {
        work_id -> BigInt,
        site_id -> BigInt,
        department_id -> BigInt,
        work_date -> Text,
        full_day_count -> BigInt,
        half_day_count -> BigInt,
        full_day_rate -> BigInt,
        half_day_rate -> BigInt,
        labour_amount -> Double,
        advance_amount -> Double,
        total_amount -> Double,
    }
}

diesel::table! {
    material_entries (entry_id) {
        entry_id -> BigInt,
        site_id -> BigInt,
        work_date -> Text,
        agent_name -> Text,
        name -> Text,
        quantity -> Double,
        unit -> Text,
        rate -> Double,
        advance -> Double,
        total -> Double,
    }
}

diesel::table! {
    other_expenses (expense_id) {
        expense_id -> BigInt,
        site_id -> BigInt,
        work_date -> Text,
        title -> Text,
        owner -> Nullable<Text>,
        amount -> Double,
        notes -> Text,
    }
}

diesel::table! {
    site_daily_notes (note_id) {
        note_id -> BigInt,
        site_id -> BigInt,
        work_date -> Text,
        description -> Text,
    }
}

diesel::joinable!(team_rates -> teams (team_id));
diesel::joinable!(default_rates -> departments (department_id));
diesel::joinable!(civil_daily_work -> sites (site_id));
diesel::joinable!(civil_daily_work -> teams (team_id));
diesel::joinable!(civil_advances -> sites (site_id));
diesel::joinable!(civil_advances -> teams (team_id));
diesel::joinable!(department_work -> sites (site_id));
diesel::joinable!(department_work -> departments (department_id));
diesel::joinable!(material_entries -> sites (site_id));
diesel::joinable!(other_expenses -> sites (site_id));
diesel::joinable!(site_daily_notes -> sites (site_id));

diesel::allow_tables_to_appear_in_same_query!(
    sites,
    teams,
    departments,
    team_rates,
    default_rates,
    civil_daily_work,
    civil_advances,
    department_work,
    material_entries,
    other_expenses,
    site_daily_notes,
);
