//! Diesel table definitions mirroring the migrations.

diesel::table! {
    /// Purchased subscriptions; shared references from skiers.
    subscriptions (id) {
        id -> Int8,
        subscription_type -> Varchar,
        start_date -> Date,
        end_date -> Nullable<Date>,
        price -> Float4,
    }
}

diesel::table! {
    /// Resort customers, optionally holding one subscription.
    skiers (id) {
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        date_of_birth -> Date,
        city -> Varchar,
        subscription_id -> Nullable<Int8>,
    }
}

diesel::table! {
    /// Teaching staff.
    instructors (id) {
        id -> Int8,
        first_name -> Varchar,
        last_name -> Varchar,
        date_of_hire -> Date,
    }
}

diesel::table! {
    /// Lesson offerings, optionally assigned to an instructor.
    courses (id) {
        id -> Int8,
        level -> Int4,
        course_type -> Varchar,
        support -> Varchar,
        price -> Float4,
        time_slot -> Int4,
        instructor_id -> Nullable<Int8>,
    }
}

diesel::table! {
    /// Marked ski runs.
    pistes (id) {
        id -> Int8,
        name -> Varchar,
        color -> Varchar,
        length -> Int4,
        slope -> Int4,
    }
}

diesel::table! {
    /// Week-numbered course enrolments owned by a skier.
    registrations (id) {
        id -> Int8,
        num_week -> Int4,
        skier_id -> Nullable<Int8>,
        course_id -> Nullable<Int8>,
    }
}

diesel::table! {
    /// Join table recording which pistes a skier uses.
    skier_pistes (skier_id, piste_id) {
        skier_id -> Int8,
        piste_id -> Int8,
    }
}

diesel::joinable!(skiers -> subscriptions (subscription_id));
diesel::joinable!(courses -> instructors (instructor_id));
diesel::joinable!(registrations -> skiers (skier_id));
diesel::joinable!(registrations -> courses (course_id));
diesel::joinable!(skier_pistes -> skiers (skier_id));
diesel::joinable!(skier_pistes -> pistes (piste_id));

diesel::allow_tables_to_appear_in_same_query!(
    courses,
    instructors,
    pistes,
    registrations,
    skier_pistes,
    skiers,
    subscriptions,
);
