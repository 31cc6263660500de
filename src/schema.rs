table! {
    answers (id) {
        id -> Int4,
        text -> Varchar,
        question_id -> Int4,
    }
}

table! {
    calculation_type (calculation_type_id) {
        calculation_type_id -> Int4,
        #[sql_name = "calculation_type"]
        name -> Varchar,
        total_questions_number -> Int4,
    }
}

table! {
    questions (id) {
        id -> Int4,
        calculation_type_id -> Int4,
        question -> Varchar,
        question_type -> Varchar,
    }
}

table! {
    user_answer (id) {
        id -> Int4,
        user_id -> Int4,
        question_id -> Int4,
        answer -> Varchar,
    }
}

table! {
    users (id) {
        id -> Int4,
        email -> Varchar,
        username -> Varchar,
    }
}

joinable!(answers -> questions (question_id));
joinable!(questions -> calculation_type (calculation_type_id));
joinable!(user_answer -> questions (question_id));
joinable!(user_answer -> users (user_id));

allow_tables_to_appear_in_same_query!(
    answers,
    calculation_type,
    questions,
    user_answer,
    users,
);
