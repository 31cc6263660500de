//! Fixed reference data written by the initializer.

use crate::models::QuestionKind;

pub struct SeedType {
    pub name: &'static str,
    pub total_questions_number: i32,
    pub questions: &'static [SeedQuestion],
}

pub struct SeedQuestion {
    pub text: &'static str,
    pub kind: QuestionKind,
    /// Allowed answers, only present on `select` questions.
    pub answers: &'static [&'static str],
}

const fn number(text: &'static str) -> SeedQuestion {
    SeedQuestion {
        text,
        kind: QuestionKind::Number,
        answers: &[],
    }
}

pub const OPERATIONS: &[&str] = &["add", "subtract", "multiply", "divide"];

pub const CALCULATION_TYPES: &[SeedType] = &[
    SeedType {
        name: "Basic Calculator",
        total_questions_number: 3,
        questions: &[
            number("Enter the first value:"),
            number("Enter the second value:"),
            SeedQuestion {
                text: "Choose an operation:",
                kind: QuestionKind::Select,
                answers: OPERATIONS,
            },
        ],
    },
    SeedType {
        name: "Interest Calculator",
        total_questions_number: 3,
        questions: &[
            number("Enter the principal amount:"),
            number("Enter the interest rate (%):"),
            number("Enter time period (years):"),
        ],
    },
    SeedType {
        name: "User Engagement",
        total_questions_number: 4,
        questions: &[
            number("Total number of registered users:"),
            number("Daily active users:"),
            number("Average session time (minutes):"),
            number("Average messages per user per day:"),
        ],
    },
    SeedType {
        name: "Conversation Metrics",
        total_questions_number: 4,
        questions: &[
            number("Total number of conversations:"),
            number("Average conversation length (messages):"),
            number("Average response time (seconds):"),
            number("Conversation completion rate (%):"),
        ],
    },
];
