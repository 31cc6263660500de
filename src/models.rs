use crate::schema::*;
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionKind {
    Number,
    Select,
}

impl QuestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::Number => "number",
            QuestionKind::Select => "select",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Queryable, Debug, Clone, PartialEq, Eq)]
pub struct CalculationType {
    pub id: i32,
    pub name: String,
    pub total_questions_number: i32,
}

#[derive(Queryable, Debug, Clone)]
pub struct Question {
    pub id: i32,
    pub calculation_type_id: i32,
    pub question: String,
    pub question_type: String,
}

#[derive(Queryable, Debug, Clone)]
pub struct Answer {
    pub id: i32,
    pub text: String,
    pub question_id: i32,
}

#[derive(Queryable, Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
}

#[derive(Insertable)]
#[table_name = "calculation_type"]
pub struct NewCalculationType<'a> {
    pub name: &'a str,
    pub total_questions_number: i32,
}

#[derive(Insertable)]
#[table_name = "questions"]
pub struct NewQuestion<'a> {
    pub calculation_type_id: i32,
    pub question: &'a str,
    pub question_type: &'a str,
}

#[derive(Insertable)]
#[table_name = "answers"]
pub struct NewAnswer<'a> {
    pub text: &'a str,
    pub question_id: i32,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
}

/// Body of `POST /hodi` as it arrives on the wire. Both fields are required
/// and checked by `RawSubmission::validate`. Only a JSON object is accepted.
#[derive(Debug, Default)]
pub struct RawSubmission {
    pub email: Option<String>,
    pub username: Option<String>,
}

impl<'de> Deserialize<'de> for RawSubmission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SubmissionVisitor;

        impl<'de> Visitor<'de> for SubmissionVisitor {
            type Value = RawSubmission;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object with `email` and `username`")
            }

            fn visit_map<M>(self, mut map: M) -> Result<RawSubmission, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut raw = RawSubmission::default();
                while let Some(key) = map.next_key::<String>()? {
                    let slot = match key.as_str() {
                        "email" => &mut raw.email,
                        "username" => &mut raw.username,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                            continue;
                        }
                    };
                    if slot.is_some() {
                        return Err(de::Error::custom(format_args!("duplicate field `{}`", key)));
                    }
                    *slot = map.next_value()?;
                }
                Ok(raw)
            }
        }

        deserializer.deserialize_map(SubmissionVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub email: String,
    pub username: String,
}
