use crate::models::*;
use crate::schema::*;
use diesel::pg::upsert::excluded;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::QueryResult;
use std::collections::HashMap;

/// Stores a submitter, updating the username if the email is already known.
pub fn record_user(conn: &PgConnection, submission: &Submission) -> QueryResult<User> {
    diesel::insert_into(users::table)
        .values(&NewUser {
            email: &submission.email,
            username: &submission.username,
        })
        .on_conflict(users::email)
        .do_update()
        .set(users::username.eq(excluded(users::username)))
        .get_result(conn)
}

pub fn calculation_types(conn: &PgConnection) -> QueryResult<Vec<CalculationType>> {
    calculation_type::table
        .order(calculation_type::calculation_type_id)
        .load(conn)
}

/// One calculation type with what is actually stored under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSurvey {
    pub calculation_type: CalculationType,
    pub questions: usize,
    pub answers: usize,
}

impl TypeSurvey {
    pub fn is_consistent(&self) -> bool {
        self.calculation_type.total_questions_number as usize == self.questions
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    pub types: Vec<TypeSurvey>,
    /// Questions whose calculation type is missing.
    pub orphan_questions: usize,
    /// Answers not reachable from any calculation type.
    pub orphan_answers: usize,
}

pub fn survey(conn: &PgConnection) -> QueryResult<Survey> {
    let types = calculation_types(conn)?;
    let question_owner = questions::table
        .select((questions::id, questions::calculation_type_id))
        .load::<(i32, i32)>(conn)?
        .into_iter()
        .collect::<HashMap<_, _>>();
    let answer_questions = answers::table
        .select(answers::question_id)
        .load::<i32>(conn)?;

    let mut question_counts = question_owner
        .values()
        .fold(HashMap::new(), |mut acc, type_id| {
            *acc.entry(*type_id).or_insert(0) += 1;
            acc
        });
    let mut answer_counts = HashMap::new();
    let mut orphan_answers = 0;
    for question_id in answer_questions {
        match question_owner.get(&question_id) {
            Some(type_id) => *answer_counts.entry(*type_id).or_insert(0) += 1,
            None => orphan_answers += 1,
        }
    }

    let types = types
        .into_iter()
        .map(|ty| TypeSurvey {
            questions: question_counts.remove(&ty.id).unwrap_or(0),
            answers: answer_counts.remove(&ty.id).unwrap_or(0),
            calculation_type: ty,
        })
        .collect();
    Ok(Survey {
        types,
        orphan_questions: question_counts.values().sum(),
        orphan_answers: orphan_answers + answer_counts.values().sum::<usize>(),
    })
}
