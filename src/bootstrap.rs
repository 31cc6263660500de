//! Brings a PostgreSQL server from "no database" to "schema present and seeded".
//!
//! Each stage is fatal on error. Connections are dropped at the end of the
//! stage that opened them, and the reseed runs in a single transaction so a
//! failure leaves the previous data in place.

use crate::actions::{self, Survey};
use crate::config::DbConfig;
use crate::errors::SetupError;
use crate::models::*;
use crate::schema::*;
use crate::seed::CALCULATION_TYPES;
use diesel::connection::SimpleConnection;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::QueryResult;
use log::{info, warn};

table! {
    pg_database (datname) {
        datname -> Text,
    }
}

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS calculation_type (
    calculation_type_id SERIAL PRIMARY KEY,
    calculation_type VARCHAR(255) NOT NULL,
    total_questions_number INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS questions (
    id SERIAL PRIMARY KEY,
    calculation_type_id INTEGER NOT NULL,
    question VARCHAR(255) NOT NULL,
    question_type VARCHAR(50) NOT NULL,
    FOREIGN KEY (calculation_type_id) REFERENCES calculation_type(calculation_type_id)
);

CREATE TABLE IF NOT EXISTS answers (
    id SERIAL PRIMARY KEY,
    text VARCHAR(255) NOT NULL,
    question_id INTEGER NOT NULL,
    FOREIGN KEY (question_id) REFERENCES questions(id)
);

CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    email VARCHAR(255) UNIQUE NOT NULL,
    username VARCHAR(100) NOT NULL
);

CREATE TABLE IF NOT EXISTS user_answer (
    id SERIAL PRIMARY KEY,
    user_id INTEGER NOT NULL,
    question_id INTEGER NOT NULL,
    answer VARCHAR(255) NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (question_id) REFERENCES questions(id)
);

CREATE INDEX IF NOT EXISTS idx_questions_calculation_type ON questions(calculation_type_id);
CREATE INDEX IF NOT EXISTS idx_answers_question ON answers(question_id);
CREATE INDEX IF NOT EXISTS idx_user_answer_user ON user_answer(user_id);
CREATE INDEX IF NOT EXISTS idx_user_answer_question ON user_answer(question_id);
"#;

/// Child tables first, so every truncation only removes rows nothing else points at.
const PURGE_ORDER: &[&str] = &["user_answer", "answers", "questions", "calculation_type"];

/// Row counts written by [`reseed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub calculation_types: usize,
    pub questions: usize,
    pub answers: usize,
}

pub fn connect(conninfo: &str, target: &str) -> Result<PgConnection, SetupError> {
    PgConnection::establish(conninfo).map_err(|cause| SetupError::Connect {
        target: target.to_owned(),
        cause,
    })
}

pub fn connect_admin(config: &DbConfig) -> Result<PgConnection, SetupError> {
    connect(&config.admin_conninfo(), crate::config::ADMIN_DATABASE)
}

pub fn connect_target(config: &DbConfig) -> Result<PgConnection, SetupError> {
    connect(&config.target_conninfo(), &config.dbname)
}

pub fn database_exists(conn: &PgConnection, name: &str) -> QueryResult<bool> {
    diesel::select(exists(
        pg_database::table.filter(pg_database::datname.eq(name)),
    ))
    .get_result(conn)
}

/// Creates the configured database unless it is already there.
/// Returns whether it had to be created.
pub fn ensure_database(config: &DbConfig) -> Result<bool, SetupError> {
    let name = &config.dbname;
    let admin = connect_admin(config)?;
    let present = database_exists(&admin, name)
        .map_err(|e| SetupError::CheckDatabase(name.clone(), e))?;
    if present {
        info!("Database '{}' already exists.", name);
        return Ok(false);
    }
    info!("Creating database '{}'...", name);
    // CREATE DATABASE takes no bind parameters and must run outside a transaction.
    diesel::sql_query(format!("CREATE DATABASE {}", quote_ident(name)))
        .execute(&admin)
        .map_err(|e| SetupError::CreateDatabase(name.clone(), e))?;
    info!("Database '{}' created successfully!", name);
    Ok(true)
}

pub fn create_tables(conn: &PgConnection) -> Result<(), SetupError> {
    info!("Creating tables...");
    conn.transaction(|| conn.batch_execute(CREATE_TABLES))
        .map_err(SetupError::CreateTables)?;
    info!("Tables created successfully!");
    Ok(())
}

/// Wipes the reference tables and writes the fixed seed data, all or nothing.
pub fn reseed(conn: &PgConnection) -> Result<SeedSummary, SetupError> {
    conn.transaction(|| {
        info!("Clearing existing data...");
        purge(conn)?;
        info!("Inserting calculation types...");
        insert_seed(conn)
    })
    .map_err(SetupError::Seed)
    .map(|summary| {
        info!(
            "Initial data inserted successfully! ({} calculation types, {} questions, {} answers)",
            summary.calculation_types, summary.questions, summary.answers
        );
        summary
    })
}

fn purge(conn: &PgConnection) -> QueryResult<()> {
    for table in PURGE_ORDER {
        diesel::sql_query(format!("TRUNCATE TABLE {} RESTART IDENTITY CASCADE", table))
            .execute(conn)?;
    }
    Ok(())
}

fn insert_seed(conn: &PgConnection) -> QueryResult<SeedSummary> {
    let mut summary = SeedSummary::default();
    for ty in CALCULATION_TYPES {
        let type_id = diesel::insert_into(calculation_type::table)
            .values(&NewCalculationType {
                name: ty.name,
                total_questions_number: ty.total_questions_number,
            })
            .returning(calculation_type::calculation_type_id)
            .get_result::<i32>(conn)?;
        summary.calculation_types += 1;

        for question in ty.questions {
            let question_id = diesel::insert_into(questions::table)
                .values(&NewQuestion {
                    calculation_type_id: type_id,
                    question: question.text,
                    question_type: question.kind.as_str(),
                })
                .returning(questions::id)
                .get_result::<i32>(conn)?;
            summary.questions += 1;

            if question.answers.is_empty() {
                continue;
            }
            let options = question
                .answers
                .iter()
                .map(|&text| NewAnswer { text, question_id })
                .collect::<Vec<_>>();
            summary.answers += diesel::insert_into(answers::table)
                .values(&options)
                .execute(conn)?;
        }
    }
    Ok(summary)
}

/// Reads back what is stored and warns about anything inconsistent.
pub fn verify(conn: &PgConnection) -> Result<Survey, SetupError> {
    let survey = actions::survey(conn).map_err(SetupError::Survey)?;
    for ty in survey.types.iter().filter(|t| !t.is_consistent()) {
        warn!(
            "calculation type '{}' declares {} questions but has {}",
            ty.calculation_type.name, ty.calculation_type.total_questions_number, ty.questions
        );
    }
    if survey.orphan_questions > 0 || survey.orphan_answers > 0 {
        warn!(
            "{} questions and {} answers do not resolve to a calculation type",
            survey.orphan_questions, survey.orphan_answers
        );
    }
    Ok(survey)
}

/// The whole initializer: database, tables, seed data, then a read-back.
pub fn run(config: &DbConfig) -> Result<Survey, SetupError> {
    info!("Starting database initialization...");
    ensure_database(config)?;
    let conn = connect_target(config)?;
    create_tables(&conn)?;
    reseed(&conn)?;
    let survey = verify(&conn)?;
    info!("Database initialization completed successfully!");
    Ok(survey)
}

/// Quotes a PostgreSQL identifier so it is used verbatim.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
