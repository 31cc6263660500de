//! These run against a real PostgreSQL server configured through the usual
//! `MODAX_DB_*` variables. The database name is always `modax_calculator_test`.
//!
//!     cargo test -- --ignored

use diesel::pg::PgConnection;
use diesel::prelude::*;
use modax::actions;
use modax::bootstrap;
use modax::config::DbConfig;
use modax::models::*;
use modax::schema::*;
use std::sync::{Mutex, MutexGuard};
use structopt::StructOpt;

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

fn config() -> DbConfig {
    let _ = dotenv::dotenv();
    DbConfig::from_iter(vec!["test", "--db-name", "modax_calculator_test"])
}

fn prepared() -> (DbConfig, PgConnection) {
    let cfg = config();
    bootstrap::ensure_database(&cfg).unwrap();
    let conn = bootstrap::connect_target(&cfg).unwrap();
    bootstrap::create_tables(&conn).unwrap();
    (cfg, conn)
}

fn questions_per_type(conn: &PgConnection) -> Vec<i64> {
    actions::calculation_types(conn)
        .unwrap()
        .iter()
        .map(|ty| {
            questions::table
                .filter(questions::calculation_type_id.eq(ty.id))
                .count()
                .get_result(conn)
                .unwrap()
        })
        .collect()
}

#[test]
#[ignore]
fn ensure_database_is_a_noop_the_second_time() {
    let _guard = serial();
    let cfg = config();
    bootstrap::ensure_database(&cfg).unwrap();
    assert!(!bootstrap::ensure_database(&cfg).unwrap());
    let admin = bootstrap::connect_admin(&cfg).unwrap();
    assert!(bootstrap::database_exists(&admin, &cfg.dbname).unwrap());
}

#[test]
#[ignore]
fn create_tables_twice_is_fine() {
    let _guard = serial();
    let (_, conn) = prepared();
    bootstrap::create_tables(&conn).unwrap();
}

#[test]
#[ignore]
fn reseeding_converges() {
    let _guard = serial();
    let (_, conn) = prepared();
    for _ in 0..2 {
        let summary = bootstrap::reseed(&conn).unwrap();
        assert_eq!(
            summary,
            bootstrap::SeedSummary {
                calculation_types: 4,
                questions: 14,
                answers: 4,
            }
        );
        let types = actions::calculation_types(&conn).unwrap();
        assert_eq!(
            types.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
            vec![
                "Basic Calculator",
                "Interest Calculator",
                "User Engagement",
                "Conversation Metrics"
            ]
        );
        assert_eq!(questions_per_type(&conn), vec![3, 3, 4, 4]);
        let operations = answers::table
            .inner_join(questions::table)
            .select((answers::text, questions::question))
            .order(answers::id)
            .load::<(String, String)>(&conn)
            .unwrap();
        assert_eq!(
            operations,
            ["add", "subtract", "multiply", "divide"]
                .iter()
                .map(|op| (op.to_string(), String::from("Choose an operation:")))
                .collect::<Vec<_>>()
        );
    }
}

#[test]
#[ignore]
fn seeded_rows_resolve() {
    let _guard = serial();
    let (_, conn) = prepared();
    bootstrap::reseed(&conn).unwrap();
    let survey = bootstrap::verify(&conn).unwrap();
    assert_eq!(survey.orphan_questions, 0);
    assert_eq!(survey.orphan_answers, 0);
    assert!(survey.types.iter().all(|t| t.is_consistent()));

    let questions = questions::table.load::<Question>(&conn).unwrap();
    let type_ids = actions::calculation_types(&conn)
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect::<Vec<_>>();
    assert!(questions
        .iter()
        .all(|q| type_ids.contains(&q.calculation_type_id)));
    let select = questions
        .iter()
        .filter(|q| q.question_type == QuestionKind::Select.as_str())
        .collect::<Vec<_>>();
    assert_eq!(select.len(), 1);
    let answers = answers::table.load::<Answer>(&conn).unwrap();
    assert!(answers.iter().all(|a| a.question_id == select[0].id));
}

#[test]
#[ignore]
fn record_user_upserts_by_email() {
    let _guard = serial();
    let (_, conn) = prepared();
    diesel::delete(user_answer::table).execute(&conn).unwrap();
    diesel::delete(users::table).execute(&conn).unwrap();

    let first = actions::record_user(
        &conn,
        &Submission {
            email: String::from("jo@example.com"),
            username: String::from("jo"),
        },
    )
    .unwrap();
    let second = actions::record_user(
        &conn,
        &Submission {
            email: String::from("jo@example.com"),
            username: String::from("joanna"),
        },
    )
    .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.username, "joanna");
    let count: i64 = users::table.count().get_result(&conn).unwrap();
    assert_eq!(count, 1);
}

#[test]
#[ignore]
fn running_the_initializer_twice_gives_the_same_state() {
    let _guard = serial();
    let cfg = config();
    let first = bootstrap::run(&cfg).unwrap();
    let second = bootstrap::run(&cfg).unwrap();
    assert_eq!(first, second);

    assert_eq!(second.types.len(), 4);
    assert_eq!(
        second.types.iter().map(|t| t.questions).collect::<Vec<_>>(),
        vec![3, 3, 4, 4]
    );
    assert_eq!(
        second.types.iter().map(|t| t.answers).collect::<Vec<_>>(),
        vec![4, 0, 0, 0]
    );
    assert_eq!(
        second
            .types
            .iter()
            .map(|t| t.calculation_type.id)
            .collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(second.orphan_questions, 0);
    assert_eq!(second.orphan_answers, 0);
}
