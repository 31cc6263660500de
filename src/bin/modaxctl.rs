use diesel::pg::PgConnection;
use dotenv::dotenv;
use env_logger::Env;
use exitfailure::ExitFailure;
use failure::ResultExt;
use modax::bootstrap;
use modax::config::DbConfig;
use modax::display::survey_report;
use structopt::StructOpt;

#[derive(StructOpt)]
enum Command {
    /// Create the database, tables and seed data, then check the result.
    Init,
    /// Create the configured database if it does not exist yet.
    CreateDatabase,
    /// Create the tables and indexes that are missing.
    CreateTables,
    /// Replace the reference data with the built-in seed.
    Seed,
    /// Show what is currently seeded.
    Check,
}

#[derive(StructOpt)]
struct Args {
    #[structopt(flatten)]
    db: DbConfig,
    #[structopt(subcommand)]
    command: Command,
}

fn main() -> Result<(), ExitFailure> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let _ = dotenv();
    let args = Args::from_args();
    let db = &args.db;
    match args.command {
        Command::Init => init(db)?,
        Command::CreateDatabase => create_database(db)?,
        Command::CreateTables => create_tables(db)?,
        Command::Seed => seed(db)?,
        Command::Check => check(db)?,
    }
    Ok(())
}

fn target(db: &DbConfig) -> Result<PgConnection, failure::Error> {
    let conn = bootstrap::connect_target(db)
        .context("is the database created? try `modaxctl create-database`")?;
    Ok(conn)
}

fn init(db: &DbConfig) -> Result<(), failure::Error> {
    let survey = bootstrap::run(db).context("database initialization failed")?;
    println!("{}", survey_report(&survey));
    println!("Database {} is ready to use.", db);
    Ok(())
}

fn create_database(db: &DbConfig) -> Result<(), failure::Error> {
    if !bootstrap::ensure_database(db)? {
        println!("Nothing to do, {} already exists.", db.dbname);
    }
    Ok(())
}

fn create_tables(db: &DbConfig) -> Result<(), failure::Error> {
    let conn = target(db)?;
    bootstrap::create_tables(&conn)?;
    Ok(())
}

fn seed(db: &DbConfig) -> Result<(), failure::Error> {
    let conn = target(db)?;
    let summary = bootstrap::reseed(&conn)?;
    println!(
        "Seeded {} calculation types, {} questions, {} answers.",
        summary.calculation_types, summary.questions, summary.answers
    );
    Ok(())
}

fn check(db: &DbConfig) -> Result<(), failure::Error> {
    let conn = target(db)?;
    let survey = bootstrap::verify(&conn)?;
    println!("{}", survey_report(&survey));
    Ok(())
}
