use actix_web::{middleware, App, HttpServer};
use diesel::r2d2::ConnectionManager;
use env_logger::Env;
use failure::ResultExt;
use log::info;
use modax::config::DbConfig;
use modax::intake::{self, DbPool, Persist};
use std::net::SocketAddr;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Args {
    #[structopt(short, long, default_value = "0.0.0.0:5001")]
    bind: SocketAddr,
    /// Store submitters in the `users` table instead of only logging them.
    #[structopt(short, long)]
    persist: bool,
    #[structopt(flatten)]
    db: DbConfig,
}

#[actix_rt::main]
async fn main() -> Result<(), exitfailure::ExitFailure> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let _ = dotenv::dotenv();
    let args = Args::from_args();

    let pool = if args.persist {
        info!("persisting submissions to {}", args.db);
        let cm = ConnectionManager::new(args.db.target_conninfo());
        Some(
            DbPool::builder()
                .build(cm)
                .context("unable to connect database")?,
        )
    } else {
        None
    };

    HttpServer::new(move || {
        App::new()
            .data(Persist(pool.clone()))
            .app_data(intake::json_config())
            .configure(intake::configure)
            .wrap(intake::cors())
            .wrap(middleware::Logger::default())
    })
    .bind(&args.bind)?
    .run()
    .await?;
    Ok(())
}
