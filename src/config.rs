use std::fmt;
use structopt::StructOpt;

/// Database the server always has, used for administrative statements.
pub const ADMIN_DATABASE: &str = "postgres";

/// Connection parameters for the PostgreSQL server. Built once in `main` and
/// handed to whatever needs a connection.
#[derive(StructOpt, Clone)]
pub struct DbConfig {
    #[structopt(long = "db-host", env = "MODAX_DB_HOST", default_value = "localhost")]
    pub host: String,
    #[structopt(long = "db-port", env = "MODAX_DB_PORT", default_value = "5432")]
    pub port: u16,
    #[structopt(long = "db-user", env = "MODAX_DB_USER", default_value = "postgres")]
    pub user: String,
    #[structopt(long = "db-password", env = "MODAX_DB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[structopt(long = "db-name", env = "MODAX_DB_NAME", default_value = "modax_calculator")]
    pub dbname: String,
}

impl DbConfig {
    /// libpq keyword/value connection string for `dbname` on this server.
    pub fn conninfo(&self, dbname: &str) -> String {
        let mut parts = vec![
            format!("host={}", quote_value(&self.host)),
            format!("port={}", self.port),
            format!("user={}", quote_value(&self.user)),
        ];
        if let Some(password) = &self.password {
            parts.push(format!("password={}", quote_value(password)));
        }
        parts.push(format!("dbname={}", quote_value(dbname)));
        parts.join(" ")
    }

    pub fn admin_conninfo(&self) -> String {
        self.conninfo(ADMIN_DATABASE)
    }

    pub fn target_conninfo(&self) -> String {
        self.conninfo(&self.dbname)
    }
}

impl fmt::Display for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}:{}/{}", self.user, self.host, self.port, self.dbname)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("dbname", &self.dbname)
            .finish()
    }
}

fn quote_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}
