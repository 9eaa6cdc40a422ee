use clap::{Parser, ValueEnum};
use ladder_backend::config::db::{DbOwner, DbProfile};
use ladder_backend::connect_db;
use migration::{migrate, MigrationCommand};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(c: Command) -> Self {
        match c {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Prod,
    Test,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Ladder database migration tool")]
struct Args {
    #[arg(value_enum)]
    command: Command,

    /// Target database. In-memory SQLite is not offered: it would vanish
    /// when the command exits.
    #[arg(short, long, value_enum, default_value = "test")]
    profile: Profile,

    /// SQLite file path, required with `--profile sqlite-file`
    #[arg(long)]
    file: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let profile = match (args.profile, args.file) {
        (Profile::Prod, _) => DbProfile::Prod,
        (Profile::Test, _) => DbProfile::Test,
        (Profile::SqliteFile, Some(file)) => DbProfile::SqliteFile { file },
        (Profile::SqliteFile, None) => {
            eprintln!("--file is required with --profile sqlite-file");
            std::process::exit(2);
        }
    };

    let conn = match connect_db(&profile, DbOwner::Owner).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Could not connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
