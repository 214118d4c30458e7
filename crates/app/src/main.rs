//! Culler operator CLI.

use std::process;

use clap::{Args, Parser, Subcommand};
use culler_app::{
    auth::PgAuthService,
    database,
    principal::Capability,
};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "culler-app", about = "Culler operator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or update the database schema.
    Schema(SchemaCommand),
    /// Manage API tokens.
    Token(TokenCommand),
}

#[derive(Debug, Args)]
struct SchemaCommand {
    #[command(subcommand)]
    command: SchemaSubcommand,
}

#[derive(Debug, Subcommand)]
enum SchemaSubcommand {
    Init(DatabaseArgs),
}

#[derive(Debug, Args)]
struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    Create(CreateTokenArgs),
    List(DatabaseArgs),
    Revoke(RevokeTokenArgs),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct CreateTokenArgs {
    /// Operator-facing token name
    #[arg(long)]
    name: String,

    /// Capability to grant; repeat for more than one
    #[arg(long = "capability", value_parser = parse_capability, required = true)]
    capabilities: Vec<Capability>,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[derive(Debug, Args)]
struct RevokeTokenArgs {
    /// UUID of the token to revoke
    #[arg(long)]
    uuid: Uuid,

    #[command(flatten)]
    database: DatabaseArgs,
}

fn parse_capability(value: &str) -> Result<Capability, String> {
    value.parse().map_err(|error| format!("{error}"))
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Schema(SchemaCommand {
            command: SchemaSubcommand::Init(args),
        }) => init_schema(args).await,
        Commands::Token(TokenCommand { command }) => match command {
            TokenSubcommand::Create(args) => create_token(args).await,
            TokenSubcommand::List(args) => list_tokens(args).await,
            TokenSubcommand::Revoke(args) => revoke_token(args).await,
        },
    }
}

async fn connect(database_url: &str) -> Result<sqlx::PgPool, String> {
    database::connect(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}

async fn init_schema(args: DatabaseArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;

    database::ensure_schema(&pool)
        .await
        .map_err(|error| format!("failed to create schema: {error}"))?;

    println!("schema is up to date");

    Ok(())
}

async fn create_token(args: CreateTokenArgs) -> Result<(), String> {
    let pool = connect(&args.database.database_url).await?;
    let service = PgAuthService::new(pool);

    let issued = service
        .issue_token(&args.name, &args.capabilities)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("token_name: {}", issued.metadata.name);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

async fn list_tokens(args: DatabaseArgs) -> Result<(), String> {
    let pool = connect(&args.database_url).await?;
    let service = PgAuthService::new(pool);

    let tokens = service
        .list_tokens()
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    for token in tokens {
        let status = if token.revoked_at.is_some() {
            "revoked"
        } else {
            "active"
        };

        println!(
            "{} {} [{}] {}",
            token.uuid,
            token.name,
            token.capabilities.join(","),
            status,
        );
    }

    Ok(())
}

async fn revoke_token(args: RevokeTokenArgs) -> Result<(), String> {
    let pool = connect(&args.database.database_url).await?;
    let service = PgAuthService::new(pool);

    let revoked = service
        .revoke_token(args.uuid)
        .await
        .map_err(|error| format!("failed to revoke token: {error}"))?;

    if revoked {
        println!("token revoked");
    } else {
        println!("token was not active");
    }

    Ok(())
}
