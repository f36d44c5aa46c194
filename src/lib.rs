pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod seed;
pub mod session;

use tokio::signal;

pub use config::Config;
use db::Store;
use seed::{SeedBatch, SeedRequest};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "serve" | "daemon" | "-d" | "--daemon" => run_server(config).await,

        "status" | "st" => cmd_status(&config).await,

        "seed" | "s" => {
            let request = SeedRequest {
                user_count: args.get(2).and_then(|s| s.parse().ok()),
                bundle_count: args.get(3).and_then(|s| s.parse().ok()),
                ..SeedRequest::default()
            };
            cmd_seed(&config, &request).await
        }

        "reset" => cmd_reset(&config).await,

        "test-user" | "tu" => {
            let email = args.get(2).cloned();
            let password = args.get(3).cloned();
            cmd_test_user(&config, email, password).await
        }

        "init" | "--init" => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }

        "help" | "-h" | "--help" => {
            print_help();
            Ok(())
        }

        _ => {
            println!("Unknown command: {}", args[1]);
            println!();
            print_help();
            Ok(())
        }
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "speakeasy-dev v{} starting seed API...",
        env!("CARGO_PKG_VERSION")
    );

    let port = config.server.port;
    let state = api::create_app_state_from_config(config).await?;
    let app = api::router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("Seed API running at http://0.0.0.0:{}", port);
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    info!("Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }

    server_handle.abort();
    info!("Stopped");

    Ok(())
}

async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.database.url()).await?;
    store.ping().await?;
    let counts = store.table_counts().await?;

    println!("Database: connected");
    println!("  Users:       {}", counts.user_count);
    println!("  Bundles:     {}", counts.bundle_count);
    println!("  Experiences: {}", counts.experience_count);
    println!("  Bookings:    {}", counts.booking_count);
    println!("  Reviews:     {}", counts.review_count);

    Ok(())
}

async fn cmd_seed(config: &Config, request: &SeedRequest) -> anyhow::Result<()> {
    let options = config.seed.options().with_request(request);
    let store = Store::new(&config.database.url()).await?;

    let batch = SeedBatch::generate(options);
    store.reseed(&batch).await?;

    println!(
        "✓ Seeded {} users, {} bundles, {} experiences, {} bookings, {} reviews",
        options.user_count,
        options.bundle_count,
        options.experience_count,
        options.booking_count,
        options.review_count
    );

    Ok(())
}

async fn cmd_reset(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.database.url()).await?;
    store.reset().await?;

    println!("✓ Database reset with baseline data");
    Ok(())
}

async fn cmd_test_user(
    config: &Config,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let store = Store::new(&config.database.url()).await?;
    let user = store.create_test_user(email, password).await?;

    println!("✓ Test user created");
    println!("  Email:    {}", user.email);
    println!("  Password: {}", user.password);

    Ok(())
}

fn print_help() {
    println!("speakeasy-dev - Development database toolkit for Speakeasy");
    println!();
    println!("USAGE:");
    println!("  speakeasy-dev <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  serve             Run the seed/reset HTTP API");
    println!("  status            Show row counts for the core tables");
    println!("  seed [n] [m]      Reseed with n users and m bundles (defaults from config)");
    println!("  reset             Drop the schema and replay migrations + fixtures");
    println!("  test-user [email] [password]");
    println!("                    Create one predictable user (additive)");
    println!("  init              Create default config file");
    println!("  help              Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("  speakeasy-dev serve               # API on port 3000");
    println!("  speakeasy-dev seed 50 5           # 50 users, 5 bundles");
    println!("  speakeasy-dev test-user           # test@example.com / password123");
    println!();
    println!("CONFIG:");
    println!("  Edit config.toml (or set DATABASE_URL) to point at your database.");
}
