use review_service::infra::config::Config;
use review_service::PgReviewStore;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads DATABASE_URL, or DB_HOST / DB_PORT / DB_USER / DB_PASSWORD / DB_NAME / DB_SSLMODE,\n\
         plus DB_MAX_CONNECTIONS and PORT (a .env file is honored).\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = Config::from_env()?;

    println!("> Preflight:");
    println!("  database={}", config.database.redacted());
    println!("  max_connections={}", config.max_connections);
    println!("  port={}", config.port);

    let options = config.database.connect_options()?;
    let store = PgReviewStore::connect(options, config.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Could not reach PostgreSQL: {}", e))?;
    println!("  Connection OK, reviews table present.");

    let count = store.count().await?;
    println!("  reviews rows: {}", count);

    store.close().await;
    println!("> Preflight OK.");
    Ok(())
}
