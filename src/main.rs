use astra::Server;
use vigilancia_chagas::config::AppConfig;
use vigilancia_chagas::db::{init_db, Database};
use vigilancia_chagas::router::handle;

fn main() {
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cfg.log_filter.as_str()),
    )
    .format_timestamp_millis()
    .try_init();

    let db = Database::new(cfg.db_path.clone());

    if let Err(e) = init_db(&db, &cfg.schema_path) {
        log::error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    log::info!("Starting server at http://{}", cfg.bind_addr);

    let server = Server::bind(&cfg.bind_addr).max_workers(cfg.max_workers);
    let result = server.serve(move |req, _info| handle(req, &db));

    if let Err(e) = result {
        log::error!("Server ended with error: {e}");
        std::process::exit(1);
    }

    log::info!("Server shut down cleanly.");
}
