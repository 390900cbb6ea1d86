use axum_server::Handle;
use clap::Parser;

use expense_tracker::{
    Config, add_logging_layers, build_router, create_app_state, graceful_shutdown,
    open_connection, setup_logging,
};

#[tokio::main]
async fn main() {
    let config = Config::parse();

    if let Err(error) = setup_logging(config.log_file.as_deref()) {
        eprintln!("Could not open log file: {error}");
        std::process::exit(1);
    }

    let app_state = match open_connection(&config.database_url).and_then(create_app_state) {
        Ok(app_state) => app_state,
        Err(error) => {
            tracing::error!(
                "Could not open database \"{}\": {error}",
                config.database_url
            );
            std::process::exit(1);
        }
    };

    let router = add_logging_layers(build_router(app_state));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = config.socket_address();
    tracing::info!("HTTP server listening on {addr}");

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        std::process::exit(1);
    }
}
