use crate::app::App;
use crate::config::Config;
use crate::router::handle;
use astra::Server;
use std::path::PathBuf;
use tracing::{error, info};

mod app;
mod config;
mod db;
mod domain;
mod errors;
mod forms;
mod geocoding;
mod logging;
mod remote;
mod responses;
mod router;
mod sessions;
mod store;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    // Optional config path as the first argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    let config = match Config::load_from(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.logging.filter);

    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "bad listen address");
            std::process::exit(1);
        }
    };
    let max_workers = config.server.max_workers;

    let app = match App::from_config(config) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    info!(%addr, max_workers, "starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => responses::html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
}
