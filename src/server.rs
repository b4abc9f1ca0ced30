use actix_web::{web, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::{debug, info};
use tracing_actix_web::TracingLogger;

use crate::{config, http::controllers, App};

#[derive(Debug, Error)]
#[error("Could not start HTTP server")]
pub struct StartServerError;

/// Runs the HTTP server until it receives a shutdown signal.
///
/// It must be called inside an actix system.
#[tracing::instrument(skip_all, name = "server.run")]
pub async fn run(config: config::Server) -> Result<(), StartServerError> {
    if cfg!(debug_assertions) {
        info!(?config, "Starting HTTP server...");
    }

    let address = (config.ip, config.port);
    let workers = config.workers.get();

    let app = App::new(config).await.change_context(StartServerError)?;
    app.users
        .init_schema()
        .await
        .change_context(StartServerError)
        .attach_printable("could not initialize database schema")?;

    debug!("binding server");
    let data = web::Data::new(app);
    let server = HttpServer::new(move || {
        actix_web::App::new()
            .app_data(data.clone())
            .wrap(TracingLogger::default())
            .configure(controllers::configure)
    })
    .workers(workers)
    .bind(address)
    .change_context(StartServerError)
    .attach_printable("could not bind server with address and port")?;

    for addr in server.addrs() {
        info!("HTTP server is listening at http://{addr} with {workers} workers");
    }

    server
        .run()
        .await
        .change_context(StartServerError)
        .attach_printable("could not serve HTTP service")?;

    info!("HTTP server has shut down");
    Ok(())
}
