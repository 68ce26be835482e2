mod config;
mod services;
mod signature;

use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let guard_config = match config::load() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let host = "127.0.0.1";
    let port = 8090;
    info!("Ingestion guard listening at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(guard_config.clone()))
            .service(services::ingest::configure_routes())
    })
        .bind((host, port))?
        .run()
        .await
}
