use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use backend::config::Config;
use backend::db::Database;
use env_logger::Env;
use log::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::from_env();

    let database = match Database::open(&config.database_path) {
        Ok(database) => web::Data::new(database),
        Err(e) => {
            error!("Failed to open database at {}: {}", config.database_path, e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    info!("Server running at http://{}:{}", config.host, config.port);

    let app_database = database.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().limit(10 * 1024 * 1024)) // 10 MB
            .app_data(app_database.clone())
            .configure(backend::configure_app)
    })
    .bind((config.host.clone(), config.port))?
    .shutdown_timeout(30)
    .run()
    .await?;

    info!("Server stopped, closing database");
    database.close();
    Ok(())
}
