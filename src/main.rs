pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod store;

pub mod data_structs {
    pub mod student_enrollment;
    pub mod requests {
        pub mod enrollment_event;
    }
    pub mod responses {
        pub mod error_response;
    }
}

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use actix_web::middleware::Logger;
use log::info;

use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::database::DatabasePool;
use crate::store::EnrollmentStore;

pub struct SharedResources {
    store: Arc<dyn EnrollmentStore>
}

impl SharedResources {
    pub fn new(store: Arc<dyn EnrollmentStore>) -> Self {
        SharedResources { store }
    }
}

impl Clone for SharedResources {
    fn clone(&self) -> Self {
        return SharedResources {
            store: Arc::clone(&self.store)
        }
    }
}

async fn load(config: &AppConfig) -> Result<SharedResources, std::io::Error> {
    info!("Connecting to the database at {}:{}...", config.mysql.host, config.mysql.port);
    let database = DatabasePool::new(&config.mysql).await
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::ConnectionRefused, err))?;
    database.init().await
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

    return Ok(SharedResources::new(Arc::new(database)));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    info!("Loading configurations from {}...", config_path);
    let config = AppConfig::load(&config_path)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidInput, err))?;

    let shared_resources = load(&config).await?;
    let max_payload_bytes = config.server.max_payload_bytes;

    info!("Starting HTTP server on {}:{}...", config.server.host, config.server.port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(shared_resources.clone()))
            .app_data(web::PayloadConfig::new(max_payload_bytes))
            .wrap(Logger::new("%a \"%r\" %s %b \"%{User-Agent}i\" %T"))
            .configure(api::configure)
    })
        .bind((config.server.host.as_str(), config.server.port))?
        .run()
        .await
}
