mod api;
mod blockchain;
mod error;
mod network;
mod transaction;
mod wallet;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use std::env;

use api::AppState;
use blockchain::{Blockchain, ChainStore, DEFAULT_CHAIN_FILE};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);
    let chain_file = env::var("CHAIN_FILE").unwrap_or_else(|_| DEFAULT_CHAIN_FILE.to_string());

    // A chain store that cannot be read or created makes startup fail.
    let ledger = Blockchain::open(ChainStore::new(&chain_file)).map_err(std::io::Error::other)?;

    println!("⛓️ Starting DNR chain node at http://{host}:{port}");

    let state = web::Data::new(AppState::new(ledger));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
