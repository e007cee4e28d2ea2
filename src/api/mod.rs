mod balance;
mod chain;
mod health;
mod mining;
pub mod models;
mod nodes;
mod stats;
mod tx;
mod wallet;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(mining::mine_block)
            .service(tx::post_transaction)
            .service(tx::get_pending)
            .service(balance::get_balance)
            .service(balance::post_history)
            .service(nodes::register_nodes)
            .service(nodes::list_nodes)
            .service(nodes::sync_nodes)
            .service(stats::get_stats)
            .service(wallet::create_wallet),
    );
}
