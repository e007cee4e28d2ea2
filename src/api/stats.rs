use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, StatsResponse};
use crate::blockchain::difficulty::{DIFFICULTY_ADJUSTMENT_INTERVAL, TARGET_BLOCK_TIME_SECS};

#[get("/stats/")]
pub async fn get_stats(state: web::Data<AppState>) -> impl Responder {
    let (height, difficulty_target, pending) = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        (
            ledger.len(),
            ledger.difficulty_target().to_string(),
            ledger.pending().len(),
        )
    };
    let peers = {
        let peers = state.peers.lock().expect("mutex poisoned");
        peers.len()
    };

    HttpResponse::Ok().json(StatsResponse {
        height,
        difficulty_target,
        pending,
        peers,
        target_block_time_secs: TARGET_BLOCK_TIME_SECS,
        adjustment_interval: DIFFICULTY_ADJUSTMENT_INTERVAL,
    })
}
