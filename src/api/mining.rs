use actix_web::{HttpResponse, Responder, post, web};
use log::info;

use super::models::{AppState, MineRequest, MineResponse};
use crate::blockchain::CancelToken;

/// Mine one block from the pending pool. The coinbase pays the base reward
/// plus all pending fees to `miner_address`, defaulting to this node's own
/// identifier. The ledger lock is held across the PoW search, so admission
/// and sync wait until the block is sealed.
#[post("/mine/")]
pub async fn mine_block(
    state: web::Data<AppState>,
    req: Option<web::Json<MineRequest>>,
) -> impl Responder {
    let miner_address = req
        .and_then(|r| r.into_inner().miner_address)
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| state.node_identifier.clone());

    let mined = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.mine(&miner_address, &CancelToken::new())
    };

    match mined {
        Ok(block) => {
            info!(
                "MINER - sealed block #{} (nonce={}, difficulty={})",
                block.index, block.nonce, block.difficulty
            );
            HttpResponse::Ok().json(MineResponse {
                message: format!("block {} added to the chain", block.index),
                block,
            })
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}
