use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};
use crate::error::ChainError;

/// Submit a signed transaction for admission into the pending pool.
/// Rejections carry the specific reason; nothing is dropped silently.
#[post("/tx/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let req = body.into_inner();

    let admitted = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.add_transaction(
            &req.sender,
            &req.recipient,
            req.amount,
            Some(&req.signature),
            req.fee,
            req.nonce,
        )
    };

    match admitted {
        Ok(block_index) => {
            info!(
                "POST /tx/ - admitted {} -> {} ({} + fee {}) for block {}",
                req.sender.chars().take(16).collect::<String>(),
                req.recipient.chars().take(16).collect::<String>(),
                req.amount,
                req.fee,
                block_index
            );
            HttpResponse::Created().json(NewTxResponse {
                message: format!("transaction scheduled for block {block_index}"),
                block_index,
            })
        }
        Err(
            e @ (ChainError::InvalidSignature
            | ChainError::ReplayedNonce { .. }
            | ChainError::InsufficientBalance { .. }),
        ) => {
            warn!("POST /tx/ - rejected: {e}");
            HttpResponse::BadRequest().body(e.to_string())
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// Snapshot of the pending pool.
#[get("/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let transactions = ledger.pending().to_vec();
    HttpResponse::Ok().json(PendingResponse {
        size: transactions.len(),
        transactions,
    })
}
