use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse, ValidateResponse};
use crate::blockchain::Blockchain;

/// Get the full chain; peers call this during sync.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        length: ledger.len(),
        chain: &ledger.chain,
    };
    HttpResponse::Ok().json(resp)
}

/// Run full structural/PoW validation over the local chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: Blockchain::valid_chain(&ledger.chain),
        length: ledger.len(),
    })
}
