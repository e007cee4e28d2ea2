use actix_web::{HttpResponse, Responder, get, post, web};

use super::models::{AppState, BalanceResponse, HistoryEntry, HistoryRequest, HistoryResponse};
use crate::transaction::CURRENCY;

/// Derive an address balance by full chain replay.
#[get("/balance/{address}/")]
pub async fn get_balance(state: web::Data<AppState>, path: web::Path<(String,)>) -> impl Responder {
    let address = path.into_inner().0;

    let balance = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.get_balance_of(&address)
    };

    HttpResponse::Ok().json(BalanceResponse {
        address,
        balance,
        currency: CURRENCY,
    })
}

/// Transaction history for an address: committed transactions annotated with
/// their block's index and timestamp, then pending pool hits marked as such.
#[post("/history/")]
pub async fn post_history(
    state: web::Data<AppState>,
    body: web::Json<HistoryRequest>,
) -> impl Responder {
    let address = body.into_inner().address;

    let ledger = state.ledger.lock().expect("mutex poisoned");

    let mut entries: Vec<HistoryEntry> = Vec::new();
    for block in &ledger.chain {
        for tx in &block.transactions {
            if tx.involves(&address) {
                entries.push(HistoryEntry {
                    transaction: tx.clone(),
                    block_index: Some(block.index),
                    block_timestamp: Some(block.timestamp),
                    status: "confirmed",
                });
            }
        }
    }
    for tx in ledger.pending() {
        if tx.involves(&address) {
            entries.push(HistoryEntry {
                transaction: tx.clone(),
                block_index: None,
                block_timestamp: None,
                status: "pending",
            });
        }
    }

    HttpResponse::Ok().json(HistoryResponse {
        address,
        transactions: entries,
    })
}
