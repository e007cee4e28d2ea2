use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{AppState, NodesResponse, RegisterNodesRequest, SyncResponse};
use crate::network;

/// Register peer addresses. Addresses without a scheme default to http://;
/// duplicates are ignored.
#[post("/nodes/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let req = body.into_inner();
    if req.nodes.is_empty() {
        return HttpResponse::BadRequest().body("nodes list must not be empty");
    }

    let mut peers = state.peers.lock().expect("mutex poisoned");
    for node in &req.nodes {
        if let Some(normalized) = peers.register(node) {
            info!("registered peer {normalized}");
        }
    }

    HttpResponse::Ok().json(NodesResponse {
        message: Some("peers registered".to_string()),
        nodes: peers.all(),
    })
}

/// List registered peers.
#[get("/nodes/")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    let peers = state.peers.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(NodesResponse {
        message: None,
        nodes: peers.all(),
    })
}

/// Run one sync pass against all registered peers and report whether the
/// local chain was replaced.
#[post("/sync/")]
pub async fn sync_nodes(state: web::Data<AppState>) -> impl Responder {
    // Snapshot the peer list before awaiting; neither lock is held across
    // the fetches.
    let peers = {
        let peers = state.peers.lock().expect("mutex poisoned");
        peers.all()
    };

    let updated = network::sync_with_peers(&peers, &state.ledger).await;

    let length = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.len()
    };

    HttpResponse::Ok().json(SyncResponse {
        message: if updated {
            "chain replaced by a longer valid peer chain"
        } else {
            "chain already up to date"
        },
        updated,
        length,
    })
}
