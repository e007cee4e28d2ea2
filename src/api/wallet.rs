use actix_web::{HttpResponse, Responder, post};
use serde::Serialize;

use crate::wallet::generate_keypair_hex;

#[derive(Serialize)]
struct NewWalletResponse {
    private_key: String,
    public_key: String,
    message: &'static str,
}

/// Generate a fresh keypair. Nothing is stored server-side; the public key
/// is the account address.
#[post("/wallet/new/")]
pub async fn create_wallet() -> impl Responder {
    let (sk, pk) = generate_keypair_hex();
    HttpResponse::Ok().json(NewWalletResponse {
        private_key: sk,
        public_key: pk,
        message: "keep these keys safe; the private key is not stored on the server",
    })
}
