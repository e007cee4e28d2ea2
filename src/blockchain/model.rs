use chrono::Utc;
use log::{info, warn};

use crate::error::ChainError;
use crate::transaction::{Admission, COINBASE_SENDER, Transaction};
use crate::wallet;

use super::BLOCK_REWARD;
use super::block::{Block, genesis_prev_hash};
use super::difficulty::DifficultyState;
use super::merkle;
use super::pow::{self, CancelToken};
use super::storage::ChainStore;

/// The ledger: the append-only block list plus the admission state and
/// difficulty controller that feed it.
///
/// The chain is mutated only by [`Blockchain::append_block`] (mining) and
/// [`Blockchain::replace_chain`] (sync adoption). Callers share the ledger
/// behind a single mutex so that admission, mining, sync adoption and
/// balance reads never interleave.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
    admission: Admission,
    difficulty: DifficultyState,
    store: ChainStore,
}

impl Blockchain {
    /// Load the persisted chain if the store file exists, otherwise mine a
    /// genesis block at the initial difficulty and create the file. Any
    /// store failure here is fatal: a node must not start from a chain it
    /// cannot read or write.
    pub fn open(store: ChainStore) -> Result<Self, ChainError> {
        let mut bc = Self {
            chain: Vec::new(),
            admission: Admission::new(),
            difficulty: DifficultyState::new(),
            store,
        };

        if bc.store.exists() {
            bc.chain = bc.store.load()?;
            info!("loaded chain of {} blocks", bc.chain.len());
        } else {
            let prev_hash = genesis_prev_hash();
            let nonce = pow::proof_of_work(
                0,
                &prev_hash,
                bc.admission.pending(),
                bc.difficulty.target(),
                &CancelToken::new(),
            )
            .expect("a fresh token never cancels the genesis search");
            bc.append_block(nonce, prev_hash);
            bc.store.save(&bc.chain)?;
            info!("mined genesis block, chain store created");
        }

        Ok(bc)
    }

    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds at least the genesis block")
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty_target(&self) -> &str {
        self.difficulty.target()
    }

    /// Admitted-but-unmined transactions, in admission order.
    pub fn pending(&self) -> &[Transaction] {
        self.admission.pending()
    }

    /// Derive an address balance by replaying every committed transaction.
    /// O(blocks × txs) per call; there is no cached running balance. The fee
    /// is not debited here: the sender's ledger debit is the amount only,
    /// the fee reaches the miner through the coinbase payout.
    pub fn get_balance_of(&self, address: &str) -> f64 {
        let mut balance = 0.0;
        for block in &self.chain {
            for tx in &block.transactions {
                if tx.recipient == address {
                    balance += tx.amount;
                } else if tx.sender == address {
                    balance -= tx.amount;
                }
            }
        }
        balance
    }

    /// Validate and stage a transaction. For non-coinbase senders the rules
    /// run in order: nonce freshness (consumed immediately, never rolled
    /// back), signature over the canonical payload, then balance coverage of
    /// amount + fee. Coinbase submissions bypass all three. Returns the
    /// index of the block the transaction will land in.
    pub fn add_transaction(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: f64,
        signature: Option<&str>,
        fee: f64,
        nonce: Option<u64>,
    ) -> Result<u64, ChainError> {
        if sender != COINBASE_SENDER {
            if let Some(n) = nonce {
                self.admission.consume_nonce(sender, n)?;
            }

            let payload = wallet::signing_payload(sender, recipient, amount, fee, nonce);
            let verified = signature
                .is_some_and(|sig| wallet::verify_transaction_signature(sender, &payload, sig));
            if !verified {
                return Err(ChainError::InvalidSignature);
            }

            let needed = amount + fee;
            let available = self.get_balance_of(sender);
            if available < needed {
                return Err(ChainError::InsufficientBalance { needed, available });
            }
        }

        self.admission.push(Transaction::new(sender, recipient, amount, fee, nonce));
        Ok(self.chain.len() as u64)
    }

    /// Mine one block to `miner_address`: search for a proof over the
    /// pending set plus a coinbase paying the base reward and all pending
    /// fees, then stage the coinbase and append. Returns
    /// [`ChainError::MiningAborted`] if the token cancels the search first;
    /// an abandoned search leaves the pending pool exactly as it found it,
    /// otherwise a retry would seal a second coinbase into the same block.
    pub fn mine(&mut self, miner_address: &str, cancel: &CancelToken) -> Result<Block, ChainError> {
        let total_reward = BLOCK_REWARD + self.admission.pending_fees();
        let coinbase = Transaction::new(COINBASE_SENDER, miner_address, total_reward, 0.0, None);

        // The searched list must be byte-identical to what append_block will
        // drain: the pool in admission order, coinbase last.
        let mut candidate = self.admission.pending().to_vec();
        candidate.push(coinbase.clone());

        let prev_hash = self.last_block().hash();
        let index = self.chain.len() as u64;
        let nonce = pow::proof_of_work(
            index,
            &prev_hash,
            &candidate,
            self.difficulty.target(),
            cancel,
        )
        .ok_or(ChainError::MiningAborted)?;

        self.admission.push(coinbase);
        Ok(self.append_block(nonce, prev_hash).clone())
    }

    /// Commit the pending pool into a new block: merkle-commit and drain the
    /// pool, stamp the current difficulty target, append, retarget, persist.
    /// Persistence here is best-effort; on failure the in-memory chain stays
    /// authoritative until the next successful save.
    pub fn append_block(&mut self, nonce: u64, hash_of_previous_block: String) -> &Block {
        let transactions = self.admission.drain();
        let block = Block {
            index: self.chain.len() as u64,
            timestamp: Utc::now().timestamp(),
            merkle_root: merkle::merkle_root(&transactions),
            transactions,
            nonce,
            hash_of_previous_block,
            difficulty: self.difficulty.target().to_string(),
        };

        self.chain.push(block);
        self.difficulty.adjust(&self.chain);
        if let Err(e) = self.store.save(&self.chain) {
            warn!("failed to persist chain after block append: {e}");
        }
        self.last_block()
    }

    /// Structural and proof-of-work validation of a candidate chain, walked
    /// from index 1 onward: each block must link to the hash of its
    /// predecessor and carry a proof valid for the difficulty target
    /// recorded in the block itself, so candidates mined under older targets
    /// still validate. An empty recorded target fails outright, since it
    /// would make the prefix check vacuous.
    pub fn valid_chain(chain: &[Block]) -> bool {
        if chain.is_empty() {
            return false;
        }

        let mut last_block = &chain[0];
        for (index, block) in chain.iter().enumerate().skip(1) {
            if block.hash_of_previous_block != last_block.hash() {
                return false;
            }
            if block.difficulty.is_empty() {
                return false;
            }
            if !pow::valid_proof(
                index as u64,
                &block.hash_of_previous_block,
                &block.transactions,
                block.nonce,
                &block.difficulty,
            ) {
                return false;
            }
            last_block = block;
        }
        true
    }

    /// Wholesale adoption of a peer chain that won the longest-valid
    /// comparison. All-or-nothing: the caller validates first, this only
    /// swaps and persists.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
        if let Err(e) = self.store.save(&self.chain) {
            warn!("failed to persist chain after sync adoption: {e}");
        }
    }
}
