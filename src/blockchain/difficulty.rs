use log::info;

use super::Block;

/// Required hex prefix for a fresh chain.
pub const INITIAL_DIFFICULTY_TARGET: &str = "0000";

/// Retarget only when the chain length is a multiple of this.
pub const DIFFICULTY_ADJUSTMENT_INTERVAL: usize = 5;

/// Target seconds per block.
pub const TARGET_BLOCK_TIME_SECS: i64 = 10;

/// Current difficulty target plus the retarget rule.
///
/// The target is the exact hex prefix a block digest must carry, so the only
/// moves are appending one more required zero digit (harder) or dropping the
/// last digit (easier, floor length 1).
#[derive(Debug, Clone)]
pub struct DifficultyState {
    target: String,
}

impl Default for DifficultyState {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyState {
    pub fn new() -> Self {
        Self {
            target: INITIAL_DIFFICULTY_TARGET.to_string(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Hysteresis retarget, invoked after every block append. No-op off the
    /// interval boundary. Compares the wall time the last interval's blocks
    /// took against the expected time; only a factor-2 deviation in either
    /// direction moves the target, intermediate speeds leave it untouched.
    pub fn adjust(&mut self, chain: &[Block]) {
        if chain.len() % DIFFICULTY_ADJUSTMENT_INTERVAL != 0
            || chain.len() < DIFFICULTY_ADJUSTMENT_INTERVAL
        {
            return;
        }

        let window = &chain[chain.len() - DIFFICULTY_ADJUSTMENT_INTERVAL..];
        let time_taken = window[window.len() - 1].timestamp - window[0].timestamp;
        let expected = TARGET_BLOCK_TIME_SECS * DIFFICULTY_ADJUSTMENT_INTERVAL as i64;

        if time_taken * 2 < expected {
            self.target.push('0');
            info!("difficulty increased to {}", self.target);
        } else if time_taken > expected * 2 && self.target.len() > 1 {
            self.target.pop();
            info!("difficulty decreased to {}", self.target);
        }
    }
}
