//! Score arithmetic for answered items.

/// Fractional penalty per hint tier: first, second, third and beyond.
pub const HINT_PENALTIES: [f64; 3] = [0.1, 0.2, 0.3];

/// Multiplicative penalty applied per retry.
pub const RETRY_PENALTY: f64 = 0.9;

/// Response-time thresholds for the base-score bonus/penalty.
const FAST_MS: u64 = 5_000;
const SLOW_MS: u64 = 15_000;

/// Base score for one answer: 0 when incorrect, otherwise 100 plus a
/// response-time bonus/penalty and a difficulty bonus, clamped to [0, 100].
pub fn base_score(correct: bool, response_time_ms: Option<u64>, difficulty: f64) -> f64 {
    if !correct {
        return 0.0;
    }

    let mut score = 100.0;
    if let Some(ms) = response_time_ms {
        if ms < FAST_MS {
            score += 10.0;
        } else if ms > SLOW_MS {
            score -= 10.0;
        }
    }
    score += difficulty.clamp(0.0, 1.0) * 10.0;
    score.clamp(0.0, 100.0)
}

/// Final score: base reduced by cumulative hint penalties and a
/// multiplicative retry penalty, then adjusted by a small confidence
/// bonus, clamped to [0, 100].
pub fn final_score(base: f64, hints_used: u32, attempts: u32, confidence: Option<u8>) -> f64 {
    let hint_penalty: f64 = (0..hints_used)
        .map(|i| HINT_PENALTIES[(i as usize).min(HINT_PENALTIES.len() - 1)])
        .sum();
    let retry_factor = RETRY_PENALTY.powi(attempts.saturating_sub(1) as i32);

    let mut score = base * (1.0 - hint_penalty).max(0.0) * retry_factor;
    if base > 0.0 {
        if let Some(confidence) = confidence {
            score += (confidence.clamp(1, 5) as f64 - 3.0) * 2.0;
        }
    }
    score.clamp(0.0, 100.0).round()
}
