use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

pub const BOOKING_CODE_PREFIX: &str = "NKS-";
pub const BOOKING_CODE_LEN: usize = 16;
pub const MAX_CODE_ATTEMPTS: usize = 50;

const RANDOM_PART_LEN: usize = 6;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

// 予約コードの候補を作る (例: NKS-7K2P9Q250601)
// 保存済みコードとの重複確認は BookingService 側で行う
pub struct BookingCodeGenerator {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl BookingCodeGenerator {
    pub fn new(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    // 日付部分は宿泊日ではなく発行日
    pub fn candidate(&self, issued_on: NaiveDate) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let random: String = (0..RANDOM_PART_LEN)
            .map(|_| char::from(CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())]))
            .collect();
        format!(
            "{BOOKING_CODE_PREFIX}{random}{}",
            issued_on.format("%y%m%d")
        )
    }
}

impl std::fmt::Debug for BookingCodeGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingCodeGenerator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn issued_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn candidate_has_fixed_shape() {
        let generator = BookingCodeGenerator::new(StdRng::seed_from_u64(1));
        let pattern = Regex::new(r"^NKS-[A-Z0-9]{6}250601$").unwrap();

        for _ in 0..100 {
            let code = generator.candidate(issued_on());
            assert_eq!(code.len(), BOOKING_CODE_LEN);
            assert!(pattern.is_match(&code), "{code}");
        }
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let a = BookingCodeGenerator::new(StdRng::seed_from_u64(42));
        let b = BookingCodeGenerator::new(StdRng::seed_from_u64(42));
        assert_eq!(a.candidate(issued_on()), b.candidate(issued_on()));
    }

    #[test]
    fn consecutive_candidates_differ() {
        let generator = BookingCodeGenerator::from_entropy();
        assert_ne!(generator.candidate(issued_on()), generator.candidate(issued_on()));
    }
}
