//! Broadcast policy: display labels, notice texts and the flower rate limit.
//!
//! Pure functions only, so the rules can be tested without a registry or
//! network.

/// Sender label shown to the connection that originated a broadcast
pub const SELF_LABEL: &str = "you";

/// Minimum interval between two successful flower showers from one connection
pub const FLOWER_COOLDOWN_MILLIS: i64 = 10_000;

/// Result of checking the flower rate limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowerDecision {
    Allowed,
    /// Rejected; eligible again in `remaining_secs` whole seconds
    Throttled { remaining_secs: i64 },
}

/// Check whether a flower shower sent at `now` is allowed.
///
/// # Arguments
///
/// * `last_flower_time` - Timestamp of the previous successful shower, if any
/// * `now` - Current timestamp (milliseconds)
///
/// # Returns
///
/// `Throttled` with `10 - floor(elapsed / 1000)` seconds when less than the
/// cooldown has elapsed, otherwise `Allowed`. A clock that moved backwards
/// counts as zero elapsed time.
pub fn check_flower_cooldown(last_flower_time: Option<i64>, now: i64) -> FlowerDecision {
    let Some(last) = last_flower_time else {
        return FlowerDecision::Allowed;
    };

    let elapsed = (now - last).max(0);
    if elapsed < FLOWER_COOLDOWN_MILLIS {
        FlowerDecision::Throttled {
            remaining_secs: FLOWER_COOLDOWN_MILLIS / 1000 - elapsed / 1000,
        }
    } else {
        FlowerDecision::Allowed
    }
}

/// Notice texts sent by the router
pub mod notice {
    pub fn connected() -> String {
        "connected to server".to_string()
    }

    pub fn joined(nickname: &str) -> String {
        format!("{nickname} joined")
    }

    pub fn left(nickname: &str) -> String {
        format!("{nickname} left")
    }

    pub fn flower_from_you() -> String {
        "you sent everyone a shower of flowers".to_string()
    }

    pub fn flower_from(nickname: &str) -> String {
        format!("{nickname} sent a shower of flowers")
    }

    pub fn flower_throttled(remaining_secs: i64) -> String {
        format!("you are sending flowers too often, try again in {remaining_secs} seconds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_flower_is_allowed() {
        // テスト項目: 初回の送信は常に許可される
        // given / when (操作):
        let decision = check_flower_cooldown(None, 1_000);

        // then (期待する結果):
        assert_eq!(decision, FlowerDecision::Allowed);
    }

    #[test]
    fn test_flower_within_cooldown_is_throttled() {
        // テスト項目: 10 秒以内の再送信は残り秒数付きで拒否される
        // given (前提条件):
        let last = 100_000;

        // when (操作):
        let immediately = check_flower_cooldown(Some(last), last);
        let after_999ms = check_flower_cooldown(Some(last), last + 999);
        let after_3500ms = check_flower_cooldown(Some(last), last + 3_500);
        let after_9999ms = check_flower_cooldown(Some(last), last + 9_999);

        // then (期待する結果):
        assert_eq!(immediately, FlowerDecision::Throttled { remaining_secs: 10 });
        assert_eq!(after_999ms, FlowerDecision::Throttled { remaining_secs: 10 });
        assert_eq!(after_3500ms, FlowerDecision::Throttled { remaining_secs: 7 });
        assert_eq!(after_9999ms, FlowerDecision::Throttled { remaining_secs: 1 });
    }

    #[test]
    fn test_flower_after_cooldown_is_allowed() {
        // テスト項目: ちょうど 10 秒経過すれば許可される
        // given (前提条件):
        let last = 100_000;

        // when (操作):
        let decision = check_flower_cooldown(Some(last), last + FLOWER_COOLDOWN_MILLIS);

        // then (期待する結果):
        assert_eq!(decision, FlowerDecision::Allowed);
    }

    #[test]
    fn test_clock_going_backwards_counts_as_no_elapsed_time() {
        // テスト項目: 時計が巻き戻った場合は経過 0 として扱われる
        // given (前提条件):
        let last = 100_000;

        // when (操作):
        let decision = check_flower_cooldown(Some(last), last - 5_000);

        // then (期待する結果):
        assert_eq!(decision, FlowerDecision::Throttled { remaining_secs: 10 });
    }

    #[test]
    fn test_notice_texts() {
        // テスト項目: 通知文言にニックネームが埋め込まれる
        // given / when / then:
        assert_eq!(notice::joined("Bob"), "Bob joined");
        assert_eq!(notice::left("Bob"), "Bob left");
        assert_eq!(notice::flower_from("Bob"), "Bob sent a shower of flowers");
        assert!(notice::flower_from_you().contains("shower of flowers"));
        assert!(notice::flower_throttled(4).contains("4 seconds"));
    }
}
