use crate::helpers::time::now_i64;
use crate::model::token::TokenRecord;

/// Service token together with its refresh schedule
#[derive(Debug, Clone)]
pub struct TokenContext {
    pub record: TokenRecord,
    /// unix seconds
    pub expires_at: i64,
    /// unix seconds, `expires_at - safety margin`
    pub refresh_at: i64,
}

impl TokenContext {
    pub fn new(record: TokenRecord, safety_margin_seconds: u64) -> Self {
        let expires_at = now_i64().saturating_add(record.expires_in.max(0));
        let margin = i64::try_from(safety_margin_seconds).unwrap_or(i64::MAX);
        let refresh_at = expires_at.saturating_sub(margin);
        Self { record, expires_at, refresh_at }
    }

    /// Check if token should be updated
    pub fn should_update(&self) -> bool {
        now_i64() >= self.refresh_at
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(expires_in: i64) -> TokenRecord {
        TokenRecord { access_token: "t".into(), expires_in, ..Default::default() }
    }

    #[test]
    fn fresh_token_is_kept() {
        assert!(!TokenContext::new(record(3600), 60).should_update());
    }

    #[test]
    fn token_inside_safety_margin_is_refreshed() {
        assert!(TokenContext::new(record(30), 60).should_update());
        assert!(TokenContext::new(record(0), 0).should_update());
    }

    #[test]
    fn huge_lifetime_saturates() {
        let context = TokenContext::new(record(i64::MAX), 60);
        assert_eq!(context.expires_at, i64::MAX);
        assert_eq!(context.refresh_at, i64::MAX - 60);
        assert!(!context.should_update());

        let context = TokenContext::new(record(3600), u64::MAX);
        assert!(context.should_update());
    }
}
