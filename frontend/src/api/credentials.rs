use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    api::ApiError,
    utils::storage::{LocalStorageTokens, TokenStore},
};

type ExpiryListener = Rc<dyn Fn()>;

/// Bearer token shared by every adapter, plus the hooks fired when a service rejects it.
#[derive(Clone)]
pub struct Credentials {
    store: Rc<dyn TokenStore>,
    listeners: Rc<RefCell<Vec<ExpiryListener>>>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::browser()
    }
}

impl Credentials {
    pub fn new(store: Rc<dyn TokenStore>) -> Self {
        Self {
            store,
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn browser() -> Self {
        Self::new(Rc::new(LocalStorageTokens))
    }

    pub fn token(&self) -> Option<String> {
        self.store.load()
    }

    pub fn persist(&self, token: &str) -> Result<(), ApiError> {
        self.store.save(token).map_err(ApiError::unknown)
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn on_expired(&self, listener: impl Fn() + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Drops the token and notifies listeners; called when a service answers 401/403.
    pub fn expire(&self) {
        self.clear();
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }
}

fn decode_claims(token: &str) -> Option<serde_json::Value> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Reads the unverified `exp` claim. Tokens that are not JWTs never count as expired here;
/// the auth service has the final say.
pub fn token_expired(token: &str, now_secs: i64) -> bool {
    decode_claims(token)
        .and_then(|claims| claims.get("exp").and_then(|exp| exp.as_i64()))
        .map(|exp| exp <= now_secs)
        .unwrap_or(false)
}

#[cfg(test)]
pub(crate) fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD.encode(format!(r#"{{"user_id":"u1","role":"admin","exp":{}}}"#, exp));
    format!("{}.{}.signature", header, claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryTokens;
    use std::cell::Cell;

    #[test]
    fn token_expiry_reads_exp_claim() {
        let token = jwt_with_exp(1_000);
        assert!(token_expired(&token, 1_000));
        assert!(token_expired(&token, 2_000));
        assert!(!token_expired(&token, 999));
    }

    #[test]
    fn opaque_tokens_are_left_to_the_server() {
        assert!(!token_expired("opaque-token", i64::MAX));
        assert!(!token_expired("a.not-base64!.c", 0));
    }

    #[test]
    fn expire_clears_token_and_notifies_listeners() {
        let credentials = Credentials::new(Rc::new(MemoryTokens::with_token("t1")));
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        credentials.on_expired(move || counter.set(counter.get() + 1));

        credentials.expire();

        assert!(credentials.token().is_none());
        assert_eq!(fired.get(), 1);
    }
}
