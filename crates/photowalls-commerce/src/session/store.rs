//! Session store: owns the current state and logs every dispatch.

use crate::customize::UploadToken;
use crate::error::CommerceError;
use crate::ids::SessionId;
use crate::session::{reduce, Action, SessionState};
use crate::shop::Shop;
use photowalls_observability::SessionLogger;
use std::sync::Arc;

/// One shopper's storefront session.
#[derive(Debug, Clone)]
pub struct Storefront {
    state: SessionState,
    logger: SessionLogger,
}

impl Storefront {
    /// Start a session with a fresh id, logging to stderr.
    pub fn new(shop: Arc<Shop>) -> Self {
        let id = SessionId::generate();
        Self::with_logger(shop, SessionLogger::new(id.as_str()))
    }

    /// Start a session that logs through `logger`.
    pub fn with_logger(shop: Arc<Shop>, logger: SessionLogger) -> Self {
        logger
            .debug_builder("session started")
            .field_i64("products", shop.catalog.len() as i64)
            .field("currency", shop.currency.code())
            .emit();
        Self {
            state: SessionState::new(shop),
            logger,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session_id(&self) -> &str {
        self.logger.session_id()
    }

    pub fn logger(&self) -> &SessionLogger {
        &self.logger
    }

    /// Apply an action. On error the state is left as it was.
    pub fn dispatch(&mut self, action: Action) -> Result<&SessionState, CommerceError> {
        let name = action.name();
        let detail = describe(&action);

        match reduce(&self.state, action) {
            Ok(next) => {
                self.state = next;
                self.log_accepted(name, detail);
                Ok(&self.state)
            }
            Err(err) => {
                let mut entry = self
                    .logger
                    .warn_builder("action rejected")
                    .field("action", name)
                    .field("error", err.to_string());
                if let Some(detail) = detail {
                    entry = entry.field("input", detail);
                }
                entry.emit();
                Err(err)
            }
        }
    }

    /// Dispatch `BeginUpload` and return the token the completion must carry.
    pub fn begin_upload(
        &mut self,
        file_name: &str,
        media_type: &str,
        byte_len: u64,
    ) -> Result<UploadToken, CommerceError> {
        self.dispatch(Action::BeginUpload {
            file_name: file_name.to_string(),
            media_type: media_type.to_string(),
            byte_len,
        })?;
        Ok(self.state.upload().last_token())
    }

    /// Drop the cart, promo and dialogs; keep the shop.
    pub fn reset(&mut self) {
        self.state = SessionState::new(Arc::clone(&self.state.shop));
        self.logger.info("session reset");
    }

    fn log_accepted(&self, name: &str, detail: Option<String>) {
        let cart_lines = self.state.cart_badge() as i64;
        match name {
            "add_to_cart" | "commit_upload" => {
                let total = self
                    .state
                    .cart()
                    .subtotal()
                    .map(|m| m.display())
                    .unwrap_or_default();
                self.logger
                    .info_builder("cart updated")
                    .field("action", name)
                    .field_i64("cart_lines", cart_lines)
                    .field_i64("cart_items", self.state.cart().item_count())
                    .field("subtotal", total)
                    .emit();
            }
            "apply_promo" => {
                let percent = self
                    .state
                    .promo()
                    .map(|p| i64::from(p.percent.value()))
                    .unwrap_or_default();
                self.logger
                    .info_builder("promo applied")
                    .field("code", detail.unwrap_or_default())
                    .field_i64("percent", percent)
                    .emit();
            }
            _ => {
                let mut entry = self
                    .logger
                    .debug_builder("action accepted")
                    .field("action", name)
                    .field_i64("cart_lines", cart_lines)
                    .field("upload", self.state.upload().state().as_str());
                if let Some(detail) = detail {
                    entry = entry.field("input", detail);
                }
                entry.emit();
            }
        }
    }
}

/// Loggable summary of an action's payload. Never includes file bytes.
fn describe(action: &Action) -> Option<String> {
    match action {
        Action::SelectCategory(filter) => Some(filter.label().to_string()),
        Action::ShowView(view) => Some(view.as_str().to_string()),
        Action::OpenProduct(id) => Some(id.to_string()),
        Action::SelectSize(value)
        | Action::SelectMaterial(value)
        | Action::ApplyPromo(value)
        | Action::SelectUploadSize(value)
        | Action::SelectUploadMaterial(value) => Some(value.clone()),
        Action::BeginUpload {
            file_name,
            media_type,
            ..
        } => Some(format!("{file_name} ({media_type})")),
        Action::CompleteUpload { token, bytes } => {
            Some(format!("token {token}, {} bytes", bytes.len()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photowalls_observability::{LogLevel, LogSink};

    fn store(sink: &LogSink) -> Storefront {
        let logger = SessionLogger::new("test-session")
            .with_min_level(LogLevel::Debug)
            .with_sink(sink.clone());
        Storefront::with_logger(Arc::new(Shop::sample().unwrap()), logger)
    }

    #[test]
    fn test_rejected_action_keeps_state_and_warns() {
        let sink = LogSink::memory();
        let mut store = store(&sink);
        let before = store.state().clone();

        let err = store.dispatch(Action::ApplyPromo("FREE100".to_string())).unwrap_err();
        assert_eq!(err, CommerceError::InvalidPromoCode("FREE100".to_string()));
        assert_eq!(store.state(), &before);

        let entries = sink.entries();
        let last = entries.last().unwrap();
        assert_eq!(last.level, LogLevel::Warn);
        assert_eq!(last.message, "action rejected");
        assert_eq!(last.field("input"), Some(&serde_json::json!("FREE100")));
    }

    #[test]
    fn test_promo_logged_at_info() {
        let sink = LogSink::memory();
        let mut store = store(&sink);
        store.dispatch(Action::ApplyPromo("WELCOME10".to_string())).unwrap();

        let entries = sink.entries();
        let last = entries.last().unwrap();
        assert_eq!(last.level, LogLevel::Info);
        assert_eq!(last.message, "promo applied");
        assert_eq!(last.field("percent"), Some(&serde_json::json!(10)));
        assert_eq!(last.session_id, "test-session");
    }

    #[test]
    fn test_begin_upload_returns_token() {
        let sink = LogSink::memory();
        let mut store = store(&sink);
        let first = store.begin_upload("a.png", "image/png", 1).unwrap();
        let second = store.begin_upload("b.png", "image/png", 1).unwrap();
        assert!(second > first);

        assert!(store
            .dispatch(Action::CompleteUpload {
                token: first,
                bytes: vec![1]
            })
            .is_err());
        store
            .dispatch(Action::CompleteUpload {
                token: second,
                bytes: vec![2],
            })
            .unwrap();
        assert_eq!(store.state().upload().image().unwrap().file_name, "b.png");
    }

    #[test]
    fn test_reset_clears_cart() {
        let sink = LogSink::memory();
        let mut store = store(&sink);
        for action in [
            Action::OpenProduct("2".into()),
            Action::SelectSize("2x3m".to_string()),
            Action::SelectMaterial("Paper".to_string()),
            Action::AddToCart,
            Action::ApplyPromo("LOYAL20".to_string()),
        ] {
            store.dispatch(action).unwrap();
        }
        assert_eq!(store.state().cart_badge(), 1);

        store.reset();
        assert!(store.state().cart().is_empty());
        assert!(store.state().promo().is_none());
    }
}
