use std::cell::RefCell;

pub const TOKEN_STORAGE_KEY: &str = "fleet_admin_token";

#[cfg(target_arch = "wasm32")]
pub fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or_else(|| "No window object".to_string())?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn local_storage() -> Result<web_sys::Storage, String> {
    Err("No localStorage".to_string())
}

/// Where the bearer token survives page reloads.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), String>;
    fn clear(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokens;

impl TokenStore for LocalStorageTokens {
    fn load(&self) -> Option<String> {
        local_storage()
            .ok()?
            .get_item(TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> Result<(), String> {
        local_storage()?
            .set_item(TOKEN_STORAGE_KEY, token)
            .map_err(|_| "Failed to persist token".to_string())
    }

    fn clear(&self) {
        if let Ok(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokens {
    token: RefCell<Option<String>>,
}

impl MemoryTokens {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokens {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), String> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}
