#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::AuthUser;
    use crate::state::auth::AuthState;
    use leptos::*;

    pub fn admin_user() -> AuthUser {
        AuthUser {
            id: "u1".into(),
            email: "ops@fleet.example".into(),
            name: "Ops Admin".into(),
            role: "admin".into(),
        }
    }

    pub fn provide_auth(user: Option<AuthUser>) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            is_authenticated: user.is_some(),
            token: user.as_ref().map(|_| "tok-1".to_string()),
            user,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }
}
