use super::utils::{AuthFormState, AuthMode};
use crate::api::{ApiError, AuthUser, LoginRequest, RegisterRequest};
use crate::router::navigate_to;
use crate::state::auth;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: AuthFormState,
    pub mode: RwSignal<AuthMode>,
    pub error: RwSignal<Option<ApiError>>,
    pub notice: RwSignal<Option<String>>,
    pub login_action: Action<LoginRequest, Result<AuthUser, ApiError>>,
    pub register_action: Action<RegisterRequest, Result<String, ApiError>>,
}

impl LoginViewModel {
    pub fn pending(&self) -> Signal<bool> {
        let login = self.login_action.pending();
        let register = self.register_action.pending();
        Signal::derive(move || login.get() || register.get())
    }

    pub fn switch_mode(&self, mode: AuthMode) {
        self.mode.set(mode);
        self.error.set(None);
        self.notice.set(None);
    }

    pub fn submit(&self) {
        if self.pending().get_untracked() {
            return;
        }
        self.error.set(None);
        let result = match self.mode.get_untracked() {
            AuthMode::SignIn => self
                .form
                .login_request()
                .map(|request| self.login_action.dispatch(request)),
            AuthMode::Register => self
                .form
                .register_request()
                .map(|request| self.register_action.dispatch(request)),
        };
        if let Err(err) = result {
            self.error.set(Some(err));
        }
    }
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = AuthFormState::default();
    let mode = create_rw_signal(AuthMode::SignIn);
    let error = create_rw_signal(None::<ApiError>);
    let notice = create_rw_signal(None::<String>);
    let login_action = auth::use_login_action();
    let register_action = auth::use_register_action();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(_) => {
                    error.set(None);
                    form.password.set(String::new());
                    navigate_to("/");
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(message) => {
                    error.set(None);
                    form.password.set(String::new());
                    mode.set(AuthMode::SignIn);
                    notice.set(Some(message));
                }
                Err(err) => error.set(Some(err)),
            }
        }
    });

    LoginViewModel {
        form,
        mode,
        error,
        notice,
        login_action,
        register_action,
    }
}
