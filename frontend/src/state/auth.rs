use crate::{
    api::{
        credentials::token_expired, use_api, ApiError, AuthApi, AuthUser, Credentials,
        LoginRequest, RegisterRequest,
    },
    query::{use_query_client, QueryClient},
    utils::time::now_secs,
};
use leptos::*;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn restoring() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn signed_in(user: AuthUser, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Signs out and drops every cached read whenever a service rejects the stored session.
fn watch_session_expiry(
    credentials: &Credentials,
    queries: QueryClient,
    set_auth_state: WriteSignal<AuthState>,
) {
    credentials.on_expired(move || {
        log::info!("session rejected by a service; signing out");
        queries.clear();
        set_auth_state.try_set(AuthState::signed_out());
    });
}

fn create_auth_context(api: &AuthApi, queries: QueryClient) -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::restoring());
    watch_session_expiry(api.credentials(), queries, set_auth_state);
    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_api().auth;
    let ctx = create_auth_context(&api, use_query_client());
    provide_context::<AuthContext>(ctx);

    let set_auth_state = ctx.1;
    spawn_local(async move {
        if let Err(err) = restore_session(&api, set_auth_state).await {
            log::warn!("stored session could not be verified: {}", err);
        }
    });

    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// Rebuilds the session from the persisted token. Missing or locally expired tokens skip
/// the network round trip. If the stored token changes while verification is in flight
/// (a login or logout won the race), the outcome is dropped.
pub async fn restore_session(
    api: &AuthApi,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let credentials = api.credentials();
    let Some(token) = credentials.token() else {
        set_auth_state.try_set(AuthState::signed_out());
        return Ok(());
    };
    if token_expired(&token, now_secs()) {
        log::info!("stored token has expired");
        credentials.clear();
        set_auth_state.try_set(AuthState::signed_out());
        return Ok(());
    }

    let outcome = api.verify(&token).await;
    if credentials.token().as_deref() != Some(token.as_str()) {
        log::debug!("session changed while verifying the stored token; keeping the new one");
        return outcome.map(drop);
    }
    match outcome {
        Ok(user) => {
            set_auth_state.try_set(AuthState::signed_in(user, token));
            Ok(())
        }
        Err(err) => {
            credentials.clear();
            set_auth_state.try_set(AuthState::signed_out());
            Err(err)
        }
    }
}

/// Signs in and persists the token. A failed attempt leaves the current session as it was.
pub async fn login_request(
    request: LoginRequest,
    api: &AuthApi,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<AuthUser, ApiError> {
    let response = api.login(&request).await?;
    if let Err(err) = api.credentials().persist(&response.token) {
        log::warn!("signed in but the token was not persisted: {}", err);
    }
    let user = response.user;
    set_auth_state.set(AuthState::signed_in(user.clone(), response.token));
    Ok(user)
}

/// Creates an account. Does not sign in; returns the service's confirmation message.
pub async fn register_request(request: RegisterRequest, api: &AuthApi) -> Result<String, ApiError> {
    api.register(&request).await.map(|response| response.message)
}

pub fn logout(credentials: &Credentials, set_auth_state: WriteSignal<AuthState>) {
    credentials.clear();
    set_auth_state.set(AuthState::signed_out());
}

pub fn use_login_action() -> Action<LoginRequest, Result<AuthUser, ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_api().auth;

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { login_request(payload, &api, set_auth).await }
    })
}

pub fn use_register_action() -> Action<RegisterRequest, Result<String, ApiError>> {
    let api = use_api().auth;

    create_action(move |request: &RegisterRequest| {
        let payload = request.clone();
        let api = api.clone();
        async move { register_request(payload, &api).await }
    })
}

/// Signing out also drops every cached read so the next user starts cold.
pub fn use_logout_action() -> Action<(), ()> {
    let (_auth, set_auth) = use_auth();
    let credentials = use_api().credentials;
    let queries = use_query_client();

    create_action(move |_: &()| {
        logout(&credentials, set_auth);
        queries.clear();
        async {}
    })
}
