use crate::state::auth::{self, use_auth};
use leptos::*;

const NAV_LINK_CLASS: &str =
    "text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover";

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let user_label = move || {
        auth.get()
            .user
            .map(|user| user.display_name().to_string())
            .unwrap_or_default()
    };
    let logout_action = auth::use_logout_action();
    let on_logout = move |_| logout_action.dispatch(());

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-6">
                        <h1 class="text-xl font-semibold text-fg">
                            "Management Vehicle Tracking Application"
                        </h1>
                        <nav class="hidden lg:flex space-x-4">
                            <a href="/" class=NAV_LINK_CLASS>"Fleet"</a>
                            <a href="/vehicle-svc" class=NAV_LINK_CLASS>"Vehicle Service"</a>
                        </nav>
                    </div>
                    <div class="flex items-center gap-3">
                        <span class="text-sm text-fg-muted user-info">{user_label}</span>
                        <button on:click=on_logout class=NAV_LINK_CLASS>
                            "Logout"
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col justify-center items-center p-8 gap-2">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
            {label.map(|text| view! { <p class="text-sm text-fg-muted">{text}</p> })}
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{admin_user, provide_auth};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_shows_signed_in_email_and_logout() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_user()));
            view! { <Header /> }
        });
        assert!(html.contains("ops@fleet.example"));
        assert!(html.contains("Logout"));
        assert!(html.contains("/vehicle-svc"));
    }

    #[test]
    fn layout_renders_children() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_user()));
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
    }

    #[test]
    fn spinner_renders_optional_label() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner label="Loading vehicles..." />
                    <SuccessMessage message="Saved" />
                </div>
            }
        });
        assert!(html.contains("animate-spin"));
        assert!(html.contains("Loading vehicles..."));
        assert!(html.contains("Saved"));
    }
}
