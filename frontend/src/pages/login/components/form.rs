use crate::{
    components::{error::InlineErrorMessage, layout::SuccessMessage},
    pages::login::{
        utils::AuthMode,
        view_model::LoginViewModel,
    },
};
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

const INPUT_CLASS: &str = "appearance-none relative block w-full px-3 py-2 border border-border placeholder-fg-muted text-fg rounded-md focus:outline-none focus:ring-action-primary-focus sm:text-sm";

#[component]
pub fn AuthForm(vm: LoginViewModel) -> impl IntoView {
    let pending = vm.pending();
    let is_register = move || vm.mode.get() == AuthMode::Register;
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };
    let toggle_mode = move |_| {
        let next = if is_register() {
            AuthMode::SignIn
        } else {
            AuthMode::Register
        };
        vm.switch_mode(next);
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                    {move || if is_register() { "Create an account" } else { "Fleet Admin Login" }}
                </h2>
                {move || vm.notice.get().map(|message| view! { <SuccessMessage message=message /> })}
                <form class="mt-8 space-y-4" on:submit=on_submit>
                    <Show when=is_register>
                        <div>
                            <label for="name" class="sr-only">"Name"</label>
                            <input
                                id="name"
                                name="name"
                                type="text"
                                class=INPUT_CLASS
                                placeholder="Name"
                                prop:value=vm.form.name
                                on:input=move |ev| {
                                    vm.form.name.set(event_target::<HtmlInputElement>(&ev).value());
                                }
                            />
                        </div>
                    </Show>
                    <div>
                        <label for="email" class="sr-only">"Email"</label>
                        <input
                            id="email"
                            name="email"
                            type="email"
                            required
                            class=INPUT_CLASS
                            placeholder="Email"
                            prop:value=vm.form.email
                            on:input=move |ev| {
                                vm.form.email.set(event_target::<HtmlInputElement>(&ev).value());
                            }
                        />
                    </div>
                    <div>
                        <label for="password" class="sr-only">"Password"</label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            required
                            class=INPUT_CLASS
                            placeholder="Password"
                            prop:value=vm.form.password
                            on:input=move |ev| {
                                vm.form.password.set(event_target::<HtmlInputElement>(&ev).value());
                            }
                        />
                    </div>
                    <InlineErrorMessage error=vm.error />
                    <button
                        type="submit"
                        class="w-full flex justify-center py-2 px-4 text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || match (is_register(), pending.get()) {
                            (false, false) => "Login",
                            (false, true) => "Logging in...",
                            (true, false) => "Register",
                            (true, true) => "Registering...",
                        }}
                    </button>
                </form>
                <p class="text-center text-sm text-fg-muted">
                    <button type="button" class="underline" on:click=toggle_mode>
                        {move || if is_register() {
                            "Already have an account? Log in"
                        } else {
                            "No account yet? Register"
                        }}
                    </button>
                </p>
            </div>
        </div>
    }
}
