use crate::pages::login::{components::form::AuthForm, view_model::use_login_view_model};
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    view! {
        <Title text="Login | Fleet Admin"/>
        <AuthForm vm=vm />
    }
}
