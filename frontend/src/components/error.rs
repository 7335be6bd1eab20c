use crate::api::ApiError;
use leptos::*;

#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || error.get().map(|e| {
                    if let Some(items) = detail_messages(&e) {
                        return view! {
                            <ul class="list-disc list-inside text-sm">
                                {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
                            </ul>
                        }.into_view();
                    }
                    if e.code != "UNKNOWN" && !e.code.is_empty() {
                        view! { <div class="text-xs opacity-75">{"Code: "}{e.code.clone()}</div> }.into_view()
                    } else {
                        ().into_view()
                    }
                }).unwrap_or_else(|| ().into_view())}
            </div>
        </Show>
    }
}

/// Field-level messages from a validation failure, if the service sent any.
fn detail_messages(error: &ApiError) -> Option<Vec<String>> {
    if error.code != "VALIDATION_ERROR" {
        return None;
    }
    let details = error.details.as_ref()?;
    let items = details
        .get("errors")
        .and_then(|v| v.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|err| err.as_str().map(str::to_string))
                .collect::<Vec<_>>()
        })
        .or_else(|| {
            details.as_object().map(|fields| {
                fields
                    .iter()
                    .map(|(field, message)| match message.as_str() {
                        Some(text) => format!("{}: {}", field, text),
                        None => format!("{}: {}", field, message),
                    })
                    .collect()
            })
        })?;
    (!items.is_empty()).then_some(items)
}
