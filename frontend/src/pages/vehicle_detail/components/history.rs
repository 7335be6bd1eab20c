use crate::{
    api::{HistoryPage, VehicleChangeHistory, VehicleChangeRecord},
    components::{error::InlineErrorMessage, layout::LoadingSpinner},
    pages::vehicle_detail::{
        utils::{change_rows, change_type_label, next_page, page_summary, previous_page},
        view_model::use_vehicle_history,
    },
    utils::time::format_change_time,
};
use leptos::*;

#[component]
pub fn HistoryEntry(record: VehicleChangeRecord) -> impl IntoView {
    let rows = change_rows(&record);
    view! {
        <div class="history-item flex gap-3">
            <div class="history-marker mt-1 h-3 w-3 rounded-full bg-action-primary-bg"></div>
            <div class="history-content flex-1">
                <div class="history-header flex justify-between text-sm">
                    <span class="change-type font-semibold">{change_type_label(record.change_type)}</span>
                    <span class="change-time text-fg-muted">{format_change_time(&record.changed_at)}</span>
                </div>
                <div class="change-details mt-2 text-sm">
                    <Show when={let empty = rows.is_empty(); move || !empty}>
                        <div class="change-values">
                            <h4 class="font-medium">"Changes:"</h4>
                            {rows
                                .clone()
                                .into_iter()
                                .map(|row| view! {
                                    <div class="change-value-item">
                                        <strong>{row.field}":"</strong>
                                        <div class="value-comparison">
                                            {row.old.map(|old| view! { <span class="old-value">{old}</span> })}
                                            <span class="arrow">" → "</span>
                                            <span class="new-value">{row.new}</span>
                                        </div>
                                    </div>
                                })
                                .collect_view()}
                        </div>
                    </Show>
                    <div class="version-info text-xs text-fg-muted">"Version: "{record.version}</div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn HistoryTimeline(history: VehicleChangeHistory) -> impl IntoView {
    if history.changes.is_empty() {
        return view! { <p class="no-history text-fg-muted">"No change history available"</p> }
            .into_view();
    }
    view! {
        <div class="history-timeline space-y-4">
            {history
                .changes
                .into_iter()
                .map(|record| view! { <HistoryEntry record=record /> })
                .collect_view()}
        </div>
    }
    .into_view()
}

/// One page of history; the parent re-creates it when the window moves.
#[component]
pub fn HistoryPageView(
    id: String,
    page: HistoryPage,
    on_page: WriteSignal<HistoryPage>,
) -> impl IntoView {
    let history = use_vehicle_history(id, page);
    view! {
        <InlineErrorMessage error=Signal::derive(move || history.error()) />
        {move || match history.data() {
            Some(data) => {
                let total = data.total;
                let shown = data.changes.len();
                let older = next_page(page, total);
                let newer = previous_page(page);
                view! {
                    <HistoryTimeline history=data />
                    <div class="mt-4 flex items-center justify-between text-sm text-fg-muted">
                        <span>{page_summary(page, shown, total)}</span>
                        <div class="space-x-2">
                            <button
                                class="underline disabled:opacity-50"
                                disabled=newer.is_none()
                                on:click=move |_| if let Some(p) = newer { on_page.set(p) }
                            >
                                "Newer"
                            </button>
                            <button
                                class="underline disabled:opacity-50"
                                disabled=older.is_none()
                                on:click=move |_| if let Some(p) = older { on_page.set(p) }
                            >
                                "Older"
                            </button>
                        </div>
                    </div>
                }
                .into_view()
            }
            None if history.error().is_none() => {
                view! { <LoadingSpinner label="Loading history..." /> }.into_view()
            }
            None => ().into_view(),
        }}
    }
}

#[component]
pub fn HistorySection(id: String) -> impl IntoView {
    let (page, set_page) = create_signal(HistoryPage::default());
    view! {
        <div class="history-section mt-8">
            <h2 class="text-xl font-semibold text-fg mb-4">"Change History"</h2>
            {move || {
                let id = id.clone();
                let page = page.get();
                view! { <HistoryPageView id=id page=page on_page=set_page /> }
            }}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::test_support::fixtures::history_json;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn timeline_renders_labels_and_value_changes() {
        let history: VehicleChangeHistory = serde_json::from_value(history_json("7")).unwrap();
        let html = render_to_string(move || view! { <HistoryTimeline history=history /> });
        assert!(html.contains("Status Changed"));
        assert!(html.contains("available"));
        assert!(html.contains("maintenance"));
        assert!(html.contains("Version: "));
        assert!(html.contains("2025-01-02 10:00:00 UTC"));
    }

    #[test]
    fn empty_history_renders_placeholder() {
        let history: VehicleChangeHistory = serde_json::from_value(serde_json::json!({
            "vehicleId": "7",
            "changes": [],
            "total": 0
        }))
        .unwrap();
        let html = render_to_string(move || view! { <HistoryTimeline history=history /> });
        assert!(html.contains("No change history available"));
    }
}
