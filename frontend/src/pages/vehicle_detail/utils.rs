use crate::api::{ChangeType, HistoryPage, VehicleChangeRecord};
use serde_json::Value;

pub fn change_type_label(change: ChangeType) -> &'static str {
    match change {
        ChangeType::Created => "🆕 Created",
        ChangeType::LocationUpdated => "📍 Location Updated",
        ChangeType::StatusChanged => "🔄 Status Changed",
        ChangeType::MileageUpdated => "🚗 Mileage Updated",
        ChangeType::FuelUpdated => "⛽ Fuel Updated",
        ChangeType::Other => "Changed",
    }
}

/// Strings print bare; objects and arrays print as indented JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRow {
    pub field: String,
    pub old: Option<String>,
    pub new: String,
}

/// One row per field in the new value, paired with the old value when it was recorded.
pub fn change_rows(record: &VehicleChangeRecord) -> Vec<ChangeRow> {
    record
        .new_value
        .iter()
        .map(|(field, new)| ChangeRow {
            field: field.clone(),
            old: record.old_value.get(field).map(format_value),
            new: format_value(new),
        })
        .collect()
}

pub fn next_page(page: HistoryPage, total: i64) -> Option<HistoryPage> {
    let next_offset = page.offset + page.limit;
    (i64::from(next_offset) < total).then_some(HistoryPage {
        offset: next_offset,
        ..page
    })
}

pub fn previous_page(page: HistoryPage) -> Option<HistoryPage> {
    (page.offset > 0).then(|| HistoryPage {
        offset: page.offset.saturating_sub(page.limit),
        ..page
    })
}

pub fn page_summary(page: HistoryPage, shown: usize, total: i64) -> String {
    if shown == 0 {
        return format!("0 of {}", total);
    }
    let first = page.offset + 1;
    let last = page.offset as usize + shown;
    format!("{}–{} of {}", first, last, total)
}
