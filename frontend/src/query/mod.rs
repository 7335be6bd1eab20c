mod client;
mod hooks;
mod key;

pub use client::QueryClient;
#[cfg(test)]
pub use client::QueryOptions;
pub use hooks::{provide_query_client, use_mutation, use_query, use_query_client, QueryHandle};
pub use key::keys;
