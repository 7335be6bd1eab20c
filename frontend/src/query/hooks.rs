use leptos::*;
use std::{future::Future, rc::Rc};

use super::{client::QueryClient, key::QueryKey};
use crate::api::ApiError;

pub fn provide_query_client(client: QueryClient) {
    provide_context(client);
}

pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>().unwrap_or_else(|| {
        let client = QueryClient::new();
        provide_context(client.clone());
        client
    })
}

/// Reactive view of one cached read. Keeps showing the previous value while a refetch runs.
pub struct QueryHandle<T: 'static> {
    resource: Resource<u64, Result<T, ApiError>>,
    revision: RwSignal<u64>,
    key: StoredValue<QueryKey>,
    client: StoredValue<QueryClient>,
}

impl<T: 'static> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for QueryHandle<T> {}

impl<T: Clone + 'static> QueryHandle<T> {
    pub fn data(&self) -> Option<T> {
        self.resource.get().and_then(Result::ok)
    }

    pub fn error(&self) -> Option<ApiError> {
        self.resource.get().and_then(Result::err)
    }

    pub fn result(&self) -> Option<Result<T, ApiError>> {
        self.resource.get()
    }

    pub fn is_loading(&self) -> bool {
        self.resource.loading().get()
    }

    pub fn refetch(&self) {
        self.client
            .with_value(|client| client.invalidate(&self.key.get_value()));
        self.revision.update(|rev| *rev += 1);
    }
}

/// Reads `key` through the shared cache. The subscription lives as long as the calling
/// component; a background refetch after invalidation re-runs the resource.
pub fn use_query<T, F, Fut>(key: QueryKey, fetcher: F) -> QueryHandle<T>
where
    T: Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let revision = create_rw_signal(0u64);

    let subscription = client.subscribe(&key, move || {
        revision.try_update(|rev| *rev += 1);
    });
    on_cleanup(move || drop(subscription));

    let fetcher = Rc::new(fetcher);
    let resource_client = client.clone();
    let resource_key = key.clone();
    let resource = create_local_resource(
        move || revision.get(),
        move |_| {
            let client = resource_client.clone();
            let key = resource_key.clone();
            let fetcher = fetcher.clone();
            async move { client.fetch(key, move || fetcher()).await }
        },
    );

    QueryHandle {
        resource,
        revision,
        key: store_value(key),
        client: store_value(client),
    }
}

/// Wraps a write in an action that invalidates `invalidates` after it succeeds.
pub fn use_mutation<I, T, F, Fut>(
    mutation: F,
    invalidates: Vec<QueryKey>,
) -> Action<I, Result<T, ApiError>>
where
    I: 'static,
    T: 'static,
    F: Fn(&I) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_query_client();
    let invalidates = Rc::new(invalidates);
    create_action(move |input: &I| {
        let request = mutation(input);
        let client = client.clone();
        let invalidates = invalidates.clone();
        async move { client.mutate(request, &invalidates).await }
    })
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::query::{keys, QueryOptions};
    use crate::test_support::ssr::with_runtime;

    fn idle_client() -> QueryClient {
        QueryClient::with_spawner(QueryOptions::default(), Rc::new(|_: futures::future::LocalBoxFuture<'static, ()>| {}))
    }

    #[test]
    fn use_query_client_prefers_the_provided_client() {
        with_runtime(|| {
            let client = idle_client();
            provide_query_client(client.clone());
            client.set_data(&keys::tracked_vehicles(), 3u32);
            assert_eq!(
                use_query_client().get_data::<u32>(&keys::tracked_vehicles()),
                Some(3)
            );
        });
    }

    #[test]
    fn use_query_subscribes_each_component_to_its_key() {
        with_runtime(|| {
            let client = idle_client();
            provide_query_client(client.clone());
            let key = keys::registry_vehicle("5");

            let _first = use_query(key.clone(), || async { Ok::<u32, ApiError>(1) });
            let _second = use_query(key.clone(), || async { Ok::<u32, ApiError>(1) });

            assert_eq!(client.subscriber_count(&key), 2);
            assert_eq!(client.subscriber_count(&keys::registry_vehicles()), 0);
        });
    }
}
