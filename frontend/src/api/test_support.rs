pub mod mock {
    use crate::api::client::mock::{register_mock, MockResponse, TestResponder};
    use crate::api::ApiError;
    use futures::{channel::oneshot, future::Shared, FutureExt};
    use reqwest::Method;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PATCH: Method = Method::PATCH;

    /// A request the mock server answered.
    #[derive(Clone, Debug)]
    pub struct Recorded {
        pub method: Method,
        pub path: String,
        pub query: Option<String>,
        pub authorization: Option<String>,
        pub body: Option<Value>,
    }

    #[derive(Clone)]
    pub struct MockServer {
        inner: Rc<RefCell<Inner>>,
        base: String,
    }

    struct Inner {
        routes: Vec<Route>,
        received: Vec<Recorded>,
    }

    struct Route {
        method: Method,
        path: String,
        responses: VecDeque<MockResponse>,
    }

    impl MockServer {
        pub async fn start_async() -> Self {
            Self::start()
        }

        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Rc::new(RefCell::new(Inner {
                    routes: Vec::new(),
                    received: Vec::new(),
                })),
                base: format!("http://mock-{}", id),
            }
        }

        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(base_url.clone(), Rc::new(self.clone()));
            base_url
        }

        /// Registers a route. Mocking the same route again queues another response;
        /// the last queued response keeps answering once the queue drains.
        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let response = MockResponse {
                gate: then.gate,
                ..MockResponse::json(
                    then.status.unwrap_or(200),
                    then.body.unwrap_or_else(|| serde_json::json!({})),
                )
            };

            let mut inner = self.inner.borrow_mut();
            let existing = inner
                .routes
                .iter()
                .position(|route| route.method == method && route.path == path);
            match existing {
                Some(index) => inner.routes[index].responses.push_back(response),
                None => inner.routes.push(Route {
                    method,
                    path,
                    responses: VecDeque::from([response]),
                }),
            }
        }

        pub fn hits(&self, method: &Method, path: &str) -> usize {
            self.inner
                .borrow()
                .received
                .iter()
                .filter(|r| r.method == *method && r.path == path)
                .count()
        }

        pub fn received(&self) -> Vec<Recorded> {
            self.inner.borrow().received.clone()
        }
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError> {
            let method = request.method().clone();
            let path = request.url().path().to_string();
            let mut inner = self.inner.borrow_mut();

            inner.received.push(Recorded {
                method: method.clone(),
                path: path.clone(),
                query: request.url().query().map(str::to_string),
                authorization: request
                    .headers()
                    .get(reqwest::header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: request
                    .body()
                    .and_then(|b| b.as_bytes())
                    .and_then(|bytes| serde_json::from_slice(bytes).ok()),
            });

            let route = inner
                .routes
                .iter_mut()
                .find(|route| route.method == method && route.path == path)
                .ok_or_else(|| ApiError::network(format!("No mock for {} {}", method, path)))?;

            if route.responses.len() > 1 {
                Ok(route.responses.pop_front().expect("queued response"))
            } else {
                route
                    .responses
                    .front()
                    .cloned()
                    .ok_or_else(|| ApiError::network("mock route has no response"))
            }
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }
    }

    /// Holds mocked responses back until `release` is called.
    pub struct Hold {
        release: RefCell<Option<oneshot::Sender<()>>>,
        gate: Shared<oneshot::Receiver<()>>,
    }

    impl Hold {
        pub fn new() -> Self {
            let (tx, rx) = oneshot::channel();
            Self {
                release: RefCell::new(Some(tx)),
                gate: rx.shared(),
            }
        }

        pub fn release(&self) {
            if let Some(tx) = self.release.borrow_mut().take() {
                let _ = tx.send(());
            }
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
        gate: Option<Shared<oneshot::Receiver<()>>>,
    }

    impl Then {
        pub fn hold(&mut self, hold: &Hold) -> &mut Self {
            self.gate = Some(hold.gate.clone());
            self
        }

        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }
}

pub mod fixtures {
    use serde_json::{json, Value};

    pub fn vehicle_json(id: &str, status: &str, version: i64) -> Value {
        json!({
            "id": id,
            "vin": format!("VIN{}", id),
            "vehicleName": format!("Truck {}", id),
            "vehicleModel": "Volvo FH",
            "licenseNumber": format!("51A-{}", id),
            "status": status,
            "latitude": 10.7769,
            "longitude": 106.7009,
            "altitude": 5.0,
            "mileage": 1520.5,
            "fuelLevel": 64.0,
            "version": version,
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-02T00:00:00Z"
        })
    }

    pub fn tracked_vehicle_json(id: &str, status: &str) -> Value {
        let mut value = vehicle_json(id, status, 0);
        if let Value::Object(ref mut map) = value {
            map.remove("version");
        }
        value
    }

    pub fn user_json() -> Value {
        json!({
            "id": "u1",
            "email": "ops@fleet.example",
            "name": "Ops Admin",
            "role": "admin"
        })
    }

    pub fn history_json(id: &str) -> Value {
        json!({
            "vehicleId": id,
            "changes": [
                {
                    "vehicleId": id,
                    "vin": format!("VIN{}", id),
                    "changeType": "status_changed",
                    "oldValue": { "status": "available" },
                    "newValue": { "status": "maintenance" },
                    "changedAt": "2025-01-02T10:00:00Z",
                    "version": 2
                },
                {
                    "vehicleId": id,
                    "vin": format!("VIN{}", id),
                    "changeType": "created",
                    "oldValue": {},
                    "newValue": { "vehicleName": format!("Truck {}", id) },
                    "changedAt": "2025-01-01T00:00:00Z",
                    "version": 1
                }
            ],
            "total": 2
        })
    }
}
