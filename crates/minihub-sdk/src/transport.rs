//! Transport layer for RPC communication

use async_trait::async_trait;
use minihub_primitives::Address;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::SdkError;

/// Largest batch the fullnode accepts in `sui_multiGetObjects`
pub const MAX_MULTI_GET_BATCH: usize = 50;

/// Default page size for paginated queries
const DEFAULT_PAGE_SIZE: usize = 50;

/// Transport trait for RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an RPC request and get JSON response
    async fn request_json(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, SdkError>;
}

/// Helper to deserialize response
pub fn deserialize_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(|e| SdkError::Serialization(e.to_string()))
}

/// In-memory chain state served by [`MockTransport`]
#[derive(Default)]
struct Ledger {
    objects: HashMap<Address, Value>,
    dynamic_fields: HashMap<(Address, u64), Value>,
    owned: Vec<(Address, Address)>,
    events: Vec<Value>,
}

/// Mock transport for testing.
///
/// Answers the object, dynamic field, owned object, event and move-call
/// methods from an in-memory ledger. Clones share the same state, so a test
/// can keep a handle after passing one to a client.
#[derive(Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    ledger: Arc<Mutex<Ledger>>,
    requests: Arc<AtomicUsize>,
}

impl MockTransport {
    /// Create a new mock transport with an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a canned response for a specific method, bypassing the ledger
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned, which only happens if another thread
    /// panicked while holding the lock.
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), response);
    }

    /// Clear canned responses
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn clear_responses(&self) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .clear();
    }

    /// Number of requests served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Store a shared object. `fields` must be a JSON object; its `id` is filled in.
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn insert_object(&self, id: Address, move_type: &str, fields: Value) {
        let owner = json!({ "Shared": { "initial_shared_version": 1 } });
        let data = object_data(id, move_type, with_uid(id, fields), owner);
        self.ledger
            .lock()
            .expect("MockTransport mutex poisoned")
            .objects
            .insert(id, data);
    }

    /// Store an object owned by `owner`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn insert_owned_object(&self, owner: Address, id: Address, move_type: &str, fields: Value) {
        let owner_json = json!({ "AddressOwner": owner.to_hex() });
        let data = object_data(id, move_type, with_uid(id, fields), owner_json);
        let mut ledger = self.ledger.lock().expect("MockTransport mutex poisoned");
        ledger.objects.insert(id, data);
        ledger.owned.push((owner, id));
    }

    /// Attach a `u64`-keyed dynamic field holding a `value_type` struct to `parent`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn insert_dynamic_field(
        &self,
        parent: Address,
        index: u64,
        value_type: &str,
        fields: Value,
    ) {
        let field_id = dynamic_field_id(parent, index);
        let field_type = format!("0x2::dynamic_field::Field<u64, {}>", value_type);
        let wrapper = json!({
            "id": { "id": field_id.to_hex() },
            "name": index.to_string(),
            "value": { "type": value_type, "fields": fields },
        });
        let data = object_data(
            field_id,
            &field_type,
            wrapper,
            json!({ "ObjectOwner": parent.to_hex() }),
        );
        self.ledger
            .lock()
            .expect("MockTransport mutex poisoned")
            .dynamic_fields
            .insert((parent, index), data);
    }

    /// Append an event to the log
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn push_event(&self, event_type: &str, parsed_json: Value, timestamp_ms: u64) {
        let mut ledger = self.ledger.lock().expect("MockTransport mutex poisoned");
        let seq = ledger.events.len();
        ledger.events.push(json!({
            "id": { "txDigest": format!("mocktx{}", seq), "eventSeq": "0" },
            "packageId": event_type.split("::").next().unwrap_or_default(),
            "transactionModule": "minihub",
            "sender": Address::ZERO.to_hex(),
            "type": event_type,
            "parsedJson": parsed_json,
            "timestampMs": timestamp_ms.to_string(),
        }));
    }

    fn ledger(&self) -> Result<std::sync::MutexGuard<'_, Ledger>, SdkError> {
        self.ledger
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))
    }

    fn get_object(&self, params: &[Value]) -> Result<Value, SdkError> {
        let id = param_address(params, 0)?;
        let ledger = self.ledger()?;
        Ok(object_response(&ledger, id))
    }

    fn multi_get_objects(&self, params: &[Value]) -> Result<Value, SdkError> {
        let ids = params
            .first()
            .and_then(Value::as_array)
            .ok_or_else(|| invalid_params("expected an array of object ids"))?;
        if ids.len() > MAX_MULTI_GET_BATCH {
            return Err(SdkError::Rpc {
                code: -32602,
                message: format!(
                    "Number of object ids exceeds the limit of {}",
                    MAX_MULTI_GET_BATCH
                ),
            });
        }
        let ledger = self.ledger()?;
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            let id = value_address(id)?;
            out.push(object_response(&ledger, id));
        }
        Ok(Value::Array(out))
    }

    fn get_dynamic_field_object(&self, params: &[Value]) -> Result<Value, SdkError> {
        let parent = param_address(params, 0)?;
        let name = params
            .get(1)
            .and_then(|n| n.get("value"))
            .ok_or_else(|| invalid_params("missing dynamic field name"))?;
        let index = match name {
            Value::String(s) => s.parse::<u64>().ok(),
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
        .ok_or_else(|| invalid_params("dynamic field name must be a u64"))?;

        let ledger = self.ledger()?;
        Ok(match ledger.dynamic_fields.get(&(parent, index)) {
            Some(data) => json!({ "data": data }),
            None => json!({
                "error": { "code": "dynamicFieldNotFound", "parent_object_id": parent.to_hex() }
            }),
        })
    }

    fn get_owned_objects(&self, params: &[Value]) -> Result<Value, SdkError> {
        let owner = param_address(params, 0)?;
        let struct_type = params
            .get(1)
            .and_then(|q| q.pointer("/filter/StructType"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let cursor = params.get(2).and_then(Value::as_str).map(Address::from_hex).transpose()?;
        let limit = page_limit(params.get(3));

        let ledger = self.ledger()?;
        let matching: Vec<&Value> = ledger
            .owned
            .iter()
            .filter(|(o, _)| *o == owner)
            .filter_map(|(_, id)| ledger.objects.get(id))
            .filter(|data| match &struct_type {
                Some(t) => data.get("type").and_then(Value::as_str) == Some(t.as_str()),
                None => true,
            })
            .collect();

        let start = match cursor {
            Some(c) => matching
                .iter()
                .position(|d| {
                    d.get("objectId").and_then(Value::as_str) == Some(c.to_hex().as_str())
                })
                .map_or(matching.len(), |p| p + 1),
            None => 0,
        };
        let page: Vec<Value> = matching
            .iter()
            .skip(start)
            .take(limit)
            .map(|data| json!({ "data": data }))
            .collect();
        let has_next_page = start + page.len() < matching.len();
        let next_cursor = page
            .last()
            .and_then(|p| p.pointer("/data/objectId"))
            .cloned()
            .unwrap_or(Value::Null);

        Ok(json!({ "data": page, "nextCursor": next_cursor, "hasNextPage": has_next_page }))
    }

    fn query_events(&self, params: &[Value]) -> Result<Value, SdkError> {
        let event_type = params
            .first()
            .and_then(|f| f.get("MoveEventType"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let cursor = params.get(1).filter(|c| !c.is_null()).cloned();
        let limit = page_limit(params.get(2));
        let descending = params.get(3).and_then(Value::as_bool).unwrap_or(false);

        let ledger = self.ledger()?;
        let mut ordered: Vec<&Value> = ledger
            .events
            .iter()
            .filter(|e| match &event_type {
                Some(t) => e.get("type").and_then(Value::as_str) == Some(t.as_str()),
                None => true,
            })
            .collect();
        if descending {
            ordered.reverse();
        }

        let start = match cursor {
            Some(c) => ordered
                .iter()
                .position(|e| e.get("id") == Some(&c))
                .map_or(ordered.len(), |p| p + 1),
            None => 0,
        };
        let page: Vec<Value> = ordered
            .iter()
            .skip(start)
            .take(limit)
            .map(|e| (*e).clone())
            .collect();
        let has_next_page = start + page.len() < ordered.len();
        let next_cursor = page
            .last()
            .and_then(|e| e.get("id"))
            .cloned()
            .unwrap_or(Value::Null);

        Ok(json!({ "data": page, "nextCursor": next_cursor, "hasNextPage": has_next_page }))
    }

    fn move_call(&self, params: &[Value]) -> Result<Value, SdkError> {
        if params.len() < 8 {
            return Err(invalid_params("unsafe_moveCall expects 8 parameters"));
        }
        let encoded = serde_json::to_vec(&params[1..6])?;
        Ok(json!({
            "txBytes": hex::encode(encoded),
            "gas": [],
            "inputObjects": [],
        }))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, SdkError> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        // Check custom responses first
        let custom_response = self
            .responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();

        if let Some(response) = custom_response {
            return Ok(response);
        }

        match method {
            "sui_getObject" => self.get_object(&params),
            "sui_multiGetObjects" => self.multi_get_objects(&params),
            "suix_getDynamicFieldObject" => self.get_dynamic_field_object(&params),
            "suix_getOwnedObjects" => self.get_owned_objects(&params),
            "suix_queryEvents" => self.query_events(&params),
            "unsafe_moveCall" => self.move_call(&params),
            _ => Err(SdkError::Rpc {
                code: -32601,
                message: format!("Method not found: {}", method),
            }),
        }
    }
}

fn object_data(id: Address, move_type: &str, fields: Value, owner: Value) -> Value {
    json!({
        "objectId": id.to_hex(),
        "version": "1",
        "digest": format!("mock{}", &id.to_hex()[2..10]),
        "type": move_type,
        "owner": owner,
        "content": {
            "dataType": "moveObject",
            "type": move_type,
            "hasPublicTransfer": false,
            "fields": fields,
        },
    })
}

fn with_uid(id: Address, mut fields: Value) -> Value {
    if let Some(map) = fields.as_object_mut() {
        map.insert("id".to_string(), json!({ "id": id.to_hex() }));
    }
    fields
}

fn object_response(ledger: &Ledger, id: Address) -> Value {
    match ledger.objects.get(&id) {
        Some(data) => json!({ "data": data }),
        None => json!({ "error": { "code": "notExists", "object_id": id.to_hex() } }),
    }
}

fn dynamic_field_id(parent: Address, index: u64) -> Address {
    let mut bytes = *parent.as_bytes();
    bytes[0] ^= 0xdf;
    for (b, i) in bytes[24..].iter_mut().zip((index + 1).to_be_bytes()) {
        *b ^= i;
    }
    Address::from_bytes(bytes)
}

fn page_limit(value: Option<&Value>) -> usize {
    value
        .and_then(Value::as_u64)
        .map_or(DEFAULT_PAGE_SIZE, |l| l as usize)
}

fn invalid_params(message: &str) -> SdkError {
    SdkError::Rpc {
        code: -32602,
        message: message.to_string(),
    }
}

fn value_address(value: &Value) -> Result<Address, SdkError> {
    let s = value
        .as_str()
        .ok_or_else(|| invalid_params("object id must be a string"))?;
    Ok(Address::from_hex(s)?)
}

fn param_address(params: &[Value], idx: usize) -> Result<Address, SdkError> {
    params
        .get(idx)
        .ok_or_else(|| invalid_params("missing object id"))
        .and_then(value_address)
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Request timeout applied to every call
    pub const TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, SdkError> {
        let id = self.next_id();
        tracing::debug!(id, method, url = %self.url, "rpc request");

        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| SdkError::Rpc {
            code: -32603,
            message: "No result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
