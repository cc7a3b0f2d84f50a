//! SuiClient - typed JSON-RPC client

use minihub_primitives::{Address, ObjectId};
use serde_json::Value;

use crate::transport::{deserialize_response, Transport, MAX_MULTI_GET_BATCH};
use crate::tx_builder::MoveCall;
use crate::types::{
    DynamicFieldName, EventFilter, EventId, EventPage, ObjectDataOptions, ObjectResponse,
    OwnedObjectsQuery, Page, TransactionBytes,
};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Page of owned objects
pub type OwnedObjectsPage = Page<ObjectResponse, ObjectId>;

/// Fullnode client for RPC communication
pub struct SuiClient {
    transport: Box<dyn Transport>,
}

impl SuiClient {
    /// Create a client talking JSON-RPC over HTTP to `url`
    #[cfg(feature = "http")]
    pub fn connect(url: &str) -> Self {
        Self {
            transport: Box::new(HttpTransport::new(url)),
        }
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Helper method to make RPC request and deserialize
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, SdkError> {
        let value = self.transport.request_json(method, params).await?;
        deserialize_response(value)
    }

    // ==================== Objects ====================

    /// Fetch one object with type and content
    pub async fn get_object(&self, id: &ObjectId) -> Result<ObjectResponse, SdkError> {
        self.request(
            "sui_getObject",
            vec![
                Value::String(id.to_hex()),
                serde_json::to_value(ObjectDataOptions::full())?,
            ],
        )
        .await
    }

    /// Fetch many objects, in input order. Requests are split into batches
    /// the node accepts.
    pub async fn multi_get_objects(
        &self,
        ids: &[ObjectId],
    ) -> Result<Vec<ObjectResponse>, SdkError> {
        let mut out = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_MULTI_GET_BATCH) {
            let batch: Vec<Value> = chunk.iter().map(|id| Value::String(id.to_hex())).collect();
            let responses: Vec<ObjectResponse> = self
                .request(
                    "sui_multiGetObjects",
                    vec![
                        Value::Array(batch),
                        serde_json::to_value(ObjectDataOptions::full())?,
                    ],
                )
                .await?;
            if responses.len() != chunk.len() {
                return Err(SdkError::Serialization(format!(
                    "expected {} objects, node returned {}",
                    chunk.len(),
                    responses.len()
                )));
            }
            out.extend(responses);
        }
        Ok(out)
    }

    /// Fetch a dynamic field of `parent`
    pub async fn get_dynamic_field_object(
        &self,
        parent: &ObjectId,
        name: DynamicFieldName,
    ) -> Result<ObjectResponse, SdkError> {
        self.request(
            "suix_getDynamicFieldObject",
            vec![Value::String(parent.to_hex()), serde_json::to_value(name)?],
        )
        .await
    }

    /// One page of objects owned by `owner`
    pub async fn get_owned_objects(
        &self,
        owner: &Address,
        query: &OwnedObjectsQuery,
        cursor: Option<ObjectId>,
        limit: Option<usize>,
    ) -> Result<OwnedObjectsPage, SdkError> {
        self.request(
            "suix_getOwnedObjects",
            vec![
                Value::String(owner.to_hex()),
                serde_json::to_value(query)?,
                cursor.map_or(Value::Null, |c| Value::String(c.to_hex())),
                limit.map_or(Value::Null, |l| Value::from(l as u64)),
            ],
        )
        .await
    }

    /// All objects owned by `owner`, following cursors
    pub async fn get_all_owned_objects(
        &self,
        owner: &Address,
        query: &OwnedObjectsQuery,
    ) -> Result<Vec<ObjectResponse>, SdkError> {
        let mut out = Vec::new();
        let mut cursor = None;
        loop {
            let page = self.get_owned_objects(owner, query, cursor, None).await?;
            out.extend(page.data);
            match page.next_cursor {
                Some(next) if page.has_next_page => cursor = Some(next),
                _ => break,
            }
        }
        Ok(out)
    }

    // ==================== Events ====================

    /// One page of events matching `filter`
    pub async fn query_events(
        &self,
        filter: &EventFilter,
        cursor: Option<EventId>,
        limit: Option<usize>,
        descending: bool,
    ) -> Result<EventPage, SdkError> {
        self.request(
            "suix_queryEvents",
            vec![
                serde_json::to_value(filter)?,
                serde_json::to_value(cursor)?,
                limit.map_or(Value::Null, |l| Value::from(l as u64)),
                Value::Bool(descending),
            ],
        )
        .await
    }

    // ==================== Transactions ====================

    /// Ask the node to assemble an unsigned transaction for `call`
    pub async fn move_call(
        &self,
        call: &MoveCall,
        sender: &Address,
        gas: Option<ObjectId>,
        gas_budget: u64,
    ) -> Result<TransactionBytes, SdkError> {
        self.request("unsafe_moveCall", call.to_rpc_params(sender, gas, gas_budget))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use crate::tx_builder::{MoveCallBuilder, DEFAULT_GAS_BUDGET};
    use crate::types::ObjectFilter;
    use serde_json::json;

    fn addr(s: &str) -> Address {
        Address::from_hex(s).unwrap()
    }

    #[tokio::test]
    async fn test_get_object_found_and_missing() {
        let mock = MockTransport::new();
        mock.insert_object(addr("0x10"), "0x1::minihub::Job", json!({ "title": "Dev" }));
        let client = SuiClient::with_transport(mock);

        let found = client.get_object(&addr("0x10")).await.unwrap();
        assert_eq!(found.data.unwrap().object_id, addr("0x10"));

        let missing = client.get_object(&addr("0x11")).await.unwrap();
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_multi_get_chunks_and_preserves_order() {
        let mock = MockTransport::new();
        let ids: Vec<Address> = (1..=120u64).map(|i| addr(&format!("0x{:x}", i))).collect();
        for id in &ids {
            mock.insert_object(*id, "0x1::minihub::Job", json!({}));
        }
        let client = SuiClient::with_transport(mock.clone());

        let responses = client.multi_get_objects(&ids).await.unwrap();
        assert_eq!(responses.len(), 120);
        assert_eq!(mock.request_count(), 3);
        for (id, resp) in ids.iter().zip(&responses) {
            assert_eq!(resp.data.as_ref().unwrap().object_id, *id);
        }
    }

    #[tokio::test]
    async fn test_multi_get_empty_makes_no_request() {
        let mock = MockTransport::new();
        let client = SuiClient::with_transport(mock.clone());
        assert!(client.multi_get_objects(&[]).await.unwrap().is_empty());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_get_all_owned_objects_follows_pages() {
        let mock = MockTransport::new();
        let owner = addr("0xaa");
        for i in 0..75u64 {
            mock.insert_owned_object(
                owner,
                addr(&format!("0x{:x}", 0x1000 + i)),
                "0x1::minihub::EmployerCap",
                json!({ "job_id": "0x10" }),
            );
        }
        mock.insert_owned_object(owner, addr("0x9999"), "0x1::minihub::UserProfile", json!({}));
        let client = SuiClient::with_transport(mock.clone());

        let query = OwnedObjectsQuery {
            filter: Some(ObjectFilter::StructType("0x1::minihub::EmployerCap".to_string())),
            options: ObjectDataOptions::full(),
        };
        let all = client.get_all_owned_objects(&owner, &query).await.unwrap();
        assert_eq!(all.len(), 75);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_query_events_descending() {
        let mock = MockTransport::new();
        mock.push_event("0x1::minihub::JobPosted", json!({ "n": 1 }), 10);
        mock.push_event("0x1::minihub::JobPosted", json!({ "n": 2 }), 20);
        mock.push_event("0x1::minihub::CandidateHired", json!({ "n": 3 }), 30);
        let client = SuiClient::with_transport(mock);

        let filter = EventFilter::MoveEventType("0x1::minihub::JobPosted".to_string());
        let page = client.query_events(&filter, None, Some(10), true).await.unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].parsed_json["n"], 2);
        assert_eq!(page.data[0].timestamp(), Some(20));
        assert!(!page.has_next_page);
    }

    #[tokio::test]
    async fn test_move_call_returns_tx_bytes() {
        let client = SuiClient::with_transport(MockTransport::new());
        let call = MoveCallBuilder::new(addr("0xabc"))
            .function("post_job")
            .pure_u64(1)
            .build()
            .unwrap();
        let bytes = client
            .move_call(&call, &addr("0x5"), None, DEFAULT_GAS_BUDGET)
            .await
            .unwrap();
        assert!(!bytes.tx_bytes.is_empty());
    }

    #[tokio::test]
    async fn test_rpc_error_propagates() {
        let mock = MockTransport::new();
        mock.set_response("sui_getObject", json!("not an object response"));
        let client = SuiClient::with_transport(mock);
        let result = client.get_object(&addr("0x1")).await;
        assert!(matches!(result, Err(SdkError::Serialization(_))));
    }
}
