//! RPC wire types

use std::fmt;
use std::str::FromStr;

use minihub_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Network the fullnode endpoint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network
    Mainnet,
    /// Public test network
    #[default]
    Testnet,
    /// Developer network, wiped regularly
    Devnet,
    /// Local node started with `sui start`
    Localnet,
}

impl Network {
    /// All known networks
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Devnet,
        Network::Localnet,
    ];

    /// Public fullnode JSON-RPC URL
    pub fn fullnode_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://fullnode.mainnet.sui.io:443",
            Network::Testnet => "https://fullnode.testnet.sui.io:443",
            Network::Devnet => "https://fullnode.devnet.sui.io:443",
            Network::Localnet => "http://127.0.0.1:9000",
        }
    }

    /// Lowercase name as used in the config file
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|n| n.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown network '{}' (expected mainnet, testnet, devnet or localnet)", s)
            })
    }
}

/// Which parts of an object the node should return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDataOptions {
    /// Include the Move type
    pub show_type: bool,
    /// Include the decoded Move fields
    pub show_content: bool,
    /// Include ownership information
    pub show_owner: bool,
}

impl ObjectDataOptions {
    /// Type, content and owner
    pub fn full() -> Self {
        Self {
            show_type: true,
            show_content: true,
            show_owner: true,
        }
    }
}

impl Default for ObjectDataOptions {
    fn default() -> Self {
        Self::full()
    }
}

/// Response to `sui_getObject` and friends
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectResponse {
    /// Object data when the object exists
    #[serde(default)]
    pub data: Option<ObjectData>,
    /// Error when it does not
    #[serde(default)]
    pub error: Option<ObjectResponseError>,
}

impl ObjectResponse {
    /// The node reported no such object (or it was deleted)
    pub fn is_not_found(&self) -> bool {
        self.data.is_none()
    }

    /// Take the object data, if any
    pub fn into_data(self) -> Option<ObjectData> {
        self.data
    }
}

/// Error entry of an object response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectResponseError {
    /// Error code, e.g. `notExists` or `deleted`
    pub code: String,
    /// Object the error refers to
    #[serde(default)]
    pub object_id: Option<String>,
}

/// Object data returned by the node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    /// Object ID
    pub object_id: Address,
    /// Object version
    #[serde(default)]
    pub version: Option<String>,
    /// Object digest
    #[serde(default)]
    pub digest: Option<String>,
    /// Move type
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
    /// Owner (address, shared or immutable)
    #[serde(default)]
    pub owner: Option<Value>,
    /// Decoded content
    #[serde(default)]
    pub content: Option<ObjectContent>,
}

impl ObjectData {
    /// Move type from the data or the content block
    pub fn move_type(&self) -> Option<&str> {
        self.type_
            .as_deref()
            .or_else(|| self.content.as_ref().and_then(|c| c.type_.as_deref()))
    }

    /// Decoded Move fields of a Move object
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.content.as_ref().and_then(|c| c.fields.as_object())
    }
}

/// Content block of an object
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    /// `moveObject` or `package`
    pub data_type: String,
    /// Move type
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
    /// Decoded fields
    #[serde(default)]
    pub fields: Value,
}

/// Name of a dynamic field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicFieldName {
    /// Move type of the key
    #[serde(rename = "type")]
    pub type_: String,
    /// Key value
    pub value: Value,
}

impl DynamicFieldName {
    /// `u64` keyed dynamic field
    pub fn u64(value: u64) -> Self {
        Self {
            type_: "u64".to_string(),
            value: Value::String(value.to_string()),
        }
    }
}

/// Object filter for owned-object queries
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObjectFilter {
    /// Fully qualified struct type
    StructType(String),
    /// Objects of one package
    Package(Address),
}

/// Query for `suix_getOwnedObjects`
#[derive(Debug, Clone, Serialize)]
pub struct OwnedObjectsQuery {
    /// Optional filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ObjectFilter>,
    /// Data options
    pub options: ObjectDataOptions,
}

/// Paginated result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>, C: Deserialize<'de>"))]
pub struct Page<T, C> {
    /// Items of this page
    pub data: Vec<T>,
    /// Cursor for the next page
    #[serde(default)]
    pub next_cursor: Option<C>,
    /// Whether more pages exist
    #[serde(default)]
    pub has_next_page: bool,
}

/// Event identifier, also used as the event cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventId {
    /// Transaction digest
    pub tx_digest: String,
    /// Sequence within the transaction
    pub event_seq: String,
}

/// Event as returned by `suix_queryEvents`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEvent {
    /// Event id
    pub id: EventId,
    /// Emitting package
    #[serde(default)]
    pub package_id: Option<String>,
    /// Emitting module
    #[serde(default)]
    pub transaction_module: Option<String>,
    /// Transaction sender
    #[serde(default)]
    pub sender: Option<String>,
    /// Move event type
    #[serde(rename = "type")]
    pub type_: String,
    /// Decoded event payload
    #[serde(default)]
    pub parsed_json: Value,
    /// Emission time in milliseconds (decimal string)
    #[serde(default)]
    pub timestamp_ms: Option<String>,
}

impl ChainEvent {
    /// Emission time, if the node reported one
    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp_ms.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Page of events
pub type EventPage = Page<ChainEvent, EventId>;

/// Filter for `suix_queryEvents`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EventFilter {
    /// Fully qualified Move event type
    MoveEventType(String),
    /// All events emitted by one module
    MoveModule {
        /// Package id
        package: Address,
        /// Module name
        module: String,
    },
    /// Events from transactions sent by an address
    Sender(Address),
}

/// Unsigned transaction bytes returned by `unsafe_moveCall`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBytes {
    /// BCS transaction data, base64
    pub tx_bytes: String,
    /// Gas coin chosen by the node
    #[serde(default)]
    pub gas: Vec<Value>,
    /// Objects the transaction reads or writes
    #[serde(default)]
    pub input_objects: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_parse_and_url() {
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(Network::Localnet.fullnode_url(), "http://127.0.0.1:9000");
        assert!("moonnet".parse::<Network>().is_err());
        assert_eq!(serde_json::to_string(&Network::Devnet).unwrap(), "\"devnet\"");
    }

    #[test]
    fn test_object_response_not_found() {
        let resp: ObjectResponse = serde_json::from_value(json!({
            "error": { "code": "notExists", "object_id": "0x1" }
        }))
        .unwrap();
        assert!(resp.is_not_found());
        assert_eq!(resp.error.unwrap().code, "notExists");
    }

    #[test]
    fn test_object_data_fields() {
        let resp: ObjectResponse = serde_json::from_value(json!({
            "data": {
                "objectId": "0x2",
                "version": "7",
                "type": "0xabc::minihub::Job",
                "content": {
                    "dataType": "moveObject",
                    "type": "0xabc::minihub::Job",
                    "fields": { "title": "Engineer" }
                }
            }
        }))
        .unwrap();
        let data = resp.into_data().unwrap();
        assert_eq!(data.move_type(), Some("0xabc::minihub::Job"));
        assert_eq!(data.fields().unwrap()["title"], "Engineer");
    }

    #[test]
    fn test_event_filter_serialize() {
        let filter = EventFilter::MoveEventType("0x1::minihub::JobPosted".to_string());
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({ "MoveEventType": "0x1::minihub::JobPosted" })
        );
    }

    #[test]
    fn test_owned_query_serialize() {
        let query = OwnedObjectsQuery {
            filter: Some(ObjectFilter::StructType("0x1::minihub::EmployerCap".to_string())),
            options: ObjectDataOptions::full(),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["filter"]["StructType"], "0x1::minihub::EmployerCap");
        assert_eq!(json["options"]["showContent"], true);
    }

    #[test]
    fn test_dynamic_field_name_u64() {
        let name = DynamicFieldName::u64(3);
        assert_eq!(
            serde_json::to_value(&name).unwrap(),
            json!({ "type": "u64", "value": "3" })
        );
    }
}
