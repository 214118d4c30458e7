use jiff::Timestamp;
use uuid::Uuid;

/// Stored token row without the hash. The raw token never appears here.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiTokenMetadata {
    pub uuid: Uuid,
    pub name: String,
    pub capabilities: Vec<String>,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewApiToken {
    pub uuid: Uuid,
    pub name: String,
    pub capabilities: Vec<String>,
    pub token_hash: String,
}

/// A freshly issued token together with its stored metadata. The `token`
/// field is the only place the raw value ever exists.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedApiToken {
    pub token: String,
    pub metadata: ApiTokenMetadata,
}
