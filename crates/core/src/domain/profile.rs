use serde::{Deserialize, Serialize};

/// The single customer profile for a session. The payment descriptor is
/// stored already masked; the full instrument never enters the process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub address: String,
    pub payment: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            address: "123 Main St, City, USA".to_string(),
            payment: "****-1234 (masked for safety)".to_string(),
        }
    }
}
