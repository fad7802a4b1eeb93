use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionCreatedResponse {
    pub id: i64,
}
