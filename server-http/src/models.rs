use serde::{Deserialize, Serialize};

// === KV endpoint models ===

#[derive(Deserialize)]
pub struct SetParams {
    pub key: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct GetParams {
    pub key: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}
