use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::core::error::GatewayError;

pub const DEFAULT_TOP_K: u32 = 5;

/// Body POSTed to the vision endpoint. Unset fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentificationRequest {
    pub image_url: Option<String>,
    pub image_data: Option<String>,
    pub category: Option<String>,
    pub top_k: Number,
}

impl Default for IdentificationRequest {
    fn default() -> Self {
        Self {
            image_url: None,
            image_data: None,
            category: None,
            top_k: Number::from(DEFAULT_TOP_K),
        }
    }
}

/// Wire form of a caller-supplied `top_k`: whole values go out as integers
/// (`3.0` is sent as `3`), anything else as the float it was.
pub fn top_k_number(value: f64) -> Option<Number> {
    if value.fract() == 0.0 && value >= 0.0 && value <= u64::MAX as f64 {
        Some(Number::from(value as u64))
    } else {
        Number::from_f64(value)
    }
}

/// What the caller receives on success: upstream's `source` and `results`,
/// untouched and in that order. Fields upstream omitted stay omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IdentificationResult(Map<String, Value>);

impl IdentificationResult {
    /// Re-wrap an upstream body. The body is trusted; only a JSON `null`,
    /// which has no fields to read, is refused.
    pub fn from_upstream(body: Value) -> Result<Self, GatewayError> {
        let mut out = Map::new();
        match body {
            Value::Null => return Err(GatewayError::NullBody),
            Value::Object(mut fields) => {
                for key in ["source", "results"] {
                    if let Some(v) = fields.remove(key) {
                        out.insert(key.to_string(), v);
                    }
                }
            }
            _ => {}
        }
        Ok(Self(out))
    }

    pub fn source(&self) -> Option<&Value> {
        self.0.get("source")
    }

    pub fn results(&self) -> Option<&Value> {
        self.0.get("results")
    }
}

/// Seam between the tool gateway and whatever performs the identification.
#[async_trait::async_trait]
pub trait SpeciesIdentifier: Send + Sync + 'static {
    async fn identify(
        &self,
        request: &IdentificationRequest,
    ) -> Result<IdentificationResult, GatewayError>;
}
