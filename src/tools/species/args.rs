use rmcp::schemars;
use rmcp::ErrorData as McpError;
use serde::{Deserialize, Deserializer};

use crate::core::error::GatewayError;
use crate::domain::{top_k_number, IdentificationRequest};

pub const MIN_IMAGE_URL_LEN: usize = 10;
pub const MIN_IMAGE_DATA_LEN: usize = 100;
pub const MIN_CATEGORY_LEN: usize = 3;

/// Arguments of `identify_species`, as advertised in the tool's input schema.
///
/// Every field may be omitted, but a present field must hold a value of its
/// type: an explicit `null` is a schema violation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, schemars::JsonSchema)]
pub struct IdentifySpeciesArgs {
    /// image url to request
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "String", length(min = 10))]
    pub image_url: Option<String>,
    /// base64 image to request
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "String", length(min = 100))]
    pub image_data: Option<String>,
    /// species category: plant|bug|bird|reptile|mollusc|mammal|fungi|amphibian
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "String", length(min = 3))]
    pub category: Option<String>,
    /// top_k
    #[serde(default, deserialize_with = "present")]
    #[schemars(with = "f64", range(min = 1))]
    pub top_k: Option<f64>,
}

/// Absent fields fall back to `None` through `serde(default)`; a field that is
/// present goes through here and must deserialize as `T`, so `null` fails.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn check_len(field: &str, value: Option<&str>, min: usize) -> Result<(), McpError> {
    match value {
        Some(v) if v.chars().count() < min => Err(McpError::invalid_params(
            format!("{field} must contain at least {min} characters"),
            None,
        )),
        _ => Ok(()),
    }
}

impl IdentifySpeciesArgs {
    /// Enforce the declared schema constraints. Violations are protocol-level
    /// `invalid_params` errors, not tool failures.
    pub fn validated(self) -> Result<Self, McpError> {
        check_len("image_url", self.image_url.as_deref(), MIN_IMAGE_URL_LEN)?;
        check_len("image_data", self.image_data.as_deref(), MIN_IMAGE_DATA_LEN)?;
        check_len("category", self.category.as_deref(), MIN_CATEGORY_LEN)?;
        if let Some(k) = self.top_k {
            if !k.is_finite() || k < 1.0 {
                return Err(McpError::invalid_params(
                    "top_k must be a number greater than or equal to 1",
                    None,
                ));
            }
        }
        Ok(self)
    }
}

impl TryFrom<IdentifySpeciesArgs> for IdentificationRequest {
    type Error = GatewayError;

    /// Normalize to the upstream body. Neither image field set is forwarded as two nulls.
    fn try_from(args: IdentifySpeciesArgs) -> Result<Self, Self::Error> {
        if args.image_url.is_some() && args.image_data.is_some() {
            return Err(GatewayError::ConflictingImageSources);
        }
        let defaults = IdentificationRequest::default();
        Ok(IdentificationRequest {
            image_url: args.image_url,
            image_data: args.image_data,
            category: args.category,
            top_k: args.top_k.and_then(top_k_number).unwrap_or(defaults.top_k),
        })
    }
}
