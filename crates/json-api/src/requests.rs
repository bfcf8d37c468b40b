//! Request body pieces shared across resources.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use rust_decimal::Decimal;
use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Deserializer, Serialize};

use frameshop_app::{blobs::ImageUpload, domain::frames::records::InnerDimensions};

/// An image sent inline as base64.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImageRequest {
    /// Original file name, e.g. `holiday.jpg`
    pub filename: String,
    /// Base64-encoded file contents
    pub data: String,
}

impl ImageRequest {
    pub(crate) fn decode(self, field: &str) -> Result<ImageUpload, StatusError> {
        if self.filename.trim().is_empty() {
            return Err(StatusError::bad_request().brief(format!("{field}: filename is required")));
        }

        let bytes = STANDARD.decode(self.data.as_bytes()).map_err(|error| {
            StatusError::bad_request().brief(format!("{field}: invalid base64 data: {error}"))
        })?;

        if bytes.is_empty() {
            return Err(StatusError::bad_request().brief(format!("{field}: image is empty")));
        }

        Ok(ImageUpload::new(self.filename, bytes))
    }
}

/// Inner opening in centimetres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct DimensionsBody {
    pub width: f64,
    pub height: f64,
}

impl From<DimensionsBody> for InnerDimensions {
    fn from(body: DimensionsBody) -> Self {
        Self {
            width: body.width,
            height: body.height,
        }
    }
}

impl From<InnerDimensions> for DimensionsBody {
    fn from(dimensions: InnerDimensions) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
        }
    }
}

/// Amounts travel as decimal strings, e.g. `"19.90"`.
pub(crate) fn parse_amount(field: &str, value: &str) -> Result<Decimal, StatusError> {
    value
        .trim()
        .parse::<Decimal>()
        .map_err(|_invalid| StatusError::bad_request().brief(format!("{field}: not a decimal amount")))
}

/// Two decimal places, as amounts are shown to clients.
pub(crate) fn format_amount(mut amount: Decimal) -> String {
    amount.rescale(2);
    amount.to_string()
}

/// Keep an explicit `null` apart from an absent field.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
