// ---------------------------------------------------------------------------
// envelope: versioned, checksummed JSON wrapper around the entity list
// ---------------------------------------------------------------------------
//
// Stored value:
//   {"version": 1, "checksum": <xxh32>, "entities": [ ... ]}
//
// The checksum covers the compact JSON encoding of `entities` exactly as the
// writer produced it. On load: parse -> check version -> decode entities ->
// re-encode and compare checksum.
// Legacy: a bare JSON array is a version 0 payload with no checksum.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use xxhash_rust::xxh32::xxh32;

use layout::config::LAYOUT_FORMAT_VERSION;
use layout::PlacedEntity;

use crate::save_migrate::VersionedLayout;

/// Version assigned to bare-array payloads.
pub const LEGACY_VERSION: u32 = 0;

const XXHASH_SEED: u32 = 0;

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    checksum: u32,
    entities: &'a [PlacedEntity],
}

#[derive(Deserialize)]
struct EnvelopeIn {
    version: u32,
    checksum: u32,
    entities: Vec<PlacedEntity>,
}

/// Why a stored value could not be unwrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnwrapError {
    /// Not JSON, or JSON of the wrong shape.
    Malformed(String),
    /// Version this build cannot read.
    Unsupported(u32),
    ChecksumMismatch { expected: u32, computed: u32 },
}

impl fmt::Display for UnwrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnwrapError::Malformed(msg) => write!(f, "malformed layout payload: {msg}"),
            UnwrapError::Unsupported(v) => write!(
                f,
                "layout format v{v} is not supported \
                 (this build reads up to v{LAYOUT_FORMAT_VERSION})"
            ),
            UnwrapError::ChecksumMismatch { expected, computed } => write!(
                f,
                "checksum mismatch (expected {expected:#010X}, got {computed:#010X})"
            ),
        }
    }
}

impl std::error::Error for UnwrapError {}

pub fn checksum(entities: &[PlacedEntity]) -> Result<u32, serde_json::Error> {
    Ok(xxh32(&serde_json::to_vec(entities)?, XXHASH_SEED))
}

/// Encode `entities` as a current-version envelope.
pub fn wrap(entities: &[PlacedEntity]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeOut {
        version: LAYOUT_FORMAT_VERSION,
        checksum: checksum(entities)?,
        entities,
    })
}

/// Decode a stored value into its entity list and format version.
pub fn unwrap(raw: &str) -> Result<VersionedLayout, UnwrapError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| UnwrapError::Malformed(e.to_string()))?;

    if value.is_array() {
        let entities: Vec<PlacedEntity> =
            serde_json::from_value(value).map_err(|e| UnwrapError::Malformed(e.to_string()))?;
        return Ok(VersionedLayout {
            version: LEGACY_VERSION,
            entities,
        });
    }

    let Some(map) = value.as_object() else {
        return Err(UnwrapError::Malformed(
            "expected an object or an array".to_string(),
        ));
    };
    let version = map
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| UnwrapError::Malformed("missing version".to_string()))?;
    let version = u32::try_from(version).unwrap_or(u32::MAX);
    if version == LEGACY_VERSION || version > LAYOUT_FORMAT_VERSION {
        return Err(UnwrapError::Unsupported(version));
    }

    let envelope: EnvelopeIn =
        serde_json::from_value(value).map_err(|e| UnwrapError::Malformed(e.to_string()))?;
    let computed =
        checksum(&envelope.entities).map_err(|e| UnwrapError::Malformed(e.to_string()))?;
    if computed != envelope.checksum {
        return Err(UnwrapError::ChecksumMismatch {
            expected: envelope.checksum,
            computed,
        });
    }
    Ok(VersionedLayout {
        version: envelope.version,
        entities: envelope.entities,
    })
}
