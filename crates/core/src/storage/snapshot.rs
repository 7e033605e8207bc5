//! Snapshot envelope
//!
//! Stores persist `{"state": <state>, "version": N}`. Anything that fails to
//! decode is treated as "no prior state" so a corrupt file never blocks startup.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::warn;

use super::{Storage, StorageError};

/// Version written into every snapshot envelope.
pub(crate) const SNAPSHOT_VERSION: u32 = 0;

#[derive(Debug, Serialize)]
struct EnvelopeRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    state: T,
    version: u32,
}

pub(crate) fn encode<T: Serialize>(state: &T) -> Result<String, StorageError> {
    let envelope = EnvelopeRef {
        state,
        version: SNAPSHOT_VERSION,
    };

    Ok(serde_json::to_string(&envelope)?)
}

pub(crate) fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, StorageError> {
    let envelope: Envelope<T> = serde_json::from_str(raw)?;

    if envelope.version != SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: envelope.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    Ok(envelope.state)
}

pub(crate) fn save<T: Serialize>(
    storage: &dyn Storage,
    key: &str,
    state: &T,
) -> Result<(), StorageError> {
    storage.save(key, &encode(state)?)
}

/// Rehydrate the state stored under `key`, or `None` if there is nothing usable.
pub(crate) fn load<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            warn!(key, %error, "failed to read snapshot; starting empty");
            return None;
        }
    };

    match decode(&raw) {
        Ok(state) => Some(state),
        Err(error) => {
            warn!(key, %error, "discarding unreadable snapshot");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    #[test]
    fn encode_wraps_state_with_version() -> TestResult {
        let raw = encode(&Counter { count: 3 })?;

        assert_eq!(raw, r#"{"state":{"count":3},"version":0}"#);

        Ok(())
    }

    #[test]
    fn decode_rejects_other_versions() {
        let result = decode::<Counter>(r#"{"state":{"count":3},"version":9}"#);

        assert!(
            matches!(
                result,
                Err(StorageError::UnsupportedVersion {
                    found: 9,
                    expected: 0
                })
            ),
            "expected UnsupportedVersion, got {result:?}"
        );
    }

    #[test]
    fn load_treats_garbage_as_empty() {
        let storage = MemoryStorage::with_entry("counter", "not json");

        assert_eq!(load::<Counter>(&storage, "counter"), None);
    }

    #[test]
    fn save_then_load_returns_state() -> TestResult {
        let storage = MemoryStorage::new();

        save(&storage, "counter", &Counter { count: 5 })?;

        assert_eq!(load(&storage, "counter"), Some(Counter { count: 5 }));

        Ok(())
    }
}
