use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::warn;

use crate::error::BoxError;
use crate::faults::Faults;

const EMPTY_JSON: &str = r#"{"errors":{}}"#;

struct Messages<'a>(&'a BTreeMap<String, BoxError>);

impl Serialize for Messages<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(name, failure)| (name, failure.to_string())),
        )
    }
}

/// Serializes as `{"errors": {name: message}}`; the stack and lock flags stay internal.
impl Serialize for Faults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Faults", 1)?;
        state.serialize_field("errors", &Messages(self.get_all()))?;
        state.end()
    }
}

impl Faults {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            warn!(error = %err, "failed to serialize failures");
            EMPTY_JSON.to_string()
        })
    }
}
