use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::AtomicFlag;

/// Serializes a snapshot of the current value as a plain boolean.
impl Serialize for AtomicFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.get())
    }
}

impl<'de> Deserialize<'de> for AtomicFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(AtomicFlag::new)
    }
}
