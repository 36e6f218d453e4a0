//! Task data structure and its on-disk representation.
//!
//! Timestamps are local wall-clock times written as `DD/MM/YYYY - HH:MM:SS`,
//! so they carry whole-second precision only.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::fields::Status;

/// Positional task identifier, `1..=N` within the current store.
pub type TaskId = u64;

/// Format used for `createdAt` and `updatedAt` in the task file and in tables.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y - %H:%M:%S";

/// A single tracked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub status: Status,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, with = "timestamp::optional")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Task {
    /// Create a fresh `todo` task that has never been updated.
    pub fn new(id: TaskId, description: String, created_at: NaiveDateTime) -> Self {
        Task {
            id,
            description,
            status: Status::Todo,
            created_at,
            updated_at: None,
        }
    }
}

/// Current local time truncated to the precision the task file can hold.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Render a timestamp the way the task file stores it.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod optional {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        use super::TIMESTAMP_FORMAT;

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(ts) => serializer.collect_str(&ts.format(TIMESTAMP_FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT))
                .transpose()
                .map_err(serde::de::Error::custom)
        }
    }
}
