//! Redis storage layer for contact leads and blog posts.
//!
//! All functions are async and use redis::AsyncCommands.
//! Records are serialized to JSON for storage in Redis. Each record type
//! keeps a SET of its ids, so listings and counts see every record.

pub mod blog;
pub mod contact;

use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

/// Keys per MGET when loading an index.
const MGET_BATCH: usize = 500;

/// Fetch and decode every JSON record listed in the index SET `index_key`.
///
/// Records live at `{prefix}{id}`. Ids whose record is missing are skipped.
pub async fn load_indexed<C, T>(
    con: &mut C,
    index_key: &str,
    prefix: &str,
) -> Result<Vec<T>, redis::RedisError>
where
    C: AsyncCommands,
    T: DeserializeOwned,
{
    let ids: Vec<String> = con.smembers(index_key).await?;
    let keys: Vec<String> = ids.iter().map(|id| format!("{}{}", prefix, id)).collect();

    let mut records = Vec::with_capacity(keys.len());
    for batch in keys.chunks(MGET_BATCH) {
        let values: Vec<Option<String>> = redis::cmd("MGET").arg(batch).query_async(con).await?;
        for json in values.into_iter().flatten() {
            records.push(from_json(&json)?);
        }
    }
    Ok(records)
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String, redis::RedisError> {
    serde_json::to_string(value).map_err(|e| {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "JSON serialize",
            e.to_string(),
        ))
    })
}

pub(crate) fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, redis::RedisError> {
    serde_json::from_str(json).map_err(|e| {
        redis::RedisError::from((
            redis::ErrorKind::TypeError,
            "JSON deserialize",
            e.to_string(),
        ))
    })
}
