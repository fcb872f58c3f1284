//! Defines a _trigger_, the uploaded object an invocation reacts
//! to. The trigger is built from the first record of the S3 event.

use anyhow::{anyhow, Result};
use aws_lambda_events::event::s3::S3Event;
use tracing::{instrument, warn};

/// The uploaded object, with its key already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub bucket: String,
    pub key: String,
}

/// Decode an object key as S3 notifications encode it: form
/// encoding, where `+` stands for a space. Byte sequences that aren't
/// valid UTF-8 become U+FFFD.
pub fn decode_key(key: &str) -> String {
    let key = key.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(key.as_bytes())).into_owned()
}

impl Trigger {
    /// Builds the trigger from the first record inside an S3
    /// event. Events lacking the bucket name or object key are
    /// rejected.
    #[instrument(skip(event))]
    pub fn from_event(event: &S3Event) -> Result<Self> {
        let record = event
            .records
            .first()
            .ok_or_else(|| anyhow!("S3 event contains no records"))?;
        if event.records.len() > 1 {
            warn!(
                "S3 event contains {} records; only the first one is considered",
                event.records.len()
            );
        }
        let bucket = record
            .s3
            .bucket
            .name
            .clone()
            .ok_or_else(|| anyhow!("S3 event record is missing the bucket name"))?;
        let key = record
            .s3
            .object
            .key
            .as_deref()
            .map(decode_key)
            .ok_or_else(|| anyhow!("S3 event record is missing the object key"))?;
        Ok(Trigger { bucket, key })
    }
}
