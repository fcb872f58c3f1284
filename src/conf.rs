//! Defines configuration: the fixed deployment target, and the
//! settings read from the environment.

use serde::Deserialize;

/// The exact, decoded object key that triggers a deployment. Any
/// other uploaded key is skipped.
pub const EXPECTED_KEY: &str = "proj3/index.zip";

/// The Amplify application to deploy.
pub const APP_ID: &str = "dawby4gtv39x6";

/// The Amplify branch that receives the deployment.
pub const BRANCH_NAME: &str = "dev";

/// Default `bucket_var` value.
fn default_bucket_var() -> String {
    String::from("BUCKET")
}

/// Default `key_var` value.
fn default_key_var() -> String {
    String::from("KEY")
}

/// Settings given as environment variables. The deployment target
/// isn't part of them: it's fixed by the constants above.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// The environment variable holding the bucket name, used by the
    /// one-shot command instead of an S3 event.
    #[serde(default = "default_bucket_var")]
    pub bucket_var: String,

    /// The environment variable holding the object key, used by the
    /// one-shot command instead of an S3 event.
    #[serde(default = "default_key_var")]
    pub key_var: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bucket_var: default_bucket_var(),
            key_var: default_key_var(),
        }
    }
}
