//! Starts an AWS Amplify deployment whenever the expected artifact
//! is uploaded to S3.

pub mod app;
pub mod client;
pub mod conf;
pub mod deploy;
pub mod envelope;
pub mod trigger;
