use amplify_deploy_trigger::trigger::{decode_key, Trigger};
use amplify_deploy_trigger::{app, client};
use anyhow::{anyhow, Context, Result};
use std::env::var;

/// Handle a single upload given through the environment, as if it
/// had been notified by S3, and print the resulting envelope.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    app::init()?;
    client::init().await?;

    let settings = &app::current().settings;
    let bucket = var(&settings.bucket_var).context(settings.bucket_var.clone())?;
    let key = var(&settings.key_var).context(settings.key_var.clone())?;
    let trigger = Trigger {
        bucket,
        key: decode_key(&key),
    };

    let envelope = app::current().handle(&trigger, client::current()).await;
    println!("{}", serde_json::to_string(&envelope)?);
    if envelope.is_error() {
        return Err(anyhow!("Deployment of {:?} failed", trigger));
    }
    Ok(())
}
