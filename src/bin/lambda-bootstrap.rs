use amplify_deploy_trigger::envelope::Envelope;
use amplify_deploy_trigger::trigger::Trigger;
use amplify_deploy_trigger::{app, client};
use anyhow::{anyhow, Context, Result};
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, LambdaEvent};

/// Handle the first S3 event record, starting a deployment if it's
/// the expected artifact.
async fn function_handler(event: LambdaEvent<S3Event>) -> Result<Envelope> {
    let trigger = Trigger::from_event(&event.payload)
        .with_context(|| format!("Malformed S3 event in request {}", event.context.request_id))?;
    Ok(app::current().handle(&trigger, client::current()).await)
}

/// Run an AWS Lambda function that listens to S3 object-created
/// events and starts an Amplify deployment when the uploaded object
/// is the expected artifact.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    app::init()?;
    client::init().await?;

    run(service_fn(function_handler))
        .await
        .map_err(|e| anyhow!("{:?}", e))
}
