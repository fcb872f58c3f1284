//! Defines the read-only application state and the handling of a
//! single trigger.

use crate::conf::{EXPECTED_KEY, Settings};
use crate::deploy::{Deployer, DeploymentRequest};
use crate::envelope::Envelope;
use crate::trigger::Trigger;
use anyhow::{anyhow, Result};
use envy::from_env;
use once_cell::sync::OnceCell;
use tracing::{info, instrument, warn};

/// An App is an initialized application state, derived from
/// settings.
#[derive(Debug)]
pub struct App {
    /// The original settings.
    pub settings: Settings,
}

impl App {
    /// Initialize an App instance given a settings struct. Consumes
    /// the settings struct.
    pub fn new(settings: Settings) -> Self {
        App { settings }
    }

    /// Handle an invocation trigger, starting a deployment if the
    /// uploaded object is the expected artifact.
    #[instrument(skip(self, deployer))]
    pub async fn handle<D: Deployer + ?Sized>(&self, trigger: &Trigger, deployer: &D) -> Envelope {
        info!(
            "New object uploaded to S3 bucket: {}, key: {}",
            trigger.bucket, trigger.key
        );
        if trigger.key != EXPECTED_KEY {
            info!("Skipped non-target object: {}", trigger.key);
            return Envelope::skipped();
        }

        let request = DeploymentRequest::new(trigger);
        match deployer.start_deployment(&request).await {
            Ok(started) => {
                info!(
                    job_id = started.job_id.as_deref().unwrap_or("unknown"),
                    status = started.status.as_deref().unwrap_or("unknown"),
                    "Amplify deployment started for {}",
                    request.source_url
                );
                Envelope::success()
            }
            Err(e) => {
                warn!("Error starting Amplify deployment: {:?}", e);
                Envelope::error(&e)
            }
        }
    }
}

/// Global App instance.
static CURRENT: OnceCell<App> = OnceCell::new();

/// Initialize the global App instance.
pub fn init() -> Result<()> {
    let settings = from_env()?;
    let app = App::new(settings);
    CURRENT
        .set(app)
        .map_err(|_| anyhow!("app::CURRENT was already initialized"))
}

/// Get the current App instance, or panic if it hasn't been
/// initialized.
pub fn current() -> &'static App {
    CURRENT.get().expect("app is not initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deploy::DeploymentStarted;
    use crate::envelope::{SKIPPED_MESSAGE, SUCCESS_MESSAGE};
    use crate::trigger::tests::s3_event;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request, answering with a fixed outcome.
    struct RecordingDeployer {
        failure: Option<&'static str>,
        requests: Mutex<Vec<DeploymentRequest>>,
    }

    impl RecordingDeployer {
        fn succeeding() -> Self {
            RecordingDeployer {
                failure: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &'static str) -> Self {
            RecordingDeployer {
                failure: Some(message),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<DeploymentRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Deployer for RecordingDeployer {
        async fn start_deployment(&self, request: &DeploymentRequest) -> Result<DeploymentStarted> {
            self.requests.lock().unwrap().push(request.clone());
            match self.failure {
                Some(message) => Err(anyhow!(message)),
                None => Ok(DeploymentStarted {
                    job_id: Some(String::from("1")),
                    status: Some(String::from("PENDING")),
                }),
            }
        }
    }

    fn body(envelope: &Envelope) -> String {
        serde_json::from_str(&envelope.body).unwrap()
    }

    fn trigger(bucket: &str, key: &str) -> Trigger {
        Trigger::from_event(&s3_event(bucket, key)).unwrap()
    }

    #[tokio::test]
    async fn expected_upload_starts_deployment() {
        let app = App::new(Settings::default());
        let deployer = RecordingDeployer::succeeding();

        let envelope = app
            .handle(&trigger("my-bucket", "proj3%2Findex.zip"), &deployer)
            .await;

        assert_eq!(envelope.status_code, 200);
        assert_eq!(body(&envelope), SUCCESS_MESSAGE);
        assert_eq!(
            deployer.requests(),
            vec![DeploymentRequest {
                app_id: String::from("dawby4gtv39x6"),
                branch_name: String::from("dev"),
                source_url: String::from("s3://my-bucket/proj3/index.zip"),
            }]
        );
    }

    #[tokio::test]
    async fn other_upload_is_skipped() {
        let app = App::new(Settings::default());
        let deployer = RecordingDeployer::succeeding();

        let envelope = app
            .handle(&trigger("my-bucket", "other%2Ffile.zip"), &deployer)
            .await;

        assert_eq!(envelope.status_code, 200);
        assert_eq!(body(&envelope), SKIPPED_MESSAGE);
        assert!(deployer.requests().is_empty());
    }

    #[tokio::test]
    async fn comparison_is_exact() {
        let app = App::new(Settings::default());
        let deployer = RecordingDeployer::succeeding();

        for key in [
            "proj3/index.zip.bak",
            "PROJ3/index.zip",
            "/proj3/index.zip",
            "proj3+index.zip",
        ] {
            let envelope = app.handle(&trigger("my-bucket", key), &deployer).await;
            assert_eq!(body(&envelope), SKIPPED_MESSAGE, "key {:?}", key);
        }
        assert!(deployer.requests().is_empty());
    }

    #[tokio::test]
    async fn key_with_invalid_utf8_is_skipped() {
        let app = App::new(Settings::default());
        let deployer = RecordingDeployer::succeeding();

        let envelope = app
            .handle(&trigger("my-bucket", "proj3%2F%FFindex.zip"), &deployer)
            .await;

        assert_eq!(envelope.status_code, 200);
        assert_eq!(body(&envelope), SKIPPED_MESSAGE);
        assert!(deployer.requests().is_empty());
    }

    #[tokio::test]
    async fn environment_does_not_change_the_expected_key() {
        let settings: Settings = envy::from_iter(vec![(
            String::from("EXPECTED_KEY"),
            String::from("other/file.zip"),
        )])
        .unwrap();
        let app = App::new(settings);
        let deployer = RecordingDeployer::succeeding();

        let envelope = app
            .handle(&trigger("my-bucket", "other%2Ffile.zip"), &deployer)
            .await;

        assert_eq!(body(&envelope), SKIPPED_MESSAGE);
        assert!(deployer.requests().is_empty());
    }

    #[tokio::test]
    async fn deployment_failure_yields_error_envelope() {
        let app = App::new(Settings::default());
        let deployer = RecordingDeployer::failing("BadRequestException: branch not found");

        let envelope = app
            .handle(&trigger("my-bucket", "proj3%2Findex.zip"), &deployer)
            .await;

        assert_eq!(envelope.status_code, 500);
        assert_eq!(body(&envelope), "Error: BadRequestException: branch not found");
        assert_eq!(deployer.requests().len(), 1);
    }
}
