//! Defines the deployment request and the service that starts
//! deployments from it.

use crate::conf::{APP_ID, BRANCH_NAME};
use crate::trigger::Trigger;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// The parameters of an Amplify `StartDeployment` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub app_id: String,
    pub branch_name: String,
    pub source_url: String,
}

impl DeploymentRequest {
    /// Builds the request that deploys the triggering object to the
    /// fixed app and branch.
    pub fn new(trigger: &Trigger) -> Self {
        DeploymentRequest {
            app_id: String::from(APP_ID),
            branch_name: String::from(BRANCH_NAME),
            source_url: format!("s3://{}/{}", trigger.bucket, trigger.key),
        }
    }
}

/// What's known about a deployment once it has started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentStarted {
    pub job_id: Option<String>,
    pub status: Option<String>,
}

/// Something able to start deployments.
#[async_trait]
pub trait Deployer: Send + Sync {
    async fn start_deployment(&self, request: &DeploymentRequest) -> Result<DeploymentStarted>;
}

#[async_trait]
impl Deployer for aws_sdk_amplify::Client {
    async fn start_deployment(&self, request: &DeploymentRequest) -> Result<DeploymentStarted> {
        let response = aws_sdk_amplify::Client::start_deployment(self)
            .app_id(&request.app_id)
            .branch_name(&request.branch_name)
            .source_url(&request.source_url)
            .send()
            .await
            .with_context(|| {
                format!(
                    "Failed to start deployment of {:?} to branch {:?} of app {:?}",
                    request.source_url, request.branch_name, request.app_id
                )
            })?;
        let summary = response.job_summary();
        Ok(DeploymentStarted {
            job_id: summary.and_then(|s| s.job_id()).map(String::from),
            status: summary
                .and_then(|s| s.status())
                .map(|status| String::from(status.as_str())),
        })
    }
}
