use anyhow::Result;
use async_trait::async_trait;

use super::require_subscription;
use crate::azure::{interactive_login, ArmClient, RemoteError};
use crate::cli::config;
use crate::cli::prompt::{PromptSession, PublishOptions};
use crate::git;

/// The three provisioning calls a publish run issues, in order. Behind a
/// trait so the pipeline's sequencing is testable without a live endpoint.
#[async_trait]
pub trait ProvisioningApi {
    async fn create_resource_group(
        &self,
        subscription_id: &str,
        name: &str,
        location: &str,
    ) -> Result<(), RemoteError>;

    async fn create_web_app(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        location: &str,
    ) -> Result<(), RemoteError>;

    async fn enable_git_push_deploy(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        location: &str,
    ) -> Result<(), RemoteError>;
}

#[async_trait]
impl ProvisioningApi for ArmClient {
    async fn create_resource_group(
        &self,
        subscription_id: &str,
        name: &str,
        location: &str,
    ) -> Result<(), RemoteError> {
        ArmClient::create_resource_group(self, subscription_id, name, location).await?;
        Ok(())
    }

    async fn create_web_app(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        location: &str,
    ) -> Result<(), RemoteError> {
        self.create_site(subscription_id, resource_group, name, location)
            .await?;
        Ok(())
    }

    async fn enable_git_push_deploy(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        location: &str,
    ) -> Result<(), RemoteError> {
        self.update_site_config(subscription_id, resource_group, name, location)
            .await
    }
}

pub async fn execute_publish() -> Result<()> {
    // Errors are reported, not propagated: a failed publish still exits 0.
    if let Err(err) = run_publish().await {
        tracing::debug!(error = ?err, "publish failed");
        println!("Azure publishing error: {err}");
    }
    Ok(())
}

async fn run_publish() -> Result<()> {
    let config_path = config::config_path()?;

    let options = {
        let mut session = PromptSession::stdin();
        session.prompt_publish_parameters(&config_path)?
    };

    eprintln!("\n==> Signing in...");
    let auth = interactive_login(options.tenant_id.as_deref()).await?;
    let subscription = require_subscription(&auth)?;
    eprintln!("    Subscription: {}", subscription.subscription_id);
    let subscription_id = subscription.subscription_id.clone();

    let client = ArmClient::new(auth.credentials)?;
    provision(&client, &subscription_id, &options).await?;

    eprintln!("\n==> Fixing git remotes...");
    git::fix_remotes(&options.name)?;
    eprintln!(
        "    Remote \"azure\" -> {}",
        git::deployment_git_url(&options.name)
    );

    eprintln!();
    display_credentials_help();
    Ok(())
}

/// Provision the resource group, the web app inside it, and local-git
/// deployment on the app. Strictly sequential; the first failure
/// short-circuits the rest. No rollback: a partially provisioned resource
/// group is left for manual cleanup.
pub async fn provision<A: ProvisioningApi>(
    api: &A,
    subscription_id: &str,
    options: &PublishOptions,
) -> Result<(), RemoteError> {
    eprintln!("\n==> Creating resource group: {}", options.name);
    api.create_resource_group(subscription_id, &options.name, &options.location)
        .await?;
    eprintln!("    Created");

    eprintln!("\n==> Creating web app: {}", options.name);
    api.create_web_app(
        subscription_id,
        &options.name,
        &options.name,
        &options.location,
    )
    .await?;
    eprintln!("    Created");

    eprintln!("\n==> Enabling local git deployment...");
    api.enable_git_push_deploy(
        subscription_id,
        &options.name,
        &options.name,
        &options.location,
    )
    .await?;
    eprintln!("    Enabled");

    Ok(())
}

fn display_credentials_help() {
    for line in credentials_help_lines() {
        println!("{line}");
    }
}

fn credentials_help_lines() -> &'static [&'static str] {
    &[
        "First time with local git deployment to Azure App Service?",
        " 1. In your browser, navigate to https://portal.azure.com",
        " 2. Find your web app resource group and navigate to it",
        " 3. Click on the App Service in your resource group",
        " 4. Navigate to the `Deployment credentials` section",
        " 5. Add/change your git deployment credentials and save",
    ]
}
