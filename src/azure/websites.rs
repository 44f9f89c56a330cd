use serde::{Deserialize, Serialize};

use super::client::{ArmClient, RemoteError};

const WEB_API_VERSION: &str = "2022-03-01";

#[derive(Serialize)]
struct CreateSiteRequest<'a> {
    location: &'a str,
    properties: SiteProperties,
}

#[derive(Serialize)]
struct SiteProperties {}

#[derive(Deserialize)]
pub struct Site {
    pub name: String,
    pub location: String,
}

#[derive(Serialize)]
struct UpdateSiteConfigRequest<'a> {
    location: &'a str,
    properties: SiteConfigProperties,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SiteConfigProperties {
    scm_type: &'static str,
    remote_debugging_enabled: bool,
}

impl ArmClient {
    /// Create or update a web app inside a resource group.
    pub async fn create_site(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        location: &str,
    ) -> Result<Site, RemoteError> {
        self.put(
            &format!(
                "/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{name}"
            ),
            WEB_API_VERSION,
            &CreateSiteRequest {
                location,
                properties: SiteProperties {},
            },
        )
        .await
    }

    /// Switch a site's deployment source to local git and turn on remote
    /// debugging.
    pub async fn update_site_config(
        &self,
        subscription_id: &str,
        resource_group: &str,
        name: &str,
        location: &str,
    ) -> Result<(), RemoteError> {
        let _: serde_json::Value = self
            .put(
                &format!(
                    "/subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/Microsoft.Web/sites/{name}/config/web"
                ),
                WEB_API_VERSION,
                &UpdateSiteConfigRequest {
                    location,
                    properties: SiteConfigProperties {
                        scm_type: "LocalGit",
                        remote_debugging_enabled: true,
                    },
                },
            )
            .await?;
        Ok(())
    }
}
