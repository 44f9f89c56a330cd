use serde::{Deserialize, Serialize};

use super::client::{ArmClient, RemoteError};

const RESOURCE_API_VERSION: &str = "2021-04-01";
const LOCATIONS_API_VERSION: &str = "2020-01-01";

#[derive(Serialize)]
struct CreateResourceGroupRequest<'a> {
    location: &'a str,
}

#[derive(Deserialize)]
pub struct ResourceGroup {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Deserialize)]
struct LocationList {
    value: Vec<Region>,
}

impl ArmClient {
    /// Create or update a resource group.
    pub async fn create_resource_group(
        &self,
        subscription_id: &str,
        name: &str,
        location: &str,
    ) -> Result<ResourceGroup, RemoteError> {
        self.put(
            &format!("/subscriptions/{subscription_id}/resourcegroups/{name}"),
            RESOURCE_API_VERSION,
            &CreateResourceGroupRequest { location },
        )
        .await
    }

    /// List the regions available to a subscription.
    pub async fn list_locations(&self, subscription_id: &str) -> Result<Vec<Region>, RemoteError> {
        let list: LocationList = self
            .get(
                &format!("/subscriptions/{subscription_id}/locations"),
                LOCATIONS_API_VERSION,
            )
            .await?;
        Ok(list.value)
    }
}
