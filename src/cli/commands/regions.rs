use anyhow::Result;

use super::require_subscription;
use crate::azure::{interactive_login, ArmClient};
use crate::cli::config;
use crate::cli::prompt::PromptSession;

/// Print every region the first visible subscription can deploy to, one
/// `"{display name} ({code})"` line per region.
pub async fn execute_regions() -> Result<()> {
    let config_path = config::config_path()?;

    // the prompt handles are released before any remote call starts
    let tenant_id = {
        let mut session = PromptSession::stdin();
        session.prompt_tenant_id(&config_path)?
    };

    eprintln!("\n==> Signing in...");
    let auth = interactive_login(tenant_id.as_deref()).await?;
    let subscription = require_subscription(&auth)?;
    let subscription_id = subscription.subscription_id.clone();

    let client = ArmClient::new(auth.credentials)?;
    let regions = client.list_locations(&subscription_id).await?;

    for region in &regions {
        println!("{} ({})", region.display_name, region.name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::azure::Region;

    #[test]
    fn region_line_format() {
        let region = Region {
            name: "westus".to_string(),
            display_name: "West US".to_string(),
        };
        assert_eq!(
            format!("{} ({})", region.display_name, region.name),
            "West US (westus)"
        );
    }
}
