mod publish;
mod regions;

pub use publish::execute_publish;
pub use regions::execute_regions;

use anyhow::{Context, Result};

use crate::azure::{AuthContext, Subscription};

/// Everything downstream of login is scoped to the first subscription the
/// provider returned; there is no subscription selection.
pub(crate) fn require_subscription(auth: &AuthContext) -> Result<&Subscription> {
    auth.first_subscription()
        .context("Unable to retrieve subscriptions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azure::Credentials;

    fn context_with(subscriptions: Vec<Subscription>) -> AuthContext {
        AuthContext {
            credentials: Credentials::for_tests("token"),
            subscriptions,
        }
    }

    #[test]
    fn no_subscriptions_is_an_error() {
        let err = require_subscription(&context_with(Vec::new())).unwrap_err();
        assert_eq!(err.to_string(), "Unable to retrieve subscriptions");
    }

    #[test]
    fn first_subscription_wins() {
        let context = context_with(vec![
            Subscription {
                subscription_id: "sub-1".to_string(),
                display_name: None,
            },
            Subscription {
                subscription_id: "sub-2".to_string(),
                display_name: None,
            },
        ]);
        assert_eq!(
            require_subscription(&context).unwrap().subscription_id,
            "sub-1"
        );
    }
}
