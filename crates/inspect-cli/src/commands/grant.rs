//! Grant command implementation.

use crate::app::App;
use crate::cli::GrantArgs;
use crate::error::Result;
use crate::output::Formatter;
use inspect_domain::AccessGrant;

/// Build the grant described by the arguments, expiring relative to `now`.
pub fn grant_from_args(args: GrantArgs, now: u64) -> AccessGrant {
    AccessGrant {
        token: args.token,
        subscription_type: args.subscription.into(),
        access_count: args.count,
        access_expiry: now.saturating_add(args.expires_in),
    }
}

/// Execute the grant command.
pub async fn execute_grant(args: GrantArgs, app: &App, formatter: &Formatter) -> Result<()> {
    let grant = grant_from_args(args, inspect_domain::unix_now());
    app.access.provision(grant.clone()).await?;
    println!("{}", formatter.provisioned(&grant)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SubscriptionArg;
    use inspect_domain::SubscriptionType;

    #[test]
    fn test_grant_from_args() {
        let args = GrantArgs {
            token: "tok".to_string(),
            subscription: SubscriptionArg::Startup,
            count: 50,
            expires_in: 3600,
        };
        let grant = grant_from_args(args, 1_000);
        assert_eq!(grant.subscription_type, SubscriptionType::Startup);
        assert_eq!(grant.access_count, 50);
        assert_eq!(grant.access_expiry, 4_600);
    }
}
