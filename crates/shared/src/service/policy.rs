use crate::{
    abstract_trait::bot_config::repository::DynBotAccountConfigRepository,
    errors::ServiceError,
    model::{AccountPolicy, BotAccountConfigKey},
};
use tracing::info;

/// `all` allows every account, `list` only the configured numbers; anything else denies.
pub fn policy_allows(policy: &[String], allowed_numbers: &[String], account_number: &str) -> bool {
    let policy = policy
        .first()
        .and_then(|v| v.trim().parse::<AccountPolicy>().ok())
        .unwrap_or(AccountPolicy::Disabled);

    match policy {
        AccountPolicy::All => true,
        AccountPolicy::List => allowed_numbers
            .iter()
            .any(|n| n.trim() == account_number.trim()),
        AccountPolicy::Disabled => false,
    }
}

pub(crate) async fn account_allowed(
    bot_config: &DynBotAccountConfigRepository,
    key: BotAccountConfigKey,
    account_number: &str,
) -> Result<bool, ServiceError> {
    let policy = bot_config.find_values(key).await?;
    let allowed_numbers = bot_config
        .find_values(BotAccountConfigKey::AllowExternalAccountNumber)
        .await?;

    let allowed = policy_allows(&policy, &allowed_numbers, account_number);
    info!("{} for {account_number}: {allowed}", key.as_str());

    Ok(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_allows_any_account() {
        assert!(policy_allows(&values(&["all"]), &[], "1234567890"));
    }

    #[test]
    fn list_requires_membership() {
        let allowed = values(&["1112223334"]);
        assert!(policy_allows(&values(&["list"]), &allowed, "1112223334"));
        assert!(!policy_allows(&values(&["list"]), &allowed, "9998887776"));
    }

    #[test]
    fn missing_or_unknown_policy_denies() {
        assert!(!policy_allows(&[], &values(&["1112223334"]), "1112223334"));
        assert!(!policy_allows(&values(&["none"]), &[], "1"));
        assert!(!policy_allows(&values(&["sometimes"]), &[], "1"));
    }
}
