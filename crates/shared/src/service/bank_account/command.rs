use crate::{
    abstract_trait::{
        bank::repository::DynBankRepository,
        bank_account::{
            repository::{
                command::DynBankAccountCommandRepository, query::DynBankAccountQueryRepository,
            },
            service::command::BankAccountCommandServiceTrait,
        },
        bank_gateway::DynBankGatewayClient,
        bot_config::repository::DynBotAccountConfigRepository,
    },
    domain::{
        requests::{
            CreateBankAccountRequest, GatewayAccountRequest, NewBankAccount,
            UpdateBankAccountRequest, UpdateBotStatus,
        },
        responses::{ApiResponse, BankAccountResponse},
    },
    errors::ServiceError,
    model::{BankAccountModel, BotAccountConfigKey, ConnectionStatus},
    service::{policy::account_allowed, validate_request},
    utils::local_now,
};
use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use tracing::{error, info, warn};

/// Minimum gap between two polls of the same bot account.
const BOT_STATUS_MIN_INTERVAL_SECS: i64 = 30;
/// After a failed poll the account is skipped until this much time has passed.
const BOT_STATUS_BACKOFF_SECS: i64 = 5 * 60;

pub struct BankAccountCommandService {
    query: DynBankAccountQueryRepository,
    command: DynBankAccountCommandRepository,
    banks: DynBankRepository,
    bot_config: DynBotAccountConfigRepository,
    gateway: DynBankGatewayClient,
    webhook_url: String,
}

impl BankAccountCommandService {
    pub async fn new(
        query: DynBankAccountQueryRepository,
        command: DynBankAccountCommandRepository,
        banks: DynBankRepository,
        bot_config: DynBotAccountConfigRepository,
        gateway: DynBankGatewayClient,
        webhook_url: String,
    ) -> Self {
        Self {
            query,
            command,
            banks,
            bot_config,
            gateway,
            webhook_url,
        }
    }

    async fn bank_code(&self, bank_id: i64) -> Result<String, ServiceError> {
        self.banks
            .find_by_id(bank_id)
            .await
            .map(|bank| bank.code)
            .map_err(ServiceError::missing_as(|| {
                ServiceError::invalid("bank_id: bank not found")
            }))
    }

    async fn ensure_number_free(
        &self,
        account_number: &str,
        own_id: Option<i64>,
    ) -> Result<(), ServiceError> {
        match self.query.find_by_account_number(account_number).await? {
            Some(existing) if Some(existing.id) != own_id => Err(ServiceError::Duplicate(
                format!("account number {account_number} already exists"),
            )),
            _ => Ok(()),
        }
    }

    /// Registers or updates the bot account at the gateway when policy allows;
    /// on success `account` carries the gateway id and encrypted pin.
    async fn sync_gateway(&self, account: &mut NewBankAccount) -> Result<(), ServiceError> {
        if !account.is_automated() {
            return Ok(());
        }

        if !account_allowed(
            &self.bot_config,
            BotAccountConfigKey::AllowCreateExternalAccount,
            &account.account_number,
        )
        .await?
        {
            info!(
                "gateway registration not allowed for {}, keeping account local",
                account.account_number
            );
            return Ok(());
        }

        let req = GatewayAccountRequest {
            account_no: account.account_number.clone(),
            account_name: account.account_name.clone(),
            bank_code: self.bank_code(account.bank_id).await?,
            device_id: account.device_uid.clone().unwrap_or_default(),
            pin: account.pin_code.clone().unwrap_or_default(),
            webhook_url: self.webhook_url.clone(),
        };

        let registered = match account.external_id {
            Some(external_id) => self.gateway.update_bot_account(external_id, &req).await?,
            None => self.gateway.create_bot_account(&req).await?,
        };

        account.external_id = Some(registered.id);
        if registered.encrypted_pin.is_some() {
            account.pin_code = registered.encrypted_pin;
        }

        Ok(())
    }

    async fn poll_bot(&self, account: &BankAccountModel, now: NaiveDateTime) -> UpdateBotStatus {
        let polled = async {
            let status = self.gateway.get_status(&account.account_number).await?;
            let balance = self.gateway.get_balance(&account.account_number).await?;
            Ok::<_, ServiceError>((status, balance))
        }
        .await;

        match polled {
            Ok((status, balance)) => UpdateBotStatus {
                id: account.id,
                connection_status: if status.is_online() {
                    ConnectionStatus::Active
                } else {
                    ConnectionStatus::Disconnected
                },
                account_balance: Some(balance.balance),
                last_conn_update_at: now,
            },
            Err(e) => {
                warn!("bot status of {} unavailable: {e}", account.account_number);
                UpdateBotStatus {
                    id: account.id,
                    connection_status: ConnectionStatus::Disconnected,
                    account_balance: None,
                    last_conn_update_at: next_poll_after_failure(now),
                }
            }
        }
    }
}

/// Pushes `last_conn_update_at` forward so the next poll waits out the backoff.
pub(crate) fn next_poll_after_failure(now: NaiveDateTime) -> NaiveDateTime {
    now + Duration::seconds(BOT_STATUS_BACKOFF_SECS - BOT_STATUS_MIN_INTERVAL_SECS)
}

pub(crate) fn poll_due(last_update: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
    match last_update {
        Some(last) => now - last >= Duration::seconds(BOT_STATUS_MIN_INTERVAL_SECS),
        None => true,
    }
}

#[async_trait]
impl BankAccountCommandServiceTrait for BankAccountCommandService {
    async fn create(
        &self,
        req: &CreateBankAccountRequest,
    ) -> Result<ApiResponse<BankAccountResponse>, ServiceError> {
        validate_request(req)?;

        info!("🏦 Creating bank account {}", req.account_number);

        self.bank_code(req.bank_id).await?;
        self.ensure_number_free(req.account_number.trim(), None).await?;

        let mut new_account = NewBankAccount::from(req);
        self.sync_gateway(&mut new_account).await?;

        let account = match self.command.create(&new_account).await {
            Ok(account) => account,
            Err(e) => {
                error!("❌ Failed to store bank account {}: {e}", new_account.account_number);
                if new_account.external_id.is_some() {
                    if let Err(cleanup) = self
                        .gateway
                        .delete_bot_account(&new_account.account_number)
                        .await
                    {
                        warn!("could not undo gateway registration: {cleanup}");
                    }
                }
                return Err(e.into());
            }
        };

        Ok(ApiResponse::ok("bank account created", account.into()))
    }

    async fn update(
        &self,
        req: &UpdateBankAccountRequest,
    ) -> Result<ApiResponse<BankAccountResponse>, ServiceError> {
        validate_request(req)?;

        let current = self
            .query
            .find_by_id(req.id)
            .await
            .map_err(ServiceError::missing("bank account"))?;

        let mut next = req.apply_to(&current);

        if next.bank_id != current.bank_id {
            self.bank_code(next.bank_id).await?;
        }
        if next.account_number != current.account_number {
            self.ensure_number_free(&next.account_number, Some(current.id))
                .await?;
        }

        let gateway_fields_changed = req.account_number.is_some()
            || req.device_uid.is_some()
            || req.pin_code.is_some()
            || req.bank_id.is_some();

        if gateway_fields_changed {
            self.sync_gateway(&mut next).await?;
        }

        let account = self.command.update(current.id, &next).await?;

        info!("✅ Updated bank account {}", account.id);

        Ok(ApiResponse::ok("bank account updated", account.into()))
    }

    async fn delete(&self, id: i64) -> Result<ApiResponse<BankAccountResponse>, ServiceError> {
        let current = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::missing("bank account"))?;

        if current.external_id.is_some() {
            if let Err(e) = self
                .gateway
                .delete_bot_account(&current.account_number)
                .await
            {
                warn!("gateway delete of {} failed: {e}", current.account_number);
            }
        }

        let account = self.command.delete(id).await?;

        Ok(ApiResponse::ok("bank account deleted", account.into()))
    }

    async fn update_all_bot_status(&self) -> Result<usize, ServiceError> {
        let accounts = self.query.find_automated().await?;
        let now = local_now();
        let mut polled = 0;

        for account in accounts.iter().filter(|a| poll_due(a.last_conn_update_at, now)) {
            let update = self.poll_bot(account, now).await;

            if let Err(e) = self.command.update_bot_status(&update).await {
                error!("❌ Failed to store bot status of {}: {e}", account.id);
                continue;
            }

            polled += 1;
        }

        info!("🤖 Bot status refreshed for {polled}/{} accounts", accounts.len());

        Ok(polled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    #[test]
    fn recent_poll_is_skipped() {
        assert!(!poll_due(Some(at(10, 0, 0)), at(10, 0, 29)));
        assert!(poll_due(Some(at(10, 0, 0)), at(10, 0, 30)));
        assert!(poll_due(None, at(10, 0, 0)));
    }

    #[test]
    fn failed_poll_backs_off_five_minutes() {
        let now = at(10, 0, 0);
        let next = next_poll_after_failure(now);
        assert!(!poll_due(Some(next), at(10, 4, 59)));
        assert!(poll_due(Some(next), at(10, 5, 0)));
    }
}
