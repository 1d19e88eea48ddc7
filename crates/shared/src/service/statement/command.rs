use crate::{
    abstract_trait::{
        bank::repository::DynBankRepository,
        bank_account::repository::query::DynBankAccountQueryRepository,
        bank_gateway::DynBankGatewayClient,
        member::repository::DynUserRepository,
        statement::{
            repository::{
                command::DynBankStatementCommandRepository,
                query::DynBankStatementQueryRepository,
            },
            service::command::StatementCommandServiceTrait,
        },
        transaction::service::command::DynTransactionCommandService,
        webhook_log::repository::DynWebhookLogRepository,
    },
    domain::{
        requests::{
            Actor, ConfirmDepositRequest, CreateBankTransactionRequest, ExternalStatement,
            GatewayStatementQuery, MatchStatementOwnerRequest, NewBankStatement,
            StatementTransition, WebhookActionRequest,
        },
        responses::{ApiResponse, BankStatementResponse, WebhookResultResponse},
    },
    errors::ServiceError,
    model::{
        BankAccountModel, BankModel, BankStatementModel, StatementActionType, StatementStatus,
        StatementType, TransferType,
    },
    service::{statement::possible_owners, validate_request},
    utils::{local_now, parse_account_number, parse_bank, parse_datetime},
};
use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

const LOG_WEBHOOK_ACTION: &str = "webhook.action";
const LOG_WEBHOOK_NOTI: &str = "webhook.noti";

const MSG_STATEMENT_EXISTS: &str = "statement already exists";

/// Gateway page size used when searching for a single statement.
const REINGEST_PAGE_SIZE: i64 = 100;
const REINGEST_MAX_PAGES: i64 = 50;

pub struct StatementCommandService {
    accounts: DynBankAccountQueryRepository,
    query: DynBankStatementQueryRepository,
    command: DynBankStatementCommandRepository,
    banks: DynBankRepository,
    users: DynUserRepository,
    transactions: DynTransactionCommandService,
    webhook_log: DynWebhookLogRepository,
    gateway: DynBankGatewayClient,
}

impl StatementCommandService {
    #[allow(clippy::too_many_arguments)]
    pub async fn new(
        accounts: DynBankAccountQueryRepository,
        query: DynBankStatementQueryRepository,
        command: DynBankStatementCommandRepository,
        banks: DynBankRepository,
        users: DynUserRepository,
        transactions: DynTransactionCommandService,
        webhook_log: DynWebhookLogRepository,
        gateway: DynBankGatewayClient,
    ) -> Self {
        Self {
            accounts,
            query,
            command,
            banks,
            users,
            transactions,
            webhook_log,
            gateway,
        }
    }

    async fn load(&self, id: i64) -> Result<BankStatementModel, ServiceError> {
        self.query
            .find_by_id(id)
            .await
            .map_err(ServiceError::missing("statement"))
    }

    async fn transition(
        &self,
        statement: &BankStatementModel,
        next_status: StatementStatus,
        action_type: StatementActionType,
        user_id: Option<i64>,
        actor: &Actor,
    ) -> Result<BankStatementModel, ServiceError> {
        let req = StatementTransition {
            statement_id: statement.id,
            next_status,
            action_type,
            user_id,
            actor: actor.clone(),
        };

        let updated = self.command.transition(&req).await.map_err(|e| {
            error!("❌ Failed to move statement {} to {next_status}: {e}", statement.id);
            ServiceError::from(e)
        })?;

        info!(
            "📄 Statement {} is {next_status} by {}",
            statement.id, actor.username
        );

        Ok(updated)
    }

    /// Links an unambiguous owner; anything else leaves the statement pending.
    async fn auto_match(
        &self,
        account: &BankAccountModel,
        bank: &BankModel,
        statement: BankStatementModel,
    ) -> Result<BankStatementModel, ServiceError> {
        let account_number = statement.from_account_number.clone().unwrap_or_default();
        let owners = possible_owners(&self.users, &bank.code, &account_number).await?;

        let [owner] = owners.as_slice() else {
            info!(
                "statement {} has {} possible owners, leaving it pending",
                statement.id,
                owners.len()
            );
            return Ok(statement);
        };

        let system = Actor::system();

        match statement.statement_type() {
            Some(StatementType::TransferIn) => {
                let Some(member_code) = owner.member_code.clone().filter(|c| !c.is_empty()) else {
                    warn!(
                        "owner {} of statement {} has no member code, leaving it pending",
                        owner.id, statement.id
                    );
                    return Ok(statement);
                };

                let auto_credit = account.auto_credit();
                let deposit = CreateBankTransactionRequest {
                    member_code,
                    transfer_type: TransferType::Deposit,
                    credit_amount: statement.amount.abs(),
                    bonus_amount: 0.0,
                    bank_charge_amount: 0.0,
                    from_account_id: None,
                    to_account_id: Some(account.id),
                    transfer_at: Some(statement.transfer_at),
                    slip_url: None,
                    is_auto_credit: auto_credit,
                    statement_id: Some(statement.id),
                };

                let created = self
                    .transactions
                    .create(&deposit, &system)
                    .await?
                    .data
                    .ok_or_else(|| ServiceError::bad_state("deposit was not created"))?;

                if !auto_credit {
                    info!(
                        "pending deposit {} created for statement {}",
                        created.id, statement.id
                    );
                    return Ok(statement);
                }

                let confirm = ConfirmDepositRequest {
                    transfer_at: Some(statement.transfer_at),
                    ..Default::default()
                };
                self.transactions
                    .confirm_deposit(created.id, &confirm, &system)
                    .await?;

                self.transition(
                    &statement,
                    StatementStatus::Confirmed,
                    StatementActionType::Confirmed,
                    Some(owner.id),
                    &system,
                )
                .await
            }
            Some(StatementType::TransferOut) => {
                self.transition(
                    &statement,
                    StatementStatus::Ignored,
                    StatementActionType::Ignored,
                    Some(owner.id),
                    &system,
                )
                .await
            }
            None => Ok(statement),
        }
    }

    /// Searches the gateway's statement pages of `account` for `external_id`.
    async fn find_at_gateway(
        &self,
        account: &BankAccountModel,
        external_id: i64,
    ) -> Result<Option<ExternalStatement>, ServiceError> {
        for page in 1..=REINGEST_MAX_PAGES {
            let query = GatewayStatementQuery {
                account_no: account.account_number.clone(),
                page,
                size: REINGEST_PAGE_SIZE,
                of_date_time: None,
            };

            let result = self.gateway.list_statements(&query).await?;
            if let Some(found) = result.list.iter().find(|s| s.id == external_id) {
                return Ok(Some(found.clone()));
            }

            if result.list.is_empty() || page * REINGEST_PAGE_SIZE >= result.total {
                break;
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl StatementCommandServiceTrait for StatementCommandService {
    async fn process_webhook_action(
        &self,
        payload: &serde_json::Value,
    ) -> Result<ApiResponse<WebhookResultResponse>, ServiceError> {
        let log_id = self.webhook_log.create(LOG_WEBHOOK_ACTION, payload).await?;

        let req: WebhookActionRequest = match serde_json::from_value(payload.clone()) {
            Ok(req) => req,
            Err(e) => {
                let reason = format!("invalid webhook payload: {e}");
                self.webhook_log.set_failed(log_id, &reason).await?;
                return Err(ServiceError::invalid(reason));
            }
        };

        info!(
            "📥 Webhook {log_id} carries {} statements",
            req.new_statement_list.len()
        );

        let mut result = WebhookResultResponse {
            webhook_log_id: log_id,
            processed: 0,
            duplicates: 0,
            failed: 0,
        };
        let mut last_error = None;

        for statement in &req.new_statement_list {
            match self.process_statement(statement).await {
                Ok(_) => result.processed += 1,
                Err(ServiceError::Duplicate(_)) => {
                    warn!("statement {} delivered again, skipping", statement.id);
                    result.duplicates += 1;
                }
                Err(e) => {
                    error!("❌ Statement {} failed: {e}", statement.id);
                    result.failed += 1;
                    last_error = Some(e.to_string());
                }
            }
        }

        match last_error {
            None => {
                let summary = json!({
                    "processed": result.processed,
                    "duplicates": result.duplicates,
                });
                self.webhook_log.set_success(log_id, &summary).await?;
            }
            Some(reason) => self.webhook_log.set_failed(log_id, &reason).await?,
        }

        Ok(ApiResponse::ok("webhook processed", result))
    }

    async fn process_webhook_noti(
        &self,
        payload: &serde_json::Value,
    ) -> Result<ApiResponse<i64>, ServiceError> {
        let log_id = self.webhook_log.create(LOG_WEBHOOK_NOTI, payload).await?;
        self.webhook_log.set_success(log_id, payload).await?;

        info!("🔔 Notification recorded as webhook log {log_id}");

        Ok(ApiResponse::ok("notification recorded", log_id))
    }

    async fn process_statement(
        &self,
        statement: &ExternalStatement,
    ) -> Result<ApiResponse<BankStatementResponse>, ServiceError> {
        let account = self
            .accounts
            .find_by_external_id(statement.external_account_id)
            .await
            .map_err(ServiceError::missing("bank account"))?;

        if self.query.find_by_external_id(statement.id).await?.is_some() {
            return Err(ServiceError::Duplicate(MSG_STATEMENT_EXISTS.into()));
        }

        let statement_type = StatementType::from_txn_code(&statement.txn_code).ok_or_else(|| {
            ServiceError::invalid(format!("txn_code: unknown code {}", statement.txn_code))
        })?;

        let banks = self.banks.find_all().await?;
        let bank = parse_bank(&statement.info, &banks)
            .cloned()
            .ok_or_else(|| ServiceError::invalid(format!("info: no bank in '{}'", statement.info)))?;

        let account_number = parse_account_number(&bank.code, &statement.info);

        let transfer_at = parse_datetime(&statement.date_time).unwrap_or_else(|| {
            warn!(
                "statement {} has unreadable time '{}', using now",
                statement.id, statement.date_time
            );
            local_now()
        });

        let new_statement = NewBankStatement {
            account_id: account.id,
            external_id: statement.id,
            detail: format!("{} {}", statement.txn_description, statement.info),
            statement_type,
            amount: statement_type.signed(statement.amount),
            transfer_at,
            from_bank_id: Some(bank.id),
            from_account_number: Some(account_number).filter(|n| !n.is_empty()),
        };

        let stored = self.command.create(&new_statement).await.map_err(|e| {
            if e.is_duplicate() {
                ServiceError::Duplicate(MSG_STATEMENT_EXISTS.into())
            } else {
                error!("❌ Failed to store statement {}: {e}", statement.id);
                ServiceError::from(e)
            }
        })?;

        info!(
            "📄 Stored statement {} ({statement_type} {}) for account {}",
            stored.id, stored.amount, account.account_number
        );

        let matched = self.auto_match(&account, &bank, stored).await?;

        Ok(ApiResponse::ok("statement processed", matched.into()))
    }

    async fn add_account_statement_to_webhook(
        &self,
        account_id: i64,
        external_id: i64,
    ) -> Result<ApiResponse<BankStatementResponse>, ServiceError> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await
            .map_err(ServiceError::missing("bank account"))?;

        let statement = self
            .find_at_gateway(&account, external_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("statement"))?;

        info!(
            "🔁 Re-ingesting statement {external_id} of {}",
            account.account_number
        );

        self.process_statement(&statement).await
    }

    async fn match_statement_owner(
        &self,
        statement_id: i64,
        req: &MatchStatementOwnerRequest,
        actor: &Actor,
    ) -> Result<ApiResponse<BankStatementResponse>, ServiceError> {
        validate_request(req)?;

        let statement = self.load(statement_id).await?;
        if statement.status() != Some(StatementStatus::Pending) {
            return Err(ServiceError::bad_state(format!(
                "statement {statement_id} is already {}",
                statement.status
            )));
        }

        self.users
            .find_by_id(req.user_id)
            .await
            .map_err(ServiceError::missing("member"))?;

        let updated = self
            .transition(
                &statement,
                StatementStatus::Confirmed,
                StatementActionType::Confirmed,
                Some(req.user_id),
                actor,
            )
            .await?;

        Ok(ApiResponse::ok("statement matched", updated.into()))
    }

    async fn ignore_statement_owner(
        &self,
        statement_id: i64,
        actor: &Actor,
    ) -> Result<ApiResponse<BankStatementResponse>, ServiceError> {
        let statement = self.load(statement_id).await?;
        if statement.status() != Some(StatementStatus::Pending) {
            return Err(ServiceError::bad_state(format!(
                "statement {statement_id} is already {}",
                statement.status
            )));
        }

        let updated = self
            .transition(
                &statement,
                StatementStatus::Ignored,
                StatementActionType::Ignored,
                None,
                actor,
            )
            .await?;

        Ok(ApiResponse::ok("statement ignored", updated.into()))
    }
}
