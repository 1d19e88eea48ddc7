use crate::{
    abstract_trait::{
        bank::repository::DynBankRepository,
        bank_account::repository::query::DynBankAccountQueryRepository,
        bank_gateway::DynBankGatewayClient,
        bot_config::repository::DynBotAccountConfigRepository,
        member::repository::DynUserRepository,
        transaction::{
            repository::{
                command::DynBankTransactionCommandRepository,
                query::DynBankTransactionQueryRepository,
            },
            service::command::TransactionCommandServiceTrait,
        },
    },
    domain::{
        requests::{
            AccountBinding, Actor, CancelTransactionRequest, ConfirmDepositRequest,
            ConfirmWithdrawRequest, CreateBankTransactionRequest, CreditMove,
            GatewayTransferRequest, NewBankTransaction, NewTransactionAction, TransactionStep,
        },
        responses::{ApiResponse, BankTransactionResponse},
    },
    errors::ServiceError,
    model::{
        ActionKey, BankAccountModel, BankTransactionModel, BotAccountConfigKey,
        MemberStatementType, TransactionActionModel, TransactionStatus, TransferType, UserModel,
    },
    service::{
        policy::account_allowed, transaction::auto_withdraw::plan_auto_withdraw,
        validate_request,
    },
    utils::local_now,
};
use async_trait::async_trait;
use tracing::{error, info, warn};

const INFO_DEPOSIT: &str = "ฝากเครดิต";
const INFO_BONUS: &str = "โบนัสเครดิต";
const INFO_WITHDRAW: &str = "ถอนเครดิต";
const INFO_GET_CREDIT_BACK: &str = "ดึงเครดิตกลับ";
const INFO_REFUND: &str = "คืนเครดิตยกเลิกถอน";

const MSG_ALREADY_PROCESSED: &str = "already processed";

type TransactionResult = Result<ApiResponse<BankTransactionResponse>, ServiceError>;

/// Result of one guarded step.
enum StepOutcome {
    Applied(BankTransactionModel),
    /// A live action already holds the step key; nothing was written.
    Replayed(BankTransactionModel),
}

impl StepOutcome {
    fn into_response(self, message: &str) -> ApiResponse<BankTransactionResponse> {
        match self {
            StepOutcome::Applied(tx) => ApiResponse::ok(message, tx.into()),
            StepOutcome::Replayed(tx) => ApiResponse::ok(MSG_ALREADY_PROCESSED, tx.into()),
        }
    }

    fn transaction(&self) -> &BankTransactionModel {
        match self {
            StepOutcome::Applied(tx) | StepOutcome::Replayed(tx) => tx,
        }
    }
}

pub struct TransactionCommandService {
    query: DynBankTransactionQueryRepository,
    command: DynBankTransactionCommandRepository,
    users: DynUserRepository,
    accounts: DynBankAccountQueryRepository,
    banks: DynBankRepository,
    bot_config: DynBotAccountConfigRepository,
    gateway: DynBankGatewayClient,
}

impl TransactionCommandService {
    #[allow(clippy::too_many_arguments)]
    pub async fn new(
        query: DynBankTransactionQueryRepository,
        command: DynBankTransactionCommandRepository,
        users: DynUserRepository,
        accounts: DynBankAccountQueryRepository,
        banks: DynBankRepository,
        bot_config: DynBotAccountConfigRepository,
        gateway: DynBankGatewayClient,
    ) -> Self {
        Self {
            query,
            command,
            users,
            accounts,
            banks,
            bot_config,
            gateway,
        }
    }

    async fn load(&self, id: i64) -> Result<BankTransactionModel, ServiceError> {
        self.query
            .find_by_id(id)
            .await
            .map_err(ServiceError::missing("transaction"))
    }

    async fn account(&self, id: i64) -> Result<BankAccountModel, ServiceError> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(ServiceError::missing("bank account"))
    }

    /// Returns the current transaction when the step already has a live action.
    async fn replay(&self, key: &str, id: i64) -> Result<Option<BankTransactionModel>, ServiceError> {
        match self.query.find_live_action(key).await? {
            Some(_) => {
                info!("{key} already recorded, returning current state");
                Ok(Some(self.load(id).await?))
            }
            None => Ok(None),
        }
    }

    /// Journals the step; `None` when a concurrent caller recorded it first.
    async fn begin_action(
        &self,
        current: &BankTransactionModel,
        key: String,
        actor: &Actor,
        transfer_at: Option<chrono::NaiveDateTime>,
        from_account_id: Option<i64>,
    ) -> Result<Option<TransactionActionModel>, ServiceError> {
        let json_before = serde_json::to_value(current)
            .map_err(|e| ServiceError::Storage(format!("serialize transaction: {e}")))?;

        let req = NewTransactionAction {
            action_key: key,
            transaction_id: current.id,
            user_id: current.user_id,
            transfer_type: current
                .transfer_type()
                .ok_or_else(|| ServiceError::bad_state("unknown transfer type"))?,
            from_account_id,
            to_account_id: current.to_account_id,
            json_before,
            transfer_at: transfer_at.or(current.transfer_at),
            credit_amount: current.credit_amount,
            bonus_amount: current.bonus_amount,
            bank_charge_amount: current.bank_charge_amount,
            slip_url: current.slip_url.clone(),
            confirmed_by: actor.clone(),
        };

        match self.command.create_action(&req).await {
            Ok(action) => Ok(Some(action)),
            Err(e) if e.is_duplicate() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn tombstone(&self, action: &TransactionActionModel) {
        if let Err(e) = self.command.rollback_action(action.id).await {
            error!("❌ Failed to roll back action {}: {e}", action.action_key);
        }
    }

    /// Applies the step; the journal row is tombstoned when it does not commit.
    async fn commit_step(
        &self,
        action: &TransactionActionModel,
        step: &TransactionStep,
    ) -> Result<BankTransactionModel, ServiceError> {
        match self.command.apply_step(step).await {
            Ok(tx) => Ok(tx),
            Err(e) => {
                error!("❌ Step {} failed: {e}", action.action_key);
                self.tombstone(action).await;
                Err(e.into())
            }
        }
    }

    /// Journal, then apply; a concurrent duplicate yields `Replayed`.
    async fn run_step(
        &self,
        current: &BankTransactionModel,
        key: String,
        actor: &Actor,
        step: TransactionStep,
    ) -> Result<StepOutcome, ServiceError> {
        let Some(action) = self
            .begin_action(current, key, actor, step.transfer_at, current.from_account_id)
            .await?
        else {
            return Ok(StepOutcome::Replayed(self.load(current.id).await?));
        };

        self.commit_step(&action, &step)
            .await
            .map(StepOutcome::Applied)
    }

    async fn member_binding(&self, member: &UserModel) -> AccountBinding {
        let bank_id = match member.bank_code.as_deref() {
            Some(code) if !code.is_empty() => self.banks.find_by_code(code).await.ok().map(|b| b.id),
            _ => None,
        };

        AccountBinding {
            account_id: None,
            bank_id,
            account_name: member.fullname.clone(),
            account_number: member.bank_account.clone(),
        }
    }

    async fn operator_binding(
        &self,
        account_id: i64,
        usage: TransferType,
    ) -> Result<AccountBinding, ServiceError> {
        let account = self.account(account_id).await?;
        let account_type = account
            .account_type()
            .ok_or_else(|| ServiceError::bad_state("bank account has no usable type"))?;

        let allowed = match usage {
            TransferType::Deposit => account_type.allows_deposit(),
            _ => account_type.allows_withdraw(),
        };

        if !allowed {
            return Err(ServiceError::invalid(format!(
                "bank account {} cannot be used for {usage}",
                account.account_number
            )));
        }

        Ok(AccountBinding::from(&account))
    }

    async fn deposit_state_step(
        &self,
        id: i64,
        req: &ConfirmDepositRequest,
        actor: &Actor,
    ) -> Result<StepOutcome, ServiceError> {
        let key = ActionKey::DepositConfirmState.for_transaction(id);
        if let Some(tx) = self.replay(&key, id).await? {
            return Ok(StepOutcome::Replayed(tx));
        }

        validate_request(req)?;

        let current = self.load(id).await?;
        expect_type(&current, &[TransferType::Deposit, TransferType::Bonus])?;
        expect_status(&current, TransactionStatus::Pending)?;

        let mut step =
            TransactionStep::new(id, TransactionStatus::Pending, TransactionStatus::PendingCredit);
        step.confirmed_by = Some(actor.clone());
        step.transfer_at = req.transfer_at;
        step.slip_url = req.slip_url.clone();
        step.bonus_amount = req.bonus_amount;

        self.run_step(&current, key, actor, step).await
    }

    async fn deposit_credit_step(
        &self,
        id: i64,
        req: &ConfirmDepositRequest,
        actor: &Actor,
    ) -> Result<StepOutcome, ServiceError> {
        let key = ActionKey::DepositConfirmCredit.for_transaction(id);
        if let Some(tx) = self.replay(&key, id).await? {
            return Ok(StepOutcome::Replayed(tx));
        }

        validate_request(req)?;

        let current = self.load(id).await?;
        expect_type(&current, &[TransferType::Deposit, TransferType::Bonus])?;
        expect_status(&current, TransactionStatus::PendingCredit)?;

        let transfer_at = req.transfer_at.or(current.transfer_at).unwrap_or_else(local_now);
        let bonus = req.bonus_amount.unwrap_or(current.bonus_amount);

        let mut moves = Vec::new();
        if current.credit_amount > 0.0 {
            moves.push(CreditMove {
                user_id: current.user_id,
                amount: current.credit_amount,
                statement_type: MemberStatementType::Deposit,
                info: INFO_DEPOSIT.into(),
                transfer_at,
            });
        }
        if bonus > 0.0 {
            moves.push(CreditMove {
                user_id: current.user_id,
                amount: bonus,
                statement_type: MemberStatementType::Bonus,
                info: INFO_BONUS.into(),
                transfer_at,
            });
        }

        let mut step =
            TransactionStep::new(id, TransactionStatus::PendingCredit, TransactionStatus::Finished);
        step.credit_moves = moves;
        step.confirmed_by = Some(actor.clone());
        step.transfer_at = Some(transfer_at);
        step.slip_url = req.slip_url.clone();
        step.bonus_amount = req.bonus_amount;

        self.run_step(&current, key, actor, step).await
    }

    async fn withdraw_credit_step(
        &self,
        id: i64,
        req: &ConfirmWithdrawRequest,
        actor: &Actor,
    ) -> Result<StepOutcome, ServiceError> {
        let key = ActionKey::WithdrawConfirmCredit.for_transaction(id);
        if let Some(tx) = self.replay(&key, id).await? {
            return Ok(StepOutcome::Replayed(tx));
        }

        validate_request(req)?;

        let current = self.load(id).await?;
        let transfer_type =
            expect_type(&current, &[TransferType::Withdraw, TransferType::GetCreditBack])?;
        expect_status(&current, TransactionStatus::PendingCredit)?;

        let from_account = match req.from_account_id {
            Some(account_id) if transfer_type == TransferType::Withdraw => {
                Some(self.operator_binding(account_id, TransferType::Withdraw).await?)
            }
            _ => None,
        };

        let member = self
            .users
            .find_by_id(current.user_id)
            .await
            .map_err(ServiceError::missing("member"))?;

        if member.credit < current.credit_amount {
            warn!(
                "member {} has {} credit, withdraw {} needs {}",
                member.id, member.credit, id, current.credit_amount
            );
            return Err(ServiceError::InsufficientCredit {
                available: member.credit,
                requested: current.credit_amount,
            });
        }

        let (next_status, statement_type, info) = match transfer_type {
            TransferType::Withdraw => (
                TransactionStatus::PendingTransfer,
                MemberStatementType::Withdraw,
                INFO_WITHDRAW,
            ),
            _ => (
                TransactionStatus::Finished,
                MemberStatementType::GetCreditBack,
                INFO_GET_CREDIT_BACK,
            ),
        };

        let mut step = TransactionStep::new(id, TransactionStatus::PendingCredit, next_status);
        step.credit_moves = vec![CreditMove {
            user_id: current.user_id,
            amount: current.credit_amount,
            statement_type,
            info: info.into(),
            transfer_at: req.transfer_at.unwrap_or_else(local_now),
        }];
        step.confirmed_by = Some(actor.clone());
        step.bank_charge_amount = req.bank_charge_amount;
        step.from_account = from_account;

        self.run_step(&current, key, actor, step).await
    }

    async fn withdraw_transfer_step(
        &self,
        id: i64,
        req: &ConfirmWithdrawRequest,
        actor: &Actor,
    ) -> Result<StepOutcome, ServiceError> {
        let key = ActionKey::WithdrawConfirmTransfer.for_transaction(id);
        if let Some(action) = self.query.find_live_action(&key).await? {
            return self.resume_transfer(id, &action, req, actor).await;
        }

        validate_request(req)?;

        let current = self.load(id).await?;
        expect_type(&current, &[TransferType::Withdraw])?;
        expect_status(&current, TransactionStatus::PendingTransfer)?;

        let rebind = match req.from_account_id {
            Some(account_id) => Some(self.operator_binding(account_id, TransferType::Withdraw).await?),
            None => None,
        };

        let source = match rebind
            .as_ref()
            .and_then(|b| b.account_id)
            .or(current.from_account_id)
        {
            Some(account_id) => Some(self.account(account_id).await?),
            None => None,
        };

        let now = local_now();
        let Some(action) = self
            .begin_action(&current, key, actor, Some(now), source.as_ref().map(|a| a.id))
            .await?
        else {
            return Ok(StepOutcome::Replayed(self.load(id).await?));
        };

        let paid = match &source {
            Some(account) => match self.pay_out(&current, account).await {
                Ok(paid) => paid,
                Err(e) => {
                    error!("❌ Transfer of withdraw {id} failed: {e}");
                    self.tombstone(&action).await;
                    return Err(e);
                }
            },
            None => false,
        };

        let mut step =
            TransactionStep::new(id, TransactionStatus::PendingTransfer, TransactionStatus::Finished);
        step.confirmed_by = Some(actor.clone());
        step.transfer_at = Some(now);
        step.bank_charge_amount = req.bank_charge_amount;
        step.from_account = rebind;

        if !paid {
            return self
                .commit_step(&action, &step)
                .await
                .map(StepOutcome::Applied);
        }

        // The money has left the operator account: the action stays live whatever happens next.
        if let Err(e) = self.command.mark_action_paid(action.id).await {
            error!("❌ Payout of withdraw {id} sent but not recorded on {}: {e}", action.action_key);
        }

        self.command.apply_step(&step).await.map(StepOutcome::Applied).map_err(|e| {
            error!("❌ Withdraw {id} paid out but still {}: {e}", current.status);
            ServiceError::from(e)
        })
    }

    /// A live transfer action exists. A paid one whose transaction never left
    /// `pending_transfer` is finished here without another payout.
    async fn resume_transfer(
        &self,
        id: i64,
        action: &TransactionActionModel,
        req: &ConfirmWithdrawRequest,
        actor: &Actor,
    ) -> Result<StepOutcome, ServiceError> {
        let current = self.load(id).await?;

        if action.paid_at.is_none() || current.status() != Some(TransactionStatus::PendingTransfer) {
            info!("{} already recorded, returning current state", action.action_key);
            return Ok(StepOutcome::Replayed(current));
        }

        warn!(
            "withdraw {id} was paid out by {}, finishing it without a new transfer",
            action.action_key
        );

        let from_account = match action.from_account_id {
            Some(account_id) if action.from_account_id != current.from_account_id => {
                Some(AccountBinding::from(&self.account(account_id).await?))
            }
            _ => None,
        };

        let mut step =
            TransactionStep::new(id, TransactionStatus::PendingTransfer, TransactionStatus::Finished);
        step.confirmed_by = Some(actor.clone());
        step.transfer_at = action.paid_at;
        step.bank_charge_amount = req.bank_charge_amount;
        step.from_account = from_account;

        let tx = self.command.apply_step(&step).await?;

        Ok(StepOutcome::Applied(tx))
    }

    /// Sends the money through the gateway when the source account is allowed to.
    /// `false` when the payout is left to a manual transfer.
    async fn pay_out(
        &self,
        tx: &BankTransactionModel,
        account: &BankAccountModel,
    ) -> Result<bool, ServiceError> {
        let allowed = account_allowed(
            &self.bot_config,
            BotAccountConfigKey::AllowWithdrawFromAccount,
            &account.account_number,
        )
        .await?;

        if !allowed {
            info!(
                "gateway payout not allowed from {}, recording manual transfer",
                account.account_number
            );
            return Ok(false);
        }

        let bank_code = match tx.to_bank_id {
            Some(bank_id) => self
                .banks
                .find_by_id(bank_id)
                .await
                .map(|b| b.code)
                .map_err(ServiceError::missing_as(|| {
                    ServiceError::bad_state("member bank is unknown")
                }))?,
            None => return Err(ServiceError::bad_state("member bank is unknown")),
        };

        let to = tx
            .to_account_number
            .clone()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ServiceError::bad_state("member account number is missing"))?;

        let req = GatewayTransferRequest {
            account_from: account.account_number.clone(),
            account_to: to,
            amount: tx.credit_amount,
            bank_code,
            pin: account.pin_code.clone().unwrap_or_default(),
        };

        self.gateway.transfer(&req).await?;

        Ok(true)
    }

    /// Advances a withdraw as far as its source account's automation allows.
    async fn process_auto_withdraw(
        &self,
        tx: BankTransactionModel,
    ) -> Result<BankTransactionModel, ServiceError> {
        let Some(status) = tx.status() else {
            return Ok(tx);
        };
        if tx.transfer_type() != Some(TransferType::Withdraw) || status.is_terminal() {
            return Ok(tx);
        }

        let (account, bind_main) = match tx.from_account_id {
            Some(account_id) => (self.account(account_id).await?, false),
            None => match self.accounts.find_main_withdraw().await? {
                Some(main) => (main, true),
                None => {
                    info!("no withdraw account for {}, leaving it manual", tx.id);
                    return Ok(tx);
                }
            },
        };

        let plan = plan_auto_withdraw(&account, status, tx.credit_amount);
        let system = Actor::system();
        let mut bind_main = bind_main;
        let mut current = tx;

        if plan.credit {
            let req = ConfirmWithdrawRequest {
                from_account_id: bind_main.then_some(account.id),
                ..Default::default()
            };
            current = self
                .withdraw_credit_step(current.id, &req, &system)
                .await?
                .transaction()
                .clone();
            bind_main = false;
        }

        if plan.transfer && current.status() == Some(TransactionStatus::PendingTransfer) {
            let req = ConfirmWithdrawRequest {
                from_account_id: bind_main.then_some(account.id),
                ..Default::default()
            };
            current = self
                .withdraw_transfer_step(current.id, &req, &system)
                .await?
                .transaction()
                .clone();
        }

        Ok(current)
    }

    /// Auto-withdraw after another operation; failures leave the withdraw where it stopped.
    async fn try_auto_withdraw(&self, tx: BankTransactionModel) -> BankTransactionModel {
        let id = tx.id;
        let fallback = tx.clone();

        match self.process_auto_withdraw(tx).await {
            Ok(tx) => tx,
            Err(e) => {
                warn!("auto withdraw of {id} stopped: {e}");
                self.load(id).await.unwrap_or(fallback)
            }
        }
    }
}

fn expect_type(
    tx: &BankTransactionModel,
    allowed: &[TransferType],
) -> Result<TransferType, ServiceError> {
    match tx.transfer_type() {
        Some(t) if allowed.contains(&t) => Ok(t),
        _ => Err(ServiceError::bad_state(format!(
            "transaction {} is a {}, not {}",
            tx.id,
            tx.transfer_type,
            allowed
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join("/")
        ))),
    }
}

fn expect_status(tx: &BankTransactionModel, expected: TransactionStatus) -> Result<(), ServiceError> {
    if tx.status() == Some(expected) {
        Ok(())
    } else {
        Err(ServiceError::bad_state(format!(
            "transaction {} is {}, expected {expected}",
            tx.id, tx.status
        )))
    }
}

#[async_trait]
impl TransactionCommandServiceTrait for TransactionCommandService {
    async fn create(&self, req: &CreateBankTransactionRequest, actor: &Actor) -> TransactionResult {
        validate_request(req)?;

        info!(
            "💸 Creating {} for {} by {}",
            req.transfer_type, req.member_code, actor.username
        );

        let member = self
            .users
            .find_by_member_code(req.member_code.trim())
            .await
            .map_err(ServiceError::missing("member"))?;

        let member_code = member
            .member_code
            .clone()
            .unwrap_or_else(|| req.member_code.trim().to_string());

        let mut new_tx = NewBankTransaction {
            user_id: member.id,
            member_code,
            transfer_type: req.transfer_type,
            credit_amount: req.credit_amount,
            bonus_amount: req.bonus_amount,
            bank_charge_amount: req.bank_charge_amount,
            from_account: None,
            to_account: None,
            statement_id: req.statement_id,
            slip_url: req.slip_url.clone(),
            status: TransactionStatus::PendingCredit,
            is_auto_credit: req.is_auto_credit,
            transfer_at: req.transfer_at,
            created_by: actor.clone(),
        };

        match req.transfer_type {
            TransferType::Deposit => {
                if req.credit_amount <= 0.0 {
                    return Err(ServiceError::invalid("credit_amount: must be greater than zero"));
                }
                let to_account_id = req
                    .to_account_id
                    .ok_or_else(|| ServiceError::invalid("to_account_id: deposit account is required"))?;

                new_tx.from_account = Some(self.member_binding(&member).await);
                new_tx.to_account =
                    Some(self.operator_binding(to_account_id, TransferType::Deposit).await?);
                new_tx.status = TransactionStatus::Pending;
            }
            TransferType::Withdraw => {
                if req.credit_amount <= 0.0 {
                    return Err(ServiceError::invalid("credit_amount: must be greater than zero"));
                }
                if let Some(from_account_id) = req.from_account_id {
                    new_tx.from_account =
                        Some(self.operator_binding(from_account_id, TransferType::Withdraw).await?);
                }
                new_tx.to_account = Some(self.member_binding(&member).await);
                new_tx.is_auto_credit = false;
            }
            TransferType::Bonus => {
                if req.bonus_amount <= 0.0 {
                    return Err(ServiceError::invalid("bonus_amount: must be greater than zero"));
                }
                if req.credit_amount != 0.0 {
                    return Err(ServiceError::invalid(
                        "credit_amount: a bonus carries no deposited credit",
                    ));
                }
            }
            TransferType::GetCreditBack => {
                if req.credit_amount <= 0.0 {
                    return Err(ServiceError::invalid("credit_amount: must be greater than zero"));
                }
            }
        }

        let created = self.command.create(&new_tx).await.map_err(|e| {
            error!("❌ Failed to create {} for {}: {e}", req.transfer_type, req.member_code);
            ServiceError::from(e)
        })?;

        let created = if created.transfer_type() == Some(TransferType::Withdraw) {
            self.try_auto_withdraw(created).await
        } else {
            created
        };

        Ok(ApiResponse::ok("transaction created", created.into()))
    }

    async fn confirm_deposit(
        &self,
        id: i64,
        req: &ConfirmDepositRequest,
        actor: &Actor,
    ) -> TransactionResult {
        let outcome = self.deposit_state_step(id, req, actor).await?;

        if let StepOutcome::Applied(tx) = &outcome {
            if tx.is_auto_credit {
                let credit_req = ConfirmDepositRequest {
                    transfer_at: req.transfer_at,
                    ..Default::default()
                };
                return Ok(self
                    .deposit_credit_step(id, &credit_req, actor)
                    .await?
                    .into_response("deposit confirmed and credited"));
            }
        }

        Ok(outcome.into_response("deposit confirmed"))
    }

    async fn confirm_deposit_credit(
        &self,
        id: i64,
        req: &ConfirmDepositRequest,
        actor: &Actor,
    ) -> TransactionResult {
        Ok(self
            .deposit_credit_step(id, req, actor)
            .await?
            .into_response("deposit credited"))
    }

    async fn confirm_withdraw_credit(
        &self,
        id: i64,
        req: &ConfirmWithdrawRequest,
        actor: &Actor,
    ) -> TransactionResult {
        match self.withdraw_credit_step(id, req, actor).await? {
            StepOutcome::Applied(tx) => {
                let tx = self.try_auto_withdraw(tx).await;
                Ok(ApiResponse::ok("withdraw credit confirmed", tx.into()))
            }
            replayed => Ok(replayed.into_response("withdraw credit confirmed")),
        }
    }

    async fn confirm_withdraw_transfer(
        &self,
        id: i64,
        req: &ConfirmWithdrawRequest,
        actor: &Actor,
    ) -> TransactionResult {
        Ok(self
            .withdraw_transfer_step(id, req, actor)
            .await?
            .into_response("withdraw transferred"))
    }

    async fn continue_auto_withdraw(&self, id: i64, actor: &Actor) -> TransactionResult {
        let current = self.load(id).await?;
        expect_type(&current, &[TransferType::Withdraw])?;

        if current.status().is_none_or(|s| s.is_terminal()) {
            return Err(ServiceError::bad_state(format!(
                "transaction {id} is already {}",
                current.status
            )));
        }

        info!("continuing auto withdraw {id} for {}", actor.username);

        let tx = self.process_auto_withdraw(current).await?;

        Ok(ApiResponse::ok("auto withdraw processed", tx.into()))
    }

    async fn cancel(
        &self,
        id: i64,
        req: &CancelTransactionRequest,
        actor: &Actor,
    ) -> TransactionResult {
        let key = ActionKey::Cancel.for_transaction(id);
        if let Some(tx) = self.replay(&key, id).await? {
            return Ok(ApiResponse::ok(MSG_ALREADY_PROCESSED, tx.into()));
        }

        validate_request(req)?;

        let current = self.load(id).await?;
        let status = current
            .status()
            .filter(|s| !s.is_terminal())
            .ok_or_else(|| {
                ServiceError::bad_state(format!("transaction {id} is already {}", current.status))
            })?;

        let is_withdraw = current.transfer_type() == Some(TransferType::Withdraw);

        if is_withdraw
            && self
                .query
                .find_live_action(&ActionKey::WithdrawConfirmTransfer.for_transaction(id))
                .await?
                .is_some()
        {
            return Err(ServiceError::bad_state(format!(
                "transfer of withdraw {id} has already started"
            )));
        }

        let debited = is_withdraw
            && self
                .query
                .find_live_action(&ActionKey::WithdrawConfirmCredit.for_transaction(id))
                .await?
                .is_some();

        let mut step = TransactionStep::new(id, status, TransactionStatus::Canceled);
        step.canceled_by = Some(actor.clone());
        step.cancel_remark = req.cancel_remark.clone();

        if debited {
            step.credit_moves = vec![CreditMove {
                user_id: current.user_id,
                amount: current.credit_amount,
                statement_type: MemberStatementType::Refund,
                info: INFO_REFUND.into(),
                transfer_at: local_now(),
            }];
        }

        let outcome = self.run_step(&current, key, actor, step).await?;

        if debited {
            info!("↩️ Refunded {} to member {}", current.credit_amount, current.user_id);
        }

        Ok(outcome.into_response("transaction canceled"))
    }

    async fn remove(&self, id: i64, actor: &Actor) -> TransactionResult {
        let current = self.load(id).await?;

        if !current.status().is_some_and(|s| s.is_terminal()) {
            return Err(ServiceError::bad_state(format!(
                "transaction {id} is {} and cannot be removed",
                current.status
            )));
        }

        let removed = self.command.remove(id, actor).await?;

        Ok(ApiResponse::ok("transaction removed", removed.into()))
    }
}
