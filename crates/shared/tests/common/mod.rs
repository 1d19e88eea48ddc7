#![allow(dead_code)]

use async_trait::async_trait;
use shared::{
    abstract_trait::{
        bank::repository::{BankRepositoryTrait, DynBankRepository},
        bank_account::{
            repository::{
                command::{BankAccountCommandRepositoryTrait, DynBankAccountCommandRepository},
                query::{BankAccountQueryRepositoryTrait, DynBankAccountQueryRepository},
            },
            service::command::DynBankAccountCommandService,
        },
        bank_gateway::{BankGatewayClientTrait, DynBankGatewayClient},
        bot_config::repository::{BotAccountConfigRepositoryTrait, DynBotAccountConfigRepository},
        member::repository::{DynUserRepository, UserRepositoryTrait},
        member_credit::{
            repository::{DynMemberCreditRepository, MemberCreditRepositoryTrait},
            service::DynMemberCreditService,
        },
        statement::{
            repository::{
                command::{BankStatementCommandRepositoryTrait, DynBankStatementCommandRepository},
                query::{BankStatementQueryRepositoryTrait, DynBankStatementQueryRepository},
            },
            service::{command::DynStatementCommandService, query::DynStatementQueryService},
        },
        transaction::{
            repository::{
                command::{
                    BankTransactionCommandRepositoryTrait, DynBankTransactionCommandRepository,
                },
                query::{BankTransactionQueryRepositoryTrait, DynBankTransactionQueryRepository},
            },
            service::{command::DynTransactionCommandService, query::DynTransactionQueryService},
        },
        webhook_log::repository::{DynWebhookLogRepository, WebhookLogRepositoryTrait},
    },
    domain::{
        requests::{
            Actor, CreditChange, CreditMove, ExternalStatement, FindAllBankAccounts,
            FindAllStatements, FindAllTransactions, FindMemberStatements, GatewayAccountRequest,
            GatewayStatementQuery, GatewayTransferRequest, GatewayVerifyTransferRequest,
            NewBankAccount, NewBankStatement, NewBankTransaction, NewTransactionAction,
            StatementTransition, TransactionStep, UpdateBotStatus,
        },
        responses::{
            GatewayAccountCreated, GatewayBalance, GatewayBotAccount, GatewayBotStatus,
            GatewayStatementPage, GatewayTransferResult, GatewayVerifyResult,
        },
    },
    errors::{RepositoryError, ServiceError},
    model::{
        ActionKey, BankAccountModel, BankModel, BankStatementModel, BankTransactionModel,
        BotAccountConfigKey, MemberStatementModel, MemberTransactionSummaryModel,
        StatementActionModel, StatementStatus, StatementSummaryModel, TransactionActionModel,
        TransactionStatus, TransactionStatusCountModel, UserModel, WebhookLogModel,
        WebhookLogStatus,
    },
    service::{
        BankAccountCommandService, MemberCreditService, StatementCommandService,
        StatementQueryService, TransactionCommandService, TransactionQueryService,
    },
    utils::local_now,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct State {
    next_id: i64,
    banks: Vec<BankModel>,
    accounts: Vec<BankAccountModel>,
    users: Vec<UserModel>,
    ledger: Vec<MemberStatementModel>,
    statements: Vec<BankStatementModel>,
    statement_actions: Vec<StatementActionModel>,
    transactions: Vec<BankTransactionModel>,
    actions: Vec<TransactionActionModel>,
    webhook_logs: Vec<WebhookLogModel>,
    bot_config: Vec<(BotAccountConfigKey, String)>,
    fail_next_step: bool,
    race_next_action: bool,
}

impl State {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Postgres stand-in with the same uniqueness and all-or-nothing rules.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

fn apply_move(
    users: &mut [UserModel],
    mv: &CreditMove,
    id: i64,
) -> Result<MemberStatementModel, RepositoryError> {
    if mv.amount.is_nan() || mv.amount <= 0.0 {
        return Err(RepositoryError::Custom("credit amount must be positive".into()));
    }

    let user = users
        .iter_mut()
        .find(|u| u.id == mv.user_id && u.deleted_at.is_none())
        .ok_or(RepositoryError::NotFound)?;

    let delta = mv.statement_type.signed(mv.amount);
    if delta < 0.0 && mv.amount > user.credit {
        return Err(RepositoryError::InsufficientCredit {
            available: user.credit,
            requested: mv.amount,
        });
    }

    let before = user.credit;
    user.credit = before + delta;

    Ok(MemberStatementModel {
        id,
        user_id: mv.user_id,
        statement_type: mv.statement_type.as_str().to_string(),
        transfer_at: mv.transfer_at,
        info: mv.info.clone(),
        before_balance: before,
        amount: delta,
        after_balance: user.credit,
        created_at: local_now(),
    })
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        let store = Arc::new(Self::default());
        {
            let mut state = store.lock();
            for (code, name) in [
                ("kbank", "กสิกรไทย"),
                ("scb", "ไทยพาณิชย์"),
                ("bay", "กรุงศรีอยุธยา"),
            ] {
                let id = state.id();
                state.banks.push(BankModel {
                    id,
                    name: name.into(),
                    code: code.into(),
                    icon_url: None,
                    type_flag: "bank".into(),
                });
            }
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn bank_id(&self, code: &str) -> i64 {
        self.lock()
            .banks
            .iter()
            .find(|b| b.code == code)
            .map(|b| b.id)
            .unwrap()
    }

    pub fn add_member(&self, member_code: &str, bank_code: &str, bank_account: &str, credit: f64) -> UserModel {
        let mut state = self.lock();
        let id = state.id();
        let user = UserModel {
            id,
            member_code: (!member_code.is_empty()).then(|| member_code.to_string()),
            username: Some(format!("user{id}")),
            phone: format!("08{id:08}"),
            fullname: Some(format!("Member {id}")),
            bank_code: Some(bank_code.into()),
            bank_account: Some(bank_account.into()),
            true_wallet: None,
            status: "active".into(),
            credit,
            verified_at: None,
            is_reset_password: false,
            created_at: local_now(),
            updated_at: None,
            deleted_at: None,
        };
        state.users.push(user.clone());
        user
    }

    /// Operator account with manual flags; `adjust` tweaks it before insert.
    pub fn add_account(
        &self,
        bank_code: &str,
        number: &str,
        account_type_id: i32,
        adjust: impl FnOnce(&mut BankAccountModel),
    ) -> BankAccountModel {
        let bank_id = self.bank_id(bank_code);
        let mut state = self.lock();
        let id = state.id();
        let mut account = BankAccountModel {
            id,
            bank_id,
            bank_code: bank_code.into(),
            bank_name: bank_code.to_uppercase(),
            account_number: number.into(),
            account_name: format!("Operator {id}"),
            account_type_id,
            device_uid: None,
            pin_code: None,
            external_id: None,
            connection_status: "disconnected".into(),
            last_conn_update_at: None,
            account_balance: 0.0,
            auto_credit_flag: "manual".into(),
            auto_withdraw_flag: "manual".into(),
            auto_withdraw_credit_flag: "manual".into(),
            auto_withdraw_confirm_flag: "manual".into(),
            is_main_withdraw: false,
            auto_withdraw_max_amount: 0.0,
            auto_transfer_max_amount: 0.0,
            created_at: local_now(),
            updated_at: None,
            deleted_at: None,
        };
        adjust(&mut account);
        state.accounts.push(account.clone());
        account
    }

    pub fn set_bot_config(&self, key: BotAccountConfigKey, values: &[&str]) {
        let mut state = self.lock();
        state.bot_config.retain(|(k, _)| *k != key);
        for v in values {
            state.bot_config.push((key, v.to_string()));
        }
    }

    pub fn fail_next_step(&self) {
        self.lock().fail_next_step = true;
    }

    /// The next `create_action` finds its key taken by another caller.
    pub fn race_next_action(&self) {
        self.lock().race_next_action = true;
    }

    pub fn user(&self, id: i64) -> UserModel {
        self.lock().users.iter().find(|u| u.id == id).cloned().unwrap()
    }

    pub fn transaction(&self, id: i64) -> BankTransactionModel {
        self.lock()
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .unwrap()
    }

    pub fn transactions(&self) -> Vec<BankTransactionModel> {
        self.lock().transactions.clone()
    }

    pub fn actions_of(&self, transaction_id: i64) -> Vec<TransactionActionModel> {
        self.lock()
            .actions
            .iter()
            .filter(|a| a.transaction_id == transaction_id)
            .cloned()
            .collect()
    }

    pub fn ledger_of(&self, user_id: i64) -> Vec<MemberStatementModel> {
        self.lock()
            .ledger
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn statements(&self) -> Vec<BankStatementModel> {
        self.lock().statements.clone()
    }

    pub fn statement_actions(&self) -> Vec<StatementActionModel> {
        self.lock().statement_actions.clone()
    }

    pub fn webhook_logs(&self) -> Vec<WebhookLogModel> {
        self.lock().webhook_logs.clone()
    }

    pub fn account(&self, id: i64) -> BankAccountModel {
        self.lock()
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .unwrap()
    }

    pub fn accounts(&self) -> Vec<BankAccountModel> {
        self.lock().accounts.clone()
    }

    fn write_account(state: &mut State, id: Option<i64>, req: &NewBankAccount) -> BankAccountModel {
        if req.is_main_withdraw {
            for a in state.accounts.iter_mut().filter(|a| Some(a.id) != id) {
                a.is_main_withdraw = false;
            }
        }

        let bank = state.banks.iter().find(|b| b.id == req.bank_id).cloned();
        let id = match id {
            Some(id) => id,
            None => {
                let id = state.id();
                state.accounts.push(BankAccountModel {
                    id,
                    bank_id: req.bank_id,
                    bank_code: String::new(),
                    bank_name: String::new(),
                    account_number: String::new(),
                    account_name: String::new(),
                    account_type_id: req.account_type_id,
                    device_uid: None,
                    pin_code: None,
                    external_id: None,
                    connection_status: "disconnected".into(),
                    last_conn_update_at: None,
                    account_balance: 0.0,
                    auto_credit_flag: String::new(),
                    auto_withdraw_flag: String::new(),
                    auto_withdraw_credit_flag: String::new(),
                    auto_withdraw_confirm_flag: String::new(),
                    is_main_withdraw: false,
                    auto_withdraw_max_amount: 0.0,
                    auto_transfer_max_amount: 0.0,
                    created_at: local_now(),
                    updated_at: None,
                    deleted_at: None,
                });
                id
            }
        };

        let account = state.accounts.iter_mut().find(|a| a.id == id).unwrap();
        account.bank_id = req.bank_id;
        if let Some(bank) = bank {
            account.bank_code = bank.code;
            account.bank_name = bank.name;
        }
        account.account_number = req.account_number.clone();
        account.account_name = req.account_name.clone();
        account.account_type_id = req.account_type_id;
        account.device_uid = req.device_uid.clone();
        account.pin_code = req.pin_code.clone();
        account.external_id = req.external_id;
        account.auto_credit_flag = req.auto_credit_flag.clone();
        account.auto_withdraw_flag = req.auto_withdraw_flag.clone();
        account.auto_withdraw_credit_flag = req.auto_withdraw_credit_flag.clone();
        account.auto_withdraw_confirm_flag = req.auto_withdraw_confirm_flag.clone();
        account.is_main_withdraw = req.is_main_withdraw;
        account.auto_withdraw_max_amount = req.auto_withdraw_max_amount;
        account.auto_transfer_max_amount = req.auto_transfer_max_amount;
        account.updated_at = Some(local_now());
        account.clone()
    }
}

#[async_trait]
impl BankRepositoryTrait for MemoryStore {
    async fn find_all(&self) -> Result<Vec<BankModel>, RepositoryError> {
        Ok(self.lock().banks.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<BankModel, RepositoryError> {
        self.lock()
            .banks
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_code(&self, code: &str) -> Result<BankModel, RepositoryError> {
        self.lock()
            .banks
            .iter()
            .find(|b| b.code.eq_ignore_ascii_case(code))
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl BotAccountConfigRepositoryTrait for MemoryStore {
    async fn find_values(&self, key: BotAccountConfigKey) -> Result<Vec<String>, RepositoryError> {
        Ok(self
            .lock()
            .bot_config
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
            .collect())
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<UserModel, RepositoryError> {
        self.lock()
            .users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_member_code(&self, member_code: &str) -> Result<UserModel, RepositoryError> {
        self.lock()
            .users
            .iter()
            .find(|u| u.member_code.as_deref() == Some(member_code) && u.deleted_at.is_none())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_possible_owners(
        &self,
        bank_code: &str,
        account_fragment: &str,
    ) -> Result<Vec<UserModel>, RepositoryError> {
        Ok(self
            .lock()
            .users
            .iter()
            .filter(|u| u.deleted_at.is_none())
            .filter(|u| {
                u.bank_code
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(bank_code))
            })
            .filter(|u| {
                u.bank_account
                    .as_deref()
                    .is_some_and(|a| a.contains(account_fragment))
            })
            .cloned()
            .collect())
    }

    async fn set_member_code(
        &self,
        id: i64,
        member_code: &str,
    ) -> Result<UserModel, RepositoryError> {
        let mut state = self.lock();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        user.member_code = Some(member_code.to_string());
        Ok(user.clone())
    }
}

#[async_trait]
impl MemberCreditRepositoryTrait for MemoryStore {
    async fn increase(&self, change: &CreditChange) -> Result<MemberStatementModel, RepositoryError> {
        let mut state = self.lock();
        let id = state.id();
        let mv = CreditMove {
            user_id: change.user_id,
            amount: change.amount,
            statement_type: change.statement_type,
            info: change.info.clone(),
            transfer_at: change.transfer_at.unwrap_or_else(local_now),
        };
        let row = apply_move(&mut state.users, &mv, id)?;
        state.ledger.push(row.clone());
        Ok(row)
    }

    async fn decrease(&self, change: &CreditChange) -> Result<MemberStatementModel, RepositoryError> {
        self.increase(change).await
    }

    async fn find_by_user(
        &self,
        user_id: i64,
        req: &FindMemberStatements,
    ) -> Result<(Vec<MemberStatementModel>, i64), RepositoryError> {
        let rows: Vec<_> = self
            .lock()
            .ledger
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| {
                req.statement_type
                    .is_none_or(|t| r.statement_type == t.as_str())
            })
            .cloned()
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }
}

#[async_trait]
impl WebhookLogRepositoryTrait for MemoryStore {
    async fn create(
        &self,
        log_type: &str,
        json_request: &serde_json::Value,
    ) -> Result<i64, RepositoryError> {
        let mut state = self.lock();
        let id = state.id();
        state.webhook_logs.push(WebhookLogModel {
            id,
            log_type: log_type.into(),
            json_request: json_request.clone(),
            json_payload: None,
            status: WebhookLogStatus::Pending.as_str().into(),
            created_at: local_now(),
            updated_at: None,
        });
        Ok(id)
    }

    async fn set_success(
        &self,
        id: i64,
        json_payload: &serde_json::Value,
    ) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let log = state
            .webhook_logs
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(RepositoryError::NotFound)?;
        log.status = WebhookLogStatus::Success.as_str().into();
        log.json_payload = Some(json_payload.clone());
        Ok(())
    }

    async fn set_failed(&self, id: i64, reason: &str) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let log = state
            .webhook_logs
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(RepositoryError::NotFound)?;
        log.status = WebhookLogStatus::Failed.as_str().into();
        log.json_payload = Some(serde_json::json!({ "error": reason }));
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> Result<WebhookLogModel, RepositoryError> {
        self.lock()
            .webhook_logs
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl BankAccountQueryRepositoryTrait for MemoryStore {
    async fn find_all(
        &self,
        _req: &FindAllBankAccounts,
    ) -> Result<(Vec<BankAccountModel>, i64), RepositoryError> {
        let rows: Vec<_> = self
            .lock()
            .accounts
            .iter()
            .filter(|a| a.deleted_at.is_none())
            .cloned()
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<BankAccountModel, RepositoryError> {
        self.lock()
            .accounts
            .iter()
            .find(|a| a.id == id && a.deleted_at.is_none())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<BankAccountModel, RepositoryError> {
        self.lock()
            .accounts
            .iter()
            .find(|a| a.external_id == Some(external_id) && a.deleted_at.is_none())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> Result<Option<BankAccountModel>, RepositoryError> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .find(|a| a.account_number == account_number && a.deleted_at.is_none())
            .cloned())
    }

    async fn find_main_withdraw(&self) -> Result<Option<BankAccountModel>, RepositoryError> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .find(|a| a.is_main_withdraw && a.deleted_at.is_none())
            .cloned())
    }

    async fn find_automated(&self) -> Result<Vec<BankAccountModel>, RepositoryError> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .filter(|a| a.deleted_at.is_none() && a.is_automated())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BankAccountCommandRepositoryTrait for MemoryStore {
    async fn create(&self, req: &NewBankAccount) -> Result<BankAccountModel, RepositoryError> {
        let mut state = self.lock();
        if state
            .accounts
            .iter()
            .any(|a| a.account_number == req.account_number && a.deleted_at.is_none())
        {
            return Err(RepositoryError::AlreadyExists("account_number".into()));
        }
        Ok(Self::write_account(&mut state, None, req))
    }

    async fn update(
        &self,
        id: i64,
        req: &NewBankAccount,
    ) -> Result<BankAccountModel, RepositoryError> {
        let mut state = self.lock();
        if !state.accounts.iter().any(|a| a.id == id && a.deleted_at.is_none()) {
            return Err(RepositoryError::NotFound);
        }
        Ok(Self::write_account(&mut state, Some(id), req))
    }

    async fn set_external(
        &self,
        id: i64,
        external_id: Option<i64>,
        pin_code: Option<String>,
    ) -> Result<BankAccountModel, RepositoryError> {
        let mut state = self.lock();
        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RepositoryError::NotFound)?;
        account.external_id = external_id;
        if pin_code.is_some() {
            account.pin_code = pin_code;
        }
        Ok(account.clone())
    }

    async fn update_bot_status(&self, req: &UpdateBotStatus) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.id == req.id)
            .ok_or(RepositoryError::NotFound)?;
        account.connection_status = req.connection_status.as_str().into();
        if let Some(balance) = req.account_balance {
            account.account_balance = balance;
        }
        account.last_conn_update_at = Some(req.last_conn_update_at);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<BankAccountModel, RepositoryError> {
        let mut state = self.lock();
        let account = state
            .accounts
            .iter_mut()
            .find(|a| a.id == id && a.deleted_at.is_none())
            .ok_or(RepositoryError::NotFound)?;
        account.account_number = format!("{}_del{}", account.account_number, account.id);
        account.is_main_withdraw = false;
        account.deleted_at = Some(local_now());
        Ok(account.clone())
    }
}

#[async_trait]
impl BankStatementQueryRepositoryTrait for MemoryStore {
    async fn find_all(
        &self,
        req: &FindAllStatements,
    ) -> Result<(Vec<BankStatementModel>, i64), RepositoryError> {
        let rows: Vec<_> = self
            .lock()
            .statements
            .iter()
            .filter(|s| s.deleted_at.is_none())
            .filter(|s| req.status.is_none_or(|st| s.status == st.as_str()))
            .cloned()
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<BankStatementModel, RepositoryError> {
        self.lock()
            .statements
            .iter()
            .find(|s| s.id == id && s.deleted_at.is_none())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_external_id(
        &self,
        external_id: i64,
    ) -> Result<Option<BankStatementModel>, RepositoryError> {
        Ok(self
            .lock()
            .statements
            .iter()
            .find(|s| s.external_id == external_id && s.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_external_ids(
        &self,
        external_ids: &[i64],
    ) -> Result<Vec<BankStatementModel>, RepositoryError> {
        Ok(self
            .lock()
            .statements
            .iter()
            .filter(|s| external_ids.contains(&s.external_id) && s.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn summary(
        &self,
        _req: &FindAllStatements,
    ) -> Result<StatementSummaryModel, RepositoryError> {
        let state = self.lock();
        let live = state.statements.iter().filter(|s| s.deleted_at.is_none());
        let mut summary = StatementSummaryModel::default();
        for s in live {
            match s.status() {
                Some(StatementStatus::Pending) => summary.total_pending += 1,
                Some(StatementStatus::Confirmed) => summary.total_confirmed += 1,
                Some(StatementStatus::Ignored) => summary.total_ignored += 1,
                None => {}
            }
            if s.amount >= 0.0 {
                summary.sum_transfer_in += s.amount;
            } else {
                summary.sum_transfer_out += s.amount;
            }
        }
        Ok(summary)
    }

    async fn find_actions(
        &self,
        statement_id: i64,
    ) -> Result<Vec<StatementActionModel>, RepositoryError> {
        Ok(self
            .lock()
            .statement_actions
            .iter()
            .filter(|a| a.statement_id == statement_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BankStatementCommandRepositoryTrait for MemoryStore {
    async fn create(&self, req: &NewBankStatement) -> Result<BankStatementModel, RepositoryError> {
        let mut state = self.lock();
        if state
            .statements
            .iter()
            .any(|s| s.external_id == req.external_id && s.deleted_at.is_none())
        {
            return Err(RepositoryError::AlreadyExists("bank_statements_external_id".into()));
        }

        let id = state.id();
        let statement = BankStatementModel {
            id,
            account_id: req.account_id,
            external_id: req.external_id,
            detail: req.detail.clone(),
            statement_type: req.statement_type.as_str().into(),
            amount: req.amount,
            transfer_at: req.transfer_at,
            from_bank_id: req.from_bank_id,
            from_account_number: req.from_account_number.clone(),
            status: StatementStatus::Pending.as_str().into(),
            created_at: local_now(),
            updated_at: None,
            deleted_at: None,
        };
        state.statements.push(statement.clone());
        Ok(statement)
    }

    async fn transition(
        &self,
        req: &StatementTransition,
    ) -> Result<BankStatementModel, RepositoryError> {
        let mut state = self.lock();
        let current = state
            .statements
            .iter()
            .find(|s| s.id == req.statement_id && s.deleted_at.is_none())
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        if current.status != StatementStatus::Pending.as_str() {
            return Err(RepositoryError::Conflict(format!(
                "statement {} is already {}",
                current.id, current.status
            )));
        }

        let id = state.id();
        let now = local_now();
        state.statement_actions.push(StatementActionModel {
            id,
            statement_id: current.id,
            user_id: req.user_id,
            action_type: req.action_type.as_str().into(),
            json_before: serde_json::to_value(&current).unwrap(),
            confirmed_at: now,
            confirmed_by_user_id: req.actor.id,
            confirmed_by_username: req.actor.username.clone(),
        });

        let statement = state
            .statements
            .iter_mut()
            .find(|s| s.id == req.statement_id)
            .unwrap();
        statement.status = req.next_status.as_str().into();
        statement.updated_at = Some(now);
        Ok(statement.clone())
    }
}

#[async_trait]
impl BankTransactionQueryRepositoryTrait for MemoryStore {
    async fn find_all(
        &self,
        req: &FindAllTransactions,
        statuses: &[TransactionStatus],
    ) -> Result<(Vec<BankTransactionModel>, i64), RepositoryError> {
        let rows: Vec<_> = self
            .lock()
            .transactions
            .iter()
            .filter(|t| t.deleted_at.is_none() && t.removed_at.is_none())
            .filter(|t| t.status().is_some_and(|s| statuses.contains(&s)))
            .filter(|t| req.user_id.is_none_or(|u| t.user_id == u))
            .cloned()
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<BankTransactionModel, RepositoryError> {
        self.lock()
            .transactions
            .iter()
            .find(|t| t.id == id && t.deleted_at.is_none())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn count_by_status(
        &self,
        _req: &FindAllTransactions,
    ) -> Result<Vec<TransactionStatusCountModel>, RepositoryError> {
        let state = self.lock();
        let mut counts: Vec<TransactionStatusCountModel> = Vec::new();
        for t in state
            .transactions
            .iter()
            .filter(|t| t.deleted_at.is_none() && t.removed_at.is_none())
        {
            match counts.iter_mut().find(|c| c.status == t.status) {
                Some(c) => c.total += 1,
                None => counts.push(TransactionStatusCountModel {
                    status: t.status.clone(),
                    total: 1,
                }),
            }
        }
        Ok(counts)
    }

    async fn member_summary(
        &self,
        user_id: i64,
    ) -> Result<MemberTransactionSummaryModel, RepositoryError> {
        let state = self.lock();
        let mut summary = MemberTransactionSummaryModel {
            user_id,
            ..Default::default()
        };
        for t in state.transactions.iter().filter(|t| {
            t.user_id == user_id
                && t.status == TransactionStatus::Finished.as_str()
                && t.removed_at.is_none()
        }) {
            match t.transfer_type.as_str() {
                "deposit" => {
                    summary.deposit_count += 1;
                    summary.deposit_amount += t.credit_amount;
                }
                "withdraw" => {
                    summary.withdraw_count += 1;
                    summary.withdraw_amount += t.credit_amount;
                }
                "bonus" => summary.bonus_count += 1,
                "getcreditback" => {
                    summary.getcreditback_count += 1;
                    summary.getcreditback_amount += t.credit_amount;
                }
                _ => {}
            }
            summary.bonus_amount += t.bonus_amount;
        }
        Ok(summary)
    }

    async fn find_actions(
        &self,
        transaction_id: i64,
    ) -> Result<Vec<TransactionActionModel>, RepositoryError> {
        Ok(self.actions_of(transaction_id))
    }

    async fn find_live_action(
        &self,
        action_key: &str,
    ) -> Result<Option<TransactionActionModel>, RepositoryError> {
        Ok(self
            .lock()
            .actions
            .iter()
            .find(|a| a.action_key == action_key && a.deleted_at.is_none())
            .cloned())
    }
}

fn new_action(id: i64, req: &NewTransactionAction) -> TransactionActionModel {
    let now = local_now();
    TransactionActionModel {
        id,
        action_key: req.action_key.clone(),
        transaction_id: req.transaction_id,
        user_id: req.user_id,
        transfer_type: req.transfer_type.as_str().into(),
        from_account_id: req.from_account_id,
        to_account_id: req.to_account_id,
        json_before: req.json_before.clone(),
        transfer_at: req.transfer_at,
        credit_amount: req.credit_amount,
        bonus_amount: req.bonus_amount,
        bank_charge_amount: req.bank_charge_amount,
        slip_url: req.slip_url.clone(),
        confirmed_at: now,
        confirmed_by_user_id: req.confirmed_by.id,
        confirmed_by_username: req.confirmed_by.username.clone(),
        paid_at: None,
        created_at: now,
        deleted_at: None,
    }
}

#[async_trait]
impl BankTransactionCommandRepositoryTrait for MemoryStore {
    async fn create(
        &self,
        req: &NewBankTransaction,
    ) -> Result<BankTransactionModel, RepositoryError> {
        let mut state = self.lock();
        let id = state.id();
        let from = req.from_account.as_ref();
        let to = req.to_account.as_ref();

        let transaction = BankTransactionModel {
            id,
            user_id: req.user_id,
            member_code: req.member_code.clone(),
            transfer_type: req.transfer_type.as_str().into(),
            credit_amount: req.credit_amount,
            bonus_amount: req.bonus_amount,
            bank_charge_amount: req.bank_charge_amount,
            paid_amount: 0.0,
            over_amount: 0.0,
            before_amount: 0.0,
            after_amount: 0.0,
            from_account_id: from.and_then(|a| a.account_id),
            from_bank_id: from.and_then(|a| a.bank_id),
            from_account_name: from.and_then(|a| a.account_name.clone()),
            from_account_number: from.and_then(|a| a.account_number.clone()),
            to_account_id: to.and_then(|a| a.account_id),
            to_bank_id: to.and_then(|a| a.bank_id),
            to_account_name: to.and_then(|a| a.account_name.clone()),
            to_account_number: to.and_then(|a| a.account_number.clone()),
            statement_id: req.statement_id,
            slip_url: req.slip_url.clone(),
            cancel_remark: None,
            status: req.status.as_str().into(),
            is_auto_credit: req.is_auto_credit,
            transfer_at: req.transfer_at,
            created_by_user_id: req.created_by.id,
            created_by_username: req.created_by.username.clone(),
            confirmed_at: None,
            confirmed_by_user_id: None,
            confirmed_by_username: None,
            canceled_at: None,
            canceled_by_user_id: None,
            canceled_by_username: None,
            removed_at: None,
            removed_by_user_id: None,
            removed_by_username: None,
            created_at: local_now(),
            updated_at: None,
            deleted_at: None,
        };
        state.transactions.push(transaction.clone());
        Ok(transaction)
    }

    async fn create_action(
        &self,
        req: &NewTransactionAction,
    ) -> Result<TransactionActionModel, RepositoryError> {
        let mut state = self.lock();
        let raced = std::mem::take(&mut state.race_next_action);
        if raced {
            let id = state.id();
            let other = new_action(id, req);
            state.actions.push(other);
        }

        if state
            .actions
            .iter()
            .any(|a| a.action_key == req.action_key && a.deleted_at.is_none())
        {
            return Err(RepositoryError::AlreadyExists("action_key".into()));
        }

        let id = state.id();
        let action = new_action(id, req);
        state.actions.push(action.clone());
        Ok(action)
    }

    async fn mark_action_paid(&self, action_id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let action = state
            .actions
            .iter_mut()
            .find(|a| a.id == action_id && a.deleted_at.is_none())
            .ok_or(RepositoryError::NotFound)?;
        action.paid_at = Some(local_now());
        Ok(())
    }

    async fn rollback_action(&self, action_id: i64) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        let action = state
            .actions
            .iter_mut()
            .find(|a| a.id == action_id && a.deleted_at.is_none())
            .ok_or(RepositoryError::NotFound)?;
        action.action_key = ActionKey::rollback(action_id);
        action.deleted_at = Some(local_now());
        Ok(())
    }

    async fn apply_step(
        &self,
        step: &TransactionStep,
    ) -> Result<BankTransactionModel, RepositoryError> {
        let mut state = self.lock();

        if std::mem::take(&mut state.fail_next_step) {
            return Err(RepositoryError::Custom("storage unavailable".into()));
        }

        let current = state
            .transactions
            .iter()
            .find(|t| {
                t.id == step.transaction_id && t.deleted_at.is_none() && t.removed_at.is_none()
            })
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        step.check(&current)?;

        let mut users = state.users.clone();
        let mut rows = Vec::new();
        let mut balances: Option<(f64, f64)> = None;
        for mv in &step.credit_moves {
            let id = state.id();
            let row = apply_move(&mut users, mv, id)?;
            balances = Some(match balances {
                Some((before, _)) => (before, row.after_balance),
                None => (row.before_balance, row.after_balance),
            });
            rows.push(row);
        }

        let next = step.apply_to(&current, balances, local_now());

        state.users = users;
        state.ledger.extend(rows);
        let slot = state
            .transactions
            .iter_mut()
            .find(|t| t.id == current.id)
            .unwrap();
        *slot = next.clone();

        Ok(next)
    }

    async fn remove(&self, id: i64, actor: &Actor) -> Result<BankTransactionModel, RepositoryError> {
        let mut state = self.lock();
        let transaction = state
            .transactions
            .iter_mut()
            .find(|t| t.id == id && t.removed_at.is_none())
            .ok_or(RepositoryError::NotFound)?;
        transaction.removed_at = Some(local_now());
        transaction.removed_by_user_id = Some(actor.id);
        transaction.removed_by_username = Some(actor.username.clone());
        Ok(transaction.clone())
    }
}

/// Bank gateway double; records calls and fails on demand.
#[derive(Default)]
pub struct ScriptedGateway {
    pub statements: Mutex<Vec<ExternalStatement>>,
    pub transfers: Mutex<Vec<GatewayTransferRequest>>,
    pub created: Mutex<Vec<GatewayAccountRequest>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_transfer: Mutex<bool>,
    pub fail_create: Mutex<bool>,
    pub fail_status: Mutex<bool>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn transfers(&self) -> Vec<GatewayTransferRequest> {
        self.transfers.lock().unwrap().clone()
    }

    fn fail(flag: &Mutex<bool>, what: &str) -> Result<(), ServiceError> {
        if *flag.lock().unwrap() {
            Err(ServiceError::ExternalApi(format!("{what} refused")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BankGatewayClientTrait for ScriptedGateway {
    async fn list_bot_accounts(&self) -> Result<Vec<GatewayBotAccount>, ServiceError> {
        Ok(Vec::new())
    }

    async fn get_balance(&self, account_number: &str) -> Result<GatewayBalance, ServiceError> {
        Self::fail(&self.fail_status, "balance")?;
        Ok(GatewayBalance {
            account_no: account_number.into(),
            balance: 12_345.0,
        })
    }

    async fn get_status(&self, account_number: &str) -> Result<GatewayBotStatus, ServiceError> {
        Self::fail(&self.fail_status, "status")?;
        Ok(GatewayBotStatus {
            account_no: account_number.into(),
            status: "online".into(),
        })
    }

    async fn list_statements(
        &self,
        query: &GatewayStatementQuery,
    ) -> Result<GatewayStatementPage, ServiceError> {
        let all = self.statements.lock().unwrap().clone();
        let size = query.size.max(1) as usize;
        let start = (query.page.max(1) as usize - 1) * size;
        Ok(GatewayStatementPage {
            list: all.iter().skip(start).take(size).cloned().collect(),
            total: all.len() as i64,
        })
    }

    async fn create_bot_account(
        &self,
        req: &GatewayAccountRequest,
    ) -> Result<GatewayAccountCreated, ServiceError> {
        Self::fail(&self.fail_create, "create")?;
        let mut created = self.created.lock().unwrap();
        created.push(req.clone());
        Ok(GatewayAccountCreated {
            id: 900 + created.len() as i64,
            encrypted_pin: Some(format!("enc:{}", req.pin)),
        })
    }

    async fn update_bot_account(
        &self,
        external_id: i64,
        req: &GatewayAccountRequest,
    ) -> Result<GatewayAccountCreated, ServiceError> {
        self.created.lock().unwrap().push(req.clone());
        Ok(GatewayAccountCreated {
            id: external_id,
            encrypted_pin: None,
        })
    }

    async fn delete_bot_account(&self, account_number: &str) -> Result<(), ServiceError> {
        self.deleted.lock().unwrap().push(account_number.into());
        Ok(())
    }

    async fn enable_bot_account(
        &self,
        _account_number: &str,
        _enable: bool,
    ) -> Result<(), ServiceError> {
        Ok(())
    }

    async fn verify_transfer(
        &self,
        req: &GatewayVerifyTransferRequest,
    ) -> Result<GatewayVerifyResult, ServiceError> {
        Ok(GatewayVerifyResult {
            account_name: "verified".into(),
            account_no: req.account_to.clone(),
        })
    }

    async fn transfer(
        &self,
        req: &GatewayTransferRequest,
    ) -> Result<GatewayTransferResult, ServiceError> {
        Self::fail(&self.fail_transfer, "transfer")?;
        self.transfers.lock().unwrap().push(req.clone());
        Ok(GatewayTransferResult {
            reference: Some(format!("ref-{}", self.transfers.lock().unwrap().len())),
            status: Some("success".into()),
        })
    }
}

/// Services wired over one [`MemoryStore`] and one [`ScriptedGateway`].
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<ScriptedGateway>,
    pub transactions: DynTransactionCommandService,
    pub transaction_query: DynTransactionQueryService,
    pub statements: DynStatementCommandService,
    pub statement_query: DynStatementQueryService,
    pub bank_accounts: DynBankAccountCommandService,
    pub member_credit: DynMemberCreditService,
}

impl Harness {
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let gateway = ScriptedGateway::new();

        let banks = store.clone() as DynBankRepository;
        let bot_config = store.clone() as DynBotAccountConfigRepository;
        let users = store.clone() as DynUserRepository;
        let ledger = store.clone() as DynMemberCreditRepository;
        let webhook_log = store.clone() as DynWebhookLogRepository;
        let account_query = store.clone() as DynBankAccountQueryRepository;
        let account_command = store.clone() as DynBankAccountCommandRepository;
        let statement_query = store.clone() as DynBankStatementQueryRepository;
        let statement_command = store.clone() as DynBankStatementCommandRepository;
        let transaction_query = store.clone() as DynBankTransactionQueryRepository;
        let transaction_command = store.clone() as DynBankTransactionCommandRepository;
        let gateway_dyn = gateway.clone() as DynBankGatewayClient;

        let transactions = Arc::new(
            TransactionCommandService::new(
                transaction_query.clone(),
                transaction_command,
                users.clone(),
                account_query.clone(),
                banks.clone(),
                bot_config.clone(),
                gateway_dyn.clone(),
            )
            .await,
        ) as DynTransactionCommandService;

        let transaction_query_service = Arc::new(
            TransactionQueryService::new(transaction_query, users.clone()).await,
        ) as DynTransactionQueryService;

        let statements = Arc::new(
            StatementCommandService::new(
                account_query.clone(),
                statement_query.clone(),
                statement_command,
                banks.clone(),
                users.clone(),
                transactions.clone(),
                webhook_log,
                gateway_dyn.clone(),
            )
            .await,
        ) as DynStatementCommandService;

        let statement_query_service = Arc::new(
            StatementQueryService::new(
                statement_query,
                account_query.clone(),
                banks.clone(),
                users.clone(),
                gateway_dyn.clone(),
            )
            .await,
        ) as DynStatementQueryService;

        let bank_accounts = Arc::new(
            BankAccountCommandService::new(
                account_query,
                account_command,
                banks,
                bot_config,
                gateway_dyn,
                "https://backoffice.test/accounting/webhooks/action".into(),
            )
            .await,
        ) as DynBankAccountCommandService;

        let member_credit =
            Arc::new(MemberCreditService::new(ledger, users).await) as DynMemberCreditService;

        Self {
            store,
            gateway,
            transactions,
            transaction_query: transaction_query_service,
            statements,
            statement_query: statement_query_service,
            bank_accounts,
            member_credit,
        }
    }
}

pub fn admin() -> Actor {
    Actor::new(7, "cashier")
}
