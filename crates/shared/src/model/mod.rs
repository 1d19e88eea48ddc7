mod action_key;
mod bank;
mod bank_account;
mod bank_statement;
mod bank_transaction;
mod bot_account_config;
mod enums;
mod member_statement;
mod statement_action;
mod transaction_action;
mod user;
mod webhook_log;

pub use self::action_key::ActionKey;
pub use self::bank::BankModel;
pub use self::bank_account::BankAccountModel;
pub use self::bank_statement::{BankStatementModel, StatementSummaryModel};
pub use self::bank_transaction::{
    BankTransactionModel, MemberTransactionSummaryModel, TransactionStatusCountModel,
};
pub use self::bot_account_config::BotAccountConfigKey;
pub use self::enums::{
    AccountPolicy, AccountType, AutoFlag, AutoWithdrawFlag, BankTypeFlag, ConnectionStatus,
    MemberStatementType, StatementActionType, StatementStatus, StatementType, TransactionStatus,
    TransferType, WebhookLogStatus,
};
pub use self::member_statement::MemberStatementModel;
pub use self::statement_action::StatementActionModel;
pub use self::transaction_action::TransactionActionModel;
pub use self::user::UserModel;
pub use self::webhook_log::WebhookLogModel;
