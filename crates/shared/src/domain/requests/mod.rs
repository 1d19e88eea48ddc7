mod actor;
mod agent;
mod bank_account;
mod gateway;
mod member_credit;
mod pagination;
mod statement;
mod transaction;

pub use self::actor::Actor;
pub use self::agent::{AgentAuthRequest, AgentCreditRequest, MemberAgentRequest};
pub use self::bank_account::{
    AccountBinding, CreateBankAccountRequest, FindAllBankAccounts, NewBankAccount,
    UpdateBankAccountRequest, UpdateBotStatus,
};
pub use self::gateway::{
    GatewayAccountRequest, GatewayEnableRequest, GatewayStatementQuery, GatewayTransferRequest,
    GatewayVerifyTransferRequest,
};
pub use self::member_credit::{CreditChange, FindMemberStatements};
pub use self::pagination::{SortSpec, default_limit, default_page};
pub use self::statement::{
    ExternalStatement, FindAllStatements, GetAccountStatements, MatchStatementOwnerRequest,
    NewBankStatement, StatementTransition, WebhookActionRequest,
};
pub use self::transaction::{
    CancelTransactionRequest, ConfirmDepositRequest, ConfirmWithdrawRequest,
    CreateBankTransactionRequest, CreditMove, FindAllTransactions, NewBankTransaction,
    NewTransactionAction, TransactionStep,
};
