mod agent;
mod api;
mod bank_account;
mod gateway;
mod member;
mod statement;
mod transaction;

pub use self::agent::AgentResponse;
pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::bank_account::{BankAccountResponse, BankResponse};
pub use self::gateway::{
    GatewayAccountCreated, GatewayBalance, GatewayBotAccount, GatewayBotStatus, GatewayEnvelope,
    GatewayStatementPage, GatewayTransferResult, GatewayVerifyResult,
};
pub use self::member::{MemberResponse, MemberStatementResponse, MemberSummaryResponse};
pub use self::statement::{
    AccountStatementResponse, BankStatementResponse, StatementSummaryResponse,
    WebhookResultResponse,
};
pub use self::transaction::{
    BankTransactionResponse, StatusCountResponse, TransactionActionResponse,
    TransactionDetailResponse,
};
