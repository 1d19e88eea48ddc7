mod bank_account;
mod member;
mod member_credit;
mod policy;
mod statement;
mod transaction;

pub use self::bank_account::{BankAccountCommandService, BankAccountQueryService};
pub use self::member::MemberAgentService;
pub use self::member_credit::MemberCreditService;
pub use self::policy::policy_allows;
pub use self::statement::{StatementCommandService, StatementQueryService};
pub use self::transaction::{
    AutoWithdrawPlan, TransactionCommandService, TransactionQueryService, plan_auto_withdraw,
};

use crate::errors::{ServiceError, validation_messages};
use tracing::error;
use validator::Validate;

pub(crate) fn validate_request<T: Validate>(req: &T) -> Result<(), ServiceError> {
    req.validate().map_err(|e| {
        let messages = validation_messages(&e);
        error!("Validation failed: {}", messages.join(", "));
        ServiceError::Validation(messages)
    })
}
