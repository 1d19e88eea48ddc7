mod auto_withdraw;
mod command;
mod query;

pub use self::auto_withdraw::{AutoWithdrawPlan, plan_auto_withdraw};
pub use self::command::TransactionCommandService;
pub use self::query::TransactionQueryService;
