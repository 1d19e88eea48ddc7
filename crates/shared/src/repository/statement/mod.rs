mod command;
mod query;

pub use self::command::BankStatementCommandRepository;
pub use self::query::BankStatementQueryRepository;
