mod command;
mod query;

pub use self::command::BankTransactionCommandRepository;
pub use self::query::BankTransactionQueryRepository;
