mod command;
mod query;

pub use self::command::BankAccountCommandRepository;
pub use self::query::BankAccountQueryRepository;
