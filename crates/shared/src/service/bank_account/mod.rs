mod command;
mod query;

pub use self::command::BankAccountCommandService;
pub use self::query::BankAccountQueryService;
