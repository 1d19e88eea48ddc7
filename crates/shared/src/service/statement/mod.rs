mod command;
mod query;

pub use self::command::StatementCommandService;
pub use self::query::StatementQueryService;

use crate::{
    abstract_trait::member::repository::DynUserRepository, errors::ServiceError, model::UserModel,
};

/// Members who may own a counterparty account; a blank number never matches.
pub(crate) async fn possible_owners(
    users: &DynUserRepository,
    bank_code: &str,
    account_number: &str,
) -> Result<Vec<UserModel>, ServiceError> {
    let account_number = account_number.trim();
    if account_number.is_empty() || bank_code.trim().is_empty() {
        return Ok(Vec::new());
    }

    Ok(users.find_possible_owners(bank_code, account_number).await?)
}
