use crate::{
    abstract_trait::{
        bank::repository::DynBankRepository,
        bank_account::repository::query::DynBankAccountQueryRepository,
        bank_gateway::DynBankGatewayClient,
        member::repository::DynUserRepository,
        statement::{
            repository::query::DynBankStatementQueryRepository,
            service::query::StatementQueryServiceTrait,
        },
    },
    domain::{
        requests::{ExternalStatement, FindAllStatements, GatewayStatementQuery, GetAccountStatements},
        responses::{
            AccountStatementResponse, ApiResponse, ApiResponsePagination, BankStatementResponse,
            MemberResponse, StatementSummaryResponse,
        },
    },
    errors::ServiceError,
    model::{BankStatementModel, StatementType},
    service::{statement::possible_owners, validate_request},
    utils::parse_datetime,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::info;

const STATUS_NEW: &str = "new";

pub struct StatementQueryService {
    query: DynBankStatementQueryRepository,
    accounts: DynBankAccountQueryRepository,
    banks: DynBankRepository,
    users: DynUserRepository,
    gateway: DynBankGatewayClient,
}

impl StatementQueryService {
    pub async fn new(
        query: DynBankStatementQueryRepository,
        accounts: DynBankAccountQueryRepository,
        banks: DynBankRepository,
        users: DynUserRepository,
        gateway: DynBankGatewayClient,
    ) -> Self {
        Self {
            query,
            accounts,
            banks,
            users,
            gateway,
        }
    }
}

/// Tags a gateway row with the stored status, or `new` when it was never ingested.
pub(crate) fn to_account_statement(
    row: &ExternalStatement,
    stored: &HashMap<i64, BankStatementModel>,
) -> AccountStatementResponse {
    let statement_type = StatementType::from_txn_code(&row.txn_code);

    AccountStatementResponse {
        external_id: row.id,
        statement_type: statement_type.map(|t| t.as_str().to_string()),
        txn_code: row.txn_code.clone(),
        amount: statement_type.map_or(row.amount, |t| t.signed(row.amount)),
        info: row.info.clone(),
        transfer_at: parse_datetime(&row.date_time),
        status: stored
            .get(&row.id)
            .map_or_else(|| STATUS_NEW.to_string(), |s| s.status.clone()),
    }
}

#[async_trait]
impl StatementQueryServiceTrait for StatementQueryService {
    async fn find_all(
        &self,
        req: &FindAllStatements,
    ) -> Result<ApiResponsePagination<Vec<BankStatementResponse>>, ServiceError> {
        validate_request(req)?;

        let (rows, total) = self.query.find_all(req).await?;

        info!("🔍 Found {} statements (total {total})", rows.len());

        Ok(ApiResponsePagination {
            message: "statements".into(),
            list: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<BankStatementResponse>, ServiceError> {
        let statement = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::missing("statement"))?;

        Ok(ApiResponse::ok("statement", statement.into()))
    }

    async fn summary(
        &self,
        req: &FindAllStatements,
    ) -> Result<ApiResponse<StatementSummaryResponse>, ServiceError> {
        validate_request(req)?;

        let summary = self.query.summary(req).await?;

        Ok(ApiResponse::ok("statement summary", summary.into()))
    }

    async fn find_possible_owners(
        &self,
        statement_id: i64,
    ) -> Result<ApiResponse<Vec<MemberResponse>>, ServiceError> {
        let statement = self
            .query
            .find_by_id(statement_id)
            .await
            .map_err(ServiceError::missing("statement"))?;

        let bank_code = match statement.from_bank_id {
            Some(bank_id) => self.banks.find_by_id(bank_id).await.ok().map(|b| b.code),
            None => None,
        };

        let owners = match (bank_code, statement.from_account_number.as_deref()) {
            (Some(code), Some(number)) => possible_owners(&self.users, &code, number).await?,
            _ => Vec::new(),
        };

        Ok(ApiResponse::ok(
            "possible owners",
            owners.into_iter().map(Into::into).collect(),
        ))
    }

    async fn get_account_statements(
        &self,
        account_id: i64,
        req: &GetAccountStatements,
    ) -> Result<ApiResponsePagination<Vec<AccountStatementResponse>>, ServiceError> {
        validate_request(req)?;

        let account = self
            .accounts
            .find_by_id(account_id)
            .await
            .map_err(ServiceError::missing("bank account"))?;

        let page = self
            .gateway
            .list_statements(&GatewayStatementQuery {
                account_no: account.account_number.clone(),
                page: req.page,
                size: req.limit,
                of_date_time: req.of_date_time.clone(),
            })
            .await?;

        let external_ids: Vec<i64> = page.list.iter().map(|s| s.id).collect();
        let stored: HashMap<i64, BankStatementModel> = self
            .query
            .find_by_external_ids(&external_ids)
            .await?
            .into_iter()
            .map(|s| (s.external_id, s))
            .collect();

        info!(
            "🏦 Pulled {} statements of {} ({} already stored)",
            page.list.len(),
            account.account_number,
            stored.len()
        );

        Ok(ApiResponsePagination {
            message: "account statements".into(),
            list: page
                .list
                .iter()
                .map(|row| to_account_statement(row, &stored))
                .collect(),
            total: page.total,
        })
    }
}
