use crate::{
    abstract_trait::{
        bank::repository::DynBankRepository,
        bank_account::{
            repository::query::DynBankAccountQueryRepository,
            service::query::BankAccountQueryServiceTrait,
        },
    },
    domain::{
        requests::FindAllBankAccounts,
        responses::{ApiResponse, ApiResponsePagination, BankAccountResponse, BankResponse},
    },
    errors::ServiceError,
    service::validate_request,
};
use async_trait::async_trait;
use tracing::info;

pub struct BankAccountQueryService {
    query: DynBankAccountQueryRepository,
    banks: DynBankRepository,
}

impl BankAccountQueryService {
    pub async fn new(query: DynBankAccountQueryRepository, banks: DynBankRepository) -> Self {
        Self { query, banks }
    }
}

#[async_trait]
impl BankAccountQueryServiceTrait for BankAccountQueryService {
    async fn find_all(
        &self,
        req: &FindAllBankAccounts,
    ) -> Result<ApiResponsePagination<Vec<BankAccountResponse>>, ServiceError> {
        validate_request(req)?;

        let (accounts, total) = self.query.find_all(req).await?;

        info!("🏦 Found {} bank accounts (total {total})", accounts.len());

        Ok(ApiResponsePagination {
            message: "bank accounts".into(),
            list: accounts.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<ApiResponse<BankAccountResponse>, ServiceError> {
        let account = self
            .query
            .find_by_id(id)
            .await
            .map_err(ServiceError::missing("bank account"))?;

        Ok(ApiResponse::ok("bank account", account.into()))
    }

    async fn find_banks(&self) -> Result<ApiResponse<Vec<BankResponse>>, ServiceError> {
        let banks = self.banks.find_all().await?;

        Ok(ApiResponse::ok(
            "banks",
            banks.into_iter().map(Into::into).collect(),
        ))
    }
}
