use anyhow::{Context, Result};
use shared::{
    abstract_trait::{
        agent::DynAgentClient,
        bank::repository::DynBankRepository,
        bank_account::{
            repository::{
                command::DynBankAccountCommandRepository, query::DynBankAccountQueryRepository,
            },
            service::{command::DynBankAccountCommandService, query::DynBankAccountQueryService},
        },
        bank_gateway::DynBankGatewayClient,
        bot_config::repository::DynBotAccountConfigRepository,
        member::{repository::DynUserRepository, service::DynMemberAgentService},
        member_credit::{repository::DynMemberCreditRepository, service::DynMemberCreditService},
        statement::{
            repository::{
                command::DynBankStatementCommandRepository,
                query::DynBankStatementQueryRepository,
            },
            service::{command::DynStatementCommandService, query::DynStatementQueryService},
        },
        transaction::{
            repository::{
                command::DynBankTransactionCommandRepository,
                query::DynBankTransactionQueryRepository,
            },
            service::{command::DynTransactionCommandService, query::DynTransactionQueryService},
        },
        webhook_log::repository::DynWebhookLogRepository,
    },
    client::{AgentClient, BankGatewayClient},
    config::{Config, ConnectionPool},
    repository::{
        bank::BankRepository,
        bank_account::{BankAccountCommandRepository, BankAccountQueryRepository},
        bot_config::BotAccountConfigRepository,
        member::UserRepository,
        member_credit::MemberCreditRepository,
        statement::{BankStatementCommandRepository, BankStatementQueryRepository},
        transaction::{BankTransactionCommandRepository, BankTransactionQueryRepository},
        webhook_log::WebhookLogRepository,
    },
    service::{
        BankAccountCommandService, BankAccountQueryService, MemberAgentService,
        MemberCreditService, StatementCommandService, StatementQueryService,
        TransactionCommandService, TransactionQueryService,
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub bank_account_query: DynBankAccountQueryService,
    pub bank_account_command: DynBankAccountCommandService,
    pub statement_query: DynStatementQueryService,
    pub statement_command: DynStatementCommandService,
    pub transaction_query: DynTransactionQueryService,
    pub transaction_command: DynTransactionCommandService,
    pub member_credit: DynMemberCreditService,
    pub member_agent: DynMemberAgentService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("bank_account_query", &"BankAccountQueryService")
            .field("bank_account_command", &"BankAccountCommandService")
            .field("statement_query", &"StatementQueryService")
            .field("statement_command", &"StatementCommandService")
            .field("transaction_query", &"TransactionQueryService")
            .field("transaction_command", &"TransactionCommandService")
            .field("member_credit", &"MemberCreditService")
            .field("member_agent", &"MemberAgentService")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let banks = Arc::new(BankRepository::new(pool.clone())) as DynBankRepository;
        let bot_config =
            Arc::new(BotAccountConfigRepository::new(pool.clone())) as DynBotAccountConfigRepository;
        let users = Arc::new(UserRepository::new(pool.clone())) as DynUserRepository;
        let ledger =
            Arc::new(MemberCreditRepository::new(pool.clone())) as DynMemberCreditRepository;
        let webhook_log =
            Arc::new(WebhookLogRepository::new(pool.clone())) as DynWebhookLogRepository;
        let account_query =
            Arc::new(BankAccountQueryRepository::new(pool.clone())) as DynBankAccountQueryRepository;
        let account_command = Arc::new(BankAccountCommandRepository::new(pool.clone()))
            as DynBankAccountCommandRepository;
        let statement_query = Arc::new(BankStatementQueryRepository::new(pool.clone()))
            as DynBankStatementQueryRepository;
        let statement_command = Arc::new(BankStatementCommandRepository::new(pool.clone()))
            as DynBankStatementCommandRepository;
        let transaction_query = Arc::new(BankTransactionQueryRepository::new(pool.clone()))
            as DynBankTransactionQueryRepository;
        let transaction_command = Arc::new(BankTransactionCommandRepository::new(pool))
            as DynBankTransactionCommandRepository;

        let gateway = Arc::new(
            BankGatewayClient::new(&config.accounting, webhook_log.clone())
                .context("Failed to build bank gateway client")?,
        ) as DynBankGatewayClient;
        let agent = Arc::new(
            AgentClient::new(&config.agent).context("Failed to build agent client")?,
        ) as DynAgentClient;

        let bank_account_query = Arc::new(
            BankAccountQueryService::new(account_query.clone(), banks.clone()).await,
        ) as DynBankAccountQueryService;

        let bank_account_command = Arc::new(
            BankAccountCommandService::new(
                account_query.clone(),
                account_command,
                banks.clone(),
                bot_config.clone(),
                gateway.clone(),
                config.accounting.local_webhook_endpoint.clone(),
            )
            .await,
        ) as DynBankAccountCommandService;

        let transaction_command_service = Arc::new(
            TransactionCommandService::new(
                transaction_query.clone(),
                transaction_command,
                users.clone(),
                account_query.clone(),
                banks.clone(),
                bot_config,
                gateway.clone(),
            )
            .await,
        ) as DynTransactionCommandService;

        let transaction_query_service = Arc::new(
            TransactionQueryService::new(transaction_query, users.clone()).await,
        ) as DynTransactionQueryService;

        let statement_command_service = Arc::new(
            StatementCommandService::new(
                account_query.clone(),
                statement_query.clone(),
                statement_command,
                banks.clone(),
                users.clone(),
                transaction_command_service.clone(),
                webhook_log,
                gateway.clone(),
            )
            .await,
        ) as DynStatementCommandService;

        let statement_query_service = Arc::new(
            StatementQueryService::new(statement_query, account_query, banks, users.clone(), gateway)
                .await,
        ) as DynStatementQueryService;

        let member_credit =
            Arc::new(MemberCreditService::new(ledger, users.clone()).await) as DynMemberCreditService;

        let member_agent = Arc::new(MemberAgentService::new(users, agent, &config.agent).await)
            as DynMemberAgentService;

        Ok(Self {
            bank_account_query,
            bank_account_command,
            statement_query: statement_query_service,
            statement_command: statement_command_service,
            transaction_query: transaction_query_service,
            transaction_command: transaction_command_service,
            member_credit,
            member_agent,
        })
    }
}
