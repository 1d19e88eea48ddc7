mod agent;
mod bank_gateway;

pub use self::agent::AgentClient;
pub use self::bank_gateway::BankGatewayClient;
