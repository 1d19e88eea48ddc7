pub mod agent;
pub mod bank;
pub mod bank_account;
pub mod bank_gateway;
pub mod bot_config;
pub mod member;
pub mod member_credit;
pub mod statement;
pub mod transaction;
pub mod webhook_log;
