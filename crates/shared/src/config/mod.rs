mod database;
mod jwt;
mod myconfig;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::jwt::{AdminClaims, JwtConfig, MemberClaims};
pub use self::myconfig::{AccountingConfig, AgentConfig, Config};
