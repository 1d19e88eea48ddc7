mod logs;
mod parse_datetime;
mod shutdown;
mod sign;
mod statement_info;

pub use self::logs::Logger;
pub use self::parse_datetime::{local_now, parse_datetime};
pub use self::shutdown::shutdown_signal;
pub use self::sign::create_sign;
pub use self::statement_info::{parse_account_number, parse_bank};
