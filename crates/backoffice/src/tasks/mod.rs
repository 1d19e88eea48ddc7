mod bot_status;

pub use self::bot_status::spawn_bot_status_task;
