/// Keys of the bot policy table; each key holds one or more `config_val` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAccountConfigKey {
    AllowCreateExternalAccount,
    AllowExternalAccountNumber,
    AllowWithdrawFromAccount,
}

impl BotAccountConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            BotAccountConfigKey::AllowCreateExternalAccount => "allow_create_external_account",
            BotAccountConfigKey::AllowExternalAccountNumber => "allow_external_account_number",
            BotAccountConfigKey::AllowWithdrawFromAccount => "allow_withdraw_from_account",
        }
    }
}
