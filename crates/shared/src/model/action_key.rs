/// Idempotency keys written to the transaction action journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKey {
    Cancel,
    DepositConfirmState,
    DepositConfirmCredit,
    WithdrawConfirmCredit,
    WithdrawConfirmTransfer,
}

impl ActionKey {
    pub fn prefix(&self) -> &'static str {
        match self {
            ActionKey::Cancel => "CANCEL",
            ActionKey::DepositConfirmState => "DCF_STATE",
            ActionKey::DepositConfirmCredit => "DCF_CREDIT",
            ActionKey::WithdrawConfirmCredit => "CFW_CREDIT",
            ActionKey::WithdrawConfirmTransfer => "CFW_TRASFER",
        }
    }

    pub fn for_transaction(&self, transaction_id: i64) -> String {
        format!("{}#{transaction_id}", self.prefix())
    }

    /// Key a rolled back action is renamed to, freeing its original key.
    pub fn rollback(action_id: i64) -> String {
        format!("ROLLBACK#{action_id}")
    }
}
