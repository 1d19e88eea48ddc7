use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!("unknown {} '{other}'", stringify!($name))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(ConnectionStatus {
    Active => "active",
    Disconnected => "disconnected",
});

text_enum!(AutoFlag {
    Manual => "manual",
    Auto => "auto",
});

text_enum!(AutoWithdrawFlag {
    Manual => "manual",
    AutoBackoffice => "auto_backoffice",
    AutoBot => "auto_bot",
});

text_enum!(StatementType {
    TransferIn => "transfer_in",
    TransferOut => "transfer_out",
});

text_enum!(
    /// `pending` is the only non-terminal state.
    StatementStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Ignored => "ignored",
    }
);

text_enum!(TransferType {
    Deposit => "deposit",
    Withdraw => "withdraw",
    Bonus => "bonus",
    GetCreditBack => "getcreditback",
});

text_enum!(TransactionStatus {
    Pending => "pending",
    PendingCredit => "pending_credit",
    PendingTransfer => "pending_transfer",
    Finished => "finished",
    Canceled => "canceled",
});

text_enum!(MemberStatementType {
    Deposit => "deposit",
    Withdraw => "withdraw",
    Bonus => "bonus",
    GetCreditBack => "getcreditback",
    Refund => "refund",
});

text_enum!(StatementActionType {
    Confirmed => "confirmed",
    Ignored => "ignored",
});

text_enum!(WebhookLogStatus {
    Pending => "pending",
    Success => "success",
    Failed => "failed",
});

text_enum!(
    /// Value set of the `allow_*` bot account config keys.
    AccountPolicy {
        Disabled => "none",
        List => "list",
        All => "all",
    }
);

text_enum!(BankTypeFlag {
    Bank => "bank",
    EWallet => "ewallet",
});

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Finished | TransactionStatus::Canceled)
    }

    /// Label shown by the admin UI; canceled rows are presented as failed.
    pub fn ui_label(&self) -> &'static str {
        match self {
            TransactionStatus::Canceled => "failed",
            other => other.as_str(),
        }
    }
}

impl StatementStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StatementStatus::Pending)
    }
}

impl StatementType {
    /// Projects the gateway's transaction code onto a direction.
    pub fn from_txn_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "X1" | "CR" => Some(StatementType::TransferIn),
            "X2" | "DR" => Some(StatementType::TransferOut),
            _ => None,
        }
    }

    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            StatementType::TransferIn => amount.abs(),
            StatementType::TransferOut => -amount.abs(),
        }
    }
}

impl MemberStatementType {
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            MemberStatementType::Deposit | MemberStatementType::Bonus | MemberStatementType::Refund
        )
    }

    pub fn signed(&self, amount: f64) -> f64 {
        if self.is_credit() {
            amount.abs()
        } else {
            -amount.abs()
        }
    }
}

/// Operator account usage, stored as `account_type_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Deposit = 1,
    Withdraw = 2,
    Both = 3,
}

impl AccountType {
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(AccountType::Deposit),
            2 => Some(AccountType::Withdraw),
            3 => Some(AccountType::Both),
            _ => None,
        }
    }

    pub fn allows_deposit(&self) -> bool {
        matches!(self, AccountType::Deposit | AccountType::Both)
    }

    pub fn allows_withdraw(&self) -> bool {
        matches!(self, AccountType::Withdraw | AccountType::Both)
    }
}
