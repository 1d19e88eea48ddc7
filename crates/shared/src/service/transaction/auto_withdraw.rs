use crate::model::{AutoWithdrawFlag, BankAccountModel, TransactionStatus};

/// Which withdraw steps may run without an operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoWithdrawPlan {
    pub credit: bool,
    pub transfer: bool,
}

fn within(limit: f64, amount: f64) -> bool {
    limit <= 0.0 || amount <= limit
}

/// Decides the automatic steps for a withdraw paid from `account`.
///
/// A max amount of `0` means unlimited. The transfer step is only planned when
/// the withdraw already is (or will be after the credit step) in `pending_transfer`.
pub fn plan_auto_withdraw(
    account: &BankAccountModel,
    status: TransactionStatus,
    amount: f64,
) -> AutoWithdrawPlan {
    if account.auto_withdraw() == AutoWithdrawFlag::Manual {
        return AutoWithdrawPlan::default();
    }

    let credit = status == TransactionStatus::PendingCredit
        && account.auto_withdraw_credit()
        && within(account.auto_withdraw_max_amount, amount);

    let reaches_transfer = credit || status == TransactionStatus::PendingTransfer;

    let transfer = reaches_transfer
        && account.auto_withdraw_confirm()
        && within(account.auto_transfer_max_amount, amount);

    AutoWithdrawPlan { credit, transfer }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::local_now;

    fn account(withdraw: &str, credit: &str, confirm: &str, max_credit: f64, max_transfer: f64) -> BankAccountModel {
        BankAccountModel {
            id: 1,
            bank_id: 1,
            bank_code: "kbank".into(),
            bank_name: "กสิกรไทย".into(),
            account_number: "1234567890".into(),
            account_name: "operator".into(),
            account_type_id: 2,
            device_uid: Some("device".into()),
            pin_code: Some("pin".into()),
            external_id: Some(10),
            connection_status: "active".into(),
            last_conn_update_at: None,
            account_balance: 0.0,
            auto_credit_flag: "manual".into(),
            auto_withdraw_flag: withdraw.into(),
            auto_withdraw_credit_flag: credit.into(),
            auto_withdraw_confirm_flag: confirm.into(),
            is_main_withdraw: true,
            auto_withdraw_max_amount: max_credit,
            auto_transfer_max_amount: max_transfer,
            created_at: local_now(),
            updated_at: None,
            deleted_at: None,
        }
    }

    #[test]
    fn manual_account_does_nothing() {
        let acc = account("manual", "auto", "auto", 0.0, 0.0);
        let plan = plan_auto_withdraw(&acc, TransactionStatus::PendingCredit, 100.0);
        assert_eq!(plan, AutoWithdrawPlan::default());
    }

    #[test]
    fn fully_automatic_with_unlimited_caps() {
        let acc = account("auto_backoffice", "auto", "auto", 0.0, 0.0);
        let plan = plan_auto_withdraw(&acc, TransactionStatus::PendingCredit, 1_000_000.0);
        assert_eq!(plan, AutoWithdrawPlan { credit: true, transfer: true });
    }

    #[test]
    fn credit_cap_stops_both_steps_from_pending_credit() {
        let acc = account("auto_bot", "auto", "auto", 500.0, 0.0);
        let plan = plan_auto_withdraw(&acc, TransactionStatus::PendingCredit, 800.0);
        assert_eq!(plan, AutoWithdrawPlan::default());
    }

    #[test]
    fn transfer_cap_applies_separately() {
        let acc = account("auto_bot", "auto", "auto", 0.0, 300.0);
        let plan = plan_auto_withdraw(&acc, TransactionStatus::PendingCredit, 800.0);
        assert_eq!(plan, AutoWithdrawPlan { credit: true, transfer: false });
    }

    #[test]
    fn transfer_only_from_pending_transfer() {
        let acc = account("auto_bot", "manual", "auto", 0.0, 0.0);
        let plan = plan_auto_withdraw(&acc, TransactionStatus::PendingTransfer, 100.0);
        assert_eq!(plan, AutoWithdrawPlan { credit: false, transfer: true });

        let plan = plan_auto_withdraw(&acc, TransactionStatus::PendingCredit, 100.0);
        assert_eq!(plan, AutoWithdrawPlan::default());
    }
}
