mod common;

use common::Harness;
use shared::{
    abstract_trait::member_credit::service::MemberCreditServiceTrait,
    domain::requests::{CreditChange, FindMemberStatements},
    errors::ServiceError,
    model::MemberStatementType,
};

fn change(user_id: i64, amount: f64, statement_type: MemberStatementType) -> CreditChange {
    CreditChange {
        user_id,
        amount,
        statement_type,
        info: "ปรับเครดิต".into(),
        transfer_at: None,
    }
}

fn first_page() -> FindMemberStatements {
    FindMemberStatements {
        page: 1,
        ..Default::default()
    }
}

#[tokio::test]
async fn increase_and_decrease_keep_balances_chained() {
    let h = Harness::new().await;
    let member = h.store.add_member("M1", "bay", "0001234567", 100.0);

    let up = h
        .member_credit
        .increase(&change(member.id, 50.0, MemberStatementType::Deposit))
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(up.before_balance, 100.0);
    assert_eq!(up.amount, 50.0);
    assert_eq!(up.after_balance, 150.0);

    let down = h
        .member_credit
        .decrease(&change(member.id, 120.0, MemberStatementType::Withdraw))
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(down.before_balance, 150.0);
    assert_eq!(down.amount, -120.0);
    assert_eq!(down.after_balance, 30.0);

    assert_eq!(h.store.user(member.id).credit, 30.0);
}

#[tokio::test]
async fn decrease_beyond_credit_is_refused() {
    let h = Harness::new().await;
    let member = h.store.add_member("M1", "bay", "0001234567", 30.0);

    let err = h
        .member_credit
        .decrease(&change(member.id, 30.01, MemberStatementType::GetCreditBack))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientCredit { .. }));
    assert_eq!(h.store.user(member.id).credit, 30.0);
    assert!(h.store.ledger_of(member.id).is_empty());

    h.member_credit
        .decrease(&change(member.id, 30.0, MemberStatementType::GetCreditBack))
        .await
        .unwrap();
    assert_eq!(h.store.user(member.id).credit, 0.0);
}

#[tokio::test]
async fn decrease_of_nothing_is_insufficient_credit() {
    let h = Harness::new().await;
    let member = h.store.add_member("M1", "bay", "0001234567", 30.0);

    for amount in [0.0, -5.0] {
        let err = h
            .member_credit
            .decrease(&change(member.id, amount, MemberStatementType::Withdraw))
            .await
            .unwrap_err();

        let ServiceError::InsufficientCredit {
            available,
            requested,
        } = err
        else {
            panic!("expected insufficient credit for {amount}");
        };
        assert_eq!(available, 30.0);
        assert_eq!(requested, amount);
    }

    assert_eq!(h.store.user(member.id).credit, 30.0);
    assert!(h.store.ledger_of(member.id).is_empty());
}

#[tokio::test]
async fn direction_must_match_statement_type() {
    let h = Harness::new().await;
    let member = h.store.add_member("M1", "bay", "0001234567", 100.0);

    let err = h
        .member_credit
        .increase(&change(member.id, 10.0, MemberStatementType::Withdraw))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = h
        .member_credit
        .decrease(&change(member.id, 10.0, MemberStatementType::Refund))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = h
        .member_credit
        .increase(&change(member.id, 0.0, MemberStatementType::Bonus))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert!(h.store.ledger_of(member.id).is_empty());
}

#[tokio::test]
async fn unknown_member_is_not_found() {
    let h = Harness::new().await;

    let err = h
        .member_credit
        .increase(&change(4242, 10.0, MemberStatementType::Deposit))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = h
        .member_credit
        .find_member_statements(4242, &first_page())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn statements_filter_by_type() {
    let h = Harness::new().await;
    let member = h.store.add_member("M1", "bay", "0001234567", 0.0);

    for (amount, kind) in [
        (100.0, MemberStatementType::Deposit),
        (20.0, MemberStatementType::Bonus),
        (50.0, MemberStatementType::Deposit),
    ] {
        h.member_credit
            .increase(&change(member.id, amount, kind))
            .await
            .unwrap();
    }

    let all = h
        .member_credit
        .find_member_statements(member.id, &first_page())
        .await
        .unwrap();
    assert_eq!(all.total, 3);

    let deposits = h
        .member_credit
        .find_member_statements(
            member.id,
            &FindMemberStatements {
                statement_type: Some(MemberStatementType::Deposit),
                ..first_page()
            },
        )
        .await
        .unwrap();
    assert_eq!(deposits.total, 2);
    assert_eq!(deposits.list[1].after_balance, 170.0);
}
