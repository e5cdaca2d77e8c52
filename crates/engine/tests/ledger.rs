use engine::{
    Engine, EngineError, ExpenseDraft, ExpenseId, Field, MoneyCents, NetMatrix, codec,
    compute_balances, share_of,
};

fn engine_with(names: &[&str]) -> Engine {
    let mut engine = Engine::new();
    for name in names {
        engine.add_participant(name).unwrap();
    }
    engine
}

fn expense(payer: &str, amount: &str, split: &[&str]) -> ExpenseDraft {
    ExpenseDraft::new()
        .payer(payer)
        .amount(amount)
        .description("shared")
        .split_among(split.iter().copied())
}

fn cents(value: i64) -> MoneyCents {
    MoneyCents::new(value)
}

#[test]
fn three_way_split_owes_the_payer() {
    let mut engine = engine_with(&["Alice", "Bob", "Carol"]);
    engine
        .add_expense(&expense("Alice", "90", &["Alice", "Bob", "Carol"]))
        .unwrap();

    let balances = engine.balances();
    assert_eq!(balances.len(), 2);
    assert_eq!(balances.owed("Bob", "Alice"), cents(30_00));
    assert_eq!(balances.owed("Carol", "Alice"), cents(30_00));
    assert_eq!(balances.owed("Alice", "Bob"), MoneyCents::ZERO);
    assert_eq!(balances.owed("Bob", "Carol"), MoneyCents::ZERO);
}

#[test]
fn opposite_debts_are_netted() {
    let mut engine = engine_with(&["Alice", "Bob"]);
    engine
        .add_expense(&expense("Alice", "60", &["Alice", "Bob"]))
        .unwrap();
    engine
        .add_expense(&expense("Bob", "40", &["Alice", "Bob"]))
        .unwrap();

    let balances = engine.balances();
    assert_eq!(balances.len(), 1);
    assert_eq!(balances.owed("Bob", "Alice"), cents(10_00));
    assert_eq!(balances.owed("Alice", "Bob"), MoneyCents::ZERO);
}

#[test]
fn negative_amount_reverses_direction() {
    let mut engine = engine_with(&["Alice", "Bob"]);
    engine
        .add_expense(&expense("Alice", "-20", &["Alice", "Bob"]))
        .unwrap();

    let balances = engine.balances();
    assert_eq!(balances.owed("Alice", "Bob"), cents(10_00));
    assert_eq!(balances.owed("Bob", "Alice"), MoneyCents::ZERO);
}

#[test]
fn removing_participant_cascades_to_expenses() {
    let mut engine = engine_with(&["Alice", "Bob", "Carol"]);
    engine
        .add_expense(&expense("Alice", "30", &["Alice", "Bob"]))
        .unwrap();
    engine
        .add_expense(&expense("Bob", "30", &["Bob", "Carol"]))
        .unwrap();
    engine
        .add_expense(&expense("Carol", "30", &["Alice", "Carol"]))
        .unwrap();

    let removed = engine.remove_participant("Bob").unwrap();
    assert_eq!(removed.len(), 2);
    assert!(
        engine
            .expenses()
            .iter()
            .all(|e| e.payer != "Bob" && !e.split_with.iter().any(|p| p == "Bob"))
    );
    assert_eq!(engine.balances().owed("Alice", "Carol"), cents(15_00));
    assert_eq!(engine.balances().len(), 1);
}

#[test]
fn removing_idle_participant_keeps_other_balances() {
    let mut engine = engine_with(&["Alice", "Bob", "Carol", "Dave"]);
    engine
        .add_expense(&expense("Alice", "90", &["Alice", "Bob", "Carol"]))
        .unwrap();
    engine
        .add_expense(&expense("Carol", "12.34", &["Bob", "Carol"]))
        .unwrap();
    let before = engine.balances().clone();

    engine.remove_participant("Dave").unwrap();
    assert_eq!(engine.balances(), &before);
}

#[test]
fn failed_mutations_leave_engine_untouched() {
    let mut engine = engine_with(&["Alice", "Bob"]);
    engine
        .add_expense(&expense("Alice", "10", &["Alice", "Bob"]))
        .unwrap();
    let ledger = engine.ledger().clone();
    let balances = engine.balances().clone();

    assert_eq!(
        engine.add_participant("Alice"),
        Err(EngineError::DuplicateParticipant("Alice".to_string()))
    );
    assert_eq!(
        engine.add_participant("  "),
        Err(EngineError::DuplicateParticipant(String::new()))
    );
    assert!(matches!(
        engine.remove_participant("Zed"),
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.remove_expense(ExpenseId::new(999)),
        Err(EngineError::NotFound(_))
    ));
    let err = engine
        .add_expense(
            &ExpenseDraft::new()
                .payer("Alice")
                .amount("ten")
                .description("")
                .split_among(["Alice", "Mallory"]),
        )
        .unwrap_err();
    let EngineError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.len(), 3);
    assert!(errors.get(Field::Payer).is_none());
    assert!(errors.get(Field::Amount).is_some());
    assert!(errors.get(Field::Description).is_some());
    assert!(errors.get(Field::SplitWith).is_some());

    assert_eq!(engine.ledger(), &ledger);
    assert_eq!(engine.balances(), &balances);
}

#[test]
fn large_groups_accept_every_split_size() {
    let names: Vec<String> = (0..120).map(|i| format!("P{i}")).collect();
    let mut engine = Engine::new();
    for name in &names {
        engine.add_participant(name).unwrap();
    }
    for size in 1..=names.len() {
        let split = names[..size].iter().map(String::as_str).collect::<Vec<_>>();
        engine
            .add_expense(&expense("P0", "10", &split))
            .unwrap_or_else(|err| panic!("split of {size} rejected: {err}"));
    }

    assert_eq!(engine.expenses().len(), names.len());
    assert_eq!(engine.balances().owed("P119", "P0"), cents(8));
    for debt in engine.balances() {
        assert_eq!(debt.creditor, "P0");
    }
    let document = engine.save().unwrap();
    let mut restored = Engine::new();
    restored.load(&document).unwrap();
    assert_eq!(restored.balances(), engine.balances());
}

#[test]
fn removing_an_expense_updates_balances() {
    let mut engine = engine_with(&["Alice", "Bob"]);
    let lunch = engine
        .add_expense(&expense("Alice", "20", &["Alice", "Bob"]))
        .unwrap();
    assert!(!engine.balances().is_settled());

    let removed = engine.remove_expense(lunch.id).unwrap();
    assert_eq!(removed, lunch);
    assert!(engine.expenses().is_empty());
    assert!(engine.balances().is_settled());
}

#[test]
fn netting_never_leaves_both_directions() {
    let mut engine = engine_with(&["Alice", "Bob", "Carol", "Dave"]);
    let expenses = [
        ("Alice", "100", &["Alice", "Bob", "Carol", "Dave"][..]),
        ("Bob", "-45.10", &["Alice", "Bob", "Carol"][..]),
        ("Carol", "33.33", &["Alice", "Carol"][..]),
        ("Dave", "7", &["Bob", "Carol", "Dave"][..]),
        ("Alice", "-12", &["Dave"][..]),
    ];
    for (payer, amount, split) in expenses {
        engine.add_expense(&expense(payer, amount, split)).unwrap();
    }

    let mut matrix = NetMatrix::accumulate(engine.ledger()).unwrap();
    matrix.net();
    assert!(matrix.is_netted());

    let mut again = matrix.clone();
    again.net();
    assert_eq!(again, matrix);

    let balances = engine.balances();
    for debt in balances {
        assert!(debt.amount.is_positive());
        assert_eq!(
            balances.owed(debt.creditor.as_str(), debt.debtor.as_str()),
            MoneyCents::ZERO
        );
    }
    assert_eq!(balances, &compute_balances(engine.ledger()).unwrap());
}

#[test]
fn shares_sum_to_amount() {
    let mut engine = engine_with(&["Alice", "Bob", "Carol"]);
    let record = engine
        .add_expense(&expense("Carol", "10", &["Alice", "Bob", "Carol"]))
        .unwrap();

    let total: i64 = record
        .split_with
        .iter()
        .filter_map(|p| share_of(&record, p.as_str()))
        .map(|share| share.rounded().cents())
        .sum();
    assert!((total - record.amount.cents()).abs() <= record.split_with.len() as i64);
}

#[test]
fn save_then_load_reproduces_the_ledger() {
    let mut engine = engine_with(&["Carol", "Alice", "Bob"]);
    engine
        .add_expense(&expense("Alice", "90", &["Alice", "Bob", "Carol"]))
        .unwrap();
    engine
        .add_expense(&expense("Bob", "-0.05", &["Alice", "Bob"]))
        .unwrap();

    let document = engine.save().unwrap();
    let mut restored = Engine::new();
    restored.load(&document).unwrap();

    assert_eq!(restored.participants(), engine.participants());
    assert_eq!(restored.expenses(), engine.expenses());
    assert_eq!(restored.balances(), engine.balances());

    // Ids keep increasing after a reload.
    let next = restored
        .add_expense(&expense("Carol", "1", &["Carol"]))
        .unwrap();
    assert!(engine.expenses().iter().all(|e| e.id < next.id));
}

#[test]
fn malformed_document_keeps_current_ledger() {
    let mut engine = engine_with(&["Alice", "Bob"]);
    engine
        .add_expense(&expense("Alice", "10", &["Alice", "Bob"]))
        .unwrap();
    let saved = engine.save().unwrap();

    for document in [
        r#"{"users": ["Alice"]}"#,
        r#"{"expenses": []}"#,
        r#"{"users": ["Alice"], "expenses": [{"id": 1, "paidBy": "Bob", "amount": 5,
            "description": "x", "splitWith": ["Alice"]}]}"#,
        r#"{"users": ["Alice"], "expenses": [{"id": 1, "paidBy": "Alice", "amount": 5,
            "description": "x", "splitWith": []}]}"#,
        r#"{"users": ["Alice", "Alice"], "expenses": []}"#,
        "[]",
    ] {
        assert!(matches!(
            engine.load(document),
            Err(EngineError::MalformedDocument(_))
        ));
        assert_eq!(engine.save().unwrap(), saved);
    }
}

#[test]
fn builder_starts_from_existing_ledger() {
    let ledger = codec::from_json(
        r#"{"users": ["Alice", "Bob"], "expenses": [
            {"id": 7, "paidBy": "Bob", "amount": 40, "description": "Taxi",
             "splitWith": ["Alice", "Bob"]}
        ]}"#,
    )
    .unwrap();
    let engine = Engine::builder().ledger(ledger).build().unwrap();
    assert_eq!(engine.balances().owed("Alice", "Bob"), cents(20_00));
    assert_eq!(engine.balances().net_position("Bob"), Ok(cents(20_00)));
}
