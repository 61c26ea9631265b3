//! Database-backed invariants: run with DATABASE_URL pointing at a
//! Postgres instance (`cargo test -- --ignored`).

use engine::store::{bets, bolao, matches, resolver, shop, wallet};
use engine::types::bet_types::SelectionInput;
use engine::types::bolao_types::{ScoreGuess, DEFAULT_ENTRY_FEE};
use engine::types::match_types::MatchIngest;
use engine::types::wallet_types::TxType;
use engine::EngineError;
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, id: &str, funds: i64) {
    sqlx::query("INSERT INTO users (discord_id, name) VALUES ($1, $1)")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
    wallet::deposit(pool, id, funds, "Saldo inicial").await.unwrap();
}

fn fixture(fixture_id: i64, status: &str, home_goals: Option<i32>, away_goals: Option<i32>) -> MatchIngest {
    MatchIngest {
        fixture_id,
        home_team: "Corinthians".into(),
        away_team: "Palmeiras".into(),
        league: "Brasileirão".into(),
        kickoff: 1_700_000_000,
        status: status.into(),
        home_goals,
        away_goals,
        home_corners: None,
        away_corners: None,
        home_yellow: None,
        home_red: None,
        away_yellow: None,
        away_red: None,
        markets: None,
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "needs DATABASE_URL"]
async fn balance_equals_transaction_sum(pool: PgPool) {
    seed_user(&pool, "100", 10_000).await;

    let mut tx = pool.begin().await.unwrap();
    wallet::debit(&mut tx, "100", 3_000, TxType::Aposta, "Aposta simples")
        .await
        .unwrap();
    wallet::credit(&mut tx, "100", 1_500, TxType::Premio, "Ganhos da aposta")
        .await
        .unwrap();
    tx.commit().await.unwrap();

    let w = wallet::get_wallet(&pool, "100").await.unwrap();
    assert_eq!(w.balance, 8_500);
    let sum: i64 = w.transactions.iter().map(|t| t.amount).sum();
    assert_eq!(sum, w.balance);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "needs DATABASE_URL"]
async fn rejected_debit_leaves_no_trace(pool: PgPool) {
    seed_user(&pool, "100", 1_000).await;

    let mut tx = pool.begin().await.unwrap();
    let err = wallet::debit(&mut tx, "100", 5_000, TxType::Aposta, "Aposta simples")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds));
    drop(tx);

    let w = wallet::get_wallet(&pool, "100").await.unwrap();
    assert_eq!(w.balance, 1_000);
    // Only the seed deposit is on the ledger.
    assert_eq!(w.transactions.len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "needs DATABASE_URL"]
async fn duplicate_purchase_is_a_domain_rejection(pool: PgPool) {
    seed_user(&pool, "100", 1_000_000).await;

    shop::purchase_item(&pool, "100", "xp-boost").await.unwrap();

    match shop::purchase_item(&pool, "100", "xp-boost").await {
        Err(EngineError::Rejected(msg)) => assert_eq!(msg, "Você já possui este item."),
        other => panic!("expected rejection, got {other:?}"),
    }

    // Debited exactly once.
    let w = wallet::get_wallet(&pool, "100").await.unwrap();
    assert_eq!(w.balance, 1_000_000 - 250_000);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "needs DATABASE_URL"]
async fn joining_a_bolao_twice_debits_once(pool: PgPool) {
    seed_user(&pool, "100", 2_000).await;
    matches::ingest_match(&pool, &fixture(10, "NS", None, None))
        .await
        .unwrap();
    let row = bolao::create_bolao(&pool, 10).await.unwrap();

    let guess = ScoreGuess { home: 2, away: 1 };
    bolao::join_bolao(&pool, "100", row.id, guess).await.unwrap();

    match bolao::join_bolao(&pool, "100", row.id, guess).await {
        Err(EngineError::Rejected(msg)) => {
            assert_eq!(msg, "Você já participou deste bolão.")
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    let w = wallet::get_wallet(&pool, "100").await.unwrap();
    assert_eq!(w.balance, 2_000 - DEFAULT_ENTRY_FEE);

    let prize_pool: i64 = sqlx::query_scalar("SELECT prize_pool FROM boloes WHERE id = $1")
        .bind(row.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(prize_pool, DEFAULT_ENTRY_FEE);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "needs DATABASE_URL"]
async fn cancelling_a_bolao_refunds_entries(pool: PgPool) {
    seed_user(&pool, "100", 2_000).await;
    matches::ingest_match(&pool, &fixture(10, "NS", None, None))
        .await
        .unwrap();
    let row = bolao::create_bolao(&pool, 10).await.unwrap();
    bolao::join_bolao(&pool, "100", row.id, ScoreGuess { home: 1, away: 0 })
        .await
        .unwrap();

    let refunded = bolao::cancel_bolao(&pool, row.id).await.unwrap();
    assert_eq!(refunded, 1);

    let w = wallet::get_wallet(&pool, "100").await.unwrap();
    assert_eq!(w.balance, 2_000);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "needs DATABASE_URL"]
async fn resolving_a_fixture_twice_is_a_noop(pool: PgPool) {
    seed_user(&pool, "100", 5_000).await;
    matches::ingest_match(&pool, &fixture(20, "FT", Some(2), Some(1)))
        .await
        .unwrap();

    let selections = vec![SelectionInput {
        match_id: 20,
        market_name: "Vencedor da Partida".into(),
        selection: "Casa".into(),
        odd_value: 2.0,
    }];
    bets::place_bet(&pool, "100", &selections, 1_000).await.unwrap();

    let first = resolver::resolve_match(&pool, 20).await.unwrap();
    assert!(!first.already_processed);
    assert_eq!(first.settled, 1);

    let w = wallet::get_wallet(&pool, "100").await.unwrap();
    assert_eq!(w.balance, 5_000 - 1_000 + 2_000);

    let second = resolver::resolve_match(&pool, 20).await.unwrap();
    assert!(second.already_processed);
    assert_eq!(second.settled, 0);

    // No double credit.
    let after = wallet::get_wallet(&pool, "100").await.unwrap();
    assert_eq!(after.balance, w.balance);
}
