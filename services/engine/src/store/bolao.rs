//! Score-prediction pools. Pool-per-match and one-guess-per-user are
//! both backed by unique constraints; the prize pool only moves in the
//! same transaction as the participant row and the wallet debit.

use crate::error::EngineError;
use crate::store::wallet;
use crate::types::bolao_types::{
    Bolao, BolaoParticipant, BolaoRow, ScoreGuess, BOLAO_ABERTO, BOLAO_CANCELADO,
    DEFAULT_ENTRY_FEE,
};
use crate::types::wallet_types::TxType;
use log::info;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_bolao(pool: &PgPool, match_id: i64) -> Result<BolaoRow, EngineError> {
    let teams: Option<(String, String)> =
        sqlx::query_as("SELECT home_team, away_team FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(pool)
            .await?;
    if teams.is_none() {
        return Err(EngineError::NotFound("Partida não encontrada.".into()));
    }

    let result: Result<BolaoRow, sqlx::Error> = sqlx::query_as(
        "INSERT INTO boloes (id, match_id, entry_fee, prize_pool, status)
         VALUES ($1, $2, $3, 0, $4)
         RETURNING id, match_id, entry_fee, prize_pool, status, created_at",
    )
    .bind(Uuid::new_v4())
    .bind(match_id)
    .bind(DEFAULT_ENTRY_FEE)
    .bind(BOLAO_ABERTO)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => Ok(row),
        Err(err) if EngineError::is_unique_violation(&err) => Err(EngineError::Rejected(
            "Já existe um bolão para esta partida.".into(),
        )),
        Err(err) => Err(err.into()),
    }
}

pub async fn join_bolao(
    pool: &PgPool,
    user_id: &str,
    bolao_id: Uuid,
    guess: ScoreGuess,
) -> Result<(), EngineError> {
    if guess.home < 0 || guess.away < 0 {
        return Err(EngineError::Invalid("Placar inválido.".into()));
    }

    let mut tx = pool.begin().await?;

    let bolao: Option<BolaoRow> = sqlx::query_as(
        "SELECT id, match_id, entry_fee, prize_pool, status, created_at
         FROM boloes WHERE id = $1 FOR UPDATE",
    )
    .bind(bolao_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(bolao) = bolao else {
        return Err(EngineError::NotFound("Bolão não encontrado.".into()));
    };
    if bolao.status != BOLAO_ABERTO {
        return Err(EngineError::Rejected(
            "Este bolão não está mais aberto para palpites.".into(),
        ));
    }

    let (home, away): (String, String) =
        sqlx::query_as("SELECT home_team, away_team FROM matches WHERE id = $1")
            .bind(bolao.match_id)
            .fetch_one(&mut *tx)
            .await?;

    wallet::debit(
        &mut tx,
        user_id,
        bolao.entry_fee,
        TxType::Aposta,
        &format!("Entrada no Bolão: {home} vs {away}"),
    )
    .await?;

    let inserted = sqlx::query(
        "INSERT INTO bolao_participants (bolao_id, user_id, guess_home, guess_away)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(bolao_id)
    .bind(user_id)
    .bind(guess.home)
    .bind(guess.away)
    .execute(&mut *tx)
    .await;

    if let Err(err) = inserted {
        if EngineError::is_unique_violation(&err) {
            // Rolls the debit back with the rest of the transaction.
            return Err(EngineError::Rejected(
                "Você já participou deste bolão.".into(),
            ));
        }
        return Err(err.into());
    }

    sqlx::query("UPDATE boloes SET prize_pool = prize_pool + entry_fee WHERE id = $1")
        .bind(bolao_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Refunds every participant and closes the pool, all-or-nothing.
pub async fn cancel_bolao(pool: &PgPool, bolao_id: Uuid) -> Result<u64, EngineError> {
    let mut tx = pool.begin().await?;

    let bolao: Option<BolaoRow> = sqlx::query_as(
        "SELECT id, match_id, entry_fee, prize_pool, status, created_at
         FROM boloes WHERE id = $1 AND status = $2 FOR UPDATE",
    )
    .bind(bolao_id)
    .bind(BOLAO_ABERTO)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(bolao) = bolao else {
        return Err(EngineError::Rejected(
            "Bolão não encontrado ou já não está mais aberto.".into(),
        ));
    };

    let (home, away): (String, String) =
        sqlx::query_as("SELECT home_team, away_team FROM matches WHERE id = $1")
            .bind(bolao.match_id)
            .fetch_one(&mut *tx)
            .await?;

    let participants: Vec<String> =
        sqlx::query_scalar("SELECT user_id FROM bolao_participants WHERE bolao_id = $1")
            .bind(bolao_id)
            .fetch_all(&mut *tx)
            .await?;

    for user_id in &participants {
        wallet::credit(
            &mut tx,
            user_id,
            bolao.entry_fee,
            TxType::Bonus,
            &format!("Reembolso: Bolão cancelado - {home} vs {away}"),
        )
        .await?;
    }

    sqlx::query("UPDATE boloes SET status = $1 WHERE id = $2")
        .bind(BOLAO_CANCELADO)
        .bind(bolao_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(
        "bolao {bolao_id} cancelled, {} participants refunded",
        participants.len()
    );
    Ok(participants.len() as u64)
}

pub async fn get_active_boloes(pool: &PgPool) -> Result<Vec<Bolao>, EngineError> {
    let rows: Vec<(Uuid, i64, i64, i64, String, chrono::DateTime<chrono::Utc>, String, String, String)> =
        sqlx::query_as(
            "SELECT b.id, b.match_id, b.entry_fee, b.prize_pool, b.status, b.created_at,
                    m.home_team, m.away_team, m.league
             FROM boloes b JOIN matches m ON m.id = b.match_id
             WHERE b.status = $1 ORDER BY b.created_at DESC",
        )
        .bind(BOLAO_ABERTO)
        .fetch_all(pool)
        .await?;

    let mut out = Vec::with_capacity(rows.len());
    for (id, match_id, entry_fee, prize_pool, status, created_at, home_team, away_team, league) in
        rows
    {
        let participants: Vec<BolaoParticipant> = sqlx::query_as(
            "SELECT bolao_id, user_id, guess_home, guess_away, guessed_at
             FROM bolao_participants WHERE bolao_id = $1 ORDER BY guessed_at",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        out.push(Bolao {
            bolao: BolaoRow {
                id,
                match_id,
                entry_fee,
                prize_pool,
                status,
                created_at,
            },
            home_team,
            away_team,
            league,
            participants,
        });
    }
    Ok(out)
}
