//! Pure settlement rules: (final score, match stats, selection) -> verdict.
//!
//! Market names are the fixed set the odds feed produces. Over/under
//! markets follow the line-betting convention: landing exactly on the
//! line voids the selection (`Anulada`) instead of losing it.

use crate::types::bet_types::SelectionResult;
use crate::types::match_types::{FinalScore, MatchStats};
use log::warn;

pub const MARKET_MATCH_WINNER: &str = "Vencedor da Partida";
pub const MARKET_DRAW_NO_BET: &str = "Aposta sem Empate";
pub const MARKET_GOALS_OU: &str = "Gols Acima/Abaixo";
pub const MARKET_CORNERS_OU: &str = "Escanteios Acima/Abaixo";
pub const MARKET_CARDS_OU: &str = "Cartões Acima/Abaixo";
pub const MARKET_BTTS: &str = "Ambos Marcam";
pub const MARKET_EXACT_SCORE: &str = "Placar Exato";
pub const MARKET_DOUBLE_CHANCE: &str = "Dupla Chance";
pub const MARKET_HOME_GOALS_OU: &str = "Total de Gols da Casa";
pub const MARKET_AWAY_GOALS_OU: &str = "Total de Gols do Visitante";
pub const MARKET_HOME_CORNERS_OU: &str = "Escanteios da Casa Acima/Abaixo";
pub const MARKET_AWAY_CORNERS_OU: &str = "Escanteios do Visitante Acima/Abaixo";
pub const MARKET_CORNERS_1X2: &str = "Escanteios 1x2";

const PICK_HOME: &str = "Casa";
const PICK_DRAW: &str = "Empate";
const PICK_AWAY: &str = "Fora";
const PICK_YES: &str = "Sim";
const PICK_NO: &str = "Não";
const PICK_HOME_OR_DRAW: &str = "Casa ou Empate";
const PICK_AWAY_OR_DRAW: &str = "Fora ou Empate";
const PICK_HOME_OR_AWAY: &str = "Casa ou Fora";
const COND_OVER: &str = "Acima";
const COND_UNDER: &str = "Abaixo";

/// Evaluates one selection against the final result. Unknown markets
/// and malformed selection strings resolve to `Perdida` after a
/// warning; the resolver treats nothing here as an error.
pub fn evaluate_selection(
    market_name: &str,
    selection: &str,
    score: &FinalScore,
    stats: &MatchStats,
) -> SelectionResult {
    let FinalScore { home, away } = *score;
    let total_goals = home + away;

    match market_name {
        MARKET_MATCH_WINNER => {
            if (selection == PICK_HOME && home > away)
                || (selection == PICK_DRAW && home == away)
                || (selection == PICK_AWAY && away > home)
            {
                SelectionResult::Ganha
            } else {
                SelectionResult::Perdida
            }
        }

        MARKET_DRAW_NO_BET => {
            if home == away {
                SelectionResult::Anulada
            } else if (selection == PICK_HOME && home > away)
                || (selection == PICK_AWAY && away > home)
            {
                SelectionResult::Ganha
            } else {
                SelectionResult::Perdida
            }
        }

        MARKET_GOALS_OU => over_under(market_name, selection, total_goals),
        MARKET_CORNERS_OU => over_under(market_name, selection, stats.total_corners()),
        MARKET_CARDS_OU => over_under(market_name, selection, stats.total_cards()),
        MARKET_HOME_GOALS_OU => over_under(market_name, selection, home),
        MARKET_AWAY_GOALS_OU => over_under(market_name, selection, away),
        MARKET_HOME_CORNERS_OU => over_under(market_name, selection, stats.home_corners),
        MARKET_AWAY_CORNERS_OU => over_under(market_name, selection, stats.away_corners),

        MARKET_BTTS => {
            if (selection == PICK_YES && home > 0 && away > 0)
                || (selection == PICK_NO && (home == 0 || away == 0))
            {
                SelectionResult::Ganha
            } else {
                SelectionResult::Perdida
            }
        }

        MARKET_EXACT_SCORE => match parse_exact_score(selection) {
            Some((h, a)) if home == h && away == a => SelectionResult::Ganha,
            Some(_) => SelectionResult::Perdida,
            None => {
                warn!("malformed exact-score selection: {selection:?}");
                SelectionResult::Perdida
            }
        },

        MARKET_DOUBLE_CHANCE => {
            if (selection == PICK_HOME_OR_DRAW && home >= away)
                || (selection == PICK_AWAY_OR_DRAW && away >= home)
                || (selection == PICK_HOME_OR_AWAY && home != away)
            {
                SelectionResult::Ganha
            } else {
                SelectionResult::Perdida
            }
        }

        MARKET_CORNERS_1X2 => {
            let (hc, ac) = (stats.home_corners, stats.away_corners);
            if (selection == PICK_HOME && hc > ac)
                || (selection == PICK_DRAW && hc == ac)
                || (selection == PICK_AWAY && ac > hc)
            {
                SelectionResult::Ganha
            } else {
                SelectionResult::Perdida
            }
        }

        other => {
            warn!("market not handled for resolution: {other:?}");
            SelectionResult::Perdida
        }
    }
}

/// Parses "Acima 2.5" / "Abaixo 3" and compares against `observed`.
/// Hitting the line exactly is a push.
fn over_under(market_name: &str, selection: &str, observed: i32) -> SelectionResult {
    let mut parts = selection.split_whitespace();
    let condition = parts.next().unwrap_or("");
    let line: f64 = match parts.next().and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => {
            warn!("malformed over/under selection {selection:?} for {market_name:?}");
            return SelectionResult::Perdida;
        }
    };

    let observed = observed as f64;
    match condition {
        COND_OVER | COND_UNDER if observed == line => SelectionResult::Anulada,
        COND_OVER if observed > line => SelectionResult::Ganha,
        COND_UNDER if observed < line => SelectionResult::Ganha,
        COND_OVER | COND_UNDER => SelectionResult::Perdida,
        _ => {
            warn!("malformed over/under selection {selection:?} for {market_name:?}");
            SelectionResult::Perdida
        }
    }
}

fn parse_exact_score(selection: &str) -> Option<(i32, i32)> {
    let (h, a) = selection.split_once('-')?;
    Some((h.trim().parse().ok()?, a.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(home: i32, away: i32) -> FinalScore {
        FinalScore { home, away }
    }

    #[test]
    fn match_winner_home_win() {
        let s = score(2, 1);
        let st = MatchStats::default();
        assert_eq!(
            evaluate_selection(MARKET_MATCH_WINNER, "Casa", &s, &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_MATCH_WINNER, "Fora", &s, &st),
            SelectionResult::Perdida
        );
        assert_eq!(
            evaluate_selection(MARKET_MATCH_WINNER, "Empate", &s, &st),
            SelectionResult::Perdida
        );
    }

    #[test]
    fn draw_no_bet_voids_on_draw() {
        let st = MatchStats::default();
        assert_eq!(
            evaluate_selection(MARKET_DRAW_NO_BET, "Casa", &score(1, 1), &st),
            SelectionResult::Anulada
        );
        assert_eq!(
            evaluate_selection(MARKET_DRAW_NO_BET, "Fora", &score(0, 2), &st),
            SelectionResult::Ganha
        );
    }

    #[test]
    fn over_under_pushes_on_exact_line() {
        let st = MatchStats::default();
        // 3 goals total, line at 3: push either way.
        assert_eq!(
            evaluate_selection(MARKET_GOALS_OU, "Abaixo 3", &score(2, 1), &st),
            SelectionResult::Anulada
        );
        assert_eq!(
            evaluate_selection(MARKET_GOALS_OU, "Acima 3", &score(2, 1), &st),
            SelectionResult::Anulada
        );
    }

    #[test]
    fn over_under_half_lines_never_push() {
        let st = MatchStats::default();
        assert_eq!(
            evaluate_selection(MARKET_GOALS_OU, "Acima 2.5", &score(2, 1), &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_GOALS_OU, "Abaixo 2.5", &score(2, 1), &st),
            SelectionResult::Perdida
        );
    }

    #[test]
    fn corners_markets_use_stats() {
        let st = MatchStats {
            home_corners: 7,
            away_corners: 3,
            ..Default::default()
        };
        assert_eq!(
            evaluate_selection(MARKET_CORNERS_OU, "Acima 9.5", &score(0, 0), &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_CORNERS_1X2, "Casa", &score(0, 0), &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_HOME_CORNERS_OU, "Abaixo 7", &score(0, 0), &st),
            SelectionResult::Anulada
        );
    }

    #[test]
    fn cards_total_counts_both_colors() {
        let st = MatchStats {
            home_yellow: 2,
            home_red: 1,
            away_yellow: 1,
            away_red: 0,
            ..Default::default()
        };
        assert_eq!(
            evaluate_selection(MARKET_CARDS_OU, "Acima 3.5", &score(0, 0), &st),
            SelectionResult::Ganha
        );
    }

    #[test]
    fn both_teams_to_score() {
        let st = MatchStats::default();
        assert_eq!(
            evaluate_selection(MARKET_BTTS, "Sim", &score(1, 1), &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_BTTS, "Não", &score(2, 0), &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_BTTS, "Sim", &score(2, 0), &st),
            SelectionResult::Perdida
        );
    }

    #[test]
    fn exact_score() {
        let st = MatchStats::default();
        assert_eq!(
            evaluate_selection(MARKET_EXACT_SCORE, "2-1", &score(2, 1), &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_EXACT_SCORE, "1-1", &score(2, 1), &st),
            SelectionResult::Perdida
        );
        assert_eq!(
            evaluate_selection(MARKET_EXACT_SCORE, "abc", &score(2, 1), &st),
            SelectionResult::Perdida
        );
    }

    #[test]
    fn double_chance() {
        let st = MatchStats::default();
        assert_eq!(
            evaluate_selection(MARKET_DOUBLE_CHANCE, "Casa ou Empate", &score(1, 1), &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_DOUBLE_CHANCE, "Casa ou Fora", &score(1, 1), &st),
            SelectionResult::Perdida
        );
        assert_eq!(
            evaluate_selection(MARKET_DOUBLE_CHANCE, "Fora ou Empate", &score(0, 3), &st),
            SelectionResult::Ganha
        );
    }

    #[test]
    fn home_away_goal_totals() {
        let st = MatchStats::default();
        assert_eq!(
            evaluate_selection(MARKET_HOME_GOALS_OU, "Acima 1.5", &score(2, 0), &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_AWAY_GOALS_OU, "Abaixo 0.5", &score(2, 0), &st),
            SelectionResult::Ganha
        );
        assert_eq!(
            evaluate_selection(MARKET_AWAY_GOALS_OU, "Acima 1", &score(0, 1), &st),
            SelectionResult::Anulada
        );
    }

    #[test]
    fn unknown_market_defaults_to_loss() {
        let st = MatchStats::default();
        assert_eq!(
            evaluate_selection("Mercado Inexistente", "Casa", &score(2, 1), &st),
            SelectionResult::Perdida
        );
    }

    #[test]
    fn malformed_over_under_loses() {
        let st = MatchStats::default();
        assert_eq!(
            evaluate_selection(MARKET_GOALS_OU, "Acima", &score(2, 1), &st),
            SelectionResult::Perdida
        );
        assert_eq!(
            evaluate_selection(MARKET_GOALS_OU, "Talvez 2.5", &score(2, 1), &st),
            SelectionResult::Perdida
        );
    }
}
