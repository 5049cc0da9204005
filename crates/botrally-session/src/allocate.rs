//! Room code allocation: optimistic retry under a uniqueness check.
//!
//! Codes must stay short and human-shareable, so a plain atomic counter
//! won't do — the game wants sparse, slightly unpredictable numbers.
//! The scheme: read the highest live code, add a bounded random jitter,
//! and try to register the candidate. Registration is the uniqueness
//! check; a collision (the jitter can be zero) just means draw again
//! from the refreshed highest value. A bounded attempt budget turns the
//! pathological case into a transient error instead of a spin.

use botrally_protocol::{RoomCode, RoomId, UserId};
use botrally_store::Tables;
use rand::Rng;

use crate::{CoordinatorConfig, SessionError};

/// Allocates a fresh code and registers the room under it, in one step.
///
/// Runs inside the caller's atomic unit: the candidate is checked and
/// the room inserted with no gap in between, so the returned code is
/// unique among live rooms at the instant of registration.
///
/// # Errors
/// [`SessionError::CodesExhausted`] once `config.alloc_retries`
/// candidates have all collided.
pub(crate) fn insert_with_fresh_code(
    tables: &mut Tables,
    rng: &mut impl Rng,
    config: &CoordinatorConfig,
    map: &str,
    owner: UserId,
) -> Result<(RoomId, RoomCode), SessionError> {
    let span = config.jitter_span.max(1);

    for _ in 0..config.alloc_retries {
        let candidate = match tables.highest_code() {
            // First room ever: the fixed base, no jitter.
            None => RoomCode(config.base_code),
            Some(RoomCode(highest)) => {
                RoomCode(highest.saturating_add(rng.random_range(0..span)))
            }
        };

        match tables.insert_room(candidate, map, owner) {
            Ok(room_id) => return Ok((room_id, candidate)),
            Err(_) => {
                tracing::debug!(code = %candidate, "room code collision, retrying");
            }
        }
    }

    Err(SessionError::CodesExhausted {
        attempts: config.alloc_retries,
    })
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn config() -> CoordinatorConfig {
        CoordinatorConfig::default()
    }

    fn owner(tables: &mut Tables) -> UserId {
        tables.insert_user("owner").unwrap()
    }

    #[test]
    fn test_first_room_gets_base_code() {
        let mut tables = Tables::new();
        let uid = owner(&mut tables);
        let mut rng = rand::rng();

        let (_, code) =
            insert_with_fresh_code(&mut tables, &mut rng, &config(), "map1", uid)
                .unwrap();

        assert_eq!(code, RoomCode(100));
    }

    #[test]
    fn test_candidate_stays_within_jitter_window() {
        let mut tables = Tables::new();
        let uid = owner(&mut tables);
        tables.insert_room(RoomCode(300), "m", uid).unwrap();
        let mut rng = rand::rng();

        let (_, code) =
            insert_with_fresh_code(&mut tables, &mut rng, &config(), "m", uid)
                .unwrap();

        // highest + 0..100, and 300 itself is taken.
        assert!(code.0 > 300 && code.0 < 400, "got {code}");
    }

    #[test]
    fn test_collision_retries_until_a_free_code() {
        // jitter_span 2 means candidates are highest or highest+1; with
        // 101 the highest and taken, the only success is 102.
        let mut tables = Tables::new();
        let uid = owner(&mut tables);
        tables.insert_room(RoomCode(100), "m", uid).unwrap();
        tables.insert_room(RoomCode(101), "m", uid).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let cfg = CoordinatorConfig {
            jitter_span: 2,
            alloc_retries: 64,
            ..config()
        };

        let (_, code) =
            insert_with_fresh_code(&mut tables, &mut rng, &cfg, "m", uid)
                .unwrap();

        assert_eq!(code, RoomCode(102));
    }

    #[test]
    fn test_exhausted_retries_fail_transiently() {
        // jitter_span 1 pins the jitter to zero, so every candidate is
        // the (taken) highest code and the budget must run out.
        let mut tables = Tables::new();
        let uid = owner(&mut tables);
        tables.insert_room(RoomCode(100), "m", uid).unwrap();
        let mut rng = rand::rng();
        let cfg = CoordinatorConfig {
            jitter_span: 1,
            alloc_retries: 5,
            ..config()
        };

        let err =
            insert_with_fresh_code(&mut tables, &mut rng, &cfg, "m", uid)
                .unwrap_err();

        assert!(matches!(
            err,
            SessionError::CodesExhausted { attempts: 5 }
        ));
        // Nothing was registered.
        assert_eq!(tables.room_count(), 1);
    }
}
