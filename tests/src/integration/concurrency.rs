//! # Racing Challengers
//!
//! Several challengers submit competitors for the same exit from different
//! threads. Whatever the interleaving, the oldest competitor ends up
//! recorded and its challenger holds the bond.

#[cfg(test)]
mod tests {
    use pe_01_canonicity_challenge::{CanonicityChallengeApi, ChallengeError, Position};
    use std::thread;

    use crate::harness::TestLang;

    const AMOUNT: u64 = 50;
    const COMPETITORS: usize = 6;

    #[test]
    fn test_racing_challengers_converge_on_oldest() {
        pe_telemetry::init_test_tracing();

        let lang = TestLang::new().unwrap();
        let owner = lang.account(0).clone();
        let receiver = lang.account(1).clone();

        let deposit = lang.deposit(&owner, AMOUNT).unwrap();
        let spend = lang
            .spend_utxo(&[deposit], &[&owner], &[(receiver.address, AMOUNT)], false)
            .unwrap();
        let exit_id = lang.start_in_flight_exit(&spend, &receiver).unwrap();

        let competitors: Vec<Position> = (0..COMPETITORS)
            .map(|i| {
                let to = lang.account(i % lang.accounts.len()).address;
                lang.spend_utxo(&[deposit], &[&owner], &[(to, AMOUNT)], true)
                    .unwrap()
            })
            .collect();
        let requests: Vec<_> = competitors
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                let challenger = lang.account(i % lang.accounts.len()).clone();
                (
                    *pos,
                    challenger.address,
                    lang.challenge_request(&spend, pos, &challenger).unwrap(),
                )
            })
            .collect();

        let outcomes: Vec<_> = thread::scope(|scope| {
            let handles: Vec<_> = requests
                .iter()
                .rev()
                .map(|(pos, challenger, request)| {
                    let engine = &lang.engine;
                    let request = request.clone();
                    scope.spawn(move || (*pos, *challenger, engine.challenge_not_canonical(request)))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });

        let oldest = competitors[0];
        for (pos, _, outcome) in &outcomes {
            match outcome {
                Ok(_) => {}
                Err(ChallengeError::NotOlderThanCurrentCompetitor { .. }) => {
                    assert_ne!(*pos, oldest, "oldest competitor must never lose")
                }
                Err(other) => panic!("unexpected rejection: {}", other),
            }
        }

        let view = lang.engine.get_in_flight_exit(&exit_id).unwrap();
        assert!(!view.is_canonical);
        assert_eq!(view.oldest_competitor_position, Some(oldest));
        assert_eq!(view.bond_owner, requests[0].1);
    }

    #[test]
    fn test_sequential_replays_from_threads_accept_once() {
        let lang = TestLang::new().unwrap();
        let owner = lang.account(0).clone();
        let challenger = lang.account(2).clone();

        let deposit = lang.deposit(&owner, AMOUNT).unwrap();
        let spend = lang
            .spend_utxo(&[deposit], &[&owner], &[(owner.address, AMOUNT)], false)
            .unwrap();
        let competitor = lang
            .spend_utxo(&[deposit], &[&owner], &[(challenger.address, AMOUNT)], true)
            .unwrap();
        lang.start_in_flight_exit(&spend, &owner).unwrap();
        let request = lang.challenge_request(&spend, &competitor, &challenger).unwrap();

        let accepted = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let engine = &lang.engine;
                    let request = request.clone();
                    scope.spawn(move || engine.challenge_not_canonical(request))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|outcome| {
                    if let Err(e) = outcome {
                        assert!(matches!(e, ChallengeError::CompetitorAlreadyUsed(_)));
                    }
                    outcome.is_ok()
                })
                .count()
        });

        assert_eq!(accepted, 1);
    }
}
