//! # Non-Canonical Challenge Scenarios
//!
//! An exit of a spend is challenged with a double spend of the same deposit.
//! Every rejection is also checked to leave the exit untouched.

#[cfg(test)]
mod tests {
    use pe_01_canonicity_challenge::{
        CanonicityChallengeApi, ChallengeError, ErrorClass, ExitId, InFlightExitView, Position,
    };

    use crate::harness::{Account, TestLang};

    const AMOUNT: u64 = 100;

    /// A deposit, its honest spend (the exiting tx) and an exit of that spend.
    struct Scenario {
        lang: TestLang,
        owner_1: Account,
        owner_2: Account,
        owner_3: Account,
        deposit: Position,
        spend: Position,
        exit_id: ExitId,
    }

    impl Scenario {
        fn new() -> Self {
            pe_telemetry::init_test_tracing();

            let lang = TestLang::new().unwrap();
            let owner_1 = lang.account(0).clone();
            let owner_2 = lang.account(1).clone();
            let owner_3 = lang.account(2).clone();

            let deposit = lang.deposit(&owner_1, AMOUNT).unwrap();
            let spend = lang
                .spend_utxo(&[deposit], &[&owner_1], &[(owner_2.address, AMOUNT)], false)
                .unwrap();
            let exit_id = lang.start_in_flight_exit(&spend, &owner_2).unwrap();

            Self {
                lang,
                owner_1,
                owner_2,
                owner_3,
                deposit,
                spend,
                exit_id,
            }
        }

        /// A conflicting spend of the deposit, signed by its owner.
        fn double_spend(&self, to: &Account) -> Position {
            self.lang
                .spend_utxo(&[self.deposit], &[&self.owner_1], &[(to.address, AMOUNT)], true)
                .unwrap()
        }

        fn view(&self) -> InFlightExitView {
            self.lang.engine.get_in_flight_exit(&self.exit_id).unwrap()
        }
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_should_succeed() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);

        let accepted = s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &double_spend, &s.owner_3)
            .unwrap()
            .unwrap();

        assert_eq!(accepted.previous_bond_owner, s.owner_2.address);
        let view = s.view();
        assert!(!view.is_canonical);
        assert_eq!(view.oldest_competitor_position, Some(double_spend));
        assert_eq!(view.bond_owner, s.owner_3.address);
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_wrong_period_should_fail() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);
        let before = s.view();

        s.lang.forward_to_period(&s.exit_id, 2).unwrap();
        let result = s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &double_spend, &s.owner_3)
            .unwrap();

        assert_eq!(result, Err(ChallengeError::ChallengePeriodClosed { period: 2 }));
        assert_eq!(result.unwrap_err().class(), ErrorClass::Temporal);
        assert_eq!(s.view(), before);
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_last_second_of_first_period() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);

        s.lang.forward_to_period(&s.exit_id, 2).unwrap();
        s.lang.clock.set(s.lang.now() - 1);

        assert!(s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &double_spend, &s.owner_3)
            .unwrap()
            .is_ok());
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_same_tx_should_fail() {
        let s = Scenario::new();
        let before = s.view();

        let result = s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &s.spend, &s.owner_3)
            .unwrap();

        assert_eq!(result, Err(ChallengeError::SelfChallenge));
        assert_eq!(s.view(), before);
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_unrelated_tx_should_fail() {
        let s = Scenario::new();
        let other_deposit = s.lang.deposit(&s.owner_1, AMOUNT).unwrap();
        let unrelated = s
            .lang
            .spend_utxo(&[other_deposit], &[&s.owner_1], &[(s.owner_1.address, AMOUNT)], false)
            .unwrap();
        let before = s.view();

        let result = s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &unrelated, &s.owner_3)
            .unwrap();

        assert!(matches!(result, Err(ChallengeError::UnrelatedTransaction { .. })));
        assert_eq!(s.view(), before);
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_wrong_input_tx_should_fail() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);
        let other_deposit = s.lang.deposit(&s.owner_1, AMOUNT).unwrap();

        let mut request = s
            .lang
            .challenge_request(&s.spend, &double_spend, &s.owner_3)
            .unwrap();
        request.input_tx = s.lang.chain.transaction_at(&other_deposit).unwrap();

        assert!(matches!(
            s.lang.engine.challenge_not_canonical(request),
            Err(ChallengeError::UnrelatedTransaction { .. })
        ));
        assert!(s.view().is_canonical);
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_wrong_index_should_fail() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);
        let before = s.view();

        let mut request = s
            .lang
            .challenge_request(&s.spend, &double_spend, &s.owner_3)
            .unwrap();
        request.competing_tx_input_index = 1;
        assert!(matches!(
            s.lang.engine.challenge_not_canonical(request.clone()),
            Err(ChallengeError::UnrelatedTransaction { .. })
        ));

        request.competing_tx_input_index = 0;
        request.input_tx_output_index = 1;
        assert!(matches!(
            s.lang.engine.challenge_not_canonical(request),
            Err(ChallengeError::UnrelatedTransaction { .. })
        ));
        assert_eq!(s.view(), before);
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_position_of_other_input_should_fail() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);
        let before = s.view();

        let mut request = s
            .lang
            .challenge_request(&s.spend, &double_spend, &s.owner_3)
            .unwrap();
        request.competing_tx_position =
            Position::new(double_spend.block_index, double_spend.tx_index, 9);

        assert!(matches!(
            s.lang.engine.challenge_not_canonical(request),
            Err(ChallengeError::UnrelatedTransaction { .. })
        ));
        assert_eq!(s.view(), before);
        assert_eq!(s.view().oldest_competitor_position, None);
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_invalid_signature_should_fail() {
        let s = Scenario::new();
        // Spends owner_1's deposit but is signed by owner_2
        let forged = s
            .lang
            .spend_utxo(&[s.deposit], &[&s.owner_2], &[(s.owner_2.address, AMOUNT)], true)
            .unwrap();
        let before = s.view();

        let result = s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &forged, &s.owner_3)
            .unwrap();

        assert_eq!(result, Err(ChallengeError::InvalidSignature));
        assert_eq!(s.view(), before);
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_signature_from_other_tx_should_fail() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);

        let mut request = s
            .lang
            .challenge_request(&s.spend, &double_spend, &s.owner_3)
            .unwrap();
        // A genuine signature by the right owner, but over the exiting tx
        let exiting = s.lang.chain.transaction_at(&s.spend).unwrap();
        request.signature = exiting.signatures[0];

        assert_eq!(
            s.lang.engine.challenge_not_canonical(request),
            Err(ChallengeError::InvalidSignature)
        );
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_empty_proof_should_fail() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);
        let before = s.view();

        let mut request = s
            .lang
            .challenge_request(&s.spend, &double_spend, &s.owner_3)
            .unwrap();
        request.proof = Vec::new();

        let result = s.lang.engine.challenge_not_canonical(request);
        assert_eq!(result, Err(ChallengeError::InvalidInclusionProof));
        assert_eq!(result.unwrap_err().class(), ErrorClass::Verification);
        assert_eq!(s.view(), before);
    }

    #[test]
    fn test_challenge_in_flight_exit_not_canonical_tampered_proof_should_fail() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);

        let mut request = s
            .lang
            .challenge_request(&s.spend, &double_spend, &s.owner_3)
            .unwrap();
        request.proof[5] ^= 0xFF;
        assert_eq!(
            s.lang.engine.challenge_not_canonical(request.clone()),
            Err(ChallengeError::InvalidInclusionProof)
        );

        // Valid proof, but for a different block
        request.proof[5] ^= 0xFF;
        request.competing_tx_position = s.spend;
        assert_eq!(
            s.lang.engine.challenge_not_canonical(request),
            Err(ChallengeError::InvalidInclusionProof)
        );
        assert!(s.view().is_canonical);
    }

    #[test]
    fn test_challenge_in_flight_exit_twice_with_same_tx_should_fail() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);

        s.lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &double_spend, &s.owner_3)
            .unwrap()
            .unwrap();
        let after_first = s.view();

        let result = s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &double_spend, &s.owner_1)
            .unwrap();

        assert!(matches!(result, Err(ChallengeError::CompetitorAlreadyUsed(_))));
        assert_eq!(s.view(), after_first);
    }

    #[test]
    fn test_challenge_in_flight_exit_twice_older_position_should_succeed() {
        let s = Scenario::new();
        let older = s.double_spend(&s.owner_1);
        let younger = s.double_spend(&s.owner_2);
        assert!(older < younger);

        s.lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &younger, &s.owner_1)
            .unwrap()
            .unwrap();
        let accepted = s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &older, &s.owner_3)
            .unwrap()
            .unwrap();

        assert_eq!(accepted.previous_bond_owner, s.owner_1.address);
        let view = s.view();
        assert!(!view.is_canonical);
        assert_eq!(view.oldest_competitor_position, Some(older));
        assert_eq!(view.bond_owner, s.owner_3.address);
    }

    #[test]
    fn test_challenge_in_flight_exit_twice_younger_position_should_fail() {
        let s = Scenario::new();
        let older = s.double_spend(&s.owner_1);
        let younger = s.double_spend(&s.owner_2);

        s.lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &older, &s.owner_3)
            .unwrap()
            .unwrap();
        let after_first = s.view();

        let result = s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &younger, &s.owner_1)
            .unwrap();

        assert_eq!(
            result,
            Err(ChallengeError::NotOlderThanCurrentCompetitor {
                candidate: younger,
                current: older,
            })
        );
        assert_eq!(s.view(), after_first);
        assert_eq!(s.view().bond_owner, s.owner_3.address);
    }

    #[test]
    fn test_rejections_never_mutate_exit() {
        let s = Scenario::new();
        let older = s.double_spend(&s.owner_1);
        let younger = s.double_spend(&s.owner_2);
        s.lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &younger, &s.owner_3)
            .unwrap()
            .unwrap();
        let snapshot = s.view();

        let mut bad_proof = s
            .lang
            .challenge_request(&s.spend, &older, &s.owner_1)
            .unwrap();
        bad_proof.proof.truncate(32);
        let mut bad_index = bad_proof.clone();
        bad_index.proof = s.lang.merkle_proof(&older).unwrap();
        bad_index.competing_tx_input_index = 3;

        let attempts = [
            s.lang.engine.challenge_not_canonical(bad_proof),
            s.lang.engine.challenge_not_canonical(bad_index),
            s.lang
                .challenge_in_flight_exit_not_canonical(&s.spend, &s.spend, &s.owner_1)
                .unwrap(),
            s.lang
                .challenge_in_flight_exit_not_canonical(&s.spend, &younger, &s.owner_1)
                .unwrap(),
        ];
        for attempt in attempts {
            assert!(attempt.is_err());
            assert_eq!(s.view(), snapshot);
        }

        // The good evidence still goes through afterwards
        assert!(s
            .lang
            .challenge_in_flight_exit_not_canonical(&s.spend, &older, &s.owner_1)
            .unwrap()
            .is_ok());
    }

    #[test]
    fn test_challenge_unknown_exit_should_fail() {
        let s = Scenario::new();
        let double_spend = s.double_spend(&s.owner_1);

        // Exit of the double spend itself was never started
        let result = s
            .lang
            .challenge_in_flight_exit_not_canonical(&double_spend, &s.spend, &s.owner_3)
            .unwrap();
        assert!(matches!(result, Err(ChallengeError::UnknownExit(_))));
        assert_eq!(result.unwrap_err().class(), ErrorClass::Registry);
    }

    #[test]
    fn test_start_in_flight_exit_twice_should_fail() {
        let s = Scenario::new();
        let err = s
            .lang
            .start_in_flight_exit(&s.spend, &s.owner_3)
            .unwrap_err();
        assert!(err.to_string().contains("already started"));
        assert_eq!(s.view().bond_owner, s.owner_2.address);
    }
}
