//! Tests for comparers and evaluators.

use otforge_core::{
    Candidate, Competition, ErcList, Hierarchy, OtError, RankingBiasKind, Rcd, WinnerLoserPair,
};
use otforge_test::{candidate, competition, cyclic_ercs, erc, markedness, three_language_system};

use super::*;

fn outputs(optima: &[&Candidate]) -> Vec<String> {
    optima.iter().map(|c| c.output().to_string()).collect()
}

// ============================================================================
// Preference
// ============================================================================

#[test]
fn test_preference_flip() {
    assert_eq!(Preference::First.flip(), Preference::Second);
    assert_eq!(Preference::Second.flip(), Preference::First);
    assert_eq!(Preference::Conflict.flip(), Preference::Conflict);
    assert!(Preference::First.is_decisive());
    assert!(!Preference::Tie.is_decisive());
}

// ============================================================================
// Stratum and hierarchy comparers
// ============================================================================

mod comparers {
    use super::*;

    #[test]
    fn test_pool_sums_within_stratum() {
        let list = markedness(&["C1", "C2", "C3"]);
        let hierarchy = Hierarchy::from_names(list.clone(), &[&["C1", "C2", "C3"]]).unwrap();
        let a = candidate(&list, "in", "a", &[1, 0, 0]);
        let b = candidate(&list, "in", "b", &[0, 1, 1]);
        let pool = ComparePool::default();
        assert_eq!(pool.more_harmonic_on_hierarchy(&a, &b, &hierarchy), Preference::First);
        assert_eq!(pool.more_harmonic_on_hierarchy(&b, &a, &hierarchy), Preference::Second);
    }

    #[test]
    fn test_pool_tie_at_bottom() {
        let list = markedness(&["C1", "C2"]);
        let hierarchy = Hierarchy::from_names(list.clone(), &[&["C1", "C2"]]).unwrap();
        let a = candidate(&list, "in", "a", &[1, 0]);
        let b = candidate(&list, "in", "b", &[0, 1]);
        assert_eq!(
            ComparePool::default().more_harmonic_on_hierarchy(&a, &b, &hierarchy),
            Preference::Tie
        );
    }

    #[test]
    fn test_pool_descends_past_tied_stratum() {
        let list = markedness(&["C1", "C2", "C3"]);
        let hierarchy = Hierarchy::from_names(list.clone(), &[&["C1", "C2"], &["C3"]]).unwrap();
        let a = candidate(&list, "in", "a", &[1, 0, 2]);
        let b = candidate(&list, "in", "b", &[0, 1, 1]);
        assert_eq!(
            ComparePool::default().more_harmonic_on_hierarchy(&a, &b, &hierarchy),
            Preference::Second
        );
    }

    #[test]
    fn test_ctie_conflict_short_circuits() {
        let list = markedness(&["C1", "C2", "C3"]);
        let hierarchy = Hierarchy::from_names(list.clone(), &[&["C1", "C2"], &["C3"]]).unwrap();
        let a = candidate(&list, "in", "a", &[1, 0, 0]);
        let b = candidate(&list, "in", "b", &[0, 1, 5]);
        assert_eq!(
            CompareCtie::default().more_harmonic_on_hierarchy(&a, &b, &hierarchy),
            Preference::Conflict
        );
        // Pool sees a tie in the top stratum and lets C3 decide.
        assert_eq!(
            ComparePool::default().more_harmonic_on_hierarchy(&a, &b, &hierarchy),
            Preference::First
        );
    }

    #[test]
    fn test_ctie_decides_without_disagreement() {
        let list = markedness(&["C1", "C2", "C3"]);
        let hierarchy = Hierarchy::from_names(list.clone(), &[&["C1", "C2"], &["C3"]]).unwrap();
        let a = candidate(&list, "in", "a", &[1, 0, 0]);
        let b = candidate(&list, "in", "b", &[1, 0, 1]);
        assert_eq!(
            CompareCtie::default().more_harmonic_on_hierarchy(&a, &b, &hierarchy),
            Preference::First
        );
    }

    #[test]
    fn test_ctie_on_single_stratum() {
        let list = markedness(&["C1", "C2"]);
        let a = candidate(&list, "in", "a", &[0, 2]);
        let b = candidate(&list, "in", "b", &[0, 1]);
        let ids: Vec<_> = list.ids().collect();
        assert_eq!(Ctie.compare_on_stratum(&a, &b, &ids), Preference::Second);
        assert_eq!(Ctie.compare_on_stratum(&a, &b, &ids[..1]), Preference::Tie);
    }

    #[test]
    #[should_panic(expected = "ctie found no stratum")]
    fn test_ctie_uncovered_difference_panics() {
        let list = markedness(&["C1", "C2"]);
        let partial = Hierarchy::from_names(list.clone(), &[&["C1"]]).unwrap();
        let a = candidate(&list, "in", "a", &[0, 1]);
        let b = candidate(&list, "in", "b", &[0, 2]);
        CompareCtie::default().more_harmonic_on_hierarchy(&a, &b, &partial);
    }

    #[test]
    fn test_pool_uncovered_difference_ties() {
        let list = markedness(&["C1", "C2"]);
        let partial = Hierarchy::from_names(list.clone(), &[&["C1"]]).unwrap();
        let a = candidate(&list, "in", "a", &[0, 1]);
        let b = candidate(&list, "in", "b", &[0, 2]);
        assert_eq!(
            ComparePool::default().more_harmonic_on_hierarchy(&a, &b, &partial),
            Preference::Tie
        );
    }

    #[test]
    fn test_identical_profiles_agree_across_comparers() {
        let list = markedness(&["C1", "C2", "C3"]);
        let hierarchy = Hierarchy::total_order(list.clone());
        let evidence = ErcList::from_ercs(list.clone(), [erc(&list, "WLe")]).unwrap();
        for counts in [[0, 0, 0], [1, 2, 3], [4, 0, 1]] {
            let a = candidate(&list, "in", "a", &counts);
            let b = candidate(&list, "in", "b", &counts);
            assert_eq!(
                ComparePool::default().more_harmonic_on_hierarchy(&a, &b, &hierarchy),
                Preference::IdentViolations
            );
            assert_eq!(
                CompareCtie::default().more_harmonic_on_hierarchy(&a, &b, &hierarchy),
                Preference::IdentViolations
            );
            assert_eq!(
                CompareConsistency
                    .more_harmonic_on_evidence(&a, &b, &evidence)
                    .unwrap(),
                Preference::IdentViolations
            );
        }
    }

    #[test]
    #[should_panic(expected = "index different constraint lists")]
    fn test_loser_over_other_list_panics() {
        let list = markedness(&["C1", "C2"]);
        let reversed = markedness(&["C2", "C1"]);
        let hierarchy = Hierarchy::total_order(list.clone());
        let a = candidate(&list, "in", "a", &[0, 1]);
        let b = candidate(&reversed, "in", "b", &[1, 0]);
        ComparePool::default().more_harmonic_on_hierarchy(&a, &b, &hierarchy);
    }

    #[test]
    fn test_boxed_comparer() {
        let list = markedness(&["C1", "C2"]);
        let hierarchy = Hierarchy::total_order(list.clone());
        let boxed: Box<dyn HierarchyComparer> = Box::new(CompareCtie::default());
        let a = candidate(&list, "in", "a", &[0, 1]);
        let b = candidate(&list, "in", "b", &[1, 0]);
        assert_eq!(boxed.more_harmonic_on_hierarchy(&a, &b, &hierarchy), Preference::First);
    }
}

// ============================================================================
// Eval
// ============================================================================

mod eval {
    use super::*;
    use otforge_core::ErcLike;

    #[test]
    fn test_later_candidate_removes_kept_optimum() {
        let list = markedness(&["C1", "C2"]);
        let comp = competition(
            &list,
            "in",
            &[("a", &[1, 1]), ("b", &[0, 1]), ("c", &[0, 0])],
        );
        let hierarchy = Hierarchy::total_order(list.clone());
        let optima = Eval::new(ComparePool::default())
            .find_optima(&comp, &hierarchy)
            .unwrap();
        assert_eq!(outputs(&optima), vec!["c"]);
    }

    #[test]
    fn test_ties_and_identical_profiles_retained() {
        let list = markedness(&["C1", "C2"]);
        let comp = competition(
            &list,
            "in",
            &[("a", &[1, 0]), ("b", &[0, 1]), ("c", &[1, 0]), ("d", &[1, 1])],
        );
        let pooled = Hierarchy::from_names(list.clone(), &[&["C1", "C2"]]).unwrap();
        let optima = Eval::new(ComparePool::default())
            .find_optima(&comp, &pooled)
            .unwrap();
        assert_eq!(outputs(&optima), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ctie_conflicts_keep_both() {
        let list = markedness(&["C1", "C2"]);
        let comp = competition(&list, "in", &[("a", &[1, 0]), ("b", &[0, 1])]);
        let flat = Hierarchy::from_names(list.clone(), &[&["C1", "C2"]]).unwrap();
        let optima = Eval::new(CompareCtie::default())
            .find_optima(&comp, &flat)
            .unwrap();
        assert_eq!(outputs(&optima), vec!["a", "b"]);
    }

    #[test]
    fn test_idempotence() {
        let list = markedness(&["C1", "C2", "C3"]);
        let comp = competition(
            &list,
            "in",
            &[
                ("a", &[1, 0, 0]),
                ("b", &[0, 1, 0]),
                ("c", &[0, 0, 2]),
                ("d", &[0, 0, 2]),
                ("e", &[1, 1, 1]),
            ],
        );
        let hierarchy =
            Hierarchy::from_names(list.clone(), &[&["C1", "C2"], &["C3"]]).unwrap();
        let eval = Eval::new(ComparePool::default());

        let first = eval.find_optima(&comp, &hierarchy).unwrap();
        let second = eval.find_optima(&comp, &hierarchy).unwrap();
        assert_eq!(outputs(&first), outputs(&second));
        assert_eq!(outputs(&first), vec!["c", "d"]);

        let reduced = Competition::new(first.iter().map(|c| (*c).clone()).collect()).unwrap();
        let again = eval.find_optima(&reduced, &hierarchy).unwrap();
        assert_eq!(outputs(&again), outputs(&first));
    }

    #[test]
    fn test_reordered_hierarchy_reindexed() {
        let list = markedness(&["C1", "C2"]);
        let reversed = markedness(&["C2", "C1"]);
        let comp = competition(&list, "in", &[("a", &[1, 0]), ("b", &[0, 1])]);
        // C2 >> C1 written over the reversed list.
        let hierarchy = Hierarchy::total_order(reversed);
        for optima in [
            Eval::new(ComparePool::default()).find_optima(&comp, &hierarchy).unwrap(),
            Eval::new(CompareCtie::default()).find_optima(&comp, &hierarchy).unwrap(),
        ] {
            assert_eq!(outputs(&optima), vec!["a"]);
        }
    }

    #[test]
    fn test_foreign_hierarchy_rejected() {
        let list = markedness(&["C1", "C2"]);
        let other = markedness(&["C1", "C9"]);
        let comp = competition(&list, "in", &[("a", &[1, 0])]);
        let hierarchy = Hierarchy::total_order(other);
        assert!(matches!(
            Eval::new(CompareCtie::default()).find_optima(&comp, &hierarchy),
            Err(OtError::ConstraintSetMismatch(_))
        ));
    }

    #[test]
    fn test_rcd_hierarchy_prefers_every_winner() {
        let (_, competitions) = three_language_system();
        let winners = [("a1", "b1"), ("a2", "b1"), ("a2", "b2")];
        for (wa, wb) in winners {
            let list = competitions[0].constraints().clone();
            let mut evidence = ErcList::new(list);
            for (comp, winner) in competitions.iter().zip([wa, wb]) {
                let w = comp.iter().find(|c| c.output() == winner).unwrap();
                for loser in comp.iter().filter(|c| c.output() != winner) {
                    let pair = WinnerLoserPair::new(w, loser).unwrap();
                    if !pair.erc().is_trivial() && pair.erc().is_satisfiable() {
                        evidence.add(pair).unwrap();
                    }
                }
            }
            for kind in [
                RankingBiasKind::AllHigh,
                RankingBiasKind::OneAtATime,
                RankingBiasKind::FaithLow,
            ] {
                let bias = kind.bias();
                let rcd = Rcd::with_bias(&evidence, &bias);
                assert!(rcd.is_consistent(), "({}, {}) should be consistent", wa, wb);
                let hierarchy = rcd.hierarchy();
                for pair in &evidence {
                    for comparer in [
                        Box::new(ComparePool::default()) as Box<dyn HierarchyComparer>,
                        Box::new(CompareCtie::default()),
                    ] {
                        assert_eq!(
                            comparer.more_harmonic_on_hierarchy(
                                pair.winner(),
                                pair.loser(),
                                &hierarchy
                            ),
                            Preference::First,
                            "{:?} under {} with {}",
                            comparer,
                            hierarchy,
                            kind
                        );
                    }
                }
            }
        }
    }
}

// ============================================================================
// Evidence-based comparison
// ============================================================================

mod evidence {
    use super::*;

    #[test]
    fn test_evidence_decides() {
        let list = markedness(&["C1", "C2"]);
        let evidence = ErcList::from_ercs(list.clone(), [erc(&list, "WL")]).unwrap();
        let a = candidate(&list, "in", "a", &[0, 1]);
        let b = candidate(&list, "in", "b", &[1, 0]);
        let cmp = CompareConsistency::new();
        assert_eq!(cmp.more_harmonic_on_evidence(&a, &b, &evidence).unwrap(), Preference::First);
        assert_eq!(cmp.more_harmonic_on_evidence(&b, &a, &evidence).unwrap(), Preference::Second);
    }

    #[test]
    fn test_no_evidence_ties() {
        let list = markedness(&["C1", "C2"]);
        let evidence: ErcList = ErcList::new(list.clone());
        let a = candidate(&list, "in", "a", &[0, 1]);
        let b = candidate(&list, "in", "b", &[1, 0]);
        assert_eq!(
            CompareConsistency.more_harmonic_on_evidence(&a, &b, &evidence).unwrap(),
            Preference::Tie
        );
    }

    #[test]
    fn test_inconsistent_evidence_conflicts() {
        let list = markedness(&["C1", "C2", "C3"]);
        let evidence = cyclic_ercs(&list);
        let a = candidate(&list, "in", "a", &[0, 1, 0]);
        let b = candidate(&list, "in", "b", &[1, 0, 0]);
        assert_eq!(
            CompareConsistency.more_harmonic_on_evidence(&a, &b, &evidence).unwrap(),
            Preference::Conflict
        );
    }

    #[test]
    fn test_evidence_over_reordered_list() {
        let list = markedness(&["C1", "C2"]);
        let reordered = markedness(&["C2", "C1"]);
        let evidence = ErcList::from_ercs(reordered.clone(), [erc(&reordered, "LW")]).unwrap();
        let a = candidate(&list, "in", "a", &[0, 1]);
        let b = candidate(&list, "in", "b", &[1, 0]);
        assert_eq!(
            CompareConsistency.more_harmonic_on_evidence(&a, &b, &evidence).unwrap(),
            Preference::First
        );
    }

    #[test]
    fn test_different_inputs_fail() {
        let list = markedness(&["C1"]);
        let evidence: ErcList = ErcList::new(list.clone());
        let a = candidate(&list, "x", "a", &[0]);
        let b = candidate(&list, "y", "b", &[1]);
        assert!(matches!(
            CompareConsistency.more_harmonic_on_evidence(&a, &b, &evidence),
            Err(OtError::InputMismatch { .. })
        ));
    }

    #[test]
    fn test_find_possible_optima() {
        let list = markedness(&["C1", "C2"]);
        let comp = competition(
            &list,
            "in",
            &[("a", &[0, 1]), ("b", &[1, 0]), ("c", &[1, 1])],
        );

        let none: ErcList = ErcList::new(list.clone());
        let open = CompareConsistency.find_possible_optima(&comp, &none).unwrap();
        assert_eq!(outputs(&open), vec!["a", "b"]);

        let evidence = ErcList::from_ercs(list.clone(), [erc(&list, "WL")]).unwrap();
        let ranked = CompareConsistency.find_possible_optima(&comp, &evidence).unwrap();
        assert_eq!(outputs(&ranked), vec!["a"]);
    }
}

// ============================================================================
// MostHarmonic
// ============================================================================

mod most_harmonic {
    use super::*;

    #[test]
    fn test_ranks_then_evaluates() {
        let list = markedness(&["C1", "C2"]);
        let evidence = ErcList::from_ercs(list.clone(), [erc(&list, "WL")]).unwrap();
        let comp = competition(&list, "in", &[("a", &[1, 0]), ("b", &[0, 1])]);
        let most = MostHarmonic::new(Ranker::default(), CompareCtie::default());
        let optima = most.find_optima(&comp, &evidence).unwrap();
        assert_eq!(outputs(&optima), vec!["b"]);
    }

    #[test]
    fn test_ranker_bias() {
        let list = markedness(&["C1", "C2", "C3"]);
        let evidence: ErcList = ErcList::new(list.clone());
        assert_eq!(
            Ranker::default().rank(&evidence).names(),
            vec![vec!["C1", "C2", "C3"]]
        );
        assert_eq!(
            Ranker::with_kind(RankingBiasKind::OneAtATime)
                .rank(&evidence)
                .names(),
            vec![vec!["C1"], vec!["C2"], vec!["C3"]]
        );
    }

    #[test]
    fn test_inconsistent_evidence_ranks_residue_last() {
        let list = markedness(&["C1", "C2", "C3"]);
        let hierarchy = Ranker::default().rank(&cyclic_ercs(&list));
        assert_eq!(hierarchy.names(), vec![vec!["C1", "C2", "C3"]]);
    }
}
