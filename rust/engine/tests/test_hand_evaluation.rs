use showdown_engine::cards::{parse_cards, Card};
use showdown_engine::engine::select_winners;
use showdown_engine::hand::{best_of_7, compare_results, evaluate5, RankClass};

fn five(s: &str) -> [Card; 5] {
    parse_cards(s).unwrap().try_into().unwrap()
}

fn two(s: &str) -> [Card; 2] {
    parse_cards(s).unwrap().try_into().unwrap()
}

#[test]
fn classifies_one_example_per_class() {
    let cases = [
        ("2c 7d 9h Js Ac", RankClass::HighCard),
        ("Ac Ad Kh Qs Jc", RankClass::OnePair),
        ("Ac Ad Kh Ks Qc", RankClass::TwoPair),
        ("Ac Ad Ah Ks Qc", RankClass::ThreeOfAKind),
        ("Tc 9d 8h 7s 6c", RankClass::Straight),
        ("Ah Kh Qh Jh 9h", RankClass::Flush),
        ("Ac Ad Ah Ks Kc", RankClass::FullHouse),
        ("Ac Ad Ah As Kc", RankClass::FourOfAKind),
        ("Th 9h 8h 7h 6h", RankClass::StraightFlush),
    ];
    for (cards, class) in cases {
        assert_eq!(evaluate5(&five(cards)).class, class, "{cards}");
    }
}

#[test]
fn ace_low_straight_is_five_high() {
    let wheel = evaluate5(&five("Ac 5d 4h 3s 2c"));
    assert_eq!(wheel.class, RankClass::Straight);
    assert_eq!(wheel.tiebreak, 5);

    let six_high = evaluate5(&five("6c 5d 4h 3s 2c"));
    assert_eq!(six_high.class, RankClass::Straight);
    assert!(wheel.tiebreak < six_high.tiebreak);
    assert!(compare_results(&wheel, &six_high).is_lt());
}

#[test]
fn steel_wheel_is_lowest_straight_flush() {
    let steel = evaluate5(&five("Ah 2h 3h 4h 5h"));
    let six = evaluate5(&five("2h 3h 4h 5h 6h"));
    assert_eq!(steel.class, RankClass::StraightFlush);
    assert!(steel < six);
}

#[test]
fn card_order_does_not_matter() {
    let a = evaluate5(&five("Ks 2d Kh 9c 2s"));
    let b = evaluate5(&five("2s 9c Kh 2d Ks"));
    assert_eq!(a, b);
    assert_eq!(a.class, RankClass::TwoPair);
}

#[test]
fn same_multiset_and_flush_status_tie_exactly() {
    let a = evaluate5(&five("Ac Kd Qh 9s 4c"));
    let b = evaluate5(&five("Ad Kc Qs 9h 4d"));
    assert_eq!(a, b);

    let flush_a = evaluate5(&five("Ac Jc 8c 6c 3c"));
    let flush_b = evaluate5(&five("Ad Jd 8d 6d 3d"));
    assert_eq!(flush_a, flush_b);
}

#[test]
fn full_house_compares_trips_before_pair() {
    let threes_full = evaluate5(&five("3c 3d 3h As Ac"));
    let twos_full = evaluate5(&five("2c 2d 2h As Ac"));
    assert!(threes_full > twos_full);
}

#[test]
fn two_pair_compares_high_pair_then_low_then_kicker() {
    let kings_up = evaluate5(&five("Kc Kd 2h 2s 3c"));
    let queens_up = evaluate5(&five("Qc Qd Jh Js Ac"));
    assert!(kings_up > queens_up);

    let better_kicker = evaluate5(&five("Kc Kd 2h 2s 9c"));
    assert!(better_kicker > kings_up);
}

#[test]
fn class_outranks_any_tiebreak() {
    let flush = evaluate5(&five("2h 4h 6h 8h Th"));
    let straight = evaluate5(&five("Ac Kd Qh Js Tc"));
    assert!(flush > straight);
    assert!(flush.tiebreak < 759_375);
}

#[test]
fn best_of_7_finds_royal_flush() {
    let best = best_of_7(&two("As Ks"), &five("Qs Js Ts 2c 3c"));
    assert_eq!(best.class, RankClass::StraightFlush);
    assert_eq!(best.tiebreak, 14);
}

#[test]
fn best_of_7_uses_board_when_it_plays() {
    let best = best_of_7(&two("2c 3d"), &five("Ah Kh Qh Jh Th"));
    assert_eq!(best.class, RankClass::StraightFlush);
}

#[test]
fn best_of_7_prefers_quads_over_full_house() {
    let best = best_of_7(&two("9c 9d"), &five("9h 9s Kc Kd 2h"));
    assert_eq!(best.class, RankClass::FourOfAKind);
    assert_eq!(best, evaluate5(&five("9c 9d 9h 9s Kc")));
}

#[test]
fn best_of_7_picks_highest_kickers() {
    let best = best_of_7(&two("Ac 2d"), &five("Ah Kc Qd 7s 5h"));
    assert_eq!(best, evaluate5(&five("Ac Ah Kc Qd 7s")));
}

#[test]
fn split_board_reports_both_winners() {
    let board = five("Ah Kd Qc Js 9h");
    let p1 = best_of_7(&two("2c 3d"), &board);
    let p2 = best_of_7(&two("2h 3s"), &board);
    assert_eq!(p1, p2);
    assert_eq!(select_winners(&[(1, p1), (2, p2)]), vec![1, 2]);
}
