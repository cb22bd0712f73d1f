use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use showdown_engine::pot::{check_conservation, PotEngine};

#[test]
fn pot_sized_by_smallest_bet() {
    let pot = PotEngine::new(1).unwrap();
    let bets = [(1, 3), (2, 2), (3, 3), (4, 5)];
    let b = pot.compute(&bets).unwrap();
    assert_eq!(b.min_bet, 2);
    assert_eq!(b.pot_size, 8);
    assert_eq!(b.refunds, vec![(1, 1), (2, 0), (3, 1), (4, 3)]);

    let d = pot.distribute(b.pot_size, 1).unwrap();
    assert_eq!(d.house_fee, 0);
    assert_eq!(d.net_pot, 8);
}

#[test]
fn equal_bets_refund_nothing() {
    let pot = PotEngine::new(1).unwrap();
    let b = pot.compute(&[(1, 1000), (2, 1000)]).unwrap();
    assert_eq!(b.pot_size, 2000);
    assert_eq!(b.total_refunds(), 0);
    let d = pot.distribute(b.pot_size, 2).unwrap();
    assert_eq!(d.house_fee, 20);
    assert_eq!(d.per_winner_share, 990);
    assert_eq!(d.remainder, 0);
}

#[test]
fn full_fee_leaves_nothing_to_split() {
    let pot = PotEngine::new(100).unwrap();
    let d = pot.distribute(500, 3).unwrap();
    assert_eq!(d.house_fee, 500);
    assert_eq!(d.per_winner_share, 0);
    assert_eq!(d.remainder, 0);
}

#[test]
fn large_stakes_do_not_overflow_fee() {
    let pot = PotEngine::new(3).unwrap();
    let bets = [(1, u64::MAX / 2), (2, u64::MAX / 2)];
    let (b, d) = pot.settle(&bets, 1).unwrap();
    assert_eq!(b.pot_size, u64::MAX - 1);
    assert_eq!(
        u128::from(d.house_fee),
        u128::from(b.pot_size) * 3 / 100
    );
}

#[test]
fn conservation_holds_over_randomized_trials() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5EED);
    for trial in 0..10_000 {
        let n = rng.random_range(2..=9usize);
        let bets: Vec<(u64, u64)> = (0..n)
            .map(|i| (i as u64, rng.random_range(1..=1_000_000u64)))
            .collect();
        let winners = rng.random_range(1..=n);
        let fee = rng.random_range(0..=100u8);

        let pot = PotEngine::new(fee).unwrap();
        let (b, d) = pot.settle(&bets, winners).unwrap();
        check_conservation(&bets, &b, &d).unwrap();

        let total: u128 = bets.iter().map(|&(_, x)| u128::from(x)).sum();
        let out = b.total_refunds()
            + u128::from(d.house_fee)
            + u128::from(d.per_winner_share) * winners as u128
            + u128::from(d.remainder);
        assert_eq!(out, total, "trial {trial}: {bets:?} winners={winners} fee={fee}");
        assert!(d.remainder < winners as u64);
    }
}
