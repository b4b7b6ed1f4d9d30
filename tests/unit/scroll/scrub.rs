use super::*;

#[test]
fn zero_lag_tracks_exactly() {
    let mut f = ScrubFollower::new(Duration::ZERO);
    f.set_target(0.4);
    assert_eq!(f.value(), 0.4);
    assert_eq!(f.advance(Duration::from_millis(16)), 0.4);
    assert!(f.is_settled());
}

#[test]
fn lag_approaches_monotonically() {
    let mut f = ScrubFollower::new(Duration::from_millis(1200));
    f.set_target(1.0);
    let mut prev = f.value();
    for _ in 0..30 {
        let v = f.advance(Duration::from_millis(16));
        assert!(v >= prev);
        assert!(v <= 1.0);
        prev = v;
    }
    assert!(prev > 0.0 && prev < 1.0);
}

#[test]
fn lag_mostly_converges_within_scrub_time() {
    let mut f = ScrubFollower::new(Duration::from_millis(1200));
    f.set_target(1.0);
    for _ in 0..75 {
        f.advance(Duration::from_millis(16));
    }
    assert!(f.value() > 0.97, "{}", f.value());
}

#[test]
fn eventually_snaps_to_target() {
    let mut f = ScrubFollower::new(Duration::from_millis(800));
    f.set_target(0.25);
    for _ in 0..1000 {
        f.advance(Duration::from_millis(16));
    }
    assert!(f.is_settled());
    assert_eq!(f.value(), 0.25);
}

#[test]
fn reversal_moves_back_down() {
    let mut f = ScrubFollower::new(Duration::from_millis(800));
    f.set_target(1.0);
    f.snap();
    f.set_target(0.0);
    let v = f.advance(Duration::from_millis(100));
    assert!(v < 1.0);
    assert!(v > 0.0);
}

#[test]
fn target_is_clamped() {
    let mut f = ScrubFollower::new(Duration::ZERO);
    f.set_target(3.0);
    assert_eq!(f.value(), 1.0);
    f.set_target(-1.0);
    assert_eq!(f.value(), 0.0);
}
