use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn step_is_two_percent_of_gap() {
    let mut s = ProgressSmoother::new();
    s.set_target(100.0);
    s.tick();
    assert!(approx(s.smoothed(), 2.0));
    s.tick();
    assert!(approx(s.smoothed(), 2.0 + 98.0 * 0.02));
}

#[test]
fn small_gaps_use_minimum_step_without_overshoot() {
    let mut s = ProgressSmoother::new();
    s.set_target(5.0);
    s.tick();
    assert!(approx(s.smoothed(), 0.2));

    s.set_target(0.3);
    s.tick();
    assert!(approx(s.smoothed(), 0.3));
}

#[test]
fn never_moves_backwards() {
    let mut s = ProgressSmoother::new();
    s.set_target(50.0);
    for _ in 0..500 {
        s.tick();
    }
    assert!(approx(s.smoothed(), 50.0));
    s.set_target(10.0);
    s.tick();
    assert!(approx(s.smoothed(), 50.0));
}

#[test]
fn advance_runs_fixed_cadence_with_carry() {
    let mut s = ProgressSmoother::new();
    s.set_target(100.0);
    assert_eq!(s.advance(Duration::from_millis(30)), 1);
    assert_eq!(s.advance(Duration::from_millis(10)), 1);
    assert_eq!(s.advance(Duration::from_millis(19)), 0);
    assert_eq!(s.advance(Duration::from_millis(1)), 1);
}

#[test]
fn reaches_ninety_nine_in_about_three_seconds() {
    let mut s = ProgressSmoother::new();
    s.set_target(100.0);
    let mut ticks = 0;
    while s.smoothed() < 99.0 {
        s.tick();
        ticks += 1;
        assert!(ticks < 1000);
    }
    assert!((150..=170).contains(&ticks), "ticks = {ticks}");
    assert_eq!(s.display_percent(), 99);
}

#[test]
fn target_is_clamped() {
    let mut s = ProgressSmoother::new();
    s.set_target(250.0);
    assert_eq!(s.target(), 100.0);
    s.set_target(f64::NAN);
    assert_eq!(s.target(), 0.0);
}
