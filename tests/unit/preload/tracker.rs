use super::*;

fn img() -> PreparedImage {
    PreparedImage::from_premul(1, 1, vec![9, 9, 9, 255]).unwrap()
}

fn percents(events: &[PreloadEvent]) -> Vec<f64> {
    events
        .iter()
        .filter_map(|e| match e {
            PreloadEvent::Progress { percent, .. } => Some(*percent),
            PreloadEvent::Complete => None,
        })
        .collect()
}

#[test]
fn mixed_success_and_failure_completes_240() {
    let mut t = LoadTracker::new(FrameSchedule::new(240, 1).unwrap()).unwrap();
    let mut events = Vec::new();

    // Reverse order, every third request failing.
    for i in (0..240usize).rev() {
        let image = (i % 3 != 0).then(img);
        assert!(t.settle(i, image, &mut events));
    }

    let p = t.progress();
    assert_eq!(p.total(), 240);
    assert_eq!(p.loaded_count(), 240);
    assert!(p.is_complete());
    assert_eq!(t.frames().failed_count(), 80);
    assert_eq!(t.frames().loaded_count(), 160);

    let ps = percents(&events);
    assert_eq!(ps.len(), 240);
    assert!(ps.windows(2).all(|w| w[0] <= w[1]));
    assert!(ps.iter().all(|p| *p <= 100.0));
    assert_eq!(events.last(), Some(&PreloadEvent::Complete));
}

#[test]
fn completion_order_does_not_change_final_state() {
    let schedule = FrameSchedule::new(9, 2).unwrap();
    let orders: [[usize; 5]; 3] = [[0, 1, 2, 3, 4], [4, 3, 2, 1, 0], [2, 0, 4, 1, 3]];

    let mut finals = Vec::new();
    for order in orders {
        let mut t = LoadTracker::new(schedule).unwrap();
        let mut events = Vec::new();
        for i in order {
            t.settle(i, (i != 2).then(img), &mut events);
        }
        finals.push((
            t.progress(),
            t.frames().loaded_count(),
            t.frames().failed_count(),
            percents(&events),
        ));
    }
    assert!(finals.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn duplicate_settle_is_ignored() {
    let mut t = LoadTracker::new(FrameSchedule::new(2, 1).unwrap()).unwrap();
    let mut events = Vec::new();
    assert!(t.settle(0, Some(img()), &mut events));
    assert!(!t.settle(0, None, &mut events));
    assert_eq!(events.len(), 1);
    assert_eq!(t.progress().loaded_count(), 1);
}

#[test]
fn fail_pending_forces_completion() {
    let mut t = LoadTracker::new(FrameSchedule::new(3, 1).unwrap()).unwrap();
    let mut events = Vec::new();
    t.settle(1, Some(img()), &mut events);
    t.fail_pending(&mut events);
    assert!(t.progress().is_complete());
    assert_eq!(t.frames().loaded_count(), 1);
    assert_eq!(t.frames().failed_count(), 2);
}
