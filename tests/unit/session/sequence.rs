use std::io::Cursor;

use super::*;
use crate::assets::naming::FrameNaming;
use crate::assets::source::MemorySource;
use crate::playback::mapping::Addressing;

const STEP: Duration = Duration::from_millis(20);

fn png_bytes(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Ten frames; frame `n` is solid red `n`.
fn source() -> Arc<dyn FrameSource> {
    let naming = FrameNaming::default();
    let mut src = MemorySource::new();
    for n in 1..=10 {
        src.insert(&naming.frame_path("/im", n), png_bytes([n as u8, 0, 0, 255]))
            .unwrap();
    }
    Arc::new(src)
}

fn config() -> SequenceConfig {
    let mut cfg = SequenceConfig::new("/im");
    cfg.frame_count = 10;
    cfg.last_frame_index = 10;
    cfg.min_display_ms = 0;
    cfg.exit_delay_ms = 0;
    cfg.threads = Some(2);
    cfg
}

fn wide() -> Viewport {
    Viewport::new(800.0, 50.0).unwrap()
}

fn narrow() -> Viewport {
    Viewport::new(400.0, 50.0).unwrap()
}

/// Advance in 20 ms steps until the player is active.
fn drive_until_active(seq: &mut ScrollSequence) {
    for _ in 0..5000 {
        seq.advance(STEP).unwrap();
        if seq.player().state() == PlayerState::Active {
            return;
        }
        if !seq.preloader().is_some_and(|p| p.is_loaded()) {
            std::thread::sleep(Duration::from_millis(1));
        }
    }
    panic!("sequence never activated: {seq:?}");
}

fn settle_scrub(seq: &mut ScrollSequence) {
    for _ in 0..250 {
        seq.advance(STEP).unwrap();
    }
}

fn red(seq: &ScrollSequence) -> u8 {
    seq.player().surface().unwrap().pixel(0, 0).unwrap()[0]
}

#[test]
fn mount_rejects_invalid_config() {
    let mut cfg = config();
    cfg.stride = 0;
    assert!(ScrollSequence::mount(cfg, source(), wide(), 1.0).is_err());
}

#[test]
fn wide_viewport_mounts_full_profile() {
    let seq = ScrollSequence::mount(config(), source(), wide(), 2.0).unwrap();
    assert_eq!(seq.profile(), DeviceProfile::Full);
    assert_eq!(seq.player().opts().addressing, Addressing::Full);
    let canvas = seq.player().surface().unwrap().canvas();
    assert_eq!((canvas.width, canvas.height), (1600, 100));
    let pre = seq.preloader().unwrap();
    assert_eq!(pre.request().schedule.total_to_load(), 10);
}

#[test]
fn narrow_viewport_mounts_reduced_profile() {
    let seq = ScrollSequence::mount(config(), source(), narrow(), 3.0).unwrap();
    assert_eq!(seq.profile(), DeviceProfile::Reduced);
    assert_eq!(seq.player().opts().addressing, Addressing::Half);
    let canvas = seq.player().surface().unwrap().canvas();
    assert_eq!((canvas.width, canvas.height), (600, 75));
    assert_eq!(seq.preloader().unwrap().request().schedule.stride(), 2);
    assert_eq!(seq.preloader().unwrap().request().schedule.total_to_load(), 5);
}

#[test]
fn player_waits_for_minimum_display_time() {
    let mut cfg = config();
    cfg.min_display_ms = 3500;
    let mut seq = ScrollSequence::mount(cfg, source(), wide(), 1.0).unwrap();

    seq.preloader.as_mut().unwrap().wait();
    seq.indicator.mark_loaded();
    seq.indicator.set_progress(100.0);
    for _ in 0..170 {
        seq.advance(STEP).unwrap();
    }
    assert!(seq.indicator().shown_for() < Duration::from_millis(3500));
    assert_eq!(seq.player().state(), PlayerState::Inactive);

    drive_until_active(&mut seq);
    assert!(seq.indicator().shown_for() >= Duration::from_millis(3500));
    assert_eq!(seq.player().last_painted(), Some(0));
    assert_eq!(red(&seq), 1);
}

#[test]
fn scrolling_follows_with_lag() {
    let mut seq = ScrollSequence::mount(config(), source(), wide(), 1.0).unwrap();
    drive_until_active(&mut seq);

    // Section is 150 px tall against a 50 px viewport: 100 px of scroll.
    seq.on_scroll(50.0);
    assert_eq!(seq.target_progress(), 0.5);
    assert!(seq.scroll_progress() < 0.5);

    settle_scrub(&mut seq);
    assert_eq!(seq.scroll_progress(), 0.5);
    assert_eq!(seq.player().playback().current_frame, 5);
    assert_eq!(red(&seq), 6);
    assert!(seq.glitch().is_armed());
}

#[test]
fn resize_within_profile_repaints_once() {
    let mut seq = ScrollSequence::mount(config(), source(), wide(), 1.0).unwrap();
    drive_until_active(&mut seq);
    seq.on_scroll(50.0);
    settle_scrub(&mut seq);
    let before = seq.player().paint_count();

    let out = seq
        .on_resize(Viewport::new(1000.0, 50.0).unwrap(), 1.0)
        .unwrap()
        .unwrap();
    assert!(out.repainted);
    assert_eq!(seq.player().surface().unwrap().canvas().width, 1000);
    seq.advance(STEP).unwrap();
    assert_eq!(seq.player().paint_count(), before + 1);
}

#[test]
fn crossing_profile_boundary_reloads_at_half_density() {
    let mut seq = ScrollSequence::mount(config(), source(), wide(), 1.0).unwrap();
    drive_until_active(&mut seq);
    seq.on_scroll(50.0);
    settle_scrub(&mut seq);

    let out = seq.on_resize(narrow(), 1.0).unwrap();
    assert_eq!(out, None);
    assert_eq!(seq.profile(), DeviceProfile::Reduced);
    assert_eq!(seq.player().state(), PlayerState::Inactive);
    assert_eq!(seq.preloader().unwrap().request().schedule.stride(), 2);

    drive_until_active(&mut seq);
    assert_eq!(seq.player().opts().addressing, Addressing::Half);
    settle_scrub(&mut seq);
    // Timeline frame 5 addresses slot 2, which holds source frame 5.
    assert_eq!(seq.player().playback().current_frame, 5);
    assert_eq!(red(&seq), 5);
}

#[test]
fn reduced_instant_indicator_shows_full_progress() {
    let mut cfg = config();
    cfg.reduced_instant_indicator = true;
    let mut seq = ScrollSequence::mount(cfg, source(), narrow(), 1.0).unwrap();
    for _ in 0..10 {
        seq.advance(STEP).unwrap();
    }
    assert!(seq.indicator().smoothed() > 10.0);
    drive_until_active(&mut seq);
    assert!(seq.indicator().display_percent() >= 99);
}

#[test]
fn unmount_is_terminal_and_idempotent() {
    let mut seq = ScrollSequence::mount(config(), source(), wide(), 1.0).unwrap();
    drive_until_active(&mut seq);
    seq.on_scroll(50.0);
    settle_scrub(&mut seq);
    assert!(seq.glitch().is_armed());

    seq.unmount();
    seq.unmount();
    assert!(!seq.is_mounted());
    assert!(seq.preloader().is_none());
    assert_eq!(seq.player().state(), PlayerState::Disposed);
    assert!(!seq.glitch().is_armed());
    assert_eq!(seq.advance(STEP).unwrap(), SequenceTick::default());
    assert_eq!(seq.on_scroll(0.0), None);
    assert!(seq.on_resize(wide(), 1.0).is_err());
}

#[test]
fn failed_reload_leaves_profile_and_player_untouched() {
    let mut seq = ScrollSequence::mount(config(), source(), wide(), 1.0).unwrap();
    drive_until_active(&mut seq);
    let painted = seq.player().last_painted();

    // Reduced profile needs a stride-2 reload, which cannot start on a zero-thread pool.
    seq.config.threads = Some(0);
    assert!(seq.on_resize(narrow(), 1.0).is_err());

    assert_eq!(seq.profile(), DeviceProfile::Full);
    assert_eq!(seq.viewport(), wide());
    assert_eq!(seq.player().opts().addressing, Addressing::Full);
    assert_eq!(seq.player().state(), PlayerState::Active);
    assert_eq!(seq.player().last_painted(), painted);
    assert_eq!(seq.preloader().unwrap().request().schedule.stride(), 1);
}
