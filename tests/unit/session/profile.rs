use super::*;

#[test]
fn breakpoint_is_exclusive() {
    assert_eq!(DeviceProfile::for_width(767.9), DeviceProfile::Reduced);
    assert_eq!(DeviceProfile::for_width(768.0), DeviceProfile::Full);
    let vp = Viewport::new(390.0, 844.0).unwrap();
    assert_eq!(DeviceProfile::for_viewport(vp), DeviceProfile::Reduced);
}

#[test]
fn full_profile_keeps_everything() {
    let p = DeviceProfile::Full;
    assert_eq!(p.addressing(), Addressing::Full);
    assert_eq!(p.stride(1), 1);
    assert_eq!(p.effective_dpr(3.0), 3.0);
    assert_eq!(p.scrub(), Duration::from_millis(1200));
}

#[test]
fn reduced_profile_halves_and_caps() {
    let p = DeviceProfile::Reduced;
    assert_eq!(p.addressing(), Addressing::Half);
    assert_eq!(p.stride(1), 2);
    assert_eq!(p.effective_dpr(3.0), 1.5);
    assert_eq!(p.effective_dpr(1.0), 1.0);
    assert_eq!(p.scrub(), Duration::from_millis(800));
}
