// sharecrush-core/tests/search_tests.rs
//
// CRF parameter search behavior against a fake monotonic encoder.

mod common;

use common::{FakeToolkit, metadata};
use sharecrush_core::{CoreError, Resolution, SearchTarget, find_matching_crf};
use std::path::Path;

// Strictly decreasing bitrate as CRF rises, mirroring the monotonicity
// contract the early exit relies on.
fn monotonic_bitrate(crf: u8) -> u64 {
    3_000_000u64.saturating_sub(100_000 * u64::from(crf))
}

fn target(bitrate: u64) -> SearchTarget {
    SearchTarget {
        bitrate,
        resolution: "640x360".parse::<Resolution>().unwrap(),
        codec: "libx264".to_string(),
        profile: "Main".to_string(),
        pix_fmt: "yuv420p".to_string(),
    }
}

#[test]
fn test_fake_encoder_is_monotonic() {
    // Guard for the early-exit assumption: higher CRF never probes at a
    // higher bitrate.
    for crf in 20..51u8 {
        assert!(monotonic_bitrate(crf + 1) <= monotonic_bitrate(crf));
    }
}

#[test]
fn test_search_stops_at_first_crf_below_target() {
    let toolkit = FakeToolkit::new(monotonic_bitrate);
    // bitrate(crf) < 500_000 first holds at crf 26.
    let crf = find_matching_crf(
        &toolkit,
        &toolkit,
        Path::new("original.mp4"),
        &target(500_000),
        20,
        30,
    )
    .unwrap();
    assert_eq!(crf, 26);
    // Ascending scan, early-terminated: exactly 20..=26 were encoded.
    assert_eq!(toolkit.recorded_crfs(), vec![20, 21, 22, 23, 24, 25, 26]);
}

#[test]
fn test_search_returns_upper_bound_when_target_never_met() {
    let toolkit = FakeToolkit::new(monotonic_bitrate);
    let crf = find_matching_crf(
        &toolkit,
        &toolkit,
        Path::new("original.mp4"),
        &target(1),
        20,
        30,
    )
    .unwrap();
    assert_eq!(crf, 30);
    // Exhaustive scan of the whole range.
    assert_eq!(toolkit.recorded_crfs(), (20..=30).collect::<Vec<u8>>());
}

#[test]
fn test_search_first_candidate_can_win() {
    let toolkit = FakeToolkit::new(monotonic_bitrate);
    let crf = find_matching_crf(
        &toolkit,
        &toolkit,
        Path::new("original.mp4"),
        &target(2_000_000),
        20,
        30,
    )
    .unwrap();
    assert_eq!(crf, 20);
    assert_eq!(toolkit.recorded_crfs(), vec![20]);
}

#[test]
fn test_zero_target_bitrate_is_rejected_without_encoding() {
    let toolkit = FakeToolkit::new(monotonic_bitrate);
    let result = find_matching_crf(
        &toolkit,
        &toolkit,
        Path::new("original.mp4"),
        &target(0),
        20,
        30,
    );
    assert!(matches!(result, Err(CoreError::ZeroTargetBitrate(_))));
    assert!(toolkit.recorded().is_empty());
}

#[test]
fn test_invalid_range_is_a_config_error() {
    let toolkit = FakeToolkit::new(monotonic_bitrate);
    let result = find_matching_crf(
        &toolkit,
        &toolkit,
        Path::new("original.mp4"),
        &target(500_000),
        30,
        20,
    );
    assert!(matches!(result, Err(CoreError::Config(_))));
}

#[test]
fn test_encode_failure_surfaces_as_error() {
    let mut toolkit = FakeToolkit::new(monotonic_bitrate);
    toolkit.fail_encode_at_crf = Some(23);
    let result = find_matching_crf(
        &toolkit,
        &toolkit,
        Path::new("original.mp4"),
        &target(500_000),
        20,
        30,
    );
    assert!(matches!(result, Err(CoreError::CommandFailed(_, _))));
    // The failing iteration encoded nothing further.
    assert_eq!(toolkit.recorded_crfs(), vec![20, 21, 22]);
}

#[test]
fn test_search_target_from_metadata_overrides_codec() {
    let meta = metadata("1280x720", 1_200_000);
    let target = SearchTarget::from_metadata(&meta, "libx264");
    assert_eq!(target.bitrate, 1_200_000);
    assert_eq!(target.resolution, "1280x720".parse::<Resolution>().unwrap());
    assert_eq!(target.codec, "libx264");
    assert_eq!(target.profile, "Main");
    assert_eq!(target.pix_fmt, "yuv420p");
}
