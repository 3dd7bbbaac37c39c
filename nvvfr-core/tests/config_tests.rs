//! Integration tests for configuration system

use nvvfr_core::config::{
    BitDepth, Codec, ConfigFile, EncodeConfig, Quality, sample_config, write_sample,
};
use tempfile::TempDir;

#[test]
fn test_codec_nvencc_names() {
    assert_eq!(Codec::H264.nvencc_name(), "h264");
    assert_eq!(Codec::Hevc.nvencc_name(), "hevc");
}

#[test]
fn test_codec_from_string() {
    assert_eq!("h264".parse::<Codec>().ok(), Some(Codec::H264));
    assert_eq!("h265".parse::<Codec>().ok(), Some(Codec::Hevc));
    assert_eq!("hevc".parse::<Codec>().ok(), Some(Codec::Hevc));
    assert_eq!("HEVC".parse::<Codec>().ok(), Some(Codec::Hevc));
    assert!("av1".parse::<Codec>().is_err());
}

#[test]
fn test_quality_nvencc_presets() {
    assert_eq!(Quality::High.nvencc_preset(), "P7");
    assert_eq!(Quality::Medium.nvencc_preset(), "P4");
    assert_eq!(Quality::Low.nvencc_preset(), "P1");
}

#[test]
fn test_depth_from_string() {
    assert_eq!("8bit".parse::<BitDepth>().ok(), Some(BitDepth::Eight));
    assert_eq!("10bit".parse::<BitDepth>().ok(), Some(BitDepth::Ten));
    assert_eq!("10".parse::<BitDepth>().ok(), Some(BitDepth::Ten));
    assert!("12bit".parse::<BitDepth>().is_err());
}

#[test]
fn test_encode_config_builder() {
    let config = EncodeConfig::new("/out")
        .with_prefix("movie")
        .with_codec(Codec::H264)
        .with_quality(Quality::Medium)
        .with_depth(BitDepth::Eight)
        .with_resolution(1280, 720)
        .with_superres(false)
        .with_double_frame(true);

    assert_eq!(config.prefix, "movie");
    assert_eq!(config.codec, Codec::H264);
    assert_eq!(config.quality, Quality::Medium);
    assert_eq!(config.depth, BitDepth::Eight);
    assert_eq!(config.resolution(), "1280x720");
    assert!(!config.superres);
    assert!(config.double_frame);
}

#[test]
fn test_depth_downgrade_warning() {
    let config = EncodeConfig::new("/out")
        .with_codec(Codec::H264)
        .with_depth(BitDepth::Ten);
    assert_eq!(config.effective_depth(), BitDepth::Eight);

    let warnings = config.validate();
    assert!(warnings.iter().any(|w| w.contains("8-bit")));

    // HEVC keeps 10-bit and produces no warning
    let config = EncodeConfig::new("/out").with_depth(BitDepth::Ten);
    assert_eq!(config.effective_depth(), BitDepth::Ten);
    assert!(config.validate().is_empty());
}

#[test]
fn test_strict_validation_bounds() {
    assert!(EncodeConfig::new("/out").validate_strict().is_ok());

    let too_small = EncodeConfig::new("/out").with_resolution(32, 1080);
    assert!(too_small.validate_strict().is_err());

    let too_large = EncodeConfig::new("/out").with_resolution(1920, 10000);
    assert!(too_large.validate_strict().is_err());

    let bad_strength = EncodeConfig::new("/out").with_superres_strength(1.5);
    assert!(bad_strength.validate_strict().is_err());

    // Strength is only checked when superres is enabled
    let disabled = EncodeConfig::new("/out")
        .with_superres(false)
        .with_superres_strength(1.5);
    assert!(disabled.validate_strict().is_ok());

    let empty_prefix = EncodeConfig::new("/out").with_prefix("");
    assert!(empty_prefix.validate_strict().is_err());
}

#[test]
fn test_config_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = ConfigFile::default();
    config.defaults.prefix = "render".to_string();
    config.processing.double_frame = true;
    config.save_to(path.clone()).unwrap();

    let loaded = ConfigFile::load_from(path).unwrap();
    assert_eq!(loaded.defaults.prefix, "render");
    assert!(loaded.processing.double_frame);
}

#[test]
fn test_config_file_missing_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = ConfigFile::load_from(dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded.defaults.codec, "h265");
}

#[test]
fn test_write_sample_creates_parents_and_parses_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    write_sample(&path).unwrap();
    assert!(path.is_file());

    let loaded = ConfigFile::load_from(path).unwrap();
    assert_eq!(loaded.defaults.prefix, "nvvfr");
    assert_eq!(loaded.processing.width, 1920);
}

#[test]
fn test_sample_config_parses() {
    let config: ConfigFile = toml::from_str(&sample_config()).unwrap();
    assert_eq!(config.defaults.quality, "high");
    assert_eq!(config.processing.superres_strength, 1.0);
}
