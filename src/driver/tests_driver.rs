use super::*;
use crate::error::ReplayerError;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

const REQUIRED: [&str; 12] = [
    "--sai_headers",
    "/opt/sai/inc",
    "--sai_lib",
    "libsai.a",
    "--brcm_lib",
    "libxgs_robo.a",
    "--brcm_phymode_lib",
    "libphymodepil.a",
    "--brcm_epdm_lib",
    "libepdm.a",
    "--protobuf_lib",
    "libprotobuf.a",
];

fn parse(extra: &[&str]) -> Cli {
    let mut args = vec!["sai_replayer_build"];
    args.extend_from_slice(&REQUIRED);
    args.extend_from_slice(extra);
    Cli::parse_from(args)
}

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_defaults() {
    let config = parse(&[]).into_config();
    assert_eq!(config.log_path, PathBuf::from("sai_replayer.log"));
    assert_eq!(config.cpp_path, PathBuf::from("sai_replayer.cpp"));
    assert_eq!(config.header_dir, PathBuf::from("/opt/sai/inc"));
    assert_eq!(config.compiler, "gcc");
    assert!(!config.skip_build);
    assert!(!config.verbose);
}

#[test]
fn test_libraries_in_fixed_order() {
    let config = parse(&["--extra_lib", "libz.a", "--extra_lib", "libcrypto.a"]).into_config();
    let libs: Vec<_> = config.libraries.iter().map(|p| p.to_str().unwrap()).collect();
    assert_eq!(
        libs,
        [
            "libsai.a",
            "libxgs_robo.a",
            "libphymodepil.a",
            "libepdm.a",
            "libprotobuf.a",
            "libz.a",
            "libcrypto.a"
        ]
    );
}

#[test]
fn test_missing_required_library_is_rejected() {
    let result = Cli::try_parse_from(["sai_replayer_build", "--sai_headers", "/opt/sai/inc"]);
    assert!(result.is_err());
}

#[test]
fn test_build_command_uses_config() {
    let driver = ReplayerDriver::new(parse(&["--sai_replayer_cpp", "out.cpp", "--compiler", "clang"]));
    insta::assert_snapshot!(
        driver.build_command().to_shell_string(),
        @"clang out.cpp -I /opt/sai/inc -lm -lpthread -lrt -lstdc++ -ldl libsai.a libxgs_robo.a libphymodepil.a libepdm.a libprotobuf.a"
    );
}

#[test]
fn test_skip_build_only_transforms() {
    setup();
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("trace.log");
    let cpp_path = dir.path().join("trace.cpp");
    fs::write(&log_path, "#include \"fboss/agent/hw/sai/api/SaiApi.h\"\nvoid run_trace() {\n}\n").unwrap();

    let driver = ReplayerDriver::new(parse(&[
        "--sai_replayer_log",
        log_path.to_str().unwrap(),
        "--sai_replayer_cpp",
        cpp_path.to_str().unwrap(),
        "--skip_build",
    ]));
    let outcome = driver.run().unwrap();

    assert!(outcome.status.is_none());
    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(outcome.summary.entry_points_rewritten, 1);
    let source = fs::read_to_string(&cpp_path).unwrap();
    assert!(source.contains("#include <sai.h>"));
    assert!(source.ends_with("int main() {\n}\n"));
}

#[test]
fn test_compiler_exit_code_is_passed_through() {
    setup();
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("trace.log");
    let cpp_path = dir.path().join("trace.cpp");
    fs::write(&log_path, "void run_trace() {\n}\n").unwrap();

    let run_with = |compiler: &str| {
        ReplayerDriver::new(parse(&[
            "--sai_replayer_log",
            log_path.to_str().unwrap(),
            "--sai_replayer_cpp",
            cpp_path.to_str().unwrap(),
            "--compiler",
            compiler,
        ]))
        .run()
        .unwrap()
    };

    assert_eq!(run_with("true").exit_code(), 0);
    assert_eq!(run_with("false").exit_code(), 1);
}

#[test]
fn test_missing_log_stops_before_build() {
    setup();
    let dir = tempdir().unwrap();
    let cpp_path = dir.path().join("trace.cpp");

    let driver = ReplayerDriver::new(parse(&[
        "--sai_replayer_log",
        dir.path().join("missing.log").to_str().unwrap(),
        "--sai_replayer_cpp",
        cpp_path.to_str().unwrap(),
    ]));
    let err = driver.run().unwrap_err();

    assert!(matches!(err, ReplayerError::ReadLog { .. }));
    assert!(!cpp_path.exists());
}
