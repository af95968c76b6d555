//! Integration tests for the vbench binary.
//!
//! These tests invoke the compiled binary as a subprocess against the JSON
//! fixtures in `tests/fixtures/`.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to the fixture directory.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run vbench from the package root (which has no `vbench.toml`).
fn vbench(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vbench"))
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to execute vbench")
}

fn stdout_of(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "vbench failed (exit={:?}):\nstdout:\n{stdout}\nstderr:\n{stderr}",
        output.status.code(),
    );
    stdout
}

// ---------------------------------------------------------------------------
// compare
// ---------------------------------------------------------------------------

#[test]
fn compare_groups_cheapest_code_first() {
    let bench = fixture("benchmark.json");
    let stdout = stdout_of(&vbench(&["compare", bench.to_str().unwrap()]));

    assert!(stdout.starts_with("name='voyager',K=7,R=2,decode=SOFT16\n"), "{stdout}");
    let voyager_hard = stdout.find("name='voyager',K=7,R=2,decode=HARD8").unwrap();
    let cassini = stdout.find("name='cassini',K=15,R=6,decode=SOFT16").unwrap();
    assert!(voyager_hard < cassini);
}

#[test]
fn compare_reports_scalar_speedups() {
    let bench = fixture("benchmark.json");
    let stdout = stdout_of(&vbench(&["compare", bench.to_str().unwrap()]));

    let expected = "\
name='voyager',K=7,R=2,decode=HARD8
simd=scalar,samples=1
 update    = 2.00 ± 0.00 megasymbols/s
 chainback = 2.00 ± 0.00 megabits/s
simd=simd_sse,samples=1
 update    = 8.00 ± 0.00 megasymbols/s (x4.00)
 chainback = 4.00 ± 0.00 megabits/s (x2.00)
";
    assert!(stdout.contains(expected), "{stdout}");
    assert!(stdout.contains("simd=simd_avx,samples=2\n update    = 24.58 ± 0.00 megasymbols/s (x8.00)\n"));
}

#[test]
fn filtering_out_scalar_removes_ratios() {
    let bench = fixture("benchmark.json");
    let stdout = stdout_of(&vbench(&[
        "compare",
        bench.to_str().unwrap(),
        "--filter-simd",
        "simd_sse",
        "SIMD_AVX",
    ]));

    assert!(stdout.contains("simd=simd_sse,samples=1\n update    = 8.00 ± 0.00 megasymbols/s\n"));
    assert!(!stdout.contains("(x"), "{stdout}");
    assert!(!stdout.contains("decode=SOFT16\nsimd=scalar"));
}

#[test]
fn code_filter_selects_one_code() {
    let bench = fixture("benchmark.json");
    let stdout = stdout_of(&vbench(&["compare", bench.to_str().unwrap(), "--filter-code", "cassini"]));

    assert!(stdout.contains("name='cassini'"));
    assert!(!stdout.contains("name='voyager'"));
}

#[test]
fn unknown_code_filter_warns_and_reports_nothing() {
    let bench = fixture("benchmark.json");
    let output = vbench(&["compare", bench.to_str().unwrap(), "--filter-code", "galileo"]);
    let stdout = stdout_of(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stdout.is_empty());
    assert!(stderr.contains("warning: no samples for code 'galileo'"), "{stderr}");
}

#[test]
fn config_file_supplies_filters_and_precision() {
    let bench = fixture("benchmark.json");
    let config = fixture("vbench.toml");
    let stdout = stdout_of(&vbench(&[
        "--config",
        config.to_str().unwrap(),
        "compare",
        bench.to_str().unwrap(),
    ]));

    assert!(!stdout.contains("decode=SOFT16"), "{stdout}");
    assert!(stdout.contains(" update    = 8.0 ± 0.0 megasymbols/s (x4.0)\n"), "{stdout}");
}

#[test]
fn missing_config_fails_every_command() {
    let bench = fixture("benchmark.json");
    let sweep = fixture("snr_ber.json");
    let runs: [&[&str]; 3] = [
        &["compare", bench.to_str().unwrap()],
        &["list", bench.to_str().unwrap()],
        &["plot", sweep.to_str().unwrap(), "--dump"],
    ];

    for args in runs {
        let mut argv = vec!["--config", "no-such-vbench.toml"];
        argv.extend_from_slice(args);
        let output = vbench(&argv);
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert!(!output.status.success(), "{args:?} succeeded");
        assert!(output.stdout.is_empty());
        assert!(stderr.contains("config file not found"), "{stderr}");
    }
}

#[test]
fn json_format_is_machine_readable() {
    let bench = fixture("benchmark.json");
    let stdout = stdout_of(&vbench(&["compare", bench.to_str().unwrap(), "--format", "json"]));

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let buckets = value.as_array().unwrap();
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[1]["decode_type"], "HARD8");
    assert_eq!(buckets[1]["rows"][1]["simd_type"], "SIMD_SSE");
    let speedup = buckets[1]["rows"][1]["speedup"]["symbol"].as_f64().unwrap();
    assert!((speedup - 4.0).abs() < 1e-9);
}

#[test]
fn quiet_suppresses_progress() {
    let bench = fixture("benchmark.json");
    let loud = vbench(&["compare", bench.to_str().unwrap()]);
    let quiet = vbench(&["-q", "compare", bench.to_str().unwrap()]);

    assert!(String::from_utf8_lossy(&loud.stderr).contains("Loading"));
    assert!(quiet.stderr.is_empty());
    assert_eq!(loud.stdout, quiet.stdout);
}

#[test]
fn quiet_suppresses_warnings() {
    let bench = fixture("benchmark.json");
    let output = vbench(&["-q", "compare", bench.to_str().unwrap(), "--filter-code", "galileo"]);

    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn invalid_tag_aborts_run() {
    let bad = fixture("bad_tag.json");
    let output = vbench(&["compare", bad.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("invalid decode type 'SOFT4'"), "{stderr}");
}

#[test]
fn invalid_filter_tag_is_rejected() {
    let bench = fixture("benchmark.json");
    let output = vbench(&["compare", bench.to_str().unwrap(), "--filter-decode", "soft4"]);
    assert!(!output.status.success());
}

#[test]
fn missing_file_is_reported() {
    let output = vbench(&["compare", "does-not-exist.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("failed to read 'does-not-exist.json'"), "{stderr}");
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

#[test]
fn list_prints_each_code_once() {
    let bench = fixture("benchmark.json");
    let stdout = stdout_of(&vbench(&["list", bench.to_str().unwrap()]));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "{stdout}");
    assert_eq!(lines[0], " Name    |  K  R | Coefficients");
    assert_eq!(lines[1], " voyager |  7  2 | [109, 79]");
    assert!(lines[2].starts_with(" cassini | 15  6 | [17817, "));
}

// ---------------------------------------------------------------------------
// plot
// ---------------------------------------------------------------------------

#[test]
fn plot_dump_shows_layers_and_axes() {
    let sweep = fixture("snr_ber.json");
    let stdout = stdout_of(&vbench(&["plot", sweep.to_str().unwrap(), "--dump"]));

    let expected = "\
voyager (K=7,R=2)
 Eb/No (dB) = -2.0 .. 1.0, BER = 1e-4 .. 1e0
 SCALAR
  soft16 -2.0:2.000e-1 -1.0:4.000e-2 0.0:3.000e-4
  hard8  -2.0:3.000e-1 -1.0:1.000e-1 0.0:1.000e-2 1.0:5.000e-4

";
    assert_eq!(stdout, expected);
}
