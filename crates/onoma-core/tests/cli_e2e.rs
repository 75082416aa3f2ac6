//! End-to-end CLI tests for onoma-core.
//!
//! Every command is run against the real binary with the preset lookup
//! isolated from the host (no ONOMA_* variables, XDG pointed at an empty
//! location).

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;

const OTTONIAN_TABLE: &str = r#"{
    "schema_version": "1.0.0",
    "default_preset": "otto",
    "presets": [
        {"name": "ottonian", "aliases": ["otto"], "priors": {"mg": 0.3, "o": 0.5, "sp": 0.1, "r": 0.1}}
    ]
}"#;

/// Get a Command for the onoma-core binary with host config hidden.
fn onoma_core() -> Command {
    let mut cmd = Command::cargo_bin("onoma-core").expect("onoma-core binary should exist");
    cmd.env_remove("ONOMA_PRESETS")
        .env_remove("ONOMA_CONFIG_DIR")
        .env_remove("ONOMA_LOG")
        .env_remove("ONOMA_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent/onoma-test-xdg");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "exit {:?}, stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn write_table(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn approx(value: &Value, expected: f64, tol: f64) -> bool {
    value.as_f64().is_some_and(|v| (v - expected).abs() < tol)
}

// ============================================================================
// calc
// ============================================================================

mod calc {
    use super::*;

    #[test]
    fn default_preset_is_full_sample() {
        let json = stdout_json(onoma_core().arg("calc"));
        assert_eq!(json["preset"], "full");
        assert_eq!(json["map"], "mg");
        assert!(approx(&json["posteriors"]["mg"], 0.9106, 1e-3), "{}", json["posteriors"]);
        assert!(approx(&json["evidence"], 0.4546, 1e-3));
        assert_eq!(json["ranking"][0]["hypothesis"], "mg");
        assert_eq!(json["ranking"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn preset_alias_selects_unconditional() {
        let json = stdout_json(onoma_core().args(["calc", "--preset", "H"]));
        assert_eq!(json["preset"], "unconditional");
        assert_eq!(json["map"], "o");
        assert!(approx(&json["posteriors"]["mg"], 0.4271, 1e-3));
        assert_eq!(json["map_evidence"]["favors"], "Mg");
    }

    #[test]
    fn explicit_priors_and_likelihoods() {
        let json = stdout_json(onoma_core().args([
            "calc",
            "--priors",
            "1,1,1,1",
            "--likelihoods",
            "0.5,0.5,0.5,0.5",
        ]));
        assert!(json.get("preset").is_none());
        for h in ["mg", "o", "sp", "r"] {
            assert!(approx(&json["posteriors"][h], 0.25, 1e-12));
            assert!(approx(&json["normalized_priors"][h], 0.25, 1e-12));
        }
    }

    #[test]
    fn summary_format_is_one_line() {
        onoma_core()
            .args(["-f", "summary", "calc", "--preset", "loo"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("MAP Mg Mg=84.0%"))
            .stdout(predicate::str::contains("(preset loo)"));
    }

    #[test]
    fn markdown_format_has_table() {
        onoma_core()
            .args(["--format", "md", "calc", "--preset", "xw"])
            .assert()
            .success()
            .stdout(predicate::str::contains("| Hypothesis | Prior | P(D|H) | Joint | Posterior |"))
            .stdout(predicate::str::contains("86.7%"));
    }

    #[test]
    fn exitcode_format_prints_nothing() {
        onoma_core()
            .args(["-f", "exitcode", "calc"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn out_of_range_likelihood_is_warned_not_rejected() {
        let output = onoma_core()
            .args(["calc", "--likelihoods", "0.75,0.9,0.07,0.02"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("likelihoods.o"), "stderr: {stderr}");
        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn negative_value_via_equals_syntax_reaches_validation() {
        onoma_core()
            .args(["-q", "calc", "--priors=-0.1,0.5,0.3,0.3"])
            .assert()
            .code(11);
    }
}

// ============================================================================
// sensitivity / scenarios
// ============================================================================

mod analysis {
    use super::*;

    #[test]
    fn default_sensitivity_grid() {
        let json = stdout_json(onoma_core().arg("sensitivity"));
        let cells = json["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|row| row.as_array().unwrap().len() == 5));
        assert!(approx(&json["alt_likelihood"], 0.08, 1e-12));
        // prior 0.552, P(D|Mg) 0.75
        let expected = 0.414 / (0.414 + 0.448 * 0.08);
        assert!(approx(&cells[3][4], expected, 1e-9));
    }

    #[test]
    fn custom_sensitivity_axes() {
        let json = stdout_json(onoma_core().args([
            "sensitivity",
            "--priors-axis",
            "0.5",
            "--likelihood-axis",
            "0.08,0.8",
            "--alt-likelihood",
            "0.08",
        ]));
        assert!(approx(&json["cells"][0][0], 0.5, 1e-12));
        assert!(approx(&json["cells"][0][1], 10.0 / 11.0, 1e-12));
    }

    #[test]
    fn sensitivity_markdown_shows_percentages() {
        onoma_core()
            .args(["-f", "md", "sensitivity"])
            .assert()
            .success()
            .stdout(predicate::str::contains("| 0.085 |"))
            .stdout(predicate::str::contains("| 0.40 | 0.50 | 0.60 | 0.70 | 0.75 |"));
    }

    #[test]
    fn scenarios_reproduce_with_builtins() {
        let json = stdout_json(onoma_core().arg("scenarios"));
        assert_eq!(json["all_match"], true);
        let ids: Vec<&str> = json["checks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["A", "LOO", "Xw", "H"]);
    }

    #[test]
    fn scenarios_filtered_by_id() {
        let json = stdout_json(onoma_core().args(["scenarios", "--id", "h", "--id", "LOO"]));
        let checks = json["checks"].as_array().unwrap();
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0]["id"], "H");
        assert_eq!(checks[0]["computed_pct"], 42.7);
        assert_eq!(checks[1]["id"], "LOO");
        assert_eq!(json["all_match"], true);
    }

    #[test]
    fn overridden_preset_makes_scenarios_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(
            dir.path(),
            "flat.json",
            r#"{"schema_version": "1.0.0", "presets": [{"name": "full", "priors": {"mg": 0.25, "o": 0.25, "sp": 0.25, "r": 0.25}}]}"#,
        );
        onoma_core()
            .arg("--presets")
            .arg(&path)
            .args(["-f", "summary", "scenarios"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("mismatched: A"));
    }
}

// ============================================================================
// presets / config
// ============================================================================

mod presets_and_config {
    use super::*;

    #[test]
    fn builtin_presets_listed() {
        let json = stdout_json(onoma_core().arg("presets"));
        assert_eq!(json["source"], "builtin default");
        assert_eq!(json["default_preset"], "full");
        let names: Vec<&str> = json["presets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["full", "xw", "loo", "unconditional", "custom"]);
    }

    #[test]
    fn presets_file_adds_and_sets_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(dir.path(), "mine.json", OTTONIAN_TABLE);

        let json = stdout_json(onoma_core().arg("--presets").arg(&path).arg("presets"));
        assert_eq!(json["source"], "CLI argument");
        assert_eq!(json["presets"].as_array().unwrap().len(), 6);

        let calc = stdout_json(onoma_core().arg("--presets").arg(&path).arg("calc"));
        assert_eq!(calc["preset"], "ottonian");
        assert!(approx(&calc["posteriors"]["mg"], 0.225 / 0.284, 1e-9));
    }

    #[test]
    fn env_presets_path_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(dir.path(), "env.json", OTTONIAN_TABLE);
        let json = stdout_json(onoma_core().env("ONOMA_PRESETS", &path).arg("presets"));
        assert_eq!(json["source"], "environment variable");
    }

    #[test]
    fn config_dir_finds_toml_table() {
        let dir = tempfile::tempdir().unwrap();
        write_table(
            dir.path(),
            "presets.toml",
            "schema_version = \"1.0.0\"\ndefault_preset = \"loo\"\n",
        );
        let json = stdout_json(
            onoma_core()
                .arg("--config-dir")
                .arg(dir.path())
                .args(["calc"]),
        );
        assert_eq!(json["preset"], "loo");
    }

    #[test]
    fn config_show_builtin() {
        let json = stdout_json(onoma_core().args(["config", "show"]));
        assert_eq!(json["snapshot"]["presets_source"], "builtin default");
        assert_eq!(json["snapshot"]["preset_count"], 5);
        assert_eq!(json["table"]["presets"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn config_validate_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_table(dir.path(), "mine.json", OTTONIAN_TABLE);
        let json = stdout_json(onoma_core().args(["config", "validate"]).arg(&path));
        assert_eq!(json["status"], "valid");
        assert_eq!(json["preset_count"], 6);
        assert_eq!(json["hash"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn config_validate_summary_without_file() {
        onoma_core()
            .args(["-f", "summary", "config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config validate: OK (built-in defaults)"));
    }
}

// ============================================================================
// schema / version
// ============================================================================

mod meta {
    use super::*;

    #[test]
    fn schema_list() {
        let json = stdout_json(onoma_core().args(["schema", "--list"]));
        let names: Vec<&str> = json["schemas"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"PosteriorReport"));
        assert!(names.contains(&"PresetTable"));
    }

    #[test]
    fn schema_for_posterior_report() {
        let json = stdout_json(onoma_core().args(["schema", "PosteriorReport"]));
        assert!(json["properties"].get("posteriors").is_some());
    }

    #[test]
    fn schema_all_is_keyed_by_type() {
        let json = stdout_json(onoma_core().args(["schema", "--all", "--compact"]));
        let all = json.as_object().unwrap();
        assert_eq!(all.len(), 11);
        assert!(all["ScenarioReport"]["properties"].get("checks").is_some());
    }

    #[test]
    fn unknown_schema_is_args_error() {
        onoma_core()
            .args(["schema", "Nope"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("unknown schema type"));
    }

    #[test]
    fn version_json() {
        let json = stdout_json(onoma_core().arg("version"));
        assert_eq!(json["onoma_core_version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn help_exits_clean() {
        onoma_core()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("calc"));
    }
}
