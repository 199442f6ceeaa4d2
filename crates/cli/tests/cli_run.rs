// End-to-end tests for `nvtable run` and `nvtable validate`.
// Run with: cargo test -p nvtable-cli --test cli_run -- --nocapture

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn nvtable() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nvtable"));
    cmd.env_remove("RUST_LOG");
    cmd
}

const CANONICAL: &str = "\
#include \"nvid.h\"

struct nvdesc nvid[] = {
    {    1,\"NV_ID_IMEI\",\"IMEI number\"},
    {    2,\"NV_ID_SERIAL\",0},
    {    2,\"NV_ID_SERIAL\",\"ignored duplicate\"},
    {0,0,0}
};
";

const VENDOR_A: &str = "\
typedef enum {
    EN_NV_ID_IMEI_SHADOW = 0x0001,
    EN_NV_ID_PHY_TIMING  = 0x0C00,
} PHY_NV_ID_ENUM;
";

const VENDOR_C: &str = "\
enum CODEC_NV_ID_ENUM {
    en_NV_Item_MaxVolLevel = 0x7530,      /* 30000 */
    en_NV_WB_HandSet1,                    /* 30001 */
};
";

const EXPECTED: &str = "\
{    1,\"NV_ID_IMEI\",\"IMEI number\"},
{    2,\"NV_ID_SERIAL\",0},
{ 3072,\"EN_NV_ID_PHY_TIMING\",0},
{30000,\"en_NV_Item_MaxVolLevel\",0},
{30001,\"en_NV_WB_HandSet1\",0},
{0,0,0}
";

const CONFIG: &str = r#"
name = "test-table"

[canonical]
file = "nvid.c"

[[tiers]]
dialect = "vendor_a"
files = ["phy.h"]

[[tiers]]
dialect = "vendor_c"
files = ["codec.h"]
"#;

/// Temp dir holding the three sources and `merge.toml` with `config`.
fn workspace(config: &str, canonical: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("nvid.c"), canonical).unwrap();
    std::fs::write(dir.path().join("phy.h"), VENDOR_A).unwrap();
    std::fs::write(dir.path().join("codec.h"), VENDOR_C).unwrap();
    std::fs::write(dir.path().join("merge.toml"), config).unwrap();
    dir
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    nvtable().current_dir(dir).args(args).output().unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// -------------------------------------------------------------------------
// run
// -------------------------------------------------------------------------

#[test]
fn run_prints_table_to_stdout() {
    let dir = workspace(CONFIG, CANONICAL);
    let output = run_in(dir.path(), &["run", "merge.toml"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), EXPECTED);
    assert!(stderr(&output).contains("test-table: 5 identifiers"));
}

#[test]
fn run_resolves_sources_relative_to_config() {
    let dir = workspace(CONFIG, CANONICAL);
    let config_path = dir.path().join("merge.toml");
    let output = nvtable()
        .arg("run")
        .arg(&config_path)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), EXPECTED);
}

#[test]
fn run_writes_output_file() {
    let dir = workspace(CONFIG, CANONICAL);
    let out = dir.path().join("merged.c");
    let output = run_in(dir.path(), &["run", "merge.toml", "--output", out.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(output.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&out).unwrap(), EXPECTED);
}

#[test]
fn run_uses_config_output_file() {
    let config = format!("{CONFIG}\n[output]\nfile = \"from-config.c\"\n");
    let dir = workspace(&config, CANONICAL);
    let output = run_in(dir.path(), &["run", "merge.toml"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("from-config.c")).unwrap(),
        EXPECTED
    );
}

#[test]
fn run_json_summary() {
    let dir = workspace(CONFIG, CANONICAL);
    let output = run_in(dir.path(), &["run", "merge.toml", "--json"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total_groups"], 5);
    assert_eq!(summary["canonical"]["suppressed"], 1);
    assert_eq!(summary["vendors"][0]["label"], "phy.h");
    assert_eq!(summary["vendors"][0]["dialect"], "vendor_a");
    assert_eq!(summary["vendors"][0]["adopted"], 1);
    assert_eq!(summary["vendors"][0]["discarded"], 1);
}

#[test]
fn run_dump_stages_to_stderr() {
    let dir = workspace(CONFIG, CANONICAL);
    let output = run_in(dir.path(), &["run", "merge.toml", "--dump-stages"]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), EXPECTED);

    let stages: Vec<serde_json::Value> = stderr(&output)
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    // canonical: grouped + deduplicated; each vendor: grouped + deduplicated + merged
    assert_eq!(stages.len(), 8);
    assert_eq!(stages[0]["stage"], "grouped");
    assert_eq!(stages[0]["table"]["2"]["names"][1], "NV_ID_SERIAL");
    assert!(stages[1]["table"]["2"]["names"][1].is_null());
}

#[test]
fn malformed_canonical_exits_3_without_output() {
    let canonical = "\
struct nvdesc nvid[] = {
    {1,\"NV_ONE\",0},
    {2,\"NV_TWO\"},
    {0,0,0}
};
";
    let dir = workspace(CONFIG, canonical);
    let out = dir.path().join("merged.c");
    let output = run_in(dir.path(), &["run", "merge.toml", "-o", out.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("N3"));
    assert!(output.stdout.is_empty());
    assert!(!out.exists());
}

#[test]
fn invalid_config_exits_4() {
    let dir = workspace("name = \"x\"\n[canonical]\nfile = \"nvid.c\"\n[[tiers]]\ndialect = \"vendor_z\"\nfiles = [\"phy.h\"]\n", CANONICAL);
    let output = run_in(dir.path(), &["run", "merge.toml"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("config parse error"));
}

#[test]
fn missing_source_exits_5() {
    let config = CONFIG.replace("codec.h", "missing.h");
    let dir = workspace(&config, CANONICAL);
    let output = run_in(dir.path(), &["run", "merge.toml"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("missing.h"));
    assert!(output.stdout.is_empty());
}

#[test]
fn invalid_utf8_is_tolerated() {
    let dir = workspace(CONFIG, CANONICAL);
    let mut bytes = VENDOR_C.as_bytes().to_vec();
    bytes.extend_from_slice(b"/* \xc9\xf9\xd2\xf4 */\n");
    std::fs::write(dir.path().join("codec.h"), bytes).unwrap();

    let output = run_in(dir.path(), &["run", "merge.toml"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), EXPECTED);
    assert!(stderr(&output).contains("invalid UTF-8"));
}

#[test]
fn verbose_logs_progress_to_stderr() {
    let dir = workspace(CONFIG, CANONICAL);

    let quiet = run_in(dir.path(), &["run", "merge.toml"]);
    assert_eq!(quiet.status.code(), Some(0));
    assert!(!stderr(&quiet).contains("seeded"));

    let verbose = run_in(dir.path(), &["-v", "run", "merge.toml"]);
    assert_eq!(verbose.status.code(), Some(0));
    assert!(stderr(&verbose).contains("seeded"));
    assert_eq!(String::from_utf8_lossy(&verbose.stdout), EXPECTED);
}

// -------------------------------------------------------------------------
// validate
// -------------------------------------------------------------------------

#[test]
fn validate_lists_source_order() {
    let dir = workspace(CONFIG, CANONICAL);
    let output = run_in(dir.path(), &["validate", "merge.toml"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("config ok: test-table"));
    let phy = err.find("phy.h").unwrap();
    let codec = err.find("codec.h").unwrap();
    assert!(phy < codec);
}

#[test]
fn validate_reports_missing_files() {
    let config = CONFIG.replace("phy.h", "gone.h");
    let dir = workspace(&config, CANONICAL);
    let output = run_in(dir.path(), &["validate", "merge.toml"]);

    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("gone.h"));
}

#[test]
fn no_subcommand_is_usage_error() {
    let output = nvtable().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}
