// End-to-end runs of the binary against a small fixture set in a temp
// directory. All input paths are relative, so pointing the working
// directory at the fixtures is the whole setup.
use std::fs;
use std::path::Path;
use std::process::Command;

const CONFIG: &str = "\
durations: [0.5, 5]
projectMap:
  proj-a: Q05
  proj-b: E5A
merge:
  - name: blueprints
    item_map:
      bp_x: x
costMap:
  Coins:
    Q05: 100
    E5A: 250
  Cube:
    E5A: 3
resultColumns: [code, rate, gain-x, duration, cost-Coins, cost-Cube]
";

const BASE_TABLE: &str = r#"{"data":{"ByProject":[
    {"project":"proj-a","rate":"25%","item":"ignored"},
    {"project":"proj-b","rate":"50%"}
]}}"#;

const BLUEPRINTS: &str = r#"{"data":{"ByProject":[
    {"project":"proj-a","item":"bp_x","average":8.0},
    {"project":"proj-b","item":"bp_x","average":12.0},
    {"project":"proj-b","item":"junk","average":99.0}
]}}"#;

fn write_fixtures(dir: &Path, config: &str) {
    fs::create_dir(dir.join("raw")).unwrap();
    fs::write(dir.join("raw/merge.yml"), config).unwrap();
    fs::write(dir.join("raw/research4_projects.json"), BASE_TABLE).unwrap();
    fs::write(dir.join("raw/blueprints.json"), BLUEPRINTS).unwrap();
}

fn run_in(dir: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_research-stats"))
        .current_dir(dir)
        .output()
        .expect("binary should run")
}

#[test]
fn produces_expected_table() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path(), CONFIG);

    let out = run_in(dir.path());
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    // Hand-computed: Q05 gain-x = (0.25*8)/0.25 = 8, E5A = (0.5*12)/0.5 = 12;
    // the Cube cost table has no Q05 entry, so that cell fills to 0.
    let csv = fs::read_to_string(dir.path().join("data.csv")).unwrap();
    assert_eq!(
        csv,
        "code,rate,gain-x,duration,cost-Coins,cost-Cube\n\
         E5A,0.5,12,5,250,3\n\
         Q05,0.25,8,0.5,100,0\n"
    );
}

#[test]
fn stale_project_map_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = CONFIG.replace("proj-b: E5A", "proj-other: E5A");
    write_fixtures(dir.path(), &config);

    let out = run_in(dir.path());
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("proj-b"), "stderr: {stderr}");
    // Fail-fast means no partial output file.
    assert!(!dir.path().join("data.csv").exists());
}

#[test]
fn unknown_result_column_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let config = CONFIG.replace("gain-x,", "gain-y,");
    write_fixtures(dir.path(), &config);

    let out = run_in(dir.path());
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("gain-y"), "stderr: {stderr}");
}
