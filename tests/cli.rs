use std::process::Output;

use assert_cmd::Command;
use pretty_assertions::assert_eq;

const FIXTURE: &str = "lib/ipvs/fixtures/proc/net/ip_vs";

fn run_command(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::cargo_bin("ipvs-plugin").unwrap();
    cmd.env_remove("MACKEREL_AGENT_PLUGIN_META")
        .env_remove("IPVS_PLUGIN_LOG")
        .args(args);
    for (key, value) in envs {
        cmd.env(key, value);
    }

    cmd.output().expect("Failed to execute process")
}

fn tempfile() -> String {
    testify::temp_file().to_string_lossy().to_string()
}

fn assert_no_log_lines(output: &[u8]) {
    let output = String::from_utf8_lossy(output);

    // Assert there are no lines with keywords
    let keywords = ["ERROR", "WARN", "INFO", "DEBUG", "TRACE"];
    for line in output.lines() {
        let present = keywords.iter().any(|word| line.contains(word));
        assert!(!present, "Log detected in output line: {:?}", line);
    }
}

#[test]
fn values() {
    let tempfile = tempfile();
    let output = run_command(&["--target", FIXTURE, "--tempfile", &tempfile], &[]);
    assert!(output.status.success(), "{output:?}");
    assert_no_log_lines(&output.stdout);

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 24);

    for line in lines {
        let fields = line.split('\t').collect::<Vec<_>>();
        assert_eq!(fields.len(), 3, "line: {line:?}");
        assert!(fields[0].starts_with("proc.net.ip_vs."), "line: {line:?}");
        assert!(fields[1].parse::<f64>().is_ok(), "line: {line:?}");
        assert!(fields[2].parse::<i64>().is_ok(), "line: {line:?}");
    }

    assert!(stdout.contains("proc.net.ip_vs.192_168_0_1_80_TCP_wrr.weight.192_168_1_1_80\t10.000000\t"));
    assert!(std::path::Path::new(&tempfile).exists());
}

#[test]
fn graphs() {
    let tempfile = tempfile();

    for output in [
        run_command(&["--target", FIXTURE, "--tempfile", &tempfile, "graphs"], &[]),
        run_command(
            &["--target", FIXTURE, "--tempfile", &tempfile],
            &[("MACKEREL_AGENT_PLUGIN_META", "1")],
        ),
    ] {
        assert!(output.status.success(), "{output:?}");

        let stdout = String::from_utf8(output.stdout).unwrap();
        let (header, json) = stdout.split_once('\n').unwrap();
        assert_eq!(header, "# mackerel-agent-plugin");

        let value = serde_json::from_str::<serde_json::Value>(json.trim()).unwrap();
        assert_eq!(value["graphs"].as_object().unwrap().len(), 12);
    }

    // values were never collected
    assert!(!std::path::Path::new(&tempfile).exists());
}

#[test]
fn example_config() {
    let output = run_command(
        &["-c", "config/ipvs-plugin.yaml", "--tempfile", &tempfile()],
        &[],
    );
    assert!(output.status.success(), "{output:?}");
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 24);
}

#[test]
fn failed_cycles() {
    let malformed = testify::temp_file();
    std::fs::write(&malformed, "TCP C0A80001:0050\n  -> C0A80101:0050 Tunnel 10 3 242\n").unwrap();
    let malformed = malformed.to_string_lossy().to_string();

    let bad_config = testify::temp_file();
    std::fs::write(&bad_config, "targets: /proc/net/ip_vs\n").unwrap();
    let bad_config = bad_config.to_string_lossy().to_string();

    let tests = [
        (
            vec!["--target", "/path/not/exists/ip_vs"],
            exitcode::IOERR,
        ),
        (vec!["--target", malformed.as_str()], exitcode::DATAERR),
        (
            vec!["--target", malformed.as_str(), "graphs"],
            exitcode::DATAERR,
        ),
        (vec!["-c", bad_config.as_str()], exitcode::CONFIG),
    ];

    for (args, code) in tests {
        let tempfile = tempfile();
        let args = ["--tempfile", tempfile.as_str()]
            .into_iter()
            .chain(args)
            .collect::<Vec<_>>();

        let output = run_command(&args, &[]);
        assert_eq!(output.status.code(), Some(code), "args: {args:?}");
        assert!(output.stdout.is_empty(), "args: {args:?}");
        assert!(
            String::from_utf8_lossy(&output.stderr).contains("ERROR"),
            "args: {args:?}"
        );
    }
}

#[test]
fn version() {
    let output = run_command(&["--version"], &[]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        format!("ipvs-plugin {}\n", env!("CARGO_PKG_VERSION"))
    );
}
