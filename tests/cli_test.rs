// tests/cli_test.rs

use assert_cmd::Command;
use predicates::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_flags() {
        Command::cargo_bin("pubplot")
            .unwrap()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--template"))
            .stdout(predicate::str::contains("--out-dir"));
    }

    #[test]
    fn test_research_run_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        Command::cargo_bin("pubplot")
            .unwrap()
            .args(["--template", "research", "--series", "2", "--out-dir"])
            .arg(dir.path())
            .assert()
            .success();
        assert!(dir.path().join("research_plot.png").is_file());
        assert!(dir.path().join("research_plot.pdf").is_file());
        assert!(!dir.path().join("scientific_plot.png").exists());
    }

    #[test]
    fn test_bad_style_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let style = dir.path().join("style.toml");
        std::fs::write(&style, "font_size = \"huge\"\n").unwrap();
        Command::cargo_bin("pubplot")
            .unwrap()
            .args(["--template", "scientific", "--style"])
            .arg(&style)
            .arg("--out-dir")
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("style"));
    }

    #[test]
    fn test_unknown_template_rejected() {
        Command::cargo_bin("pubplot")
            .unwrap()
            .args(["--template", "poster"])
            .assert()
            .failure();
    }
}
