mod tests {
    use std::{fs, path::Path, process::Command};

    use clap::Parser;
    use git_revision_info::FALLBACK_OUTPUT;
    use pretty_assertions::assert_eq;
    use tempfile::{NamedTempFile, tempdir};

    use crate::*;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    /// Creates a repository with a single commit on branch `main`.
    fn init_repo(dir: &Path) {
        git(dir, &["init", "-q"]);
        git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        git(dir, &["config", "user.email", "dev@example.com"]);
        git(dir, &["config", "user.name", "Dev"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
        fs::write(dir.join("README.md"), "hello\n").unwrap();
        git(dir, &["add", "README.md"]);
        git(dir, &["commit", "-q", "-m", "initial commit"]);
    }

    // ══════════════════════════════════════════════════════════════════════════
    // ARGUMENT PARSING TESTS
    // ══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_parse_subcommands() {
        common::init();
        let cli = Cli::try_parse_from(["git-revision-info", "extract"]).unwrap();
        assert_eq!(cli.command, CliCommand::Extract);
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["git-revision-info", "-w", "/srv/app", "html"]).unwrap();
        assert_eq!(cli.command, CliCommand::Html);
        assert_eq!(cli.work_tree.as_deref(), Some("/srv/app"));
    }

    #[test]
    fn test_parse_run_keeps_hyphenated_args() {
        common::init();
        let cli = Cli::try_parse_from([
            "git-revision-info",
            "run",
            "git",
            "log",
            "-1",
            "--format=%s",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            CliCommand::Run {
                command: vec![
                    "git".to_string(),
                    "log".to_string(),
                    "-1".to_string(),
                    "--format=%s".to_string()
                ]
            }
        );
    }

    #[test]
    fn test_parse_run_requires_command() {
        common::init();
        assert!(Cli::try_parse_from(["git-revision-info", "run"]).is_err());
    }

    // ══════════════════════════════════════════════════════════════════════════
    // OPTION LOADING TESTS
    // ══════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_load_options_from_file_with_work_tree_override() {
        common::init();
        let mut file = NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"gitWorkTree: /from/file\ncustomVar: __REV\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "git-revision-info",
            "--config",
            file.path().to_str().unwrap(),
            "--work-tree",
            "/from/flag",
            "define",
        ])
        .unwrap();

        let options = load_options(&cli).unwrap();
        assert_eq!(options.git_work_tree.as_deref(), Some("/from/flag"));
        assert_eq!(options.custom_var.as_deref(), Some("__REV"));
    }

    #[test]
    fn test_load_options_defaults_without_file() {
        common::init();
        let cli = Cli::try_parse_from(["git-revision-info", "extract"]).unwrap();
        assert_eq!(load_options(&cli).unwrap(), PluginOptions::default());
    }

    #[tokio::test]
    async fn test_conflicting_config_aborts() {
        common::init();
        let dir = tempdir().unwrap();
        let config = dir.path().join("revision.yaml");
        fs::write(&config, "versionCommand: describe\nlightweightTags: true\n").unwrap();

        let cli = Cli::try_parse_from([
            "git-revision-info",
            "-c",
            config.to_str().unwrap(),
            "extract",
        ])
        .unwrap();
        let err = execute(&cli).await.unwrap_err();
        assert!(err.to_string().contains("lightweightTags"));
    }

    // ══════════════════════════════════════════════════════════════════════════
    // EXECUTION TESTS
    // ══════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn test_extract_outside_repository_falls_back() {
        common::init();
        let dir = tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "git-revision-info",
            "-w",
            dir.path().to_str().unwrap(),
            "extract",
        ])
        .unwrap();

        let output = execute(&cli).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert!(object.values().all(|v| v == FALLBACK_OUTPUT));
    }

    #[tokio::test]
    async fn test_run_outside_repository_is_error() {
        common::init();
        let dir = tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "git-revision-info",
            "-w",
            dir.path().to_str().unwrap(),
            "run",
            "git",
            "status",
        ])
        .unwrap();
        assert!(execute(&cli).await.is_err());
    }

    #[tokio::test]
    async fn test_html_and_define_against_real_repository() {
        common::init();
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());
        let tree = dir.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["git-revision-info", "-w", tree, "define"]).unwrap();
        let define: serde_json::Value =
            serde_json::from_str(&execute(&cli).await.unwrap()).unwrap();
        let data: serde_json::Value =
            serde_json::from_str(define["__GIT_REVISION_INFO__"].as_str().unwrap()).unwrap();
        assert_eq!(data["GIT_BRANCH"], "main");
        assert_eq!(data["GIT_LASTCOMMITMSG"], "initial commit");
        assert_eq!(data["GIT_COMMITHASH"].as_str().unwrap().len(), 40);

        let cli = Cli::try_parse_from(["git-revision-info", "-w", tree, "html"]).unwrap();
        let html = execute(&cli).await.unwrap();
        assert!(html.starts_with("<script defer>const __GIT__INFO = {"));
        assert!(html.ends_with("};</script>"));
    }

    #[tokio::test]
    async fn test_run_defined_command_against_real_repository() {
        common::init();
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        init_repo(dir.path());

        let cli = Cli::try_parse_from([
            "git-revision-info",
            "-w",
            dir.path().to_str().unwrap(),
            "run",
            "git",
            "log",
            "-1",
            "--format=%s",
        ])
        .unwrap();
        assert_eq!(execute(&cli).await.unwrap(), "initial commit");
    }
}
