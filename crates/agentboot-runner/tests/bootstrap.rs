mod common;

use std::sync::Arc;

use agentboot_exec::ExecError;
use agentboot_pkg::{HelperStatus, PackageError, PackageManagerType};
use agentboot_runner::{BootstrapError, RunnerConfig, ShellRunner};

use common::{FakeHost, quiet_config};

#[tokio::test]
async fn failed_probe_aborts_before_helper_checks() {
    let host = Arc::new(FakeHost::new().on("echo", 1, "", "Connection refused"));
    let config = RunnerConfig::new("ssh -T agent@box");

    let err = ShellRunner::connect_with(config, host.clone())
        .await
        .unwrap_err();

    match err {
        BootstrapError::Connection(ExecError::CommandFailed {
            command,
            stderr,
            code,
        }) => {
            assert_eq!(command, "echo");
            assert_eq!(stderr, "Connection refused");
            assert_eq!(code, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(host.remote_commands(), ["echo"]);
}

#[tokio::test]
async fn validation_then_default_helpers() {
    let host = Arc::new(
        FakeHost::new()
            .on("which sudo", 0, "/usr/bin/sudo\n", "")
            .on("which wget", 0, "/usr/bin/wget\n", "")
            .on("which rsync", 0, "/usr/bin/rsync\n", "")
            .on("which python", 0, "/usr/bin/python\n", ""),
    );

    ShellRunner::connect_with(RunnerConfig::new("ssh -T agent@box"), host.clone())
        .await
        .unwrap();

    assert_eq!(
        host.remote_commands(),
        [
            "echo",
            "which sudo",
            "which wget",
            "which rsync",
            "which python"
        ]
    );
}

#[tokio::test]
async fn validation_can_be_skipped() {
    let host = Arc::new(FakeHost::new().on("echo", 255, "", "unreachable"));

    ShellRunner::connect_with(quiet_config(), host.clone())
        .await
        .unwrap();

    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn missing_helper_is_installed_with_first_manager() {
    let host = Arc::new(
        FakeHost::new()
            .on("which rsync", 1, "", "")
            .on("which apt-get", 0, "/usr/bin/apt-get\n", "")
            .on("which yum", 0, "/usr/bin/yum\n", ""),
    );
    let config = quiet_config().with_required_programs(["rsync"]);

    ShellRunner::connect_with(config, host.clone())
        .await
        .unwrap();

    assert_eq!(
        host.remote_commands(),
        [
            "which rsync",
            "which apt-get",
            "apt-get update",
            "apt-get install -y rsync"
        ]
    );
}

#[tokio::test]
async fn missing_manager_is_accepted() {
    let host = Arc::new(FakeHost::new());
    let config = quiet_config().with_required_programs(["wget"]);

    let runner = ShellRunner::connect_with(config, host.clone())
        .await
        .unwrap();

    assert_eq!(
        host.remote_commands(),
        ["which wget", "which apt-get", "which yum"]
    );
    assert_eq!(
        runner.check_and_install_program("wget").await.unwrap(),
        HelperStatus::Unresolved
    );
}

#[tokio::test]
async fn failed_install_aborts_bootstrap() {
    let host = Arc::new(
        FakeHost::new()
            .on("which yum", 0, "/usr/bin/yum\n", "")
            .on("yum install", 1, "", "No package python available."),
    );
    let config = quiet_config()
        .with_required_programs(["python"])
        .with_package_managers(vec![PackageManagerType::Yum]);

    let err = ShellRunner::connect_with(config, host.clone())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BootstrapError::Helper {
            ref program,
            source: PackageError::InstallFailed {
                manager: PackageManagerType::Yum,
                ..
            },
        } if program == "python"
    ));
}

#[tokio::test]
async fn non_shell_connection_rejected() {
    let host = Arc::new(FakeHost::new());
    let mut config = quiet_config();
    config.is_shell = false;

    let err = ShellRunner::connect_with(config, host.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, BootstrapError::NotShell));
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn unbalanced_template_rejected() {
    let host = Arc::new(FakeHost::new());
    let config = RunnerConfig::new("ssh -o 'ProxyCommand=nc %h %p")
        .with_validation(false)
        .with_required_programs(Vec::<String>::new());

    let err = ShellRunner::connect_with(config, host)
        .await
        .unwrap_err();

    assert!(matches!(err, BootstrapError::Template(_)));
}

#[tokio::test]
async fn local_shell_end_to_end() {
    let config = RunnerConfig::new("").with_required_programs(Vec::<String>::new());
    let runner = ShellRunner::connect(config).await.unwrap();

    assert_eq!(runner.ping().await.unwrap().stdout, "\n");

    let dir = runner.mkdtemp(true).await.unwrap();
    runner.verify_dir_exists(&format!("{dir}/a/b")).await.unwrap();
    runner
        .run(&format!("test -d {dir}/a/b"))
        .await
        .unwrap();
    runner.delete(&dir).await.unwrap();

    let err = runner.run(&format!("test -e {dir}")).await.unwrap_err();
    assert_eq!(err.code(), Some(1));

    runner.close();
}
