// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Build, lint and test automation for the `PhoneDesk` workspace.
//!
//! Run with `cargo xtask <command>`. `cargo xtask ci` is what CI runs.
//! `cargo xtask test-mariadb` needs Docker; every other command needs only
//! a Rust toolchain (plus nightly for the formatting and doc steps).

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::thread::sleep;
use std::time::Duration;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{bail, Context},
    Result,
};
use duct::{cmd, Expression};
use tracing::{debug, info, warn};
use tracing_log::AsTrace;

/// Flags shared by every cargo step that compiles the workspace.
const ALL: [&str; 2] = ["--all-targets", "--all-features"];

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Cli {
    #[command(subcommand)]
    task: Task,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Copy, Debug, Subcommand)]
enum Task {
    /// Lint, build and test, as CI does
    Ci,
    /// Build every target
    #[command(visible_alias = "b")]
    Build,
    /// Type-check every target
    #[command(visible_alias = "c")]
    Check,
    /// Clippy, rustdoc and formatting checks
    #[command(visible_alias = "l")]
    Lint,
    /// Apply clippy suggestions
    FixClippy,
    /// Reformat the workspace
    #[command(visible_alias = "fmt")]
    FixFmt,
    /// Run the test suite against `SQLite`
    #[command(visible_alias = "t")]
    Test,
    /// Run the ignored backend tests against a `MariaDB` container
    #[command(visible_alias = "tm")]
    TestMariadb,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.log_level_filter().as_trace())
        .without_time()
        .init();

    if let Err(err) = cli.task.run() {
        tracing::error!("{err:?}");
        std::process::exit(1);
    }
    Ok(())
}

impl Task {
    fn run(self) -> Result<()> {
        match self {
            Self::Ci => {
                Self::Lint.run()?;
                Self::Build.run()?;
                Self::Test.run()
            }
            Self::Build => cargo(&["build"], &ALL),
            Self::Check => cargo(&["check"], &ALL),
            Self::Lint => {
                cargo(&["clippy"], &[&ALL[..], &["--", "-D", "warnings"][..]].concat())?;
                nightly(cargo_cmd(&["doc", "--no-deps", "--all-features", "--workspace"]))
                    .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
                    .traced()?;
                nightly(cargo_cmd(&["fmt", "--all", "--check"])).traced()
            }
            Self::FixClippy => cargo(
                &["clippy", "--fix", "--allow-dirty", "--allow-staged"],
                &ALL,
            ),
            Self::FixFmt => nightly(cargo_cmd(&["fmt", "--all"])).traced(),
            Self::Test => {
                cargo(&["test"], &ALL)?;
                cargo(&["test", "--doc"], &["--all-features"])
            }
            Self::TestMariadb => test_mariadb(),
        }
    }
}

fn cargo_cmd(args: &[&str]) -> Expression {
    cmd("cargo", args)
}

/// Runs `cargo <args> <flags>` on the active toolchain.
fn cargo(args: &[&str], flags: &[&str]) -> Result<()> {
    cargo_cmd(&[args, flags].concat()).traced()
}

/// Switches a cargo invocation to the nightly toolchain.
///
/// `CARGO` points at the stable binary inside an xtask run and would
/// override the toolchain choice.
fn nightly(expr: Expression) -> Expression {
    expr.env_remove("CARGO").env("RUSTUP_TOOLCHAIN", "nightly")
}

trait Traced {
    fn traced(&self) -> Result<()>;
}

impl Traced for Expression {
    fn traced(&self) -> Result<()> {
        info!("$ {self:?}");
        self.run()
            .map(drop)
            .wrap_err_with(|| format!("command failed: {self:?}"))
    }
}

/// A throwaway `MariaDB` container, removed on drop.
struct MariaDb {
    name: &'static str,
}

impl MariaDb {
    const IMAGE: &'static str = "mariadb:11";
    const DATABASE: &'static str = "phonedesk_test";
    const USER: &'static str = "phonedesk";
    const PASSWORD: &'static str = "test_password";
    const HOST_PORT: u16 = 3307;
    const READY_ATTEMPTS: u32 = 30;

    fn start(name: &'static str) -> Result<Self> {
        cmd!("docker", "--version")
            .traced()
            .wrap_err("docker is required for test-mariadb")?;

        // A container left over from an aborted run holds the name and port.
        let container = Self { name };
        let _ = container.remove();

        cmd!(
            "docker",
            "run",
            "--detach",
            "--name",
            name,
            "--env",
            format!("MARIADB_DATABASE={}", Self::DATABASE),
            "--env",
            format!("MARIADB_USER={}", Self::USER),
            "--env",
            format!("MARIADB_PASSWORD={}", Self::PASSWORD),
            "--env",
            "MARIADB_RANDOM_ROOT_PASSWORD=1",
            "--publish",
            format!("{}:3306", Self::HOST_PORT),
            Self::IMAGE
        )
        .traced()?;

        Ok(container)
    }

    fn wait_ready(&self) -> Result<()> {
        for attempt in 1..=Self::READY_ATTEMPTS {
            sleep(Duration::from_secs(1));
            debug!(attempt, "pinging {}", self.name);
            let ping = cmd!(
                "docker",
                "exec",
                self.name,
                "mariadb",
                "--user",
                Self::USER,
                format!("--password={}", Self::PASSWORD),
                "--execute",
                "SELECT 1"
            )
            .stdout_null()
            .stderr_null()
            .run();
            if ping.is_ok() {
                info!("{} accepts connections", self.name);
                return Ok(());
            }
        }
        bail!(
            "{} was not ready after {} attempts",
            self.name,
            Self::READY_ATTEMPTS
        )
    }

    fn url() -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            Self::USER,
            Self::PASSWORD,
            Self::HOST_PORT,
            Self::DATABASE
        )
    }

    fn remove(&self) -> bool {
        cmd!("docker", "rm", "--force", self.name)
            .stdout_null()
            .stderr_null()
            .run()
            .is_ok()
    }
}

impl Drop for MariaDb {
    fn drop(&mut self) {
        info!("removing {}", self.name);
        if !self.remove() {
            warn!("could not remove container {}", self.name);
        }
    }
}

/// Runs `backend_validation_tests` in `phonedesk-persistence` with the
/// `mysql` feature against a fresh container on port 3307.
fn test_mariadb() -> Result<()> {
    let db = MariaDb::start("phonedesk-test-mariadb")?;
    db.wait_ready()?;

    cargo_cmd(&[
        "test",
        "--package",
        "phonedesk-persistence",
        "--features",
        "mysql",
        "backend_validation_tests",
        "--",
        "--ignored",
        "--test-threads=1",
    ])
    .env("DATABASE_URL", MariaDb::url())
    .env("PHONEDESK_TEST_BACKEND", "mariadb")
    .traced()
    .wrap_err("MariaDB backend tests failed")
}
