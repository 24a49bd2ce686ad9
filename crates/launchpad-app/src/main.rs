// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Launchpad — sample picker shell for the native sample runtime.
//
// Entry point. Initialises logging and config, then drives the shell once
// the way the host activity would: create with the given intent extras,
// optionally followed by a batch run.
//
//   launchpad [sample=<id>] [test=<name>]
//   launchpad -- --sample <id> | --test <name> | --batch <category> [--benchmark <n>]

use std::process::ExitCode;

use launchpad_app::services::{config_store, data_dir};
use launchpad_app::shell::{RuntimeState, SampleShell};
use launchpad_bridge::platform_bridge;
use launchpad_bridge::traits::PlatformBridge;
use launchpad_core::error::{LaunchpadError, Result};
use launchpad_core::protocol::{self, LaunchIntent};
use launchpad_core::types::IntentExtras;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Launchpad starting");

    let invocation = match Invocation::parse(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            tracing::error!(error = %e, "invalid command line");
            return ExitCode::FAILURE;
        }
    };

    let dir = data_dir::data_dir();
    let mut config = config_store::load_config(&dir);
    if let Err(e) = config_store::persist_config(&dir, &config) {
        tracing::warn!(error = %e, "could not save config");
    }
    if let Some(iterations) = invocation.benchmark_iterations {
        config.benchmark_iterations = iterations;
        config.benchmark_on_start = true;
    }

    let mut shell = SampleShell::new(platform_bridge(), config);
    match run(&mut shell, invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "launch failed");
            ExitCode::FAILURE
        }
    }
}

fn run(shell: &mut SampleShell<dyn PlatformBridge>, invocation: Invocation) -> Result<()> {
    if let Some(request) = shell.create(invocation.extras)? {
        tracing::info!(command = %request, "launched from intent extras");
    }
    if let Some(category) = invocation.batch {
        if let Some(request) = shell.run_batch(&category)? {
            tracing::info!(command = %request, "batch launched");
        }
    }

    match shell.runtime() {
        RuntimeState::Loaded {
            storage: Some(paths),
        } => tracing::info!(
            durable = %paths.durable.display(),
            temp = %paths.temp.display(),
            "runtime storage configured"
        ),
        other => tracing::info!(runtime = ?other, permission = ?shell.permission(), "runtime state"),
    }

    let view = shell.view();
    for tab in view.tabs() {
        tracing::info!(category = %tab.category, samples = tab.samples.len(), "tab");
    }
    tracing::info!(
        picker = view.visibility().picker,
        permission_prompt = view.visibility().permission_prompt,
        benchmark = shell.benchmark_enabled(),
        "shell ready"
    );
    Ok(())
}

/// What the command line asked for.
#[derive(Debug, Default, PartialEq, Eq)]
struct Invocation {
    extras: IntentExtras,
    batch: Option<String>,
    benchmark_iterations: Option<u32>,
}

impl Invocation {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let args: Vec<String> = args.into_iter().collect();

        if args.first().map(String::as_str) == Some("--") {
            let request = protocol::parse_arguments(&args[1..])?;
            let mut invocation = Self {
                benchmark_iterations: request.benchmark(),
                ..Self::default()
            };
            match request.intent() {
                LaunchIntent::Sample(id) => invocation.extras.sample = Some(id.clone()),
                LaunchIntent::Test(name) => invocation.extras.test = Some(name.clone()),
                LaunchIntent::Batch(category) => invocation.batch = Some(category.clone()),
            }
            return Ok(invocation);
        }

        let mut pairs = Vec::with_capacity(args.len());
        for arg in &args {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                LaunchpadError::InvalidArgument(format!("expected key=value, got `{arg}`"))
            })?;
            pairs.push((key, value));
        }
        Ok(Self {
            extras: IntentExtras::from_pairs(pairs),
            ..Self::default()
        })
    }
}
