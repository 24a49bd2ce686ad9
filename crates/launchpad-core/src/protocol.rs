// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Launch-argument protocol between the shell and the native sample runtime.
//
// Every user or external trigger maps to exactly one immutable
// `LaunchRequest`, rendered as a command line the runtime parses the same
// way it parses a desktop invocation:
//
//   --sample <id> | --test <name> | --batch <category>   [--benchmark <n>]
//
// Precedence when several triggers apply at once:
// sample extra > test extra > item selection > menu batch run.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LaunchpadError, Result};
use crate::types::{IntentExtras, Orientation};

pub const SAMPLE_FLAG: &str = "--sample";
pub const TEST_FLAG: &str = "--test";
pub const BATCH_FLAG: &str = "--batch";
pub const BENCHMARK_FLAG: &str = "--benchmark";

/// Fixed iteration count requested in benchmark mode.
pub const BENCHMARK_ITERATIONS: u32 = 2000;

/// What to run. Exactly one per launch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaunchIntent {
    /// Run a single sample by id.
    Sample(String),
    /// Run a single test by name (landscape only).
    Test(String),
    /// Run every sample in a category; an empty category means all samples.
    Batch(String),
}

impl LaunchIntent {
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Sample(_) => SAMPLE_FLAG,
            Self::Test(_) => TEST_FLAG,
            Self::Batch(_) => BATCH_FLAG,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Sample(v) | Self::Test(v) | Self::Batch(v) => v,
        }
    }

    /// Orientation the platform must be put in before this intent runs.
    pub fn orientation(&self) -> Orientation {
        match self {
            Self::Test(_) => Orientation::Landscape,
            Self::Sample(_) | Self::Batch(_) => Orientation::Unspecified,
        }
    }

    fn from_flag(flag: &str, value: String) -> Option<Self> {
        match flag {
            SAMPLE_FLAG => Some(Self::Sample(value)),
            TEST_FLAG => Some(Self::Test(value)),
            BATCH_FLAG => Some(Self::Batch(value)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Sample(id) if id.is_empty() => {
                Err(LaunchpadError::InvalidArgument("sample id is empty".into()))
            }
            Self::Test(name) if name.is_empty() => {
                Err(LaunchpadError::InvalidArgument("test name is empty".into()))
            }
            _ => Ok(()),
        }
    }
}

/// Launch mode flags applied to every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchMode {
    /// Iteration count when benchmark mode is on.
    pub benchmark: Option<u32>,
}

impl LaunchMode {
    pub fn standard() -> Self {
        Self { benchmark: None }
    }

    pub fn benchmark(iterations: u32) -> Self {
        Self {
            benchmark: Some(iterations),
        }
    }

    pub fn is_benchmark(&self) -> bool {
        self.benchmark.is_some()
    }
}

/// An immutable launch command, built once per event and consumed by a
/// single dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRequest {
    intent: LaunchIntent,
    benchmark: Option<u32>,
}

impl LaunchRequest {
    /// Build a request, rejecting empty sample ids and test names and a
    /// zero benchmark count.
    pub fn new(intent: LaunchIntent, mode: LaunchMode) -> Result<Self> {
        intent.validate()?;
        if mode.benchmark == Some(0) {
            return Err(LaunchpadError::InvalidArgument(
                "benchmark count must be positive".into(),
            ));
        }
        Ok(Self {
            intent,
            benchmark: mode.benchmark,
        })
    }

    pub fn intent(&self) -> &LaunchIntent {
        &self.intent
    }

    pub fn benchmark(&self) -> Option<u32> {
        self.benchmark
    }

    /// Render the command line in the order the runtime expects.
    pub fn arguments(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        args.push(self.intent.flag().to_owned());
        args.push(self.intent.value().to_owned());
        if let Some(iterations) = self.benchmark {
            args.push(BENCHMARK_FLAG.to_owned());
            args.push(iterations.to_string());
        }
        args
    }
}

impl std::fmt::Display for LaunchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: Vec<String> = self
            .arguments()
            .into_iter()
            .map(|a| if a.is_empty() { "\"\"".to_owned() } else { a })
            .collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// A request plus the platform preparation it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub request: LaunchRequest,
    pub orientation: Orientation,
}

impl LaunchPlan {
    fn new(intent: LaunchIntent, mode: LaunchMode) -> Result<Self> {
        let orientation = intent.orientation();
        Ok(Self {
            request: LaunchRequest::new(intent, mode)?,
            orientation,
        })
    }
}

/// The finite set of events that can launch something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A sample was tapped in the picker.
    ItemSelected(String),
    /// The "run samples" menu action, over the currently shown tab (if any).
    RunSamples { current_category: Option<String> },
    /// An incoming intent carrying launch extras.
    External(IntentExtras),
}

impl Trigger {
    /// Lower ranks win when several triggers compete.
    pub fn rank(&self) -> u8 {
        match self {
            Self::External(extras) if extras.sample.is_some() => 0,
            Self::External(_) => 1,
            Self::ItemSelected(_) => 2,
            Self::RunSamples { .. } => 3,
        }
    }
}

/// Map a trigger and the current mode to a launch plan.
///
/// Returns `Ok(None)` for an external trigger without recognised extras.
/// When an intent carries both `sample` and `test`, only the sample path is
/// taken.
pub fn resolve(trigger: &Trigger, mode: LaunchMode) -> Result<Option<LaunchPlan>> {
    let intent = match trigger {
        Trigger::ItemSelected(id) => LaunchIntent::Sample(id.clone()),
        Trigger::RunSamples { current_category } => {
            LaunchIntent::Batch(current_category.clone().unwrap_or_default())
        }
        Trigger::External(extras) => match (&extras.sample, &extras.test) {
            (Some(sample), _) => LaunchIntent::Sample(sample.clone()),
            (None, Some(test)) => LaunchIntent::Test(test.clone()),
            (None, None) => {
                debug!("external trigger without launch extras");
                return Ok(None);
            }
        },
    };
    LaunchPlan::new(intent, mode).map(Some)
}

/// Pick the trigger that wins under the precedence rules.
///
/// Ties keep the earliest trigger, so the choice never depends on iteration
/// order among equally ranked triggers beyond their arrival.
pub fn select_trigger(triggers: impl IntoIterator<Item = Trigger>) -> Option<Trigger> {
    triggers.into_iter().fold(None, |best, next| match best {
        Some(current) if Trigger::rank(&current) <= next.rank() => Some(current),
        _ => Some(next),
    })
}

/// Parse a runtime command line back into a request.
///
/// Accepts exactly one intent flag with its value, optionally followed or
/// preceded by `--benchmark <n>`.
pub fn parse_arguments<S: AsRef<str>>(tokens: &[S]) -> Result<LaunchRequest> {
    if tokens.is_empty() {
        return Err(LaunchpadError::InvalidArgument("empty command line".into()));
    }

    let mut intent: Option<LaunchIntent> = None;
    let mut benchmark: Option<u32> = None;
    let mut iter = tokens.iter().map(AsRef::as_ref);

    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| LaunchpadError::InvalidArgument(format!("{flag} expects a value")))?;

        if flag == BENCHMARK_FLAG {
            if benchmark.is_some() {
                return Err(LaunchpadError::InvalidArgument(
                    "--benchmark given more than once".into(),
                ));
            }
            let iterations: u32 = value.parse().map_err(|_| {
                LaunchpadError::InvalidArgument(format!("benchmark count `{value}` is not a number"))
            })?;
            benchmark = Some(iterations);
            continue;
        }

        let parsed = LaunchIntent::from_flag(flag, value.to_owned())
            .ok_or_else(|| LaunchpadError::InvalidArgument(format!("unknown flag `{flag}`")))?;
        if let Some(existing) = &intent {
            return Err(LaunchpadError::InvalidArgument(format!(
                "{} conflicts with {}",
                parsed.flag(),
                existing.flag()
            )));
        }
        intent = Some(parsed);
    }

    let intent = intent.ok_or_else(|| {
        LaunchpadError::InvalidArgument("one of --sample, --test or --batch is required".into())
    })?;
    LaunchRequest::new(intent, LaunchMode { benchmark })
}
