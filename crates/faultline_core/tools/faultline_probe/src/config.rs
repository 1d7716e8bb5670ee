use std::env;

pub const DEFAULT_NAME: &str = "probe_component";
pub const DEFAULT_MAX_RECOVERY_ATTEMPTS: u32 = 1;
pub const DEFAULT_CADENCE_MS: u64 = 200;
pub const DEFAULT_TICKS: u32 = 20;

/// Which scripted component to run.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Scenario {
    /// Initialises, configures and cycles Ready/Running until stopped.
    Steady,
    /// Configuration never succeeds; terminates in Stopped on its own.
    StubbornConfig,
    /// Initialisation fails once; recovery returns control to init.
    FlakyInit,
}

impl Scenario {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "steady" => Some(Scenario::Steady),
            "stubborn-config" | "stubborn_config" => Some(Scenario::StubbornConfig),
            "flaky-init" | "flaky_init" => Some(Scenario::FlakyInit),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scenario::Steady => "steady",
            Scenario::StubbornConfig => "stubborn-config",
            Scenario::FlakyInit => "flaky-init",
        }
    }
}

pub struct Config {
    pub name: String,
    pub scenario: Scenario,
    pub max_recovery_attempts: u32,
    pub cadence_ms: u64,
    pub ticks: u32,
    pub print_graph: bool,
}

impl Config {
    pub fn from_args() -> Self {
        Self::from_args_iter(env::args())
    }

    pub fn from_args_iter<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name = env::var("FAULTLINE_NAME").unwrap_or_else(|_| DEFAULT_NAME.to_string());
        let mut scenario = env::var("FAULTLINE_SCENARIO")
            .ok()
            .and_then(|v| Scenario::parse(&v))
            .unwrap_or(Scenario::Steady);
        let mut max_recovery_attempts = env::var("FAULTLINE_MAX_RECOVERY_ATTEMPTS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_RECOVERY_ATTEMPTS);
        let mut cadence_ms = env::var("FAULTLINE_CADENCE_MS")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_CADENCE_MS);
        let mut ticks = DEFAULT_TICKS;
        let mut print_graph = false;

        let mut args = iter.into_iter();
        let _ = args.next();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                "--name" => {
                    if let Some(value) = args.next() {
                        name = value.as_ref().to_string();
                    }
                }
                "--scenario" => {
                    if let Some(value) = args.next() {
                        if let Some(parsed) = Scenario::parse(value.as_ref()) {
                            scenario = parsed;
                        }
                    }
                }
                "--max-recovery-attempts" => {
                    if let Some(value) = args.next() {
                        if let Ok(parsed) = value.as_ref().trim().parse() {
                            max_recovery_attempts = parsed;
                        }
                    }
                }
                "--cadence-ms" => {
                    if let Some(value) = args.next() {
                        if let Ok(parsed) = value.as_ref().trim().parse() {
                            cadence_ms = parsed;
                        }
                    }
                }
                "--ticks" => {
                    if let Some(value) = args.next() {
                        if let Ok(parsed) = value.as_ref().trim().parse() {
                            ticks = parsed;
                        }
                    }
                }
                "--print-graph" => {
                    print_graph = true;
                }
                _ if arg.starts_with("--name=") => {
                    name = arg["--name=".len()..].to_string();
                }
                _ if arg.starts_with("--scenario=") => {
                    if let Some(parsed) = Scenario::parse(&arg["--scenario=".len()..]) {
                        scenario = parsed;
                    }
                }
                _ if arg.starts_with("--max-recovery-attempts=") => {
                    if let Ok(parsed) = arg["--max-recovery-attempts=".len()..].trim().parse() {
                        max_recovery_attempts = parsed;
                    }
                }
                _ if arg.starts_with("--cadence-ms=") => {
                    if let Ok(parsed) = arg["--cadence-ms=".len()..].trim().parse() {
                        cadence_ms = parsed;
                    }
                }
                _ if arg.starts_with("--ticks=") => {
                    if let Ok(parsed) = arg["--ticks=".len()..].trim().parse() {
                        ticks = parsed;
                    }
                }
                _ => {}
            }
        }

        Self {
            name,
            scenario,
            max_recovery_attempts,
            cadence_ms,
            ticks,
            print_graph,
        }
    }
}

fn print_usage() {
    println!(
        "faultline_probe [--name <name>] [--scenario steady|stubborn-config|flaky-init] \
         [--max-recovery-attempts <n>] [--cadence-ms <ms>] [--ticks <n>] [--print-graph]"
    );
}
