use std::thread;
use std::time::Duration;

use faultline_core::{Behaviour, Signal};
use tracing::info;

use crate::config::Scenario;

/// Build the behaviour box for a scenario.
pub fn behaviour_for(scenario: Scenario) -> Box<dyn Behaviour + Send> {
    match scenario {
        Scenario::Steady => Box::new(Steady::default()),
        Scenario::StubbornConfig => Box::new(StubbornConfig),
        Scenario::FlakyInit => Box::new(FlakyInit::default()),
    }
}

/// Nominal component: each operating burst takes a moment, then it idles
/// briefly and asks to run again.
#[derive(Default)]
struct Steady {
    bursts: u32,
}

impl Behaviour for Steady {
    fn init(&mut self) -> Signal {
        info!("initialising");
        Signal::Initialised
    }

    fn configuring(&mut self) -> Signal {
        info!("configuring");
        Signal::DoneConfiguring
    }

    fn ready(&mut self) -> Signal {
        info!("ready, requesting operation");
        thread::sleep(Duration::from_millis(250));
        Signal::Run
    }

    fn running(&mut self) -> Signal {
        self.bursts += 1;
        info!("operating (burst {})", self.bursts);
        thread::sleep(Duration::from_millis(1000));
        Signal::Done
    }

    fn recovering(&mut self) -> Signal {
        info!("recovering");
        thread::sleep(Duration::from_millis(500));
        Signal::DoneRecovering
    }
}

/// Component whose configuration never succeeds: after the attempt bound it
/// ends up in Stopped without any external stop.
struct StubbornConfig;

impl Behaviour for StubbornConfig {
    fn init(&mut self) -> Signal {
        info!("initialising");
        Signal::Initialised
    }

    fn configuring(&mut self) -> Signal {
        info!("configuration attempt failing");
        thread::sleep(Duration::from_millis(200));
        Signal::RetryConfig
    }

    fn ready(&mut self) -> Signal {
        Signal::Wait
    }

    fn running(&mut self) -> Signal {
        Signal::Done
    }

    fn recovering(&mut self) -> Signal {
        Signal::DoneRecovering
    }
}

/// Component whose first initialisation fails; recovery hands control back
/// to init, which then succeeds.
#[derive(Default)]
struct FlakyInit {
    init_calls: u32,
}

impl Behaviour for FlakyInit {
    fn init(&mut self) -> Signal {
        self.init_calls += 1;
        if self.init_calls == 1 {
            info!("initialisation failing (call {})", self.init_calls);
            Signal::InitFailed
        } else {
            info!("initialisation succeeding (call {})", self.init_calls);
            Signal::Initialised
        }
    }

    fn configuring(&mut self) -> Signal {
        info!("configuring");
        Signal::DoneConfiguring
    }

    fn ready(&mut self) -> Signal {
        info!("ready");
        thread::sleep(Duration::from_millis(250));
        Signal::Run
    }

    fn running(&mut self) -> Signal {
        info!("operating");
        thread::sleep(Duration::from_millis(1000));
        Signal::Done
    }

    fn recovering(&mut self) -> Signal {
        info!("recovering");
        thread::sleep(Duration::from_millis(500));
        Signal::DoneRecovering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flaky_init_fails_only_once() {
        let mut flaky = FlakyInit::default();
        assert_eq!(flaky.init(), Signal::InitFailed);
        assert_eq!(flaky.init(), Signal::Initialised);
        assert_eq!(flaky.init(), Signal::Initialised);
    }

    #[test]
    fn stubborn_config_always_retries() {
        let mut stubborn = StubbornConfig;
        assert_eq!(stubborn.configuring(), Signal::RetryConfig);
        assert_eq!(stubborn.configuring(), Signal::RetryConfig);
    }
}
