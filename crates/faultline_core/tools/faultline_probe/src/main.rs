use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use faultline_core::fsm::{transition_graph, Target};
use faultline_core::Supervisor;

use faultline_probe::config::{Config, Scenario};
use faultline_probe::scenarios;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_args();

    if config.print_graph {
        print_graph()?;
        return Ok(());
    }

    info!(
        "probe started name={} scenario={} max_recovery_attempts={} cadence_ms={} ticks={}",
        config.name,
        config.scenario.label(),
        config.max_recovery_attempts,
        config.cadence_ms,
        config.ticks,
    );

    let behaviour = scenarios::behaviour_for(config.scenario);
    let mut supervisor = Supervisor::new(
        config.name.clone(),
        Vec::new(),
        config.max_recovery_attempts,
        behaviour,
    )
    .context("construct supervisor")?
    .with_cadence(Duration::from_millis(config.cadence_ms));

    let status = supervisor.status();
    supervisor.run().context("start supervisor")?;

    match config.scenario {
        // These terminate on their own; just wait for the loop to finish.
        Scenario::StubbornConfig => {
            while status.is_running() {
                thread::sleep(Duration::from_millis(100));
            }
        }
        // These run until the tick budget is spent.
        Scenario::Steady | Scenario::FlakyInit => {
            for _ in 0..config.ticks {
                if !status.is_running() {
                    break;
                }
                thread::sleep(Duration::from_millis(config.cadence_ms));
            }
        }
    }

    supervisor.stop();

    info!(
        "probe finished state={} configured={} fault={:?}",
        status.current_state().label(),
        status.is_configured(),
        status.last_fault(),
    );

    Ok(())
}

fn print_graph() -> Result<()> {
    let graph = transition_graph().context("build transition graph")?;
    for edge in graph.edges {
        let target = match edge.target {
            Target::Fixed(state) => state.label().to_string(),
            Target::BackToPrevious => "(previous)".to_string(),
        };
        println!(
            "{:<13} --{}--> {}",
            edge.start.label(),
            edge.signal.label(),
            target
        );
    }
    Ok(())
}
