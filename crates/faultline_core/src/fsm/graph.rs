use crate::error::Result;

use super::{defined_signals, resolve, Signal, State, Target, ALL_STATES};

/// Lifecycle transition graph derived from the core transition table.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransitionGraph {
    pub states: Vec<State>,
    pub edges: Vec<TransitionEdge>,
}

/// Directed lifecycle transition edge.
///
/// Sentinel entries keep their `Target::BackToPrevious` form here; the graph
/// describes the table, not a particular instance's history.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TransitionEdge {
    pub start: State,
    pub signal: Signal,
    pub target: Target,
}

/// Build the canonical transition graph by sweeping the table.
pub fn transition_graph() -> Result<TransitionGraph> {
    let mut edges = Vec::new();

    for state in ALL_STATES {
        for signal in defined_signals(state) {
            let target = resolve(state, *signal)?;
            edges.push(TransitionEdge {
                start: state,
                signal: *signal,
                target,
            });
        }
    }

    Ok(TransitionGraph {
        states: ALL_STATES.to_vec(),
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_contains_all_states_and_expected_edges() {
        let graph = transition_graph().unwrap();

        assert_eq!(graph.states.len(), ALL_STATES.len());

        let expected = [
            (State::Initialising, Signal::Initialised, Target::Fixed(State::Configuring)),
            (State::Initialising, Signal::InitFailed, Target::Fixed(State::Recovering)),
            (State::Configuring, Signal::DoneConfiguring, Target::Fixed(State::Ready)),
            (State::Configuring, Signal::RetryConfig, Target::Fixed(State::Configuring)),
            (State::Configuring, Signal::DoneReconfiguring, Target::BackToPrevious),
            (State::Configuring, Signal::FailedConfig, Target::Fixed(State::Stopped)),
            (State::Ready, Signal::Run, Target::Fixed(State::Running)),
            (State::Ready, Signal::Wait, Target::Fixed(State::Ready)),
            (State::Ready, Signal::Reconfigure, Target::Fixed(State::Configuring)),
            (State::Running, Signal::Done, Target::Fixed(State::Ready)),
            (State::Running, Signal::Continue, Target::Fixed(State::Running)),
            (State::Running, Signal::Recover, Target::Fixed(State::Recovering)),
            (State::Running, Signal::Reconfigure, Target::Fixed(State::Configuring)),
            (State::Recovering, Signal::DoneRecovering, Target::BackToPrevious),
            (State::Recovering, Signal::FailedRecovery, Target::Fixed(State::Stopped)),
        ];

        for (start, signal, target) in expected {
            assert!(
                graph.edges.iter().any(|edge| {
                    edge.start == start && edge.signal == signal && edge.target == target
                }),
                "missing edge {start:?} -> {signal:?} -> {target:?}"
            );
        }

        assert_eq!(graph.edges.len(), expected.len());
    }
}
