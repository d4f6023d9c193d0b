//! Drives a feed session through a scenario.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::{Context, Result};
use reels_core::{
    BroadcastEvent, CoordinatorConfig, FeedEvent, FeedItemId, FeedSession, GlobalIntent,
    ItemPlaybackState, PlaybackCoordinator,
};
use serde::Serialize;
use tokio::sync::broadcast::error::TryRecvError;

use crate::scenario::{Scenario, ScenarioStep};
use crate::sim::{SimulatedHandle, Trace, TraceEntry};

/// Everything observed during a run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub trace: Vec<TraceEntry>,
    pub events: Vec<BroadcastEvent>,
    pub final_intent: GlobalIntent,
    pub item_states: BTreeMap<FeedItemId, ItemPlaybackState>,
}

/// Runs `scenario` against a fresh coordinator built from `config`.
pub fn run(scenario: &Scenario, config: &CoordinatorConfig) -> Result<ReplayReport> {
    let (coordinator, bridge) =
        PlaybackCoordinator::with_broadcast(config).context("Invalid coordinator configuration")?;
    let mut rx = bridge.subscribe();
    let session = FeedSession::new(Arc::new(coordinator));
    let trace = Trace::default();

    // The replay plays the UI layer's part and owns every player.
    let mut players: HashMap<FeedItemId, Arc<SimulatedHandle>> = HashMap::new();

    for (step, action) in scenario.steps.iter().enumerate() {
        trace.begin_step(step);
        log::debug!("step {}: {:?}", step, action);

        let event = match action {
            ScenarioStep::Mounted {
                id,
                status,
                fail_play,
            } => {
                let player = SimulatedHandle::new(id.clone(), *status, *fail_play, trace.clone());
                session.dispatch(FeedEvent::ItemMounted {
                    id: id.clone(),
                    handle: player.clone(),
                });
                if is_registered(&session, id, &player) {
                    players.insert(id.clone(), player);
                } else {
                    log::warn!("step {}: mount of {} was rejected", step, id);
                }
                continue;
            }
            ScenarioStep::Unmounted { id } => {
                players.remove(id);
                FeedEvent::ItemUnmounted { id: id.clone() }
            }
            ScenarioStep::Status { id, status } => {
                match players.get(id) {
                    Some(player) => player.set_status(*status),
                    None => log::warn!("step {}: no player for {}", step, id),
                }
                FeedEvent::HandleStatusChanged {
                    id: id.clone(),
                    status: *status,
                }
            }
            ScenarioStep::Visible { id } => FeedEvent::VisibilityChanged { id: id.clone() },
            ScenarioStep::Focus { focused } => FeedEvent::ScreenFocusChanged { focused: *focused },
            ScenarioStep::ToggleMute => FeedEvent::MuteToggleRequested,
            ScenarioStep::SetMute { muted } => FeedEvent::MuteSet { muted: *muted },
            ScenarioStep::DropHandle { id } => {
                // Not a feed event: the UI destroys its player behind the session's back.
                if players.remove(id).is_none() {
                    log::warn!("step {}: no player to drop for {}", step, id);
                }
                continue;
            }
        };
        session.dispatch(event);
    }

    let mut events = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => events.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                log::warn!("{} events dropped, raise event_channel_capacity", skipped);
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    let item_states = session
        .coordinator()
        .registry()
        .ids()
        .into_iter()
        .map(|id| {
            let state = session.item_state(&id);
            (id, state)
        })
        .collect();

    Ok(ReplayReport {
        name: scenario.name.clone(),
        trace: trace.entries(),
        events,
        final_intent: session.coordinator().intent(),
        item_states,
    })
}

/// Whether `player` is the handle the coordinator holds for `id`.
fn is_registered(session: &FeedSession, id: &FeedItemId, player: &Arc<SimulatedHandle>) -> bool {
    session
        .coordinator()
        .handle(id)
        .is_some_and(|h| std::ptr::addr_eq(Arc::as_ptr(&h), Arc::as_ptr(player)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::HandleCommand;
    use reels_core::DuplicatePolicy;

    fn playback(report: &ReplayReport) -> Vec<(String, HandleCommand)> {
        report
            .trace
            .iter()
            .filter(|e| !matches!(e.command, HandleCommand::Mute { .. }))
            .map(|e| (e.item_id.to_string(), e.command))
            .collect()
    }

    #[test]
    fn fast_scroll_with_late_readiness() {
        let scenario = Scenario::from_yaml(
            r#"
steps:
  - { event: mounted, id: a, status: ready_to_play }
  - { event: mounted, id: b }
  - { event: visible, id: a }
  - { event: visible, id: b }
  - { event: status, id: b, status: ready_to_play }
  - { event: visible, id: b }
"#,
        )
        .unwrap();

        let report = run(&scenario, &CoordinatorConfig::default()).unwrap();

        assert_eq!(
            playback(&report),
            vec![
                ("a".to_string(), HandleCommand::Play),
                ("a".to_string(), HandleCommand::Pause),
                ("b".to_string(), HandleCommand::Play),
            ]
        );
        assert_eq!(report.final_intent.active_id, Some("b".into()));
        assert_eq!(report.item_states[&FeedItemId::from("b")], ItemPlaybackState::Playing);
        assert!(!report.events.is_empty());
    }

    #[test]
    fn dropped_player_is_never_called() {
        let scenario = Scenario::from_yaml(
            r#"
steps:
  - { event: mounted, id: a, status: ready_to_play }
  - { event: drop_handle, id: a }
  - { event: visible, id: a }
"#,
        )
        .unwrap();

        let report = run(&scenario, &CoordinatorConfig::default()).unwrap();

        assert!(playback(&report).is_empty());
        assert_eq!(report.final_intent.active_id, None);
    }

    #[test]
    fn start_muted_reaches_new_players() {
        let scenario =
            Scenario::from_yaml("steps:\n  - { event: mounted, id: a }\n").unwrap();
        let config = CoordinatorConfig {
            start_muted: true,
            ..Default::default()
        };

        let report = run(&scenario, &config).unwrap();

        assert_eq!(report.trace[0].command, HandleCommand::Mute { muted: true });
        assert!(report.final_intent.muted);
    }

    #[test]
    fn remount_under_replace_policy_keeps_first_player() {
        let scenario = Scenario::from_yaml(
            r#"
steps:
  - { event: mounted, id: a, status: ready_to_play }
  - { event: mounted, id: b, status: ready_to_play }
  - { event: visible, id: a }
  - { event: mounted, id: a, status: ready_to_play }
  - { event: visible, id: b }
  - { event: unmounted, id: a }
"#,
        )
        .unwrap();
        let config = CoordinatorConfig {
            duplicate_registration: DuplicatePolicy::Replace,
            ..Default::default()
        };

        let report = run(&scenario, &config).unwrap();

        let calls: Vec<(usize, String, HandleCommand)> = report
            .trace
            .iter()
            .filter(|e| !matches!(e.command, HandleCommand::Mute { .. }))
            .map(|e| (e.step, e.item_id.to_string(), e.command))
            .collect();
        assert_eq!(
            calls,
            vec![
                (2, "a".to_string(), HandleCommand::Play),
                (4, "a".to_string(), HandleCommand::Pause),
                (4, "b".to_string(), HandleCommand::Play),
            ]
        );
        assert_eq!(report.final_intent.active_id, Some("b".into()));
        assert!(!report.item_states.contains_key(&FeedItemId::from("a")));
    }

    #[test]
    fn invalid_config_fails_before_running() {
        let scenario = Scenario::from_yaml("steps: []\n").unwrap();
        let config = CoordinatorConfig {
            event_channel_capacity: 0,
            ..Default::default()
        };
        assert!(run(&scenario, &config).is_err());
    }
}
