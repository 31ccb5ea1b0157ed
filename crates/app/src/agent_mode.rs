//! Headless agent mode: a blocking loop that reads JSON commands and writes
//! one JSON response per command.
//!
//! Every session command is fed through `SessionInput` and applied by a
//! single `app.update()`, so the response reflects the layout, the save
//! status and the draw list as of the end of that frame.

use std::io::{self, BufRead, Write};

use bevy::prelude::*;

use layout::session::{
    CommandResolved, EditMode, EditSession, Feedback, FeedbackEvent, SessionCommand, SessionInput,
    SessionOutcome,
};
use rendering::DrawList;
use save::SaveStatus;

use crate::protocol::{make_response, AgentCommand, AgentResponse, Observation, ResponsePayload};

/// Drive `app` from `input` until `quit` or end of input.
pub fn run_agent_loop(
    app: &mut App,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    write_response(&mut output, &make_response(ResponsePayload::Ready))?;

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("stdin read error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AgentCommand>(&line) {
            Ok(cmd) => process_command(cmd, app),
            Err(e) => make_response(ResponsePayload::Error {
                message: format!("Parse error: {e}"),
            }),
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        write_response(&mut output, &response)?;
        if is_goodbye {
            break;
        }
    }
    Ok(())
}

fn write_response(output: &mut impl Write, response: &AgentResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *output, response)?;
    output.write_all(b"\n")?;
    output.flush()
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

pub fn process_command(cmd: AgentCommand, app: &mut App) -> AgentResponse {
    if let Some(command) = cmd.session_command() {
        let mut outcomes = apply_commands(app, vec![command]);
        let mode = current_mode(app);
        let feedback = drain_feedback(app);
        let Some(outcome) = outcomes.pop() else {
            return make_response(ResponsePayload::Error {
                message: "command produced no outcome".to_string(),
            });
        };
        return make_response(ResponsePayload::Outcome {
            outcome,
            mode,
            feedback,
        });
    }

    match cmd {
        AgentCommand::Observe => make_response(ResponsePayload::Observation {
            observation: observe(app),
        }),
        AgentCommand::Batch { commands } => {
            let outcomes = apply_commands(app, commands);
            make_response(ResponsePayload::BatchResult {
                outcomes,
                mode: current_mode(app),
                feedback: drain_feedback(app),
            })
        }
        AgentCommand::Quit => make_response(ResponsePayload::Goodbye),
        _ => make_response(ResponsePayload::Error {
            message: format!("unhandled command {cmd:?}"),
        }),
    }
}

/// Queue `commands`, run one frame, and return their outcomes in order.
fn apply_commands(app: &mut App, commands: Vec<SessionCommand>) -> Vec<SessionOutcome> {
    if commands.is_empty() {
        return Vec::new();
    }
    // Only this frame's records may answer these commands.
    app.world_mut().resource_mut::<Events<CommandResolved>>().clear();
    for command in commands {
        app.world_mut().send_event(SessionInput(command));
    }
    app.update();

    app.world_mut()
        .resource_mut::<Events<CommandResolved>>()
        .drain()
        .map(|CommandResolved(record)| record.outcome)
        .collect()
}

fn drain_feedback(app: &mut App) -> Vec<Feedback> {
    app.world_mut()
        .resource_mut::<Events<FeedbackEvent>>()
        .drain()
        .map(|FeedbackEvent(signal)| signal)
        .collect()
}

fn current_mode(app: &App) -> &'static str {
    app.world().resource::<EditSession>().mode().name()
}

fn observe(app: &App) -> Observation {
    let world = app.world();
    let session = world.resource::<EditSession>();
    let (placing, held) = match session.mode() {
        EditMode::Placing(template) => (Some(template.entity_type), None),
        EditMode::EditingMoving { entity, .. } => (None, Some(entity.id.clone())),
        EditMode::Browsing | EditMode::EditingIdle => (None, None),
    };
    let status = world.get_resource::<SaveStatus>().cloned().unwrap_or_default();

    Observation {
        mode: session.mode().name(),
        placing,
        held,
        entity_count: session.layout().len(),
        entities: session.layout().to_vec(),
        draw_items: world.get_resource::<DrawList>().map_or(0, DrawList::len),
        last_load: status.last_load.as_ref().map(ToString::to_string),
        saves_requested: status.requested,
        saves_written: status.written,
        save_error: status.last_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_app;
    use layout::generate_layout;
    use serde_json::Value;

    fn run(lines: &[&str]) -> Vec<Value> {
        let mut app = build_app(None);
        let input = lines.join("\n");
        let mut output = Vec::new();
        run_agent_loop(&mut app, input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_ready_then_goodbye() {
        let responses = run(&[r#"{"cmd":"quit"}"#, r#"{"cmd":"observe"}"#]);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["type"], "ready");
        assert_eq!(responses[1]["type"], "goodbye");
        assert!(responses.iter().all(|r| r["protocol_version"] == 1));
    }

    #[test]
    fn test_observe_reports_default_city() {
        let responses = run(&[r#"{"cmd":"observe"}"#]);
        let obs = &responses[1]["observation"];
        let expected = generate_layout().len() as u64;
        assert_eq!(obs["mode"], "browsing");
        assert_eq!(obs["entity_count"], expected);
        assert_eq!(obs["draw_items"], expected);
        assert_eq!(obs["last_load"], "no saved layout");
        // Startup persisted the fallback city, not a session save.
        assert_eq!(obs["saves_requested"], 0);
    }

    #[test]
    fn test_choose_and_tap_places_entity() {
        let responses = run(&[
            r#"{"cmd":"choose","entity_type":"fountain"}"#,
            r#"{"cmd":"tap","x":2,"y":2}"#,
            r#"{"cmd":"observe"}"#,
        ]);
        assert_eq!(responses[1]["outcome"]["outcome"], "mode_changed");
        assert_eq!(responses[1]["mode"], "placing");
        assert_eq!(responses[2]["outcome"]["outcome"], "placed");
        assert_eq!(responses[2]["feedback"][0], "success");
        assert_eq!(responses[2]["mode"], "browsing");

        let obs = &responses[3]["observation"];
        assert_eq!(obs["entity_count"], generate_layout().len() as u64 + 1);
        assert_eq!(obs["draw_items"], obs["entity_count"]);
    }

    #[test]
    fn test_rejected_tap_reports_error_feedback() {
        let responses = run(&[
            r#"{"cmd":"choose","entity_type":"bank"}"#,
            r#"{"cmd":"tap","x":49,"y":49}"#,
        ]);
        assert_eq!(responses[2]["outcome"]["outcome"], "rejected");
        assert_eq!(responses[2]["feedback"][0], "error");
        assert_eq!(responses[2]["mode"], "placing");
    }

    #[test]
    fn test_batch_and_save() {
        let responses = run(&[
            concat!(
                r#"{"cmd":"batch","commands":["#,
                r#"{"action":"toggle_edit"},"#,
                r#"{"action":"tap_tile","x":0,"y":0},"#,
                r#"{"action":"tap_tile","x":2,"y":2}]}"#,
            ),
            r#"{"cmd":"save"}"#,
            r#"{"cmd":"observe"}"#,
        ]);
        let outcomes = responses[1]["outcomes"].as_array().unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0]["outcome"], "mode_changed");
        assert_eq!(outcomes[1]["outcome"], "picked_up");
        assert_eq!(outcomes[2]["outcome"], "moved");

        assert_eq!(responses[2]["outcome"]["outcome"], "saved");
        let obs = &responses[3]["observation"];
        assert_eq!(obs["saves_requested"], 1);
        assert_eq!(obs["saves_written"], 1);
        assert!(obs["save_error"].is_null());
    }

    #[test]
    fn test_long_batch_reports_every_outcome() {
        let mut app = build_app(None);
        let commands = vec![SessionCommand::ToggleEdit; 101];
        let response = process_command(AgentCommand::Batch { commands }, &mut app);

        let ResponsePayload::BatchResult { outcomes, mode, .. } = response.payload else {
            panic!("expected batch result");
        };
        assert_eq!(outcomes.len(), 101);
        assert!(outcomes.iter().all(|o| *o == SessionOutcome::ModeChanged));
        assert_eq!(mode, "editing_idle");

        // The next command is answered by its own outcome, not a leftover.
        let response = process_command(AgentCommand::ToggleEdit, &mut app);
        assert!(matches!(
            response.payload,
            ResponsePayload::Outcome { outcome: SessionOutcome::ModeChanged, mode: "browsing", .. }
        ));
    }

    #[test]
    fn test_parse_errors_do_not_end_session() {
        let responses = run(&["not json", "", r#"{"cmd":"observe"}"#]);
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[1]["type"], "error");
        assert_eq!(responses[2]["type"], "observation");
    }
}
