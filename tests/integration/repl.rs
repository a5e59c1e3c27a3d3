//! The REPL over the demo world
//!
//! A scripted editor stands in for the terminal.

use std::collections::VecDeque;

use wayfarer_foundation::Result;
use wayfarer_runtime::{LineEditor, ReadResult, Repl, Reply, RuntimeConfig, Session, demo};

/// Feeds canned lines, then end of input.
#[derive(Default)]
pub struct ScriptedEditor {
    lines: VecDeque<String>,
}

impl ScriptedEditor {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(ToString::to_string).collect(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self
            .lines
            .pop_front()
            .map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}

fn demo_repl() -> (Repl<ScriptedEditor>, demo::DemoWorld) {
    let demo = demo::build_world().unwrap();
    let repl = Repl::with_editor(ScriptedEditor::default())
        .with_session(Session::with_world(demo.world.clone()))
        .with_config(&RuntimeConfig::batch());
    (repl, demo)
}

fn lines(reply: Reply) -> Vec<String> {
    match reply {
        Reply::Lines(lines) => lines,
        Reply::Quit => panic!("unexpected quit"),
    }
}

#[test]
fn a_short_tour() {
    let (mut repl, demo) = demo_repl();
    let output = repl
        .eval_script(
            "# Alice lets herself into the armory\n\
             :as alice\n\
             look\n\
             open east\n\
             east\n",
        )
        .unwrap();

    assert_eq!(output[0], "You are now playing Alice.");
    assert!(output.contains(&"[exits: (east)]".to_string()));
    assert!(output.contains(&"You open the east exit.".to_string()));
    assert!(output.contains(&"Armory".to_string()));
    assert_eq!(repl.session().world().room_of(demo.alice).unwrap(), demo.armory);
}

#[test]
fn switching_characters_shows_what_they_missed() {
    let (mut repl, _) = demo_repl();
    repl.eval(":as bob").unwrap();
    repl.eval(":as alice").unwrap();
    repl.eval("gtell regroup at the gate").unwrap();

    let output = lines(repl.eval(":as bob").unwrap());
    assert_eq!(
        output,
        vec![
            "You are now playing Bob.",
            "Alice says through your radio, \"regroup at the gate\""
        ]
    );
}

#[test]
fn meta_command_replies() {
    let (mut repl, _) = demo_repl();
    assert_eq!(
        lines(repl.eval("look").unwrap()),
        vec!["No active character. Use :as NAME first."]
    );
    assert_eq!(lines(repl.eval(":as").unwrap()), vec!["Usage: :as NAME"]);
    assert_eq!(
        lines(repl.eval(":as a gate guard").unwrap()),
        vec!["No player named a gate guard."]
    );
    assert_eq!(lines(repl.eval(":connect carol").unwrap()), vec!["Carol connected."]);
    assert_eq!(
        lines(repl.eval(":connect CAROL").unwrap()),
        vec!["Carol is already connected."]
    );
    assert_eq!(lines(repl.eval(":disconnect carol").unwrap()), vec!["Carol disconnected."]);
    assert_eq!(
        lines(repl.eval(":disconnect carol").unwrap()),
        vec!["Carol is not connected."]
    );
    assert_eq!(lines(repl.eval(":save").unwrap()), vec!["Usage: :save PATH"]);
    assert_eq!(lines(repl.eval(":help").unwrap())[0], "Meta commands:");
    assert_eq!(
        lines(repl.eval(":dance").unwrap()),
        vec!["Unknown command :dance. Type :help for a list."]
    );
    assert_eq!(repl.eval(":quit").unwrap(), Reply::Quit);
}

#[test]
fn scripts_stop_at_quit() {
    let (mut repl, demo) = demo_repl();
    repl.eval_script(":as alice\n:quit\nopen east\n").unwrap();
    assert!(
        repl.session()
            .world()
            .door_between(demo.gatehouse, demo.armory)
            .unwrap()
            .unwrap()
            .state
            .is_locked()
    );
}

#[test]
fn run_reads_until_end_of_input() {
    let demo = demo::build_world().unwrap();
    let editor = ScriptedEditor::new(&[":as alice", "", "drop key", "inventory"]);
    let mut repl = Repl::with_editor(editor)
        .with_session(Session::with_world(demo.world.clone()))
        .with_config(&RuntimeConfig::batch());

    repl.run().unwrap();

    let world = repl.session().world();
    assert!(world.room(demo.gatehouse).unwrap().items.contains(demo.key));
    assert_eq!(world.character(demo.alice).unwrap().inventory.len(), 1);
}

#[test]
fn channels_are_verbs() {
    let (repl, _) = demo_repl();
    let names: Vec<&str> = repl
        .session()
        .dispatcher()
        .vocabulary()
        .iter()
        .map(|verb| verb.name.as_str())
        .collect();
    assert!(names.contains(&"gtell"));
    assert!(names.contains(&"unlock"));
}
