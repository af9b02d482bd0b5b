use clap::Parser;
use formloom::FormBuilder;
use formloom::cli::{Cli, EmitMode, emit};
use formloom_core::{FieldInstance, FieldKind};
use formloom_tui::{Event, KeyCode, KeyEvent, Modifiers, ProgramSimulator};
use serde_json::Value;

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code))
}

/// Seed from the command line, edit in the simulator, then emit.
fn session() -> ProgramSimulator<FormBuilder> {
    let cli = Cli::try_parse_from(["formloom", "--seed", "userName,dropdown", "--emit", "json"])
        .unwrap();
    let config = cli.app_config().unwrap();
    let mut sim = ProgramSimulator::new(FormBuilder::with_fields(config.seed.iter().copied()));

    // Canvas, second row, open editor, option input, add "A" and "B", save.
    sim.inject_events([
        press(KeyCode::Tab),
        press(KeyCode::Char('j')),
        press(KeyCode::Enter),
        press(KeyCode::Tab),
        press(KeyCode::Char('A')),
        press(KeyCode::Enter),
        press(KeyCode::Char('B')),
        press(KeyCode::Enter),
        Event::Key(KeyEvent::new(KeyCode::Char('s')).with_modifiers(Modifiers::CTRL)),
        press(KeyCode::Char('q')),
    ]);
    assert!(!sim.is_running());
    sim
}

#[test]
fn json_emit_lists_fields_in_order() {
    let sim = session();
    let mut out = Vec::new();
    emit(EmitMode::Json, sim.model().builder(), &mut out).unwrap();

    let value: Value = serde_json::from_slice(&out).unwrap();
    let fields = value.as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["id"], "userName-1");
    assert_eq!(fields[0]["kind"], "text");
    assert_eq!(fields[1]["kind"], "select");
    assert_eq!(fields[1]["options"], serde_json::json!(["A", "B"]));

    let parsed: Vec<FieldInstance> = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed[1].kind, FieldKind::Select);
    assert_eq!(parsed, sim.model().builder().fields());
}

#[test]
fn markup_emit_orders_options() {
    let sim = session();
    let mut out = Vec::new();
    emit(EmitMode::Markup, sim.model().builder(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let input = text.find("<input type=\"text\"").unwrap();
    let select = text.find("<select").unwrap();
    let a = text.find(">A</option>").unwrap();
    let b = text.find(">B</option>").unwrap();
    assert!(input < select && select < a && a < b);
    assert!(text.ends_with("</select>\n"));
}
