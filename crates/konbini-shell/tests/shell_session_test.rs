#![allow(clippy::unwrap_used, clippy::expect_used)]

use konbini_router::Params;
use konbini_shell::{screens, Flow, Message, Shell};

fn konbini() -> Shell {
    let mut shell = Shell::new();
    screens::register_all(&mut shell).unwrap();
    let first = shell.start(screens::HOME, Params::new()).unwrap();
    assert_eq!(shell.drain(first), Flow::Continue);
    shell
}

fn send(shell: &mut Shell, line: &str) -> Flow {
    let msg = Message::parse(line).unwrap();
    let cmd = shell.dispatch(msg);
    shell.drain(cmd)
}

fn summary(shell: &Shell) -> String {
    shell
        .router()
        .current_page()
        .map(|s| s.summary())
        .unwrap_or_default()
}

#[test]
fn every_screen_is_registered() {
    let shell = konbini();
    assert_eq!(
        shell.router().routes(),
        vec!["bento", "bentos", "home", "login", "signup"]
    );
    assert_eq!(shell.history_string(), "[home]");
}

#[test]
fn dirty_login_form_blocks_navigation_until_discarded() {
    let mut shell = konbini();
    send(&mut shell, "select 0");
    assert_eq!(shell.history_string(), "home -> [login]");

    send(&mut shell, "type kira@example.com");
    send(&mut shell, "type hunter2");

    // Back is refused silently.
    send(&mut shell, "back");
    assert_eq!(shell.current_route(), Some("login"));
    assert!(shell.status().is_empty());

    // A new navigation reports the veto.
    send(&mut shell, "go signup");
    assert_eq!(shell.current_route(), Some("login"));
    assert_eq!(
        shell.status(),
        "navigation cancelled by current page \"login\" (retry later)"
    );
    assert_eq!(shell.history_string(), "home -> [login]");

    send(&mut shell, "cancel");
    assert_eq!(shell.current_route(), Some("login"));
    assert!(summary(&shell).contains("cancel again to discard"));

    send(&mut shell, "cancel");
    assert_eq!(shell.history_string(), "[home] -> login");

    // Same instance on the way forward: email kept, password dropped on exit.
    send(&mut shell, "forward");
    assert_eq!(shell.current_route(), Some("login"));
    let text = summary(&shell);
    assert!(text.contains("email=kira@example.com"), "{text}");
    assert!(text.contains("password=<empty>"), "{text}");
    assert!(!text.contains("error="), "{text}");
}

#[test]
fn login_flow_reaches_bentos_and_walks_history() {
    let mut shell = konbini();
    send(&mut shell, "select 0");
    send(&mut shell, "type kira@example.com");
    send(&mut shell, "type hunter2");
    send(&mut shell, "submit");

    assert_eq!(shell.history_string(), "home -> login -> [bentos]");
    assert_eq!(shell.current_title(), "Bentos");
    assert_eq!(
        shell.router().current_params().and_then(|p| p.get_str("user")),
        Some("kira@example.com")
    );

    send(&mut shell, "select 1");
    assert_eq!(shell.history_string(), "home -> login -> bentos -> [bento]");
    send(&mut shell, "select 0");
    assert!(summary(&shell).contains("STAGING_ENV_USER=staging-env-user"));

    send(&mut shell, "back");
    assert_eq!(shell.history_string(), "home -> login -> [bentos] -> bento");

    // Leaving masked the revealed entry; the page itself was kept.
    send(&mut shell, "forward");
    assert_eq!(
        summary(&shell),
        "staging-env: STAGING_ENV_USER=**** STAGING_ENV_TOKEN=****"
    );
    assert_eq!(shell.router().history_len(), 4);
}

#[test]
fn navigating_from_the_middle_prunes_forward_entries() {
    let mut shell = konbini();
    send(&mut shell, "select 2");
    send(&mut shell, "select 0");
    assert_eq!(shell.history_string(), "home -> bentos -> [bento]");

    send(&mut shell, "back");
    send(&mut shell, "back");
    assert_eq!(shell.history_string(), "[home] -> bentos -> bento");
    assert!(shell.router().can_go_forward());

    send(&mut shell, "select 1");
    assert_eq!(shell.history_string(), "home -> [signup]");
    assert!(!shell.router().can_go_forward());
    assert_eq!(shell.router().history_len(), 2);
}

#[test]
fn signup_returns_to_login_with_prefilled_email() {
    let mut shell = konbini();
    send(&mut shell, "select 1");
    send(&mut shell, "type new@example.com");
    send(&mut shell, "type s3cret");
    send(&mut shell, "submit");

    assert_eq!(shell.history_string(), "home -> signup -> [login]");
    assert!(summary(&shell).contains("email=new@example.com"));
    assert!(summary(&shell).contains("focus=password"));
}

#[test]
fn revisiting_a_route_creates_a_new_entry() {
    let mut shell = konbini();
    send(&mut shell, "select 2");
    send(&mut shell, "cancel");
    send(&mut shell, "forward");
    send(&mut shell, "go home");
    assert_eq!(shell.history_string(), "home -> bentos -> [home]");

    // Same route as current is ignored.
    send(&mut shell, "go home");
    assert_eq!(shell.router().history_len(), 3);
}

#[test]
fn unknown_route_keeps_history_and_reports() {
    let mut shell = konbini();
    send(&mut shell, "go vault");
    assert_eq!(shell.history_string(), "[home]");
    assert!(shell.status_line().ends_with("! no page registered for route \"vault\""));
}

#[test]
fn logout_discards_history() {
    let mut shell = konbini();
    send(&mut shell, "select 2");
    send(&mut shell, "select 0");
    shell.logout().unwrap();
    assert_eq!(shell.history_string(), "[home]");
    assert!(!shell.router().can_go_back());
    assert!(shell.status_line().ends_with("! signed out"));
}

#[test]
fn quit_stops_the_loop() {
    let mut shell = konbini();
    assert_eq!(send(&mut shell, "quit"), Flow::Quit);
    assert!(shell.is_quitting());
}
