//! Interactive keypad prompt.

use super::render::{render_history, render_state};
use crate::ai::SolverGateway;
use crate::calculator::{Key, clipboard_text, copy_to_clipboard, looks_like_keys, tokenize};
use crate::history::HistoryStore;
use crate::session::Session;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const HELP: &str = "\
Keys:      0-9 .  + - * / % ^  =  AC  DEL  +/-   (e.g. `12.5 * 4 =`)
Commands:  !ai <question>   ask the AI solver (type anything to cancel)
           history          show past calculations
           history clear    forget past calculations
           copy             copy the display to the clipboard
           help             show this message
           quit             leave";

/// What a typed line asks for.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Empty,
    Keys(Vec<Key>),
    Ask(String),
    ShowHistory,
    ClearHistory,
    Copy,
    Help,
    Quit,
    Unknown(String),
}

/// Classify one line of input.
pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Empty;
    }

    if let Some(query) = trimmed.strip_prefix("!ai") {
        let query = query.trim();
        return if query.is_empty() {
            Input::Unknown(trimmed.to_string())
        } else {
            Input::Ask(query.to_string())
        };
    }

    match trimmed.to_lowercase().as_str() {
        "history" | "h" => return Input::ShowHistory,
        "history clear" => return Input::ClearHistory,
        "copy" => return Input::Copy,
        "help" | "?" => return Input::Help,
        "quit" | "exit" | "q" => return Input::Quit,
        _ => {}
    }

    if looks_like_keys(trimmed) {
        match tokenize(trimmed) {
            Ok(keys) => Input::Keys(keys),
            Err(_) => Input::Unknown(trimmed.to_string()),
        }
    } else {
        Input::Unknown(trimmed.to_string())
    }
}

/// What arrived first while an answer was outstanding.
enum Waited {
    Answer(String),
    Line(String),
    Closed,
}

/// Run the prompt until `quit` or end of input.
pub async fn run<S, R, W>(
    session: &mut Session<S>,
    gateway: &dyn SolverGateway,
    input: R,
    out: &mut W,
) -> anyhow::Result<()>
where
    S: HistoryStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut queued: Option<String> = None;
    let mut input_closed = false;

    writeln!(out, "{}", render_state(session.state()))?;

    loop {
        let line = match queued.take() {
            Some(line) => line,
            None if input_closed => break,
            None => match lines.next_line().await? {
                Some(line) => line,
                None => break,
            },
        };

        match parse_input(&line) {
            Input::Empty => {}
            Input::Keys(keys) => {
                session.press_all(keys);
                writeln!(out, "{}", render_state(session.state()))?;
            }
            Input::Ask(query) => {
                let ticket = session.begin_solve(&query);
                writeln!(out, "Thinking...")?;
                out.flush()?;

                let mut solving = gateway.solve(&query);
                let waited = tokio::select! {
                    biased;

                    answer = &mut solving => Waited::Answer(answer),
                    next = lines.next_line() => match next? {
                        Some(line) => Waited::Line(line),
                        None => Waited::Closed,
                    },
                };

                let answer = match waited {
                    Waited::Answer(answer) => Some(answer),
                    // Closed input is not a cancel; the answer is still wanted.
                    Waited::Closed => {
                        input_closed = true;
                        Some(solving.await)
                    }
                    Waited::Line(line) => {
                        queued = Some(line);
                        None
                    }
                };

                match answer {
                    Some(answer) => {
                        session.finish_solve(ticket, &answer);
                        writeln!(out, "{}", render_state(session.state()))?;
                    }
                    None => {
                        session.cancel_solve();
                        writeln!(out, "Cancelled.")?;
                    }
                }
            }
            Input::ShowHistory => writeln!(out, "{}", render_history(session.history()))?,
            Input::ClearHistory => {
                session.clear_history();
                writeln!(out, "History cleared.")?;
            }
            Input::Copy => {
                let text = clipboard_text(&session.state().display);
                match copy_to_clipboard(&text) {
                    Ok(()) => writeln!(out, "Copied {}", text)?,
                    Err(e) => {
                        tracing::warn!("{}", e);
                        writeln!(out, "{}", e)?;
                    }
                }
            }
            Input::Help => writeln!(out, "{}", HELP)?,
            Input::Quit => break,
            Input::Unknown(text) => writeln!(out, "Unrecognized input: {} (try `help`)", text)?,
        }
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Operator;
    use crate::history::MemoryStore;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use std::time::Duration;

    struct EchoSolver;

    impl SolverGateway for EchoSolver {
        fn solve<'a>(&'a self, query: &'a str) -> BoxFuture<'a, String> {
            futures::future::ready(format!("answer to {}", query)).boxed()
        }
    }

    struct NeverSolver;

    impl SolverGateway for NeverSolver {
        fn solve<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, String> {
            futures::future::pending().boxed()
        }
    }

    struct SlowSolver;

    impl SolverGateway for SlowSolver {
        fn solve<'a>(&'a self, _query: &'a str) -> BoxFuture<'a, String> {
            async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                "42".to_string()
            }
            .boxed()
        }
    }

    async fn run_script(
        session: &mut Session<&MemoryStore>,
        gateway: &dyn SolverGateway,
        script: &str,
    ) -> String {
        let mut out = Vec::new();
        run(session, gateway, script.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("  "), Input::Empty);
        assert_eq!(
            parse_input("5+"),
            Input::Keys(vec![Key::Digit('5'), Key::Operator(Operator::Add)])
        );
        assert_eq!(
            parse_input("!ai  what is half of 9 "),
            Input::Ask("what is half of 9".to_string())
        );
        assert!(matches!(parse_input("!ai"), Input::Unknown(_)));
        assert_eq!(parse_input("History"), Input::ShowHistory);
        assert_eq!(parse_input("history clear"), Input::ClearHistory);
        assert_eq!(parse_input("copy"), Input::Copy);
        assert_eq!(parse_input("quit"), Input::Quit);
        assert_eq!(parse_input("c"), Input::Keys(vec![Key::Clear]));
        assert!(matches!(parse_input("sqrt 9"), Input::Unknown(_)));
    }

    #[tokio::test]
    async fn test_keys_and_history() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);

        let output = run_script(&mut session, &EchoSolver, "5 + 3 + 2 =\nhistory\nquit\n5\n").await;

        assert_eq!(session.state().display, "10");
        assert!(output.contains("8 + 2 =\n= 10"));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clear_history_command() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);

        let output = run_script(&mut session, &EchoSolver, "2*3=\nhistory clear\nhistory\n").await;

        assert!(output.contains("History cleared."));
        assert!(output.ends_with("No calculations yet\n"));
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_ai_answer_is_shown() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);

        let output = run_script(&mut session, &EchoSolver, "!ai two plus two\n").await;

        assert!(output.contains("Thinking..."));
        assert_eq!(session.state().display, "answer to two plus two");
        assert_eq!(session.state().expression, "two plus two");
    }

    #[tokio::test]
    async fn test_next_line_cancels_pending_answer() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);

        let output = run_script(&mut session, &NeverSolver, "!ai slow question\n7\n").await;

        assert!(output.contains("Cancelled."));
        assert!(!session.solving());
        assert_eq!(session.state().display, "7");
    }

    #[tokio::test]
    async fn test_end_of_input_waits_for_answer() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);

        let output = run_script(&mut session, &SlowSolver, "!ai meaning of life").await;

        assert!(!output.contains("Cancelled."));
        assert!(!session.solving());
        assert_eq!(session.state().display, "42");
        assert_eq!(session.state().expression, "meaning of life");
    }

    #[tokio::test]
    async fn test_unknown_input_is_reported() {
        let store = MemoryStore::new();
        let mut session = Session::open(&store);

        let output = run_script(&mut session, &EchoSolver, "launch rockets\n").await;
        assert!(output.contains("Unrecognized input: launch rockets"));
    }
}
