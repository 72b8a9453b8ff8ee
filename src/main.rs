use anyhow::Result;

use confedit::config::Config;
use confedit::editor::TextBufferEditor;
use confedit::notify::ConsoleSink;
use confedit::session::EditorSession;
use confedit::store::RemoteStore;

type Session = EditorSession<TextBufferEditor, ConsoleSink>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;
    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    let store = RemoteStore::new(config.endpoints)?;
    let mut session = EditorSession::new(TextBufferEditor::new(), store, ConsoleSink::new());

    // Restore once at startup; "load" re-triggers it.
    session.restore().await;

    run(&mut session).await
}

/// Command loop. All stdin reads go through the sink's single line reader,
/// so a typed-ahead confirmation reply reaches `confirm` instead of being
/// swallowed here.
async fn run(session: &mut Session) -> Result<()> {
    print_help();

    loop {
        let Some(line) = session.sink_mut().next_line().await? else {
            break;
        };
        match line.trim() {
            "show" => {
                println!("{}", session.editor().text());
                print_gate_state(session);
            }
            "edit" => {
                let text = read_document(session).await?;
                session.edit(|editor| editor.replace_text(text));
                print_gate_state(session);
            }
            "load" => {
                session.restore().await;
            }
            "save" => {
                if !session.is_submittable() {
                    // Mirrors a disabled save button; persist would refuse anyway.
                    print_gate_state(session);
                    continue;
                }
                session.persist().await;
            }
            "quit" | "exit" => break,
            "" => {}
            other => eprintln!("unknown command: {} (try show, edit, load, save, quit)", other),
        }
    }

    Ok(())
}

/// Read document lines until a lone "." terminator.
async fn read_document(session: &mut Session) -> Result<String> {
    eprintln!("enter the document, end with a single \".\" line:");
    let mut buffer = String::new();
    while let Some(line) = session.sink_mut().next_line().await? {
        if line.trim() == "." {
            break;
        }
        buffer.push_str(&line);
        buffer.push('\n');
    }
    Ok(buffer)
}

fn print_gate_state(session: &Session) {
    match session.validation_error() {
        None => eprintln!("document is valid; save is available"),
        Some(message) => eprintln!("{}", message),
    }
}

fn print_help() {
    eprintln!("commands: show | edit | load | save | quit");
}
