//! Message Line Demo: Drive the message window from the keyboard.
//!
//! Keys:
//! - `1`..`4`: show an info, warning, error or progress message
//! - `c`: clear the message
//! - `f`: give the focus to the message window (it stops drawing) or take it back
//! - `+` / `-`: grow or shrink the message container
//! - `q` / `Esc`: quit
//!
//! Colors are read from the TOML file given as the first argument
//! (default `msgline.toml`). Logs go to `msgwin_demo.log`; set `RUST_LOG`
//! to `trace` to see every recalc and repaint.

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use msgline::{msgwin, rootwin, AnsiScreen, ColorId, Config, Screen, WindowRole, WindowTree};
use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const MESSAGES: [(&str, ColorId); 4] = [
    ("Mailbox checkpointed.", ColorId::Message),
    ("Mailbox is read-only.", ColorId::Warning),
    ("Could not open the mailbox.", ColorId::Error),
    ("Fetching message headers... 42%", ColorId::Progress),
];

fn main() -> msgline::Result<()> {
    let log = File::create("msgwin_demo.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(log))
        .init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "msgline.toml".into());
    let palette = Config::load(&path)?.palette()?;

    let mut tree = rootwin::init_from_terminal()?;
    let (cols, rows) = terminal::size()?;
    let mut screen = AnsiScreen::with_palette(cols, rows, palette);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut tree, &mut screen, &mut stdout);

    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    rootwin::cleanup(&mut tree);

    tracing::info!("demo finished");
    result
}

fn run(
    tree: &mut WindowTree,
    screen: &mut AnsiScreen,
    out: &mut impl Write,
) -> msgline::Result<()> {
    msgwin::set_text(tree, None, Some("Press 1-4, c, f, +, - or q"), ColorId::Message);
    let mut height: i16 = 1;

    loop {
        draw_help(screen);
        tree.refresh(screen);
        screen.flush_to(out)?;

        match event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char(c @ '1'..='4') => {
                    let idx = usize::from(c as u8 - b'1');
                    let (text, cid) = MESSAGES[idx];
                    msgwin::set_text(tree, None, Some(text), cid);
                }
                KeyCode::Char('c') => msgwin::clear_text(tree, None),
                KeyCode::Char('f') => toggle_focus(tree),
                KeyCode::Char('+') => {
                    height += 1;
                    msgwin::set_height(tree, height);
                    height = height.min(3);
                }
                KeyCode::Char('-') => {
                    height -= 1;
                    msgwin::set_height(tree, height);
                    height = height.max(1);
                }
                _ => {}
            },
            TermEvent::Resize(cols, rows) => {
                tree.resize(cols, rows);
                screen.resize(cols, rows);
            }
            _ => {}
        }
    }
}

fn toggle_focus(tree: &mut WindowTree) {
    let Some(win) = msgwin::get_window(tree) else {
        return;
    };
    if tree.is_focused(win) {
        let dialogs = tree.lookup_role(WindowRole::AllDialogs);
        tree.set_focus(dialogs);
    } else {
        tree.set_focus(Some(win));
    }
}

fn draw_help(screen: &mut AnsiScreen) {
    let lines = [
        "msgline demo",
        "",
        "1-4  show a message      c  clear",
        "f    toggle focus        +/-  resize",
        "q    quit",
    ];
    screen.set_color_by_id(ColorId::Normal);
    for (row, line) in (0u16..).zip(lines) {
        screen.move_to(row, 0);
        screen.add_str(line);
        screen.clear_to_eol();
    }
}
