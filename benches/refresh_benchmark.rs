//! Refresh benchmark: Measure one set-text + refresh cycle.
//!
//! Target: < 5µs per cycle on an 80x24 screen

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use msgline::{msgwin, rootwin, AnsiScreen, ColorId, GridScreen};

fn refresh_grid(c: &mut Criterion) {
    let mut tree = rootwin::init(80, 24).unwrap();
    let mut screen = GridScreen::new(80, 24);

    c.bench_function("refresh_grid_set_text", |b| {
        b.iter(|| {
            let text = black_box("Mailbox checkpointed.");
            msgwin::set_text(&mut tree, None, Some(text), ColorId::Message);
            tree.refresh(&mut screen);
        })
    });
}

fn refresh_ansi(c: &mut Criterion) {
    let mut tree = rootwin::init(80, 24).unwrap();
    let mut screen = AnsiScreen::new(80, 24);
    let mut sink = Vec::with_capacity(4096);

    c.bench_function("refresh_ansi_set_text", |b| {
        b.iter(|| {
            let text = black_box("Could not open the mailbox.");
            msgwin::set_text(&mut tree, None, Some(text), ColorId::Error);
            tree.refresh(&mut screen);
            sink.clear();
            screen.flush_to(&mut sink).unwrap();
        })
    });
}

fn refresh_focused(c: &mut Criterion) {
    let mut tree = rootwin::init(80, 24).unwrap();
    let mut screen = GridScreen::new(80, 24);
    let win = msgwin::get_window(&tree).unwrap();
    tree.set_focus(Some(win));

    c.bench_function("refresh_focused_noop", |b| {
        b.iter(|| {
            msgwin::set_text(&mut tree, None, Some(black_box("ignored")), ColorId::Message);
            tree.refresh(&mut screen);
        })
    });
}

fn set_height_reflow(c: &mut Criterion) {
    let mut tree = rootwin::init(80, 24).unwrap();
    let mut height = 1;

    c.bench_function("set_height_reflow", |b| {
        b.iter(|| {
            height = height % 3 + 1;
            msgwin::set_height(&mut tree, black_box(height));
        })
    });
}

criterion_group!(
    benches,
    refresh_grid,
    refresh_ansi,
    refresh_focused,
    set_height_reflow,
);
criterion_main!(benches);
