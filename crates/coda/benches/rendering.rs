use criterion::{Criterion, black_box, criterion_group, criterion_main};

use coda::{Dir, Gradient, Node, Renderer, Size, Style, draw, layout, z_sorted};
use geom::Rect;

fn screen(rows: usize) -> Node {
    Node::panel(
        Style::new()
            .with_child_dir(Dir::Vertical)
            .with_bg(Gradient::span("#232526", "#414345")),
    )
    .with_children(vec![
        Node::panel(Style::new().with_title("Tracks").with_child_dir(Dir::Vertical))
            .with_children(
                (0..rows)
                    .map(|i| {
                        Node::text(
                            Style::new()
                                .with_fg(Gradient::hex("#ddd"))
                                .with_h(Size::fixed(1)),
                            format!("Track {i} — Artist {i} — Album {i}"),
                        )
                    })
                    .collect(),
            ),
        Node::hprogress(
            Style::new()
                .with_fg(Gradient::hex("#fff"))
                .with_bg(Gradient::hex("#888"))
                .with_h(Size::fixed(1)),
            37,
            240,
        ),
    ])
}

fn bench_layout(c: &mut Criterion) {
    let tree = screen(40);
    c.bench_function("layout_full_screen", |b| {
        b.iter(|| black_box(layout(&tree, Rect::new(0, 0, 120, 45))));
    });
}

fn bench_first_paint(c: &mut Criterion) {
    let tree = screen(40);
    let cmds = z_sorted(draw(&layout(&tree, Rect::new(0, 0, 120, 45))));
    c.bench_function("render_first_paint", |b| {
        b.iter(|| {
            let mut rend = Renderer::new(120, 45);
            for cmd in &cmds {
                rend.apply(cmd);
            }
            black_box(rend.pending().len());
            rend.flush();
        });
    });
}

fn bench_repaint_diff(c: &mut Criterion) {
    let tree = screen(40);
    let cmds = z_sorted(draw(&layout(&tree, Rect::new(0, 0, 120, 45))));
    let mut rend = Renderer::new(120, 45);
    for cmd in &cmds {
        rend.apply(cmd);
    }
    rend.flush();
    c.bench_function("render_unchanged_repaint", |b| {
        b.iter(|| {
            for cmd in &cmds {
                rend.apply(cmd);
            }
            black_box(rend.pending().len());
            rend.flush();
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = bench_layout, bench_first_paint, bench_repaint_diff
}
criterion_main!(benches);
