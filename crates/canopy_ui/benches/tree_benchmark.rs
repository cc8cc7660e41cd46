//! # Tree Benchmark
//!
//! Trees are re-laid out whenever a node expands or collapses, and hit
//! tested on every pointer move over them.
//!
//! Run with: `cargo bench --package canopy_ui --bench tree_benchmark`

#![allow(missing_docs)]

use canopy_ui::{ComponentId, Drawable, DrawableId, NodeId, Rect, Scene, Tree, TreeStyle};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const BRANCHES: usize = 50;
const LEAVES: usize = 20;

fn style() -> TreeStyle {
    TreeStyle::new(
        Drawable::new(DrawableId(1), 10.0, 10.0),
        Drawable::new(DrawableId(2), 10.0, 10.0),
        Some(Drawable::new(DrawableId(3), 1.0, 1.0)),
    )
}

/// A tree of `BRANCHES` root nodes with `LEAVES` children each.
fn build() -> (Scene, ComponentId, Vec<NodeId>) {
    let mut scene = Scene::new(1920.0, 1080.0);
    let tree = Tree::<usize>::create(&mut scene, style()).expect("tree");
    scene.add_child(scene.root(), tree).expect("attach");
    scene
        .set_bounds(tree, Rect::new(0.0, 0.0, 400.0, 1080.0))
        .expect("bounds");

    let mut rows = Vec::with_capacity(BRANCHES * (LEAVES + 1));
    for _ in 0..BRANCHES * (LEAVES + 1) {
        let row = scene.create_component();
        scene.set_size(row, 120.0, 18.0).expect("size");
        rows.push(row);
    }

    let branches = scene
        .with_widget::<Tree<usize>, _>(tree, |tree, scene| {
            let mut rows = rows.into_iter().enumerate();
            let mut branches = Vec::with_capacity(BRANCHES);
            for _ in 0..BRANCHES {
                let Some((value, row)) = rows.next() else { break };
                let branch = tree.create_node_with(row, value);
                tree.add(scene, branch).expect("add");
                for (value, row) in rows.by_ref().take(LEAVES) {
                    let leaf = tree.create_node_with(row, value);
                    tree.add_child(scene, branch, leaf).expect("add child");
                }
                branches.push(branch);
            }
            branches
        })
        .expect("tree widget");
    (scene, tree, branches)
}

/// Benchmark: expand everything and lay the tree out again.
fn bench_expand_layout(c: &mut Criterion) {
    let (mut scene, tree, _) = build();
    c.bench_function("tree_expand_all_validate_1050", |b| {
        b.iter(|| {
            scene
                .with_widget::<Tree<usize>, _>(tree, |t, s| t.expand_all(s))
                .expect("tree widget");
            scene.validate();
            scene
                .with_widget::<Tree<usize>, _>(tree, |t, s| t.collapse_all(s))
                .expect("tree widget");
            scene.validate();
        });
    });
}

/// Benchmark: row lookup by y, as done on every mouse move.
fn bench_node_at(c: &mut Criterion) {
    let (mut scene, tree, _) = build();
    scene
        .with_widget::<Tree<usize>, _>(tree, |t, s| t.expand_all(s))
        .expect("tree widget");
    scene.validate();
    c.bench_function("tree_node_at_expanded", |b| {
        let mut y = 0.0_f32;
        b.iter(|| {
            y = (y + 7.0) % 1080.0;
            let widget = scene.widget::<Tree<usize>>(tree).expect("tree widget");
            black_box(widget.node_at(&scene, y))
        });
    });
}

/// Benchmark: looking up a node by value and saving expansion state.
fn bench_find_values(c: &mut Criterion) {
    let (mut scene, tree, branches) = build();
    scene
        .with_widget::<Tree<usize>, _>(tree, |t, s| {
            for branch in branches.iter().step_by(2) {
                t.set_expanded(s, *branch, true).expect("expand");
            }
        })
        .expect("tree widget");
    c.bench_function("tree_find_expanded_values", |b| {
        b.iter(|| {
            let widget = scene.widget::<Tree<usize>>(tree).expect("tree widget");
            black_box(widget.find_expanded_values());
            black_box(widget.find_node(&(BRANCHES * LEAVES)))
        });
    });
}

criterion_group!(benches, bench_expand_layout, bench_node_at, bench_find_values);
criterion_main!(benches);
