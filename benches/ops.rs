// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use mindtree::nav::Direction;
use mindtree::notify::Changes;
use mindtree::ops::Outline;

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Groups: `ops.edit`, `ops.navigate`.
// - Case IDs (after the `/`) stay stable across refactors so results remain comparable.
fn checksum_changes(changes: &Changes) -> u64 {
    let mut acc = 0u64;
    acc = acc.wrapping_mul(131).wrapping_add(changes.added.len() as u64);
    acc = acc.wrapping_mul(131).wrapping_add(changes.updated.len() as u64);
    acc = acc.wrapping_mul(131).wrapping_add(changes.removed.len() as u64);
    acc = acc.wrapping_mul(131).wrapping_add(u64::from(changes.root));
    acc.wrapping_mul(131).wrapping_add(u64::from(changes.toolbar))
}

fn bench_edit(c: &mut Criterion, case: Case) {
    let mut group = c.benchmark_group("ops.edit");
    let template = fixtures::outline(case);
    let leaf = fixtures::first_leaf(&template).expect("fixture has a leaf");
    let top = template.tree().top_level()[0];

    group.throughput(Throughput::Elements(1));
    group.bench_function(format!("create_child_{}", case.id()), |b| {
        b.iter_batched_ref(
            || fixtures::outline(case),
            |outline: &mut Outline| black_box(checksum_changes(&outline.create_child(Some(leaf)))),
            BatchSize::LargeInput,
        )
    });
    group.bench_function(format!("remove_top_subtree_{}", case.id()), |b| {
        b.iter_batched_ref(
            || fixtures::outline(case),
            |outline: &mut Outline| black_box(checksum_changes(&outline.remove(top))),
            BatchSize::LargeInput,
        )
    });
    group.bench_function(format!("toggle_children_collapsed_{}", case.id()), |b| {
        b.iter_batched_ref(
            || fixtures::outline(case),
            |outline: &mut Outline| {
                black_box(checksum_changes(&outline.toggle_children_collapsed(top)))
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_navigate(c: &mut Criterion, case: Case) {
    let mut group = c.benchmark_group("ops.navigate");
    let mut outline = fixtures::outline(case);
    let ids = fixtures::node_ids(&outline);

    group.throughput(Throughput::Elements(ids.len() as u64));
    group.bench_function(format!("capabilities_every_node_{}", case.id()), |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for id in &ids {
                outline.activate_node(Some(*id));
                let caps = outline.capabilities();
                for direction in Direction::ALL {
                    acc = acc.wrapping_mul(3).wrapping_add(u64::from(caps.can_move(direction)));
                }
            }
            black_box(acc)
        })
    });

    group.throughput(Throughput::Elements(1));
    group.bench_function(format!("walk_down_and_back_{}", case.id()), |b| {
        b.iter(|| {
            outline.activate_node(outline.tree().top_level().first().copied());
            let mut steps = 0u64;
            while !outline.activate_right().is_empty() {
                steps += 1;
            }
            while !outline.activate_left().is_empty() {
                steps += 1;
            }
            black_box(steps)
        })
    });
    group.finish();
}

fn benches_ops(c: &mut Criterion) {
    for case in [Case::Small, Case::Medium, Case::DeepLongLabels] {
        bench_edit(c, case);
        bench_navigate(c, case);
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_ops
}
criterion_main!(benches);
