//! Benchmarks for origin resolution and artifact lookup.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use freightflow::core::{GitCommit, Origin, RepoSubscription};
use freightflow::mechanisms::{
    resolve_origin, GitRepoUpdate, HelmImageUpdate, HelmPromotionMechanism, PromotionMechanisms,
};
use freightflow::testing::{freight_from, warehouse, StageFixture};

fn wide_tree(updates: usize, images: usize) -> PromotionMechanisms {
    PromotionMechanisms {
        origin: Some(Origin::warehouse("root")),
        git_repo_updates: (0..updates)
            .map(|_| GitRepoUpdate {
                helm: Some(HelmPromotionMechanism {
                    images: vec![HelmImageUpdate::default(); images],
                    ..Default::default()
                }),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn resolver_benchmark(c: &mut Criterion) {
    let tree = wide_tree(50, 20);
    let last = tree
        .git_repo_updates
        .last()
        .and_then(|update| update.helm.as_ref())
        .and_then(|helm| helm.images.last())
        .expect("tree is not empty");

    c.bench_function("resolve_origin_last_leaf", |b| {
        b.iter(|| resolve_origin(black_box(&tree), black_box(last)));
    });
}

fn locator_benchmark(c: &mut Criterion) {
    let mut fixture = StageFixture::new();
    for i in 0..20 {
        let name = format!("warehouse-{i}");
        fixture = fixture
            .requesting(&name)
            .with_warehouse(warehouse(&name, vec![RepoSubscription::git(format!("repo-{i}"))]))
            .with_freight(freight_from(&name).with_commit(GitCommit::new(format!("repo-{i}"), "abc")));
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime builds");

    c.bench_function("find_commit_inferred", |b| {
        b.iter(|| {
            runtime.block_on(async {
                fixture
                    .locator()
                    .find_commit(None, black_box("repo-19"))
                    .await
                    .expect("lookup succeeds")
            })
        });
    });
}

criterion_group!(benches, resolver_benchmark, locator_benchmark);
criterion_main!(benches);
