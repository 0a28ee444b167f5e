// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_safe_area::{
    AspectClamp, AspectMode, CanvasScaler, Container, Easing, LayoutParams, Margins, Padding,
    PaddingUnit, PostProcessChain, SafeArea, SafeAreaRegistry, ScaleMode, SideConfig, Sides,
    StaticInsets, Strategy, TransitionSettings, WidthClamp, WidthClampMode, layout,
};

const SCREEN: Size = Size::new(1170.0, 2532.0);

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    fn next_unit(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }
}

fn container() -> Container {
    Container::new(
        SCREEN,
        CanvasScaler::new(Size::new(1080.0, 1920.0), ScaleMode::MatchWidthOrHeight, 0.5),
    )
}

fn random_insets(rng: &mut Lcg, count: usize) -> Vec<Rect> {
    (0..count)
        .map(|_| {
            let bottom = rng.next_unit() * 120.0;
            let top = rng.next_unit() * 160.0;
            let side = rng.next_unit() * 60.0;
            Rect::new(side, bottom, SCREEN.width - side, SCREEN.height - top)
        })
        .collect()
}

fn strategies() -> [(&'static str, Strategy); 4] {
    [
        ("fill", Strategy::Fill),
        ("fit_aspect", Strategy::FitAspect { aspect: None }),
        (
            "fixed_margins",
            Strategy::FixedMargins(Margins::new(24.0, 48.0, 24.0, 32.0)),
        ),
        (
            "per_side",
            Strategy::PerSide(Sides {
                top: SideConfig::DISABLED,
                ..Sides::all(SideConfig::enabled(8.0))
            }),
        ),
    ]
}

fn full_chain() -> PostProcessChain {
    let mut chain = PostProcessChain::new();
    chain.push(WidthClamp::new(0.4, 0.6, WidthClampMode::Center));
    chain.push(AspectClamp::new(0.45, 0.55, AspectMode::ScaleToFit));
    chain.push(
        Padding::new(Margins::uniform(0.02), PaddingUnit::FractionOfContainer).with_limits(4.0, 40.0),
    );
    chain
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_safe_area");
    group.sample_size(50);

    let mut rng = Lcg::new(0x5AFE_0000_0000_0001);
    let insets = random_insets(&mut rng, 1_024);
    let container = container();

    for (name, strategy) in strategies() {
        let params = LayoutParams::new(strategy).with_padding(4.0);
        for (chain_name, chain) in [("empty", PostProcessChain::new()), ("full", full_chain())] {
            group.bench_function(format!("layout({name},chain={chain_name})"), |b| {
                b.iter(|| {
                    let mut acc = 0.0;
                    for inset in &insets {
                        let out = layout(&params, &chain, *inset, SCREEN, &container);
                        acc += out.width();
                    }
                    black_box(acc);
                });
            });
        }
    }

    group.finish();
}

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_safe_area_tick");
    group.sample_size(50);

    let container = container();
    let frame = Duration::from_millis(16);

    group.bench_function("tick_unchanged", |b| {
        let insets = StaticInsets::new(SCREEN, Rect::new(0.0, 102.0, 1170.0, 2430.0));
        let mut area = SafeArea::new(LayoutParams::new(Strategy::Fill)).with_chain(full_chain());
        area.tick(&insets, &container, frame);
        b.iter(|| black_box(area.tick(&insets, &container, frame)));
    });

    group.bench_function("tick_animating_rotation", |b| {
        let portrait = Rect::new(0.0, 102.0, 1170.0, 2430.0);
        let landscape = Rect::new(140.0, 60.0, 1030.0, 2532.0);
        b.iter_batched(
            || {
                let mut area = SafeArea::new(LayoutParams::new(Strategy::Fill)).with_transition(
                    TransitionSettings::animated(Duration::from_millis(300), Easing::EaseInOut),
                );
                area.tick(&StaticInsets::new(SCREEN, portrait), &container, frame);
                area
            },
            |mut area| {
                let insets = StaticInsets::new(SCREEN, landscape);
                for _ in 0..20 {
                    black_box(area.tick(&insets, &container, frame));
                }
                black_box(area.applied_rect());
            },
            BatchSize::SmallInput,
        );
    });

    for &n in &[16_usize, 256] {
        group.bench_function(format!("registry_tick_all(n={n})"), |b| {
            let mut rng = Lcg::new(0x5AFE_0000_0000_0002);
            let insets = random_insets(&mut rng, 64);
            let mut registry = SafeAreaRegistry::new();
            for i in 0..n {
                let (_, strategy) = strategies()[i % 4];
                registry.insert(SafeArea::new(LayoutParams::new(strategy)).with_chain(full_chain()));
            }
            let mut i = 0;
            b.iter(|| {
                let provider = StaticInsets::new(SCREEN, insets[i % insets.len()]);
                i += 1;
                black_box(registry.tick_all(&provider, &container, frame));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout, bench_ticks);
criterion_main!(benches);
