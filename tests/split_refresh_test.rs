// tests/split_refresh_test.rs
use par_streams::engine::{CounterEngine, Mcg59, Xoshiro256Family};
use par_streams::{
    split, BaseEngine, Capabilities, ConsumptionReport, Engine, EngineError, EngineResult,
    Technique, TechniqueKind,
};
use rand::RngCore;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn draws<R: RngCore + ?Sized>(engine: &mut R, n: usize) -> Vec<u64> {
    (0..n).map(|_| engine.next_u64()).collect()
}

/// Advertises skip-ahead but refuses skips beyond `limit`
#[derive(Debug, Clone)]
struct LimitedSkip {
    inner: CounterEngine,
    limit: u64,
}

impl RngCore for LimitedSkip {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

impl BaseEngine for LimitedSkip {
    fn name(&self) -> &'static str {
        "limited-skip"
    }

    fn clone_engine(&self) -> Engine {
        Box::new(self.clone())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SKIP_AHEAD
    }

    fn skip_ahead(&mut self, nskip: u64) -> EngineResult<()> {
        if nskip > self.limit {
            return Err(EngineError::not_supported(
                self.name(),
                TechniqueKind::SkipAhead,
                format!("skip {} exceeds {}", nskip, self.limit),
            ));
        }
        self.inner.skip_ahead(nskip)
    }
}

/// Advertises skip-ahead but rejects large skips as bad parameters
#[derive(Debug, Clone)]
struct BoundedSkip {
    inner: CounterEngine,
    limit: u64,
}

impl RngCore for BoundedSkip {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

impl BaseEngine for BoundedSkip {
    fn name(&self) -> &'static str {
        "bounded-skip"
    }

    fn clone_engine(&self) -> Engine {
        Box::new(self.clone())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::SKIP_AHEAD | Capabilities::LEAPFROG
    }

    fn skip_ahead(&mut self, nskip: u64) -> EngineResult<()> {
        if nskip > self.limit {
            return Err(EngineError::InvalidParameters {
                parameter: "nskip".to_string(),
                value: nskip,
                constraint: format!("<= {}", self.limit),
            });
        }
        self.inner.skip_ahead(nskip)
    }

    fn leapfrog(&mut self, _rank: usize, total: usize) -> EngineResult<()> {
        Err(EngineError::InvalidConfiguration {
            field: "total".to_string(),
            reason: format!("cannot interleave {} streams", total),
        })
    }
}

#[test]
fn test_skip_ahead_streams_start_at_configured_positions() {
    init_logging();
    let mut base = Mcg59::new(2023);
    let reference = draws(&mut base, 20);

    let engine = Mcg59::new(2023);
    let mut set = split(
        &engine,
        Technique::SkipAhead {
            skip_counts: vec![0, 5, 10],
        },
    )
    .expect("mcg59 skips ahead");

    assert_eq!(set[0].next_u64(), reference[0]);
    assert_eq!(set[1].next_u64(), reference[5]);
    assert_eq!(set[2].next_u64(), reference[10]);
}

#[test]
fn test_leapfrog_streams_interleave_exactly() {
    init_logging();
    let n = 3;
    let per_stream = 25;

    let mut base = Mcg59::new(99);
    let reference = draws(&mut base, n * per_stream);

    let engine = Mcg59::new(99);
    let mut set = split(&engine, Technique::Leapfrog { streams: n }).expect("mcg59 leapfrogs");

    for i in 0..n {
        let drawn = draws(&mut set[i], per_stream);
        for (k, value) in drawn.iter().enumerate() {
            assert_eq!(*value, reference[k * n + i], "stream {} draw {}", i, k);
        }
    }
}

#[test]
fn test_leapfrog_streams_partition_the_sequence() {
    let n = 4;
    let per_stream = 50;
    let engine = CounterEngine::new(5, 0);
    let mut set = split(&engine, Technique::Leapfrog { streams: n }).unwrap();

    let mut all: Vec<u64> = Vec::new();
    for stream in set.iter_mut() {
        all.extend(draws(stream, per_stream));
    }
    all.sort_unstable();

    let mut expected: Vec<u64> = (0..(n * per_stream) as u64)
        .map(|p| CounterEngine::value_at(5, p))
        .collect();
    expected.sort_unstable();
    assert_eq!(all, expected);
}

#[test]
fn test_family_growth_keeps_prefix() {
    init_logging();
    let family = Xoshiro256Family::new(314);

    let mut small = split(&family, Technique::Family { streams: 2 }).unwrap();
    let mut large = split(&family, Technique::Family { streams: 5 }).unwrap();

    for i in 0..2 {
        assert_eq!(draws(&mut small[i], 40), draws(&mut large[i], 40));
    }
}

#[test]
fn test_family_growth_after_refresh_keeps_prefix() {
    let family = Xoshiro256Family::new(314);
    let mut reference = split(&family, Technique::Family { streams: 5 }).unwrap();

    let small = split(&family, Technique::Family { streams: 2 }).unwrap();
    let grown = small.refresh(&ConsumptionReport::new(2)).unwrap();
    let mut large = split(grown.as_ref(), Technique::Family { streams: 5 }).unwrap();

    for i in 0..5 {
        assert_eq!(draws(&mut reference[i], 10), draws(&mut large[i], 10));
    }
}

#[test]
fn test_family_split_on_plain_engine_fails_without_side_effect() {
    init_logging();
    let mut engine = Mcg59::new(7);
    let untouched = engine.clone();

    let err = split(&engine, Technique::Family { streams: 2 }).unwrap_err();
    match err {
        EngineError::NotSupported {
            engine: name,
            technique,
            ..
        } => {
            assert_eq!(name, "mcg59");
            assert_eq!(technique, TechniqueKind::Family);
        }
        other => panic!("unexpected error: {}", other),
    }

    assert_eq!(engine, untouched);
    assert_eq!(engine.next_u64(), untouched.clone().next_u64());
}

#[test]
fn test_family_capacity_check() {
    let family = Xoshiro256Family::with_max_streams(1, 4);
    assert!(split(&family, Technique::Family { streams: 4 }).is_ok());

    let err = split(&family, Technique::Family { streams: 5 }).unwrap_err();
    assert!(err.is_not_supported());
}

#[test]
fn test_skip_ahead_refresh_continues_last_stream() {
    init_logging();
    for consumed in [0usize, 1, 3, 17] {
        let engine = Mcg59::new(55);
        let mut set = split(
            &engine,
            Technique::SkipAhead {
                skip_counts: vec![0, 5, 10],
            },
        )
        .unwrap();

        for stream in set.iter_mut() {
            draws(stream, consumed);
        }
        let mut last = set[2].clone_engine();

        let mut next = set.refresh(&ConsumptionReport::new(3)).unwrap();
        assert_eq!(draws(next.as_mut(), 5), draws(last.as_mut(), 5));
    }
}

#[test]
fn test_leapfrog_refresh_advances_by_max_consumed() {
    let engine = CounterEngine::new(12, 0);
    let mut set = split(&engine, Technique::Leapfrog { streams: 3 }).unwrap();

    let mut report = ConsumptionReport::new(3);
    for (i, stream) in set.iter_mut().enumerate() {
        let n = 2 * (i as u64 + 1);
        draws(stream, n as usize);
        report.record(i, n).unwrap();
    }

    let mut next = set.refresh(&report).unwrap();
    assert_eq!(next.next_u64(), CounterEngine::value_at(12, 6));
    assert!(next.has_support(TechniqueKind::Leapfrog));
}

#[test]
fn test_family_refresh_continues_sub_streams() {
    let family = Xoshiro256Family::new(2718);
    let mut first = split(&family, Technique::Family { streams: 2 }).unwrap();

    let mut expected = first[0].clone_engine();
    draws(&mut first[0], 3);
    let expected_next = draws(expected.as_mut(), 4)[3];

    let family = first.refresh(&ConsumptionReport::from_counts(vec![3, 0])).unwrap();
    assert_eq!(family.as_family().map(|f| f.num_streams()), Some(2));

    let mut second = split(family.as_ref(), Technique::Family { streams: 2 }).unwrap();
    assert_eq!(second[0].next_u64(), expected_next);
}

#[test]
fn test_failed_skip_aborts_whole_split() {
    let engine = LimitedSkip {
        inner: CounterEngine::new(0, 0),
        limit: 8,
    };
    let err = split(
        &engine,
        Technique::SkipAhead {
            skip_counts: vec![0, 4, 8, 12],
        },
    )
    .unwrap_err();

    assert!(err.is_not_supported());
    assert!(err.to_string().contains("limited-skip"));
}

#[test]
fn test_reposition_failures_surface_as_not_supported() {
    let engine = BoundedSkip {
        inner: CounterEngine::new(0, 0),
        limit: 4,
    };

    let err = split(
        &engine,
        Technique::SkipAhead {
            skip_counts: vec![0, 8],
        },
    )
    .unwrap_err();
    match err {
        EngineError::NotSupported {
            engine: name,
            technique,
            reason,
        } => {
            assert_eq!(name, "bounded-skip");
            assert_eq!(technique, TechniqueKind::SkipAhead);
            assert!(reason.contains("nskip"), "reason: {}", reason);
        }
        other => panic!("unexpected error: {}", other),
    }

    let err = split(&engine, Technique::Leapfrog { streams: 2 }).unwrap_err();
    assert!(err.is_not_supported());
    assert!(matches!(
        err,
        EngineError::NotSupported {
            technique: TechniqueKind::Leapfrog,
            ..
        }
    ));
}

#[test]
fn test_capability_mismatch_is_reported_per_technique() {
    let engine = LimitedSkip {
        inner: CounterEngine::new(0, 0),
        limit: 8,
    };
    let err = split(&engine, Technique::Leapfrog { streams: 2 }).unwrap_err();
    assert_eq!(
        err,
        EngineError::NotSupported {
            engine: "limited-skip",
            technique: TechniqueKind::Leapfrog,
            reason: "capability not advertised by the engine".to_string(),
        }
    );
}

#[test]
fn test_streams_are_independent_copies() {
    let engine = CounterEngine::new(3, 0);
    let mut set = split(
        &engine,
        Technique::SkipAhead {
            skip_counts: vec![0, 0],
        },
    )
    .unwrap();

    draws(&mut set[0], 10);
    assert_eq!(set[1].next_u64(), CounterEngine::value_at(3, 0));
}
