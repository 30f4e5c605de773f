//! End-to-end runs of every algorithm against bit-string oracles.

use rand::rngs::StdRng;
use rand::SeedableRng;
use u_blackbox::bitstrings::{BitStringSpace, LeadingOnes, RandomBits, SingleBitFlip, TwoMax, UniformCrossover, ZeroCount};
use u_blackbox::ea::{EaConfig, EaWithFitness};
use u_blackbox::eda::{EdaConfig, EdaWithFitness, HybridEdaConfig, HybridEdaWithFitness};
use u_blackbox::fitness::{DirectFitness, FrequencyFitness, RankFitness};
use u_blackbox::ma::{MaConfig, Memetic};
use u_blackbox::model::UnivariateBitModel;
use u_blackbox::process::{BlackBoxProcess, BudgetConfig, BudgetProcess, Evaluator, ObjectiveFunction, ProcessParts};
use u_blackbox::setup::Solve;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

type Process<F> = BudgetProcess<BitStringSpace, RandomBits, SingleBitFlip, UniformCrossover, F>;

fn process<F: ObjectiveFunction<Vec<bool>>>(n: usize, objective: F, config: &BudgetConfig) -> Process<F> {
    BudgetProcess::new(BitStringSpace::new(n), RandomBits, SingleBitFlip, UniformCrossover, objective, config).unwrap()
}

// ===========================================================================
// A strict oracle: evaluating after termination is a bug
// ===========================================================================

struct StrictEvaluator {
    max_fes: u64,
    consumed: u64,
}

impl Evaluator<Vec<bool>> for StrictEvaluator {
    fn evaluate(&mut self, point: &Vec<bool>) -> f64 {
        assert!(
            self.consumed < self.max_fes,
            "evaluation after the termination predicate switched to true"
        );
        self.consumed += 1;
        LeadingOnes.evaluate(point)
    }

    fn should_terminate(&self) -> bool {
        self.consumed >= self.max_fes
    }
}

struct StrictProcess {
    rng: StdRng,
    space: BitStringSpace,
    evaluator: StrictEvaluator,
}

impl StrictProcess {
    fn new(n: usize, max_fes: u64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            space: BitStringSpace::new(n),
            evaluator: StrictEvaluator { max_fes, consumed: 0 },
        }
    }
}

impl BlackBoxProcess for StrictProcess {
    type Point = Vec<bool>;
    type Rng = StdRng;
    type Space = BitStringSpace;
    type Nullary = RandomBits;
    type Unary = SingleBitFlip;
    type Binary = UniformCrossover;
    type Evaluator = StrictEvaluator;

    fn parts(&mut self) -> ProcessParts<'_, Self> {
        ProcessParts {
            rng: &mut self.rng,
            space: &self.space,
            nullary: &RandomBits,
            unary: &SingleBitFlip,
            binary: &UniformCrossover,
            evaluator: &mut self.evaluator,
        }
    }
}

/// Runs every algorithm variant on `process`.
fn run_all<P: BlackBoxProcess<Point = Vec<bool>>>(variant: usize, n: usize, process: &mut P) {
    match variant {
        0 => {
            let config = EaConfig::default().with_mu(4).with_lambda(6).with_crossover_rate(0.3);
            EaWithFitness::new(config, DirectFitness).unwrap().solve(process);
        }
        1 => {
            let config = EaConfig::default().with_mu(1).with_lambda(1).with_crossover_rate(0.0);
            EaWithFitness::new(config, FrequencyFitness::new()).unwrap().solve(process);
        }
        2 => {
            let config = EdaConfig::default().with_mu(3).with_lambda(9);
            EdaWithFitness::new(config, UnivariateBitModel::new(n), RankFitness::new())
                .unwrap()
                .solve(process);
        }
        3 => {
            let config = HybridEdaConfig::default().with_mu(2).with_lambda(5).with_max_ls_steps(3);
            HybridEdaWithFitness::new(config, UnivariateBitModel::new(n), DirectFitness, &SingleBitFlip)
                .unwrap()
                .solve(process);
        }
        4 => {
            let config = MaConfig::default().with_mu(3).with_lambda(3).with_max_ls_steps(5);
            Memetic::new(config, &SingleBitFlip, &UniformCrossover).unwrap().solve(process);
        }
        _ => {
            let config = MaConfig::default().with_mu(2).with_lambda(4).with_clearing(true);
            Memetic::new(config, &SingleBitFlip, &UniformCrossover).unwrap().solve(process);
        }
    }
}

const VARIANTS: usize = 6;

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn ea_finds_all_ones_within_200_evaluations() {
    init_tracing();
    let config = BudgetConfig::default().with_max_fes(200).with_seed(42).with_trace(true);
    let mut p = process(8, ZeroCount, &config);
    let ea_config = EaConfig::default().with_mu(4).with_lambda(4).with_crossover_rate(0.5);
    EaWithFitness::new(ea_config, DirectFitness).unwrap().solve(&mut p);

    assert_eq!(p.best_quality(), Some(0.0));
    assert_eq!(p.best_point(), Some(&vec![true; 8]));

    // best-so-far per generation (8 initial FEs, then 4 per generation)
    let trace = p.evaluator().trace().unwrap();
    let mut best = f64::INFINITY;
    let mut per_generation = Vec::new();
    for chunk in std::iter::once(&trace[..trace.len().min(8)]).chain(trace.get(8..).unwrap_or(&[]).chunks(4)) {
        best = chunk.iter().copied().fold(best, f64::min);
        per_generation.push(best);
    }
    assert!(per_generation.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(per_generation.last().copied(), p.best_quality());
    assert_eq!(trace.len() as u64, p.consumed_fes());
}

#[test]
fn no_evaluation_after_termination() {
    for variant in 0..VARIANTS {
        for max_fes in [1, 2, 13, 64, 500] {
            let mut p = StrictProcess::new(20, max_fes, max_fes + variant as u64);
            run_all(variant, 20, &mut p);
            assert_eq!(p.evaluator.consumed, max_fes, "variant {variant}, budget {max_fes}");
        }
    }
}

#[test]
fn runs_are_reproducible() {
    for variant in 0..VARIANTS {
        let run = || {
            let config = BudgetConfig::default()
                .with_max_fes(800)
                .with_goal(-1.0)
                .with_seed(1_234)
                .with_trace(true);
            let mut p = process(24, TwoMax, &config);
            run_all(variant, 24, &mut p);
            (p.evaluator().trace().unwrap().to_vec(), p.best_point().cloned())
        };
        assert_eq!(run(), run(), "variant {variant}");
    }
}

#[test]
fn different_seeds_explore_differently() {
    let run = |seed| {
        let config = BudgetConfig::default().with_max_fes(300).with_seed(seed).with_trace(true);
        let mut p = process(64, ZeroCount, &config);
        run_all(0, 64, &mut p);
        p.evaluator().trace().unwrap().to_vec()
    };
    assert_ne!(run(1), run(2));
}

#[test]
fn clearing_restarts_on_two_quality_landscape() {
    init_tracing();
    // only two qualities exist, so clearing leaves at most two parents and
    // local search drives everyone into the same one
    let parity = |x: &Vec<bool>| (x.iter().filter(|&&b| b).count() % 2) as f64;
    let config = BudgetConfig::default().with_max_fes(5_000).with_goal(-1.0).with_seed(99);
    let mut p = process(10, parity, &config);
    let ma = MaConfig::default().with_mu(2).with_lambda(3).with_clearing(true);
    let stats = Memetic::new(ma, &SingleBitFlip, &UniformCrossover).unwrap().solve(&mut p);

    assert!(stats.restarts >= 1);
    assert!(stats.generations <= 50 * (stats.restarts + 1));
    assert_eq!(p.best_quality(), Some(0.0));
}

#[test]
fn plain_memetic_never_restarts() {
    let config = BudgetConfig::default().with_max_fes(3_000).with_goal(-1.0).with_seed(5);
    let mut p = process(16, LeadingOnes, &config);
    let ma = MaConfig::default().with_mu(2).with_lambda(3);
    let stats = Memetic::new(ma, &SingleBitFlip, &UniformCrossover).unwrap().solve(&mut p);

    assert_eq!(stats.restarts, 0);
    assert!(stats.generations > 0);
    assert_eq!(p.consumed_fes(), 3_000);
}

#[test]
fn memetic_result_is_local_optimum() {
    // local search reaches all zeros or all ones long before the budget
    // ends, and both are local optima of TwoMax
    let config = BudgetConfig::default().with_max_fes(4_000).with_seed(17);
    let mut p = process(20, TwoMax, &config);
    let ma = MaConfig::default().with_mu(3).with_lambda(3);
    Memetic::new(ma, &SingleBitFlip, &UniformCrossover).unwrap().solve(&mut p);

    let best = p.best_point().unwrap();
    let quality = TwoMax.evaluate(best);
    for i in 0..best.len() {
        let mut neighbor = best.clone();
        neighbor[i] = !neighbor[i];
        assert!(TwoMax.evaluate(&neighbor) >= quality);
    }
}

#[test]
fn time_budget_stops_a_run() {
    let config = BudgetConfig::default().without_max_fes().with_max_time_ms(50).with_goal(-1.0).with_seed(3);
    let mut p = process(32, TwoMax, &config);
    let ea = EaConfig::default().with_mu(8).with_lambda(8).with_crossover_rate(0.1);
    let stats = EaWithFitness::new(ea, FrequencyFitness::new()).unwrap().solve(&mut p);

    assert!(p.consumed_fes() > 0);
    assert!(stats.generations > 0);
}
