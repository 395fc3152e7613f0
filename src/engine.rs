//! The evolutionary search engine: population lifecycle, parallel offspring
//! generation, acceptance, culling, termination, progress reporting, and
//! signal handling.
//!
//! This is an elitist, truncation-selection evolutionary strategy: each
//! generation keeps only offspring strictly better than the *worst* member
//! of the current population, deduplicates by solution identity, and
//! replaces the whole population only when it can do so with a strictly
//! better best-of-generation. There is no mutation operator distinct from
//! crossover and no tournament selection: [`crate::operators::crossover`]
//! is both.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::error::{CvrpError, CvrpResult};
use crate::instance::Instance;
use crate::operators::{construct, crossover};
use crate::solution::Solution;

/// Tunable engine parameters. Defaults match the reference configuration;
/// callers that need a faster smoke run (tests, small instances) should
/// shrink `initial_population`/`max_generations` rather than change the
/// acceptance policy itself.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Hard cap on generations.
    pub max_generations: u64,
    /// Total offspring budget per generation, across the whole population.
    pub max_mutations_per_generation: u64,
    /// Per-parent cap on offspring attempts within a generation.
    pub max_mutations_per_subject: u64,
    /// Seeded random solutions to attempt at initialization.
    pub initial_population: u64,
    /// Size cap on the population after culling.
    pub max_population: usize,
    /// Convergence streak (generations with no improvement) to stop early.
    pub max_contiguous_null_generations: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_generations: 100,
            max_mutations_per_generation: 10_000_000_000,
            max_mutations_per_subject: 100_000,
            initial_population: 100_000,
            max_population: 10_000_000,
            max_contiguous_null_generations: 3,
        }
    }
}

/// The evolutionary engine, bound to one instance and one configuration.
pub struct Engine {
    instance: Arc<Instance>,
    config: EngineConfig,
    hide_progress: bool,
    bench: bool,
}

impl Engine {
    /// Builds an engine for `instance`. Reads the `HIDE_PROGRESS` and
    /// `BENCH` environment toggles once, at construction time.
    pub fn new(instance: Arc<Instance>, config: EngineConfig) -> Self {
        Engine {
            instance,
            config,
            hide_progress: std::env::var_os("HIDE_PROGRESS").is_some(),
            bench: std::env::var_os("BENCH").is_some(),
        }
    }

    /// Runs the full search and returns the best solution found.
    ///
    /// Fails with [`CvrpError::DegeneratePopulation`] if every attempted
    /// initial construction collided in the deduplicating population set
    /// (vanishingly unlikely for any instance with more than a handful of
    /// clients, but possible for a single-client instance whose only
    /// construction is a fixed point).
    pub fn run(&self) -> CvrpResult<Solution> {
        self.run_tracked().map(|(solution, _generations_run)| solution)
    }

    /// Same search as [`Engine::run`], additionally returning the number of
    /// generation-loop iterations executed. Exposed so tests can pin down
    /// the exact termination point; `run` discards the count.
    fn run_tracked(&self) -> CvrpResult<(Solution, u64)> {
        let stop = Arc::new(AtomicBool::new(false));
        let handler_stop = Arc::clone(&stop);
        // Best-effort: a second Engine::run in the same process would
        // overwrite this handler, since ctrlc only supports one globally.
        let _ = ctrlc::set_handler(move || {
            handler_stop.store(true, Ordering::SeqCst);
        });

        let mut population = self.initialize_population();
        if population.is_empty() {
            return Err(CvrpError::DegeneratePopulation);
        }
        log::info!(
            "initialized population: {} realized / {} requested",
            population.len(),
            self.config.initial_population
        );

        let progress = self.progress_bar();
        let mut null_generations: u32 = 0;
        let mut generations_run: u64 = 0;

        for generation in 0..self.config.max_generations {
            if stop.load(Ordering::SeqCst) {
                break;
            }
            generations_run += 1;

            let best_cost = population.iter().next().expect("non-empty population").cost();
            let threshold = population
                .iter()
                .next_back()
                .expect("non-empty population")
                .cost();

            let mutations_per_subject = (self.config.max_mutations_per_generation
                / population.len() as u64)
                .min(self.config.max_mutations_per_subject);

            if let Some(bar) = &progress {
                bar.set_position(generation);
                bar.set_message(format!(
                    "population={} score={:.1} null_rounds={}",
                    population.len(),
                    best_cost,
                    null_generations
                ));
            }

            let contiguous: Vec<&Solution> = population.iter().collect();
            let working: Mutex<BTreeSet<Solution>> = Mutex::new(BTreeSet::new());

            let num_workers = rayon::current_num_threads().max(1);
            let parallel_outer = contiguous.len() > num_workers * 20;

            if parallel_outer {
                contiguous.par_iter().for_each(|subject| {
                    for _ in 0..mutations_per_subject {
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }
                        self.attempt_offspring(subject, threshold, &working);
                    }
                });
            } else {
                for subject in &contiguous {
                    (0..mutations_per_subject).into_par_iter().for_each(|_| {
                        if stop.load(Ordering::Relaxed) {
                            return;
                        }
                        self.attempt_offspring(subject, threshold, &working);
                    });
                }
            }

            let generation_set = working.into_inner().expect("mutex not poisoned");
            let accepted = generation_set
                .iter()
                .next()
                .map(|best| best.cost() < best_cost)
                .unwrap_or(false);

            if accepted {
                let new_best = generation_set.iter().next().expect("checked non-empty").cost();
                log::info!("generation {generation}: accepted, best cost {best_cost:.3} -> {new_best:.3}");
                population = generation_set;
                null_generations = 0;
            } else {
                null_generations += 1;
                if null_generations == self.config.max_contiguous_null_generations && !self.bench {
                    log::info!(
                        "generation {generation}: stopping, {null_generations} contiguous null generations"
                    );
                    break;
                }
            }

            if stop.load(Ordering::SeqCst) {
                log::info!("generation {generation}: stopping, signal received");
                break;
            }
        }

        if let Some(bar) = &progress {
            bar.finish_and_clear();
        }

        let best = population.into_iter().next().expect("non-empty population");
        Ok((best, generations_run))
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        if self.hide_progress {
            return None;
        }
        let bar = ProgressBar::new(self.config.max_generations);
        bar.set_style(
            ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    }

    /// Seeds the initial population via parallel randomized greedy
    /// construction, deduplicating by solution identity. Collisions are
    /// dropped silently; the realized population may be smaller than
    /// `initial_population`.
    fn initialize_population(&self) -> BTreeSet<Solution> {
        let instance = Arc::clone(&self.instance);
        (0..self.config.initial_population)
            .into_par_iter()
            .map(|_| {
                construct::construct_random(&instance)
                    .expect("instance client ids are always valid")
            })
            .collect()
    }

    /// One crossover attempt: clone `subject`, mutate, and, if it clears
    /// the threshold gate and is feasible, offer it to the shared working
    /// set. The critical section is the offer itself; cloning and mutating
    /// the offspring happens outside any lock.
    fn attempt_offspring(
        &self,
        subject: &Solution,
        threshold: f64,
        working: &Mutex<BTreeSet<Solution>>,
    ) {
        let mut child = subject.clone();
        crossover(&mut child);

        if child.cost() >= threshold {
            return;
        }
        if !child.is_valid(self.instance.num_clients()) {
            return;
        }

        let mut generation = working.lock().expect("mutex not poisoned");
        if generation.len() < self.config.max_population {
            generation.insert(child);
        } else if let Some(worst) = generation.iter().next_back().cloned() {
            if child < worst {
                generation.remove(&worst);
                generation.insert(child);
            }
        }
    }
}
