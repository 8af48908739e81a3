//! The training loop: burn-in, epsilon-greedy rollouts, replay-driven
//! updates against a frozen target snapshot, and greedy evaluation.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{EnvConfig, TrainConfig};
use crate::error::EnvError;
use crate::grid::action::Action;
use crate::grid::reward::RewardFunction;
use crate::grid::state::{Cell, GridState};
use crate::grid::transition::{cyclic_obstacle_schedule, ObstacleSchedule, TransitionFunction};
use crate::policy::trait_::{argmax, QFunction, TrainingTarget};
use crate::training::explore::{
    epsilon_greedy, free_cells, linear_decay_epsilon, random_action, sample_start,
};
use crate::training::metrics::{EpisodeRecord, EvalReport, TrainingLog};
use crate::training::replay::{stack_observations, ExperienceReplay, Transition};

/// Drives episodes through the environment and trains a [`QFunction`]
/// against them.
///
/// Owns the transition function, the reward function, the replay buffer,
/// and the single seedable RNG behind every random draw (phase redraws,
/// wind engagement, exploration, replay sampling, start sampling), so a
/// seed fixes the whole run.
#[derive(Debug)]
pub struct Trainer {
    env: EnvConfig,
    train: TrainConfig,
    transition: TransitionFunction,
    reward: RewardFunction,
    replay: ExperienceReplay,
    starts: Vec<Cell>,
    log: TrainingLog,
    rng: StdRng,
}

impl Trainer {
    /// Creates a trainer over the production cyclic obstacle schedule.
    pub fn new(env: EnvConfig, train: TrainConfig, seed: u64) -> Result<Self, EnvError> {
        Self::with_schedule(env, train, cyclic_obstacle_schedule, seed)
    }

    /// Creates a trainer with a custom obstacle schedule.
    pub fn with_schedule(
        env: EnvConfig,
        train: TrainConfig,
        schedule: ObstacleSchedule,
        seed: u64,
    ) -> Result<Self, EnvError> {
        env.validate()?;
        assert!(
            train.target_sync_every > 0,
            "target sync cadence must be positive"
        );
        let transition =
            TransitionFunction::new(env.width, env.height, schedule, env.wind_period, env.wind_prob);
        let reward = RewardFunction::constant_goals(
            env.penalty,
            env.goal_1,
            env.goal_1_reward,
            env.goal_2,
            env.goal_2_reward,
        )?;
        let replay = ExperienceReplay::new(train.replay_capacity);
        let starts = free_cells(env.width, env.height, &env.obstacles);
        Ok(Self {
            env,
            train,
            transition,
            reward,
            replay,
            starts,
            log: TrainingLog::new(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// The per-episode reward/length log.
    pub fn log(&self) -> &TrainingLog {
        &self.log
    }

    /// The replay buffer.
    pub fn replay(&self) -> &ExperienceReplay {
        &self.replay
    }

    /// The environment configuration.
    pub fn env_config(&self) -> &EnvConfig {
        &self.env
    }

    /// Resets the reward timer and the wind process, samples a fresh
    /// start cell, and returns the initial context window (the start
    /// state repeated three times).
    fn start_episode(&mut self) -> [GridState; 3] {
        self.reward.reset();
        self.transition.reset_wind();
        let start = sample_start(&self.starts, &mut self.rng);
        let state = GridState::new(start, self.env.obstacles.clone());
        [state.clone(), state.clone(), state]
    }

    /// One environment step from `context`: transition, reward, replay
    /// append. Returns the step reward and the advanced context, or
    /// `None` when the episode reached a goal.
    fn step_and_store(
        &mut self,
        context: [GridState; 3],
        action: Action,
    ) -> Result<(f64, Option<[GridState; 3]>), EnvError> {
        let t = self.reward.t();
        let phase = self.transition.phase(t, &mut self.rng);
        let next = self.transition.step(&context[2], action, t, &mut self.rng)?;
        let reward = self.reward.evaluate(&context[2], action, &next);
        let next_phase = self.transition.phase(self.reward.t(), &mut self.rng);
        let terminal = self.reward.terminal();
        let transition = Transition {
            context,
            action,
            reward,
            next_state: next,
            phase,
            next_phase,
            terminal,
        };
        let next_context = if terminal {
            None
        } else {
            Some(transition.next_context())
        };
        self.replay.add(transition);
        Ok((reward, next_context))
    }

    /// Rolls out `burn_in_episodes` full episodes with a uniform-random
    /// policy to populate the replay buffer. No update happens here.
    pub fn burn_in(&mut self) -> Result<(), EnvError> {
        for _ in 0..self.train.burn_in_episodes {
            let mut context = self.start_episode();
            for _ in 0..self.train.max_episode_length {
                let action = random_action(&mut self.rng);
                let (_, next) = self.step_and_store(context, action)?;
                match next {
                    Some(c) => context = c,
                    None => break,
                }
            }
        }
        info!(
            "burn-in complete: {} episodes, {} transitions stored",
            self.train.burn_in_episodes,
            self.replay.len()
        );
        Ok(())
    }

    /// Runs burn-in followed by the full training schedule.
    ///
    /// Per episode: epsilon-greedy rollout (epsilon linearly decayed over
    /// `epsilon_decay_episodes`), one batch update from replay against
    /// the frozen target snapshot, a policy state reset before and after
    /// the update, and a target refresh every `target_sync_every`
    /// episodes.
    pub fn train(&mut self, policy: &mut dyn QFunction) -> Result<(), EnvError> {
        self.burn_in()?;
        let mut target = policy.snapshot();

        for episode in 0..self.train.n_episodes {
            let epsilon = linear_decay_epsilon(
                episode,
                self.train.epsilon_decay_episodes,
                self.train.epsilon_low,
                self.train.epsilon_high,
            );
            let mut context = self.start_episode();
            policy.reset();
            let mut total_reward = 0.0;
            let mut length = 0u64;

            for _ in 0..self.train.max_episode_length {
                let phase = self.transition.phase(self.reward.t(), &mut self.rng);
                let values = policy.forward(&stack_observations(&context), phase.angle());
                let action = epsilon_greedy(&values, epsilon, &mut self.rng);
                let (reward, next) = self.step_and_store(context, action)?;
                total_reward += reward;
                length += 1;
                match next {
                    Some(c) => context = c,
                    None => break,
                }
            }

            // the windowed report covers the episodes before this one,
            // so it is emitted before the current record lands
            if self.train.report_every > 0 && episode > 0 && episode % self.train.report_every == 0
            {
                if let Some((reward, len)) =
                    self.log.window_average(self.train.report_every as usize)
                {
                    info!(
                        "episode {episode}: avg reward {reward:.2}, avg length {len:.1}, epsilon {epsilon:.3}"
                    );
                }
            }
            self.log.push(EpisodeRecord {
                total_reward,
                length,
            });
            debug!("episode {episode}: reward {total_reward:.1}, length {length}");

            policy.reset();
            self.learn_step(policy, target.as_mut());
            policy.reset();

            if episode > 0 && episode % self.train.target_sync_every == 0 {
                target = policy.snapshot();
            }
        }
        Ok(())
    }

    /// One batch update: sample from replay, build bootstrapped targets
    /// with the frozen target function, and hand them to the policy.
    ///
    /// Only the taken action's entry changes; the rest keep the online
    /// prediction so the update moves a single action value per sample.
    fn learn_step(&mut self, policy: &mut dyn QFunction, target: &mut dyn QFunction) {
        let gamma = self.train.gamma;
        let batch = self.replay.sample_batch(self.train.batch_size, &mut self.rng);
        let mut updates = Vec::with_capacity(batch.len());
        for sample in batch {
            let input = sample.input();
            let phase = sample.phase.angle();
            let mut values = policy.forward(&input, phase);
            let next_values = target.forward(&sample.next_input(), sample.next_phase.angle());
            let bootstrap = next_values[argmax(&next_values)];
            let continuation = if sample.terminal { 0.0 } else { 1.0 };
            values[sample.action.index()] = sample.reward + gamma * bootstrap * continuation;
            updates.push(TrainingTarget {
                input,
                phase,
                values,
            });
        }
        target.reset();
        policy.update(&updates);
    }

    /// Greedy evaluation: `n_rollouts` rollouts from the fixed evaluation
    /// start, always taking the highest-valued action, truncated at the
    /// episode step budget. Nothing is stored in replay.
    pub fn evaluate(
        &mut self,
        policy: &mut dyn QFunction,
        n_rollouts: usize,
    ) -> Result<EvalReport, EnvError> {
        let mut total_reward = 0.0;
        let mut total_steps = 0u64;
        let mut n_truncated = 0usize;

        for _ in 0..n_rollouts {
            self.reward.reset();
            self.transition.reset_wind();
            policy.reset();
            let start = GridState::new(self.env.eval_start, self.env.obstacles.clone());
            let mut context = [start.clone(), start.clone(), start];
            let mut steps = 0u64;

            while !self.reward.terminal() {
                if steps >= self.train.max_episode_length {
                    n_truncated += 1;
                    break;
                }
                let phase = self.transition.phase(self.reward.t(), &mut self.rng);
                let values = policy.forward(&stack_observations(&context), phase.angle());
                let action = Action::all()[argmax(&values)];
                let t = self.reward.t();
                let next = self.transition.step(&context[2], action, t, &mut self.rng)?;
                total_reward += self.reward.evaluate(&context[2], action, &next);
                steps += 1;
                context = [context[1].clone(), context[2].clone(), next];
            }
            total_steps += steps;
        }

        let n = n_rollouts.max(1) as f64;
        Ok(EvalReport {
            n_rollouts,
            mean_reward: total_reward / n,
            mean_length: total_steps as f64 / n,
            n_truncated,
        })
    }
}
