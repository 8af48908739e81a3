//! End-to-end walkthrough: train a linear Q-function on the production
//! 12x12 windy grid, then evaluate it greedily.
//!
//! Run with: `cargo run --example train_demo`

use windgrid::{EnvConfig, LinearQ, TrainConfig, Trainer};

fn main() -> Result<(), windgrid::EnvError> {
    let env = EnvConfig::default();
    let (width, height) = (env.width, env.height);
    let train = TrainConfig {
        n_episodes: 2_000,
        burn_in_episodes: 100,
        epsilon_decay_episodes: 1_000,
        target_sync_every: 200,
        report_every: 200,
        ..TrainConfig::default()
    };

    let mut trainer = Trainer::new(env, train, 42)?;
    let mut policy = LinearQ::new(trainer.env_config().context_len(), true, 1e-4);

    println!("training on the {width}x{height} windy grid ...");
    trainer.train(&mut policy)?;

    if let Some((reward, length)) = trainer.log().window_average(200) {
        println!("last 200 episodes: avg reward {reward:.2}, avg length {length:.1}");
    }

    let report = trainer.evaluate(&mut policy, 100)?;
    println!("{report}");
    Ok(())
}
