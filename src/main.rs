use dotenv::dotenv;
use gladiator::{
    Action, AgentConfig, ArenaEnv, ChasePolicy, EnvConfig, KinematicPhysics, Policy, RandomPolicy,
};
use std::env;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn get_env_var_usize(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|val| val.parse::<usize>().ok())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gladiator=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn make_policy(name: &str) -> Box<dyn Policy> {
    match name {
        "random" => Box::new(RandomPolicy),
        _ => Box::new(ChasePolicy::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging();

    let episodes = get_env_var_usize("ARENA_EPISODES").unwrap_or(10);
    let max_steps = get_env_var_usize("ARENA_MAX_STEPS").unwrap_or(500);
    let policy_name = env::var("ARENA_POLICY").unwrap_or_else(|_| "chase".to_string());
    let opponent_name = env::var("ARENA_OPPONENT").unwrap_or_else(|_| "chase".to_string());

    let config = EnvConfig {
        max_steps,
        ..EnvConfig::default()
    };
    let mut env = ArenaEnv::new(KinematicPhysics::new(), config);
    let left = env.add_agent(AgentConfig::default());
    let right = env.add_agent(AgentConfig::default());
    let mut policies: Vec<Box<dyn Policy>> =
        vec![make_policy(&policy_name), make_policy(&opponent_name)];

    tracing::info!(
        episodes,
        max_steps,
        policy = %policy_name,
        opponent = %opponent_name,
        "starting arena"
    );

    for episode in 0..episodes {
        let mut observations = env.reset_all();
        loop {
            let actions: Vec<Action> = policies
                .iter_mut()
                .zip(observations.iter())
                .map(|(policy, obs)| policy.act(obs))
                .collect();
            let results = env.step(&actions)?;
            observations = results.iter().map(|r| r.observation).collect();

            if results.iter().any(|r| r.done) {
                for (id, result) in [left, right].iter().zip(results.iter()) {
                    tracing::info!(
                        episode,
                        agent = %id,
                        steps = result.info.steps,
                        episode_return = result.info.episode_return,
                        won = result.info.won,
                        died = result.info.died,
                        fell = result.info.fell,
                        timed_out = result.info.timed_out,
                        "episode finished"
                    );
                }
                break;
            }
        }
    }

    Ok(())
}
