//! Property tests for the shallow merge and flag precedence

use drl_lab_hparams::{
    AgentOverride, EnvOverride, FlagOverrides, HparamOverrides, HparamSet, NnOverride, RunOverride,
};
use proptest::prelude::*;

fn arb_overrides() -> impl Strategy<Value = HparamOverrides> {
    (
        proptest::option::of("[A-Za-z]{1,12}-v[0-9]"),
        proptest::option::of(1u64..1_000_000),
        proptest::option::of(1u32..64),
        proptest::option::of(prop_oneof![Just("Adam".to_string()), Just("SGD".to_string())]),
        proptest::option::of(0.0f64..1.0),
        proptest::option::of(1u32..512),
    )
        .prop_map(|(env_id, max_steps, num_runs, optimizer, reward_decay, batch_size)| {
            HparamOverrides {
                env: EnvOverride { env_id, ..EnvOverride::default() },
                run: RunOverride { max_steps, num_runs, ..RunOverride::default() },
                nn: NnOverride { optimizer, ..NnOverride::default() },
                agent: AgentOverride { reward_decay, batch_size, ..AgentOverride::default() },
            }
        })
}

proptest! {
    #[test]
    fn prop_present_keys_win_absent_keys_keep_defaults(overrides in arb_overrides()) {
        let defaults = HparamSet::default();
        let merged = defaults.clone().merged_with(&overrides);

        prop_assert_eq!(&merged.env.env_id, overrides.env.env_id.as_ref().unwrap_or(&defaults.env.env_id));
        prop_assert_eq!(merged.run.max_steps, overrides.run.max_steps.unwrap_or(defaults.run.max_steps));
        prop_assert_eq!(merged.run.num_runs, overrides.run.num_runs.unwrap_or(defaults.run.num_runs));
        prop_assert_eq!(&merged.nn.optimizer, overrides.nn.optimizer.as_ref().unwrap_or(&defaults.nn.optimizer));
        prop_assert_eq!(merged.agent.batch_size, overrides.agent.batch_size.unwrap_or(defaults.agent.batch_size));

        // Keys no override strategy touches stay at their defaults.
        prop_assert_eq!(&merged.env.observation, &defaults.env.observation);
        prop_assert_eq!(&merged.nn.layers, &defaults.nn.layers);
        prop_assert_eq!(merged.agent.target_q_network_update_freq, defaults.agent.target_q_network_update_freq);
        prop_assert!(merged.env.extra.is_empty());
    }

    #[test]
    fn prop_flags_beat_file(overrides in arb_overrides(), env_id in "[a-z]{3,8}", max_steps in 1u64..10_000) {
        let flags = FlagOverrides {
            env_id: Some(env_id.clone()),
            max_steps: Some(max_steps),
            ..FlagOverrides::default()
        };
        let resolved = flags.apply(HparamSet::default().merged_with(&overrides));

        prop_assert_eq!(resolved.env.env_id, env_id);
        prop_assert_eq!(resolved.run.max_steps, max_steps);
    }

    #[test]
    fn prop_flag_application_is_idempotent(overrides in arb_overrides(), save in any::<bool>(), flow in any::<bool>()) {
        let flags = FlagOverrides { save, obs_opt_flow: flow, verbose: true, ..FlagOverrides::default() };
        let once = flags.apply(HparamSet::default().merged_with(&overrides));
        let twice = flags.apply(once.clone());
        prop_assert_eq!(once, twice);
    }
}
