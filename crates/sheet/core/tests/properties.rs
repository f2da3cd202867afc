use proptest::prelude::*;
use strum::IntoEnumIterator;

use sheet_core::{
    Ability, Character, DerivedValueKind, EffectDomain, EffectsOverlay, Engine, ModifierField,
    Modifiers, PoolKind, Ruleset, SkillFamily, StepDie,
};

// Ranges stay small enough that stability never exceeds its cap:
// ability totals reach at most 15, derived value traits add at most 4.

fn die() -> impl Strategy<Value = StepDie> {
    prop::sample::select(StepDie::LADDER[2..].to_vec())
}

fn any_die() -> impl Strategy<Value = StepDie> {
    prop::sample::select(StepDie::LADDER.to_vec())
}

fn modifiers() -> impl Strategy<Value = Modifiers> {
    (-5..=5, -5..=0, -5..=5, -5..=5, -5..=5).prop_map(
        |(bonus_mod, hindrance_mod, trait_mod, cyber_mod, bio_mod)| Modifiers {
            bonus_mod,
            hindrance_mod,
            trait_mod,
            cyber_mod,
            bio_mod,
        },
    )
}

fn character() -> impl Strategy<Value = Character> {
    let scores = prop::collection::vec((die(), modifiers()), 8);
    let current_dice = prop::collection::vec(prop::option::of(any_die()), 7);
    (scores, current_dice).prop_map(|(scores, current_dice)| {
        let mut character = Character::new(Ruleset::standard());
        for (ability, (die, modifiers)) in Ability::iter().zip(scores) {
            let score = character.abilities.entry(ability).or_default();
            score.die = die;
            score.modifiers = modifiers;
        }
        for (kind, current) in PoolKind::iter().zip(current_dice) {
            character
                .derived_ability_pools
                .entry(kind)
                .or_default()
                .current_die = current;
        }
        character
    })
}

fn ability() -> impl Strategy<Value = Ability> {
    prop::sample::select(Ability::iter().collect::<Vec<_>>())
}

fn value_kind() -> impl Strategy<Value = DerivedValueKind> {
    prop::sample::select(DerivedValueKind::iter().collect::<Vec<_>>())
}

fn pool_kind() -> impl Strategy<Value = PoolKind> {
    prop::sample::select(PoolKind::iter().collect::<Vec<_>>())
}

fn skill_id() -> impl Strategy<Value = String> {
    let ids: Vec<String> = SkillFamily::iter()
        .flat_map(|family| Ruleset::standard().entries(family))
        .map(|(id, _)| id.to_string())
        .collect();
    prop::sample::select(ids)
}

fn overlay() -> impl Strategy<Value = EffectsOverlay> {
    let ability_effects = prop::collection::vec((ability(), 0..=5, -5..=0, 0..=5), 0..4);
    let value_effects = prop::collection::vec((value_kind(), -4..=0, 0..=4), 0..3);
    let pool_effects = prop::collection::vec((pool_kind(), -4..=0, 0..=4), 0..3);
    let skill_effects = prop::collection::vec((skill_id(), 0..=5, -5..=0), 0..4);
    let costs = prop::collection::vec(0..=5, 0..3);
    let limbs = prop::collection::vec(0..=3, 0..3);
    let replaced = any::<bool>();

    (
        ability_effects,
        value_effects,
        pool_effects,
        skill_effects,
        costs,
        limbs,
        replaced,
    )
        .prop_map(
            |(ability_effects, value_effects, pool_effects, skill_effects, costs, limbs, replaced)| {
                let mut overlay = EffectsOverlay::new();
                for (index, (ability, bonus, hindrance, cyber)) in
                    ability_effects.into_iter().enumerate()
                {
                    let name = format!("item{index}");
                    overlay = overlay
                        .with(EffectDomain::Abilities, &name, format!("{ability}.bonusMod"), bonus)
                        .with(EffectDomain::Abilities, &name, format!("{ability}.hindranceMod"), hindrance)
                        .with(EffectDomain::Abilities, &name, format!("{ability}.cyberMod"), cyber);
                }
                for (index, (kind, hindrance, trait_mod)) in value_effects.into_iter().enumerate() {
                    let name = format!("stance{index}");
                    overlay = overlay
                        .with(EffectDomain::DerivedAbilityValues, &name, format!("{kind}.hindranceMod"), hindrance)
                        .with(EffectDomain::DerivedAbilityValues, &name, format!("{kind}.traitMod"), trait_mod);
                }
                for (index, (kind, hindrance, trait_mod)) in pool_effects.into_iter().enumerate() {
                    let name = format!("blessing{index}");
                    overlay = overlay
                        .with(EffectDomain::DerivedAbilityPools, &name, format!("{kind}.hindranceMod"), hindrance)
                        .with(EffectDomain::DerivedAbilityPools, &name, format!("{kind}.traitMod"), trait_mod);
                }
                for (index, (id, bonus, hindrance)) in skill_effects.into_iter().enumerate() {
                    let name = format!("tool{index}");
                    overlay = overlay
                        .with(EffectDomain::Skills, &name, format!("{id}.bonusMod"), bonus)
                        .with(EffectDomain::Skills, &name, format!("{id}.hindranceMod"), hindrance);
                }
                for (index, cost) in costs.into_iter().enumerate() {
                    overlay = overlay.with(
                        EffectDomain::StabilityCosts,
                        format!("implant{index}"),
                        "stabilityCost",
                        cost,
                    );
                }
                for (index, penalty) in limbs.into_iter().enumerate() {
                    overlay = overlay.with(
                        EffectDomain::StabilityCosts,
                        format!("limb{index}"),
                        "limbPenalty",
                        penalty,
                    );
                }
                if replaced {
                    overlay = overlay
                        .with_flag(EffectDomain::StabilityCosts, "torsoHeadReplacement")
                        .with(EffectDomain::Abilities, "leopardAugmentation", "agility.bioMod", 2);
                }
                overlay
            },
        )
}

proptest! {
    #[test]
    fn recompute_is_idempotent(character in character(), overlay in overlay()) {
        let engine = Engine::standard();
        let once = engine.recomputed(character, &overlay).unwrap();
        let twice = engine.recomputed(once.clone(), &overlay).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn ability_total_invariant(character in character(), overlay in overlay()) {
        let character = Engine::standard().recomputed(character, &overlay).unwrap();
        for (ability, score) in &character.abilities {
            let m = &score.modifiers;
            prop_assert_eq!(
                score.total_bonus,
                m.bonus_mod + m.hindrance_mod + m.trait_mod + m.cyber_mod.max(m.bio_mod),
                "{}", ability
            );
        }
    }

    #[test]
    fn hindrance_never_improves(
        character in character(),
        ability in ability(),
        incoming in -20..=0i32,
    ) {
        let stored = character.ability(ability).unwrap().modifiers.hindrance_mod;
        let overlay = EffectsOverlay::new().with(
            EffectDomain::Abilities,
            "condition",
            format!("{ability}.{}", ModifierField::HindranceMod),
            incoming,
        );

        let after = Engine::standard().recomputed(character, &overlay).unwrap();
        let folded = after.ability(ability).unwrap().modifiers.hindrance_mod;

        prop_assert!(folded <= stored);
        prop_assert_eq!(folded, stored.min(incoming));
    }

    #[test]
    fn current_stability_is_stability_minus_costs(
        character in character(),
        overlay in overlay(),
    ) {
        let character = Engine::standard().recomputed(character, &overlay).unwrap();
        let stability = character
            .value(DerivedValueKind::Stability)
            .unwrap()
            .total_bonus;
        let costs: i32 = overlay
            .stability_costs
            .values()
            .flat_map(|fields| fields.get("stabilityCost"))
            .sum();
        prop_assert!(stability >= 0);
        prop_assert_eq!(character.cur_stability, stability - costs);
    }

    #[test]
    fn pool_die_follows_calc(character in character(), overlay in overlay()) {
        let character = Engine::standard().recomputed(character, &overlay).unwrap();
        for (kind, pool) in &character.derived_ability_pools {
            prop_assert_eq!(pool.die, kind.die_for(pool.calc), "{}", kind);
            prop_assert!(pool.current_die.is_some_and(|current| current <= pool.die));
            if kind.always_resets() {
                prop_assert_eq!(pool.current_die, Some(pool.die));
            }
        }
    }

    #[test]
    fn skill_totals_and_flags(character in character(), overlay in overlay()) {
        let character = Engine::standard().recomputed(character, &overlay).unwrap();
        for family in SkillFamily::iter() {
            for (id, entry) in character.family(family) {
                prop_assert_eq!(entry.total_bonus, entry.modifiers.skill_total(), "{}", id);
                prop_assert_eq!(entry.negative_bonus, entry.total_bonus < 0, "{}", id);
            }
        }
    }
}
