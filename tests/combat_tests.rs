//! Combat resolution tests.
//!
//! These tests cover the damage formula end to end:
//! - Minimum damage and the reduction cap
//! - Purity of `resolve_round`
//! - HP clamping in `apply_damage`
//! - Full encounters driven through `CombatRound`

use dice_duel::cards::{CardId, CardInstance, CardTemplate, EnemyInstance, Rarity};
use dice_duel::combat::{
    apply_damage, damage_through, resolve_round, winner, CombatRound, DiceRoll, RoundResolution,
    Winner,
};
use dice_duel::core::{EntityId, GameRng, RandomSource, ScriptedRng};
use proptest::prelude::*;

fn card(id: u32, hp: u32, attack_mod: i32, defense_mod: i32) -> CardInstance {
    let template = CardTemplate::new(CardId::new(id), "Fighter", Rarity::Common, hp)
        .with_mods(attack_mod, defense_mod);
    CardInstance::from_template(EntityId(id), &template)
}

fn dice() -> impl Strategy<Value = DiceRoll> {
    (1u8..=6, 1u8..=6, 1u8..=6, 1u8..=6).prop_map(|(pa, pd, ea, ed)| DiceRoll::new(pa, pd, ea, ed))
}

/// Worked example: dice (4, 3, 2, 5) between two 10 HP cards without modifiers.
#[test]
fn test_reference_round() {
    let player = card(1, 10, 0, 0);
    let enemy = card(2, 10, 0, 0);
    let calc = resolve_round(&DiceRoll::new(4, 3, 2, 5), &player, &enemy);

    assert_eq!(calc.player_attack, 4);
    assert_eq!(calc.enemy_defense, 5);
    assert_eq!(calc.damage_to_enemy, 2);
    assert_eq!(calc.enemy_attack, 2);
    assert_eq!(calc.player_defense, 3);
    assert_eq!(calc.damage_to_player, 1);

    let outcome = apply_damage(&player, &enemy, &calc);
    assert_eq!(outcome.updated_enemy.current_hp, 8);
    assert_eq!(outcome.updated_player.current_hp, 9);
    assert_eq!(winner(&outcome.updated_player, &outcome.updated_enemy), None);
}

#[test]
fn test_negative_defense_amplifies() {
    // A -1 modifier on a rolled 1 leaves a defense total of 0
    assert_eq!(damage_through(6, 0), 6);
    // Defense total -2 adds 20%
    assert_eq!(damage_through(5, -2), 6);
}

#[test]
fn test_negative_attack_still_hits() {
    assert_eq!(damage_through(-3, 2), 1);
    assert_eq!(damage_through(0, 0), 1);
}

/// Drive one encounter to the end with seeded dice.
#[test]
fn test_encounter_always_terminates() {
    for seed in 0..20 {
        let mut rng = GameRng::new(seed);
        let enemy = EnemyInstance::new(card(2, 15, 1, 1), false);
        let mut combat = CombatRound::new(card(1, 12, 0, 1), enemy, &mut rng);

        let mut rounds = 0;
        loop {
            combat.reveal().unwrap();
            match combat.resolve().unwrap() {
                RoundResolution::Continue(_) => combat.next_round(&mut rng).unwrap(),
                RoundResolution::Finished(_, outcome) => {
                    let expected = winner(&outcome.player_card, &combat.enemy().card);
                    assert_eq!(outcome.victory, expected == Some(Winner::Player));
                    break;
                }
            }
            rounds += 1;
            // Both sides lose at least 1 HP per round
            assert!(rounds <= 15, "seed {seed} did not finish");
        }
    }
}

#[test]
fn test_extreme_mods_saturate() {
    let player = card(1, 10, i32::MAX, i32::MIN);
    let enemy = card(2, 10, i32::MIN, i32::MAX);
    let calc = resolve_round(&DiceRoll::new(6, 6, 6, 6), &player, &enemy);

    assert_eq!(calc.player_attack, i32::MAX);
    assert_eq!(calc.enemy_defense, i32::MAX);
    assert_eq!(calc.enemy_attack, i32::MIN + 6);
    assert_eq!(calc.player_defense, i32::MIN + 6);
    // Capped reduction leaves 40% of the saturated attack
    assert_eq!(calc.damage_to_enemy, 858_993_459);
    assert_eq!(calc.damage_to_player, 1);

    let outcome = apply_damage(&player, &enemy, &calc);
    assert_eq!(outcome.updated_enemy.current_hp, 0);
    assert_eq!(outcome.updated_player.current_hp, 9);
}

#[test]
fn test_scripted_dice_map_to_faces() {
    let mut rng = ScriptedRng::dice(&[6, 1, 3, 5]);
    assert_eq!(DiceRoll::roll(&mut rng), DiceRoll::new(6, 1, 3, 5));
}

proptest! {
    #[test]
    fn prop_damage_at_least_one(attack in -10i32..40, defense in -10i32..40) {
        prop_assert!(damage_through(attack, defense) >= 1);
    }

    #[test]
    fn prop_reduction_caps_at_six_defense(attack in 0i32..40, defense in 6i32..60) {
        prop_assert_eq!(damage_through(attack, defense), damage_through(attack, 6));
    }

    #[test]
    fn prop_more_defense_never_hurts(attack in 0i32..40, defense in -10i32..20) {
        prop_assert!(damage_through(attack, defense + 1) <= damage_through(attack, defense));
    }

    #[test]
    fn prop_resolve_is_pure(
        roll in dice(),
        player_hp in 1u32..30,
        enemy_hp in 1u32..30,
        mods in (-2i32..4, -2i32..4, -2i32..4, -2i32..4),
    ) {
        let player = card(1, player_hp, mods.0, mods.1);
        let enemy = card(2, enemy_hp, mods.2, mods.3);
        let before = (player.clone(), enemy.clone());

        let first = resolve_round(&roll, &player, &enemy);
        let second = resolve_round(&roll, &player, &enemy);

        prop_assert_eq!(first, second);
        prop_assert_eq!(&before.0, &player);
        prop_assert_eq!(&before.1, &enemy);
        prop_assert_eq!(first.player_attack, i32::from(roll.player_attack) + mods.0);
        prop_assert_eq!(first.enemy_defense, i32::from(roll.enemy_defense) + mods.3);
    }

    #[test]
    fn prop_apply_damage_clamps(
        roll in dice(),
        player_hp in 1u32..30,
        enemy_hp in 1u32..30,
    ) {
        let player = card(1, player_hp, 0, 0);
        let enemy = card(2, enemy_hp, 0, 0);
        let calc = resolve_round(&roll, &player, &enemy);
        let outcome = apply_damage(&player, &enemy, &calc);

        prop_assert!(outcome.updated_player.current_hp <= player.max_hp);
        prop_assert!(outcome.updated_enemy.current_hp <= enemy.max_hp);
        prop_assert_eq!(
            outcome.updated_player.current_hp,
            player_hp.saturating_sub(calc.damage_to_player)
        );
        prop_assert_eq!(
            outcome.updated_enemy.current_hp,
            enemy_hp.saturating_sub(calc.damage_to_enemy)
        );
    }

    #[test]
    fn prop_dice_stay_on_the_die(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        for _ in 0..16 {
            let face = rng.roll_die();
            prop_assert!((1..=6).contains(&face));
        }
    }
}
