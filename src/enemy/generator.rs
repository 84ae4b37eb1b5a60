//! Scaled enemy generation.
//!
//! Each encounter index selects a rarity pool and scaling parameters.
//! The enemy is a uniform pick from that pool, with HP scaled down and
//! stats boosted per the table below.
//!
//! | index | pool             | HP × | boost | boss |
//! |-------|------------------|------|-------|------|
//! | 1     | common           | 0.2  | 0     | no   |
//! | 2     | common, uncommon | 0.5  | 0     | no   |
//! | 3     | uncommon, rare   | 0.5  | 0     | no   |
//! | 4     | rare, epic       | 0.5  | 0     | no   |
//! | final | epic             | 0.5  | 0     | yes  |
//! | other | all              | 1.0  | 0     | no   |
//!
//! The final row belongs to the last encounter of the run, whatever its
//! index: a five-encounter run ends on index 5, a three-encounter run on
//! index 3. Rows 1 to 4 apply only before the final encounter.
//!
//! An empty pool falls back to the whole catalog, so generation never fails
//! on a non-empty catalog.

use tracing::{debug, warn};

use crate::cards::{CardCatalog, CardInstance, CardTemplate, EnemyInstance, Rarity};
use crate::core::entity::EntityId;
use crate::core::rng::RandomSource;

/// Pool and scaling parameters for one encounter index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncounterScaling {
    /// Eligible rarities. Empty means every rarity.
    pub rarities: &'static [Rarity],
    pub hp_multiplier: f64,
    pub stat_boost: i32,
    pub is_boss: bool,
}

impl EncounterScaling {
    /// Scaling for a 1-based encounter index in a run of
    /// `total_encounters`.
    #[must_use]
    pub fn for_encounter(combat_index: u32, total_encounters: u32) -> Self {
        if combat_index == total_encounters {
            return Self::scaled(&[Rarity::Epic], 0.5, true);
        }
        match combat_index {
            1 => Self::scaled(&[Rarity::Common], 0.2, false),
            2 => Self::scaled(&[Rarity::Common, Rarity::Uncommon], 0.5, false),
            3 => Self::scaled(&[Rarity::Uncommon, Rarity::Rare], 0.5, false),
            4 => Self::scaled(&[Rarity::Rare, Rarity::Epic], 0.5, false),
            _ => Self::scaled(&[], 1.0, false),
        }
    }

    fn scaled(rarities: &'static [Rarity], hp_multiplier: f64, is_boss: bool) -> Self {
        Self {
            rarities,
            hp_multiplier,
            stat_boost: 0,
            is_boss,
        }
    }

    /// Does a template of this rarity qualify?
    #[must_use]
    pub fn admits(&self, rarity: Rarity) -> bool {
        self.rarities.is_empty() || self.rarities.contains(&rarity)
    }

    /// Build the scaled enemy from a chosen template.
    #[must_use]
    pub fn apply(&self, entity_id: EntityId, template: &CardTemplate) -> EnemyInstance {
        let mut card = CardInstance::from_template(entity_id, template);

        // Floor, but never below 1 so an enemy always starts standing.
        let max_hp = ((f64::from(template.max_hp) * self.hp_multiplier).floor() as u32).max(1);
        card.max_hp = max_hp;
        card.current_hp = max_hp;
        card.attack_mod = card.attack_mod.saturating_add(self.stat_boost);
        card.defense_mod = card.defense_mod.saturating_add(self.stat_boost);

        if self.is_boss {
            card.name = format!("BOSS - {}", template.name);
            card.description = format!("FINAL BOSS - {}", template.description);
        }

        EnemyInstance::new(card, self.is_boss)
    }
}

/// Generate the enemy for `combat_index` in a run of `total_encounters`.
///
/// Panics if the catalog is empty.
pub fn generate_enemy<R: RandomSource>(
    catalog: &CardCatalog,
    combat_index: u32,
    total_encounters: u32,
    entity_id: EntityId,
    rng: &mut R,
) -> EnemyInstance {
    assert!(!catalog.is_empty(), "Cannot generate an enemy from an empty catalog");

    let scaling = EncounterScaling::for_encounter(combat_index, total_encounters);
    let mut pool: Vec<&CardTemplate> = catalog.iter().filter(|c| scaling.admits(c.rarity)).collect();

    if pool.is_empty() {
        warn!(combat_index, "enemy pool is empty, falling back to the full catalog");
        pool = catalog.iter().collect();
    }

    let template = pool[rng.next_below(pool.len())];
    let enemy = scaling.apply(entity_id, template);

    debug!(
        combat_index,
        name = %enemy.card.name,
        hp = enemy.card.max_hp,
        boss = enemy.is_boss,
        "generated enemy"
    );

    enemy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::rng::{GameRng, ScriptedRng};

    #[test]
    fn test_table() {
        let first = EncounterScaling::for_encounter(1, 5);
        assert_eq!(first.rarities, &[Rarity::Common]);
        assert_eq!(first.hp_multiplier, 0.2);
        assert!(!first.is_boss);

        let last = EncounterScaling::for_encounter(5, 5);
        assert_eq!(last.rarities, &[Rarity::Epic]);
        assert!(last.is_boss);

        let other = EncounterScaling::for_encounter(9, 5);
        assert!(other.admits(Rarity::Rare));
        assert_eq!(other.hp_multiplier, 1.0);
    }

    #[test]
    fn test_first_encounter_scaling() {
        let catalog = CardCatalog::standard();
        // Commons in catalog order: Novice Warrior, Squire, Duelist, Recruit
        let mut rng = ScriptedRng::new(vec![1]);

        let enemy = generate_enemy(&catalog, 1, 5, EntityId(1), &mut rng);

        assert_eq!(enemy.card.name, "Squire");
        assert_eq!(enemy.card.max_hp, 2); // floor(12 * 0.2)
        assert_eq!(enemy.card.current_hp, 2);
        assert_eq!(enemy.card.defense_mod, 1);
        assert!(!enemy.is_boss);
    }

    #[test]
    fn test_boss_is_marked() {
        let catalog = CardCatalog::standard();
        let mut rng = ScriptedRng::new(vec![1]);

        let boss = generate_enemy(&catalog, 5, 5, EntityId(9), &mut rng);

        assert!(boss.is_boss);
        assert_eq!(boss.card.card_id, CardId::new(10));
        assert_eq!(boss.card.name, "BOSS - Champion");
        assert!(boss.card.description.starts_with("FINAL BOSS - "));
        assert_eq!(boss.card.max_hp, 10);
    }

    #[test]
    fn test_rarity_eligibility() {
        let catalog = CardCatalog::standard();
        let mut rng = GameRng::new(1234);

        for index in 1..=5 {
            let scaling = EncounterScaling::for_encounter(index, 5);
            for _ in 0..50 {
                let enemy = generate_enemy(&catalog, index, 5, EntityId(1), &mut rng);
                assert!(scaling.admits(enemy.card.rarity), "index {index} produced {}", enemy.card.rarity);
                assert_eq!(enemy.is_boss, index == 5);
            }
        }
    }

    #[test]
    fn test_empty_pool_falls_back() {
        let mut catalog = CardCatalog::new();
        catalog.register(CardTemplate::new(CardId::new(1), "Lone Recruit", Rarity::Common, 6));

        let mut rng = GameRng::new(5);
        let enemy = generate_enemy(&catalog, 5, 5, EntityId(1), &mut rng);

        assert_eq!(enemy.card.card_id, CardId::new(1));
        assert!(enemy.is_boss);
        assert_eq!(enemy.card.max_hp, 3);
    }

    #[test]
    fn test_hp_never_zero() {
        let mut catalog = CardCatalog::new();
        catalog.register(CardTemplate::new(CardId::new(1), "Mote", Rarity::Common, 1));

        let enemy = generate_enemy(&catalog, 1, 5, EntityId(1), &mut GameRng::new(0));
        assert_eq!(enemy.card.max_hp, 1);
    }

    #[test]
    fn test_boss_follows_run_length() {
        let short = EncounterScaling::for_encounter(3, 3);
        assert!(short.is_boss);
        assert_eq!(short.rarities, &[Rarity::Epic]);
        assert!(!EncounterScaling::for_encounter(2, 3).is_boss);

        // In a longer run index 5 is an ordinary fight and the last one is the boss
        let middle = EncounterScaling::for_encounter(5, 7);
        assert!(!middle.is_boss);
        assert_eq!(middle.hp_multiplier, 1.0);
        let last = EncounterScaling::for_encounter(7, 7);
        assert!(last.is_boss);
        assert_eq!(last.hp_multiplier, 0.5);

        let catalog = CardCatalog::standard();
        let boss = generate_enemy(&catalog, 3, 3, EntityId(4), &mut ScriptedRng::new(vec![0]));
        assert!(boss.is_boss);
        assert_eq!(boss.card.rarity, Rarity::Epic);
        assert!(boss.card.name.starts_with("BOSS - "));
    }

    #[test]
    fn test_middle_encounters_halve_hp() {
        let catalog = CardCatalog::standard();
        // Uncommon and rare in catalog order: Paladin, Berserker, Assassin, Royal Guard
        let mut rng = ScriptedRng::new(vec![0]);

        let enemy = generate_enemy(&catalog, 3, 5, EntityId(1), &mut rng);

        assert_eq!(enemy.card.name, "Paladin");
        assert_eq!(enemy.card.max_hp, 7); // floor(15 * 0.5)
        assert_eq!(enemy.card.current_hp, 7);
        assert_eq!(enemy.card.defense_mod, 2);
        assert!(!enemy.is_boss);

        for index in 2..=4 {
            let scaling = EncounterScaling::for_encounter(index, 5);
            assert_eq!(scaling.hp_multiplier, 0.5);
            let enemy = generate_enemy(&catalog, index, 5, EntityId(2), &mut GameRng::new(u64::from(index)));
            let template = catalog.get(enemy.card.card_id).unwrap();
            assert_eq!(enemy.card.max_hp, template.max_hp / 2);
        }
    }
}
