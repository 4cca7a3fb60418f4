// 区域内一致映射策略
// 开发心理：每个区域建一张种族→种族的映射表，同区域内同种族必得同替换
// 映射值在区域内不重复，区域之间相互独立

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use rand::Rng;

use crate::core::config::WildPokemonRestrictionMod;
use crate::core::error::{RandomizerError, Result};
use crate::pokemon::{PokemonId, PokemonType};
use crate::rom::{EncounterSet, RomHandler};

use super::{WildPokemonModifier, MAX_REJECTION_ATTEMPTS};

impl<'a, R: RomHandler> WildPokemonModifier<'a, R> {
    pub(crate) fn modify_area_mapping(&mut self) -> Result<()> {
        let use_tod = self.settings.use_time_based_encounters;
        let no_legendaries = self.settings.block_wild_legendaries;
        let global_banned = self.rom.banned_for_wild_encounters();
        let mut current = self.rom.encounters(use_tod);
        // 遍历顺序随机化，回写顺序保持不变
        let order = self.scrambled_order(current.len());

        match self.settings.wild_restriction_mod {
            WildPokemonRestrictionMod::CatchEmAll => {
                let mut all_pokes: Vec<PokemonId> = self
                    .list_pokemon(no_legendaries)
                    .into_iter()
                    .filter(|id| !global_banned.contains(id))
                    .collect();

                for &ai in &order {
                    let area = &mut current[ai];
                    let in_area = Self::pokemon_in_area(area);
                    let local_banned = area.banned_pokemon.clone();
                    let mut pickable: Vec<PokemonId> = all_pokes
                        .iter()
                        .copied()
                        .filter(|id| !local_banned.contains(id))
                        .collect();

                    let mut area_map: BTreeMap<PokemonId, PokemonId> = BTreeMap::new();
                    for &wild in &in_area {
                        if pickable.is_empty() {
                            let temp: Vec<PokemonId> = self
                                .list_pokemon(no_legendaries)
                                .into_iter()
                                .filter(|id| {
                                    !global_banned.contains(id) && !local_banned.contains(id)
                                })
                                .collect();
                            if temp.is_empty() {
                                return Err(RandomizerError::ConfigurationExhausted(
                                    "无法替换野生宝可梦".to_string(),
                                ));
                            }
                            area_map.insert(wild, temp[self.rng.gen_range(0..temp.len())]);
                        } else {
                            let picked = pickable.remove(self.rng.gen_range(0..pickable.len()));
                            area_map.insert(wild, picked);
                            all_pokes.retain(|&id| id != picked);
                            if all_pokes.is_empty() {
                                debug!("候选池已铺满一轮，重置余量");
                                all_pokes = self
                                    .list_pokemon(no_legendaries)
                                    .into_iter()
                                    .filter(|id| !global_banned.contains(id))
                                    .collect();
                                pickable = all_pokes
                                    .iter()
                                    .copied()
                                    .filter(|id| !local_banned.contains(id))
                                    .collect();
                            }
                        }
                    }
                    Self::apply_area_map(area, &area_map);
                }
            }
            WildPokemonRestrictionMod::TypeThemeAreas => {
                let mut cached: BTreeMap<PokemonType, Vec<PokemonId>> = BTreeMap::new();
                for &ai in &order {
                    let area = &mut current[ai];
                    let in_area = Self::pokemon_in_area(area);
                    let local_banned = area.banned_pokemon.clone();
                    // 主题属性必须能为区域里的每个种族提供互不相同的替换
                    let mut possible = self.pick_area_theme(
                        &mut cached,
                        &global_banned,
                        &local_banned,
                        in_area.len(),
                    )?;

                    let mut area_map: BTreeMap<PokemonId, PokemonId> = BTreeMap::new();
                    for &wild in &in_area {
                        let picked = possible.remove(self.rng.gen_range(0..possible.len()));
                        area_map.insert(wild, picked);
                    }
                    Self::apply_area_map(area, &area_map);
                }
            }
            WildPokemonRestrictionMod::SimilarStrength => {
                let base: Vec<PokemonId> = self
                    .list_pokemon(no_legendaries)
                    .into_iter()
                    .filter(|id| !global_banned.contains(id))
                    .collect();
                for &ai in &order {
                    let area = &mut current[ai];
                    let in_area = Self::pokemon_in_area(area);
                    let local_banned = area.banned_pokemon.clone();
                    let local: Vec<PokemonId> = base
                        .iter()
                        .copied()
                        .filter(|id| !local_banned.contains(id))
                        .collect();

                    let mut used: Vec<PokemonId> = Vec::new();
                    let mut area_map: BTreeMap<PokemonId, PokemonId> = BTreeMap::new();
                    for &wild in &in_area {
                        let picked = self.pick_wild_power_lvl_replacement(
                            &local,
                            wild,
                            false,
                            Some(&used),
                        )?;
                        used.push(picked);
                        area_map.insert(wild, picked);
                    }
                    Self::apply_area_map(area, &area_map);
                }
            }
            WildPokemonRestrictionMod::Unrestricted => {
                let pool_list = self.list_pokemon(no_legendaries);
                for &ai in &order {
                    let area = &mut current[ai];
                    let in_area = Self::pokemon_in_area(area);
                    let local_banned = area.banned_pokemon.clone();

                    let mut area_map: BTreeMap<PokemonId, PokemonId> = BTreeMap::new();
                    for &wild in &in_area {
                        let picked = self.pick_area_distinct(
                            &pool_list,
                            &global_banned,
                            &local_banned,
                            &area_map,
                        )?;
                        area_map.insert(wild, picked);
                    }
                    Self::apply_area_map(area, &area_map);
                }
            }
        }

        self.rom.set_encounters(use_tod, current);
        Ok(())
    }

    // 无约束抽取，同时拒绝已被本区域映射表占用的值
    fn pick_area_distinct(
        &mut self,
        pool_list: &[PokemonId],
        global_banned: &[PokemonId],
        local_banned: &BTreeSet<PokemonId>,
        area_map: &BTreeMap<PokemonId, PokemonId>,
    ) -> Result<PokemonId> {
        if pool_list.is_empty() {
            return Err(RandomizerError::ConfigurationExhausted(
                "候选池为空".to_string(),
            ));
        }
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let id = pool_list[self.rng.gen_range(0..pool_list.len())];
            if global_banned.contains(&id) || local_banned.contains(&id) {
                continue;
            }
            if area_map.values().any(|&v| v == id) {
                continue;
            }
            return Ok(id);
        }
        Err(RandomizerError::ConfigurationExhausted(
            "区域映射表找不到足够的互异替换".to_string(),
        ))
    }

    fn apply_area_map(area: &mut EncounterSet, area_map: &BTreeMap<PokemonId, PokemonId>) {
        for enc in area.encounters.iter_mut() {
            if let Some(&replacement) = area_map.get(&enc.pokemon) {
                enc.pokemon = replacement;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::core::config::{WildPokemonMod, WildPokemonRestrictionMod};
    use crate::pokemon::{EvolutionGraph, Pokemon, PokemonId, PokemonType};
    use crate::rom::{EncounterSet, Pokedex, RomHandler};
    use crate::wild::WildPokemonModifier;

    #[test]
    fn test_mapping_is_consistent_within_an_area() {
        let areas = vec![EncounterSet::new("草丛").with_slots(&[19, 16, 19, 19, 16], 3)];
        let mut rom = rom_with(uniform_dex(151), areas);
        let settings = settings(
            WildPokemonMod::AreaMapping,
            WildPokemonRestrictionMod::Unrestricted,
        );
        let mut rng = rng(33);

        WildPokemonModifier::new(&mut rom, &settings, &mut rng)
            .modify()
            .unwrap();
        let slots: Vec<PokemonId> = rom.encounters(false)[0]
            .encounters
            .iter()
            .map(|e| e.pokemon)
            .collect();
        assert_eq!(slots[0], slots[2]);
        assert_eq!(slots[0], slots[3]);
        assert_eq!(slots[1], slots[4]);
        // 不同源种族的映射值互不相同
        assert_ne!(slots[0], slots[1]);
    }

    #[test]
    fn test_areas_are_mapped_independently() {
        // 同一个种族在两个区域里允许映射到不同替换；用多种子确认至少出现一次不同
        let areas = vec![
            EncounterSet::new("1号道路").with_slots(&[19], 3),
            EncounterSet::new("2号道路").with_slots(&[19], 3),
        ];
        let settings = settings(
            WildPokemonMod::AreaMapping,
            WildPokemonRestrictionMod::Unrestricted,
        );

        let mut saw_difference = false;
        for seed in 0..20 {
            let mut rom = rom_with(uniform_dex(151), areas.clone());
            let mut rng = rng(seed);
            WildPokemonModifier::new(&mut rom, &settings, &mut rng)
                .modify()
                .unwrap();
            let result = rom.encounters(false);
            if result[0].encounters[0].pokemon != result[1].encounters[0].pokemon {
                saw_difference = true;
                break;
            }
        }
        assert!(saw_difference, "20个种子下两个区域的映射始终一致，独立性可疑");
    }

    #[test]
    fn test_mapping_respects_bans() {
        let areas = vec![EncounterSet::new("草丛")
            .with_slots(&[19, 16, 10], 3)
            .with_banned(&[25])];
        let mut rom = rom_with(uniform_dex(151), areas).with_banned(vec![150]);
        let settings = settings(
            WildPokemonMod::AreaMapping,
            WildPokemonRestrictionMod::CatchEmAll,
        );

        for seed in 0..10 {
            let mut rng = rng(seed);
            WildPokemonModifier::new(&mut rom, &settings, &mut rng)
                .modify()
                .unwrap();
            for enc in &rom.encounters(false)[0].encounters {
                assert_ne!(enc.pokemon, 25);
                assert_ne!(enc.pokemon, 150);
            }
        }
    }

    #[test]
    fn test_catch_em_all_spreads_across_areas() {
        // 池里6个种族，两个区域各3个源种族，一轮正好铺满
        let areas = vec![
            EncounterSet::new("A").with_slots(&[1, 2, 3], 3),
            EncounterSet::new("B").with_slots(&[1, 2, 3], 4),
        ];
        let mut rom = rom_with(uniform_dex(6), areas);
        let settings = settings(
            WildPokemonMod::AreaMapping,
            WildPokemonRestrictionMod::CatchEmAll,
        );
        let mut rng = rng(8);

        WildPokemonModifier::new(&mut rom, &settings, &mut rng)
            .modify()
            .unwrap();
        let mut all: Vec<PokemonId> = rom
            .encounters(false)
            .iter()
            .flat_map(|a| a.encounters.iter().map(|e| e.pokemon))
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_type_theme_keeps_mapping_and_theme() {
        let list: Vec<Pokemon> = (1..=60u16)
            .map(|n| {
                let ptype = if n <= 30 { PokemonType::Rock } else { PokemonType::Flying };
                species(n, ptype, 50)
            })
            .collect();
        let dex = Pokedex::new(list, EvolutionGraph::new());
        let areas = vec![EncounterSet::new("山道").with_slots(&[1, 35, 1, 40], 9)];
        let mut rom = rom_with(dex, areas);
        let settings = settings(
            WildPokemonMod::AreaMapping,
            WildPokemonRestrictionMod::TypeThemeAreas,
        );
        let mut rng = rng(21);

        WildPokemonModifier::new(&mut rom, &settings, &mut rng)
            .modify()
            .unwrap();
        let area = &rom.encounters(false)[0];
        let slots: Vec<PokemonId> = area.encounters.iter().map(|e| e.pokemon).collect();
        assert_eq!(slots[0], slots[2]);
        let dex = rom.pokedex();
        let theme = dex.get(slots[0]).unwrap().primary_type;
        for &id in &slots {
            assert!(dex.get(id).unwrap().has_type(theme));
        }
    }

    #[test]
    fn test_similar_strength_mapping_keeps_power_and_distinct_values() {
        // 1..=6威力120，7..=12威力600
        let list: Vec<Pokemon> = (1..=12u16)
            .map(|n| species(n, PokemonType::Normal, if n <= 6 { 20 } else { 100 }))
            .collect();
        let dex = Pokedex::new(list, EvolutionGraph::new());
        let areas = vec![EncounterSet::new("草丛").with_slots(&[1, 2, 7], 5)];
        let mut rom = rom_with(dex, areas);
        let settings = settings(
            WildPokemonMod::AreaMapping,
            WildPokemonRestrictionMod::SimilarStrength,
        );
        let mut rng = rng(13);

        WildPokemonModifier::new(&mut rom, &settings, &mut rng)
            .modify()
            .unwrap();
        let slots: Vec<PokemonId> = rom.encounters(false)[0]
            .encounters
            .iter()
            .map(|e| e.pokemon)
            .collect();
        assert!((1..=6).contains(&slots[0]));
        assert!((1..=6).contains(&slots[1]));
        assert!((7..=12).contains(&slots[2]));
        assert_ne!(slots[0], slots[1], "已用名单未生效，映射值重复");
    }
}
