// 逐槽随机策略
// 开发心理：每个遭遇槽独立抽取替换种族，子模式只改变抽取来源
// 全局禁用与区域禁用在任何子模式下都不可违反

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use rand::Rng;

use crate::core::config::WildPokemonRestrictionMod;
use crate::core::error::{RandomizerError, Result};
use crate::pokemon::{PokemonId, PokemonType};
use crate::rom::RomHandler;

use super::{WildPokemonModifier, MAX_REJECTION_ATTEMPTS, MAX_TYPE_THEME_ATTEMPTS};

impl<'a, R: RomHandler> WildPokemonModifier<'a, R> {
    pub(crate) fn modify_random(&mut self) -> Result<()> {
        let use_tod = self.settings.use_time_based_encounters;
        let no_legendaries = self.settings.block_wild_legendaries;
        let global_banned = self.rom.banned_for_wild_encounters();
        let mut current = self.rom.encounters(use_tod);
        // 遍历顺序随机化，回写顺序保持不变
        let order = self.scrambled_order(current.len());

        match self.settings.wild_restriction_mod {
            WildPokemonRestrictionMod::CatchEmAll => {
                // 共享的候选余量：抽中一个就从中划掉，铺满之前不重复
                let mut all_pokes: Vec<PokemonId> = self
                    .list_pokemon(no_legendaries)
                    .into_iter()
                    .filter(|id| !global_banned.contains(id))
                    .collect();

                for &ai in &order {
                    let area = &mut current[ai];
                    let local_banned = area.banned_pokemon.clone();
                    let mut pickable: Vec<PokemonId> = all_pokes
                        .iter()
                        .copied()
                        .filter(|id| !local_banned.contains(id))
                        .collect();

                    for enc in area.encounters.iter_mut() {
                        if pickable.is_empty() {
                            // 区域禁用把余量掏空了，用不消耗余量的临时名单顶上
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
                            enc.pokemon = temp[self.rng.gen_range(0..temp.len())];
                        } else {
                            let picked = pickable.remove(self.rng.gen_range(0..pickable.len()));
                            enc.pokemon = picked;
                            all_pokes.retain(|&id| id != picked);
                            if all_pokes.is_empty() {
                                // 整个候选池铺满一轮，重置余量再继续
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
                }
            }
            WildPokemonRestrictionMod::TypeThemeAreas => {
                let mut cached: BTreeMap<PokemonType, Vec<PokemonId>> = BTreeMap::new();
                for &ai in &order {
                    let area = &mut current[ai];
                    let local_banned = area.banned_pokemon.clone();
                    let possible =
                        self.pick_area_theme(&mut cached, &global_banned, &local_banned, 1)?;
                    for enc in area.encounters.iter_mut() {
                        enc.pokemon = possible[self.rng.gen_range(0..possible.len())];
                    }
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
                    let local_banned = area.banned_pokemon.clone();
                    let local: Vec<PokemonId> = base
                        .iter()
                        .copied()
                        .filter(|id| !local_banned.contains(id))
                        .collect();
                    for enc in area.encounters.iter_mut() {
                        enc.pokemon =
                            self.pick_wild_power_lvl_replacement(&local, enc.pokemon, false, None)?;
                    }
                }
            }
            WildPokemonRestrictionMod::Unrestricted => {
                let pool_list = self.list_pokemon(no_legendaries);
                for &ai in &order {
                    let area = &mut current[ai];
                    let local_banned = area.banned_pokemon.clone();
                    for enc in area.encounters.iter_mut() {
                        enc.pokemon =
                            self.pick_entirely_random(&pool_list, &global_banned, &local_banned)?;
                    }
                }
            }
        }

        self.rom.set_encounters(use_tod, current);
        Ok(())
    }

    // 反复抽属性主题，直到抽到一个扣掉禁用后仍有至少min_size个候选的属性
    pub(crate) fn pick_area_theme(
        &mut self,
        cached: &mut BTreeMap<PokemonType, Vec<PokemonId>>,
        global_banned: &[PokemonId],
        local_banned: &BTreeSet<PokemonId>,
        min_size: usize,
    ) -> Result<Vec<PokemonId>> {
        let no_legendaries = self.settings.block_wild_legendaries;
        for _ in 0..MAX_TYPE_THEME_ATTEMPTS {
            let theme = self.rom.random_type(self.rng);
            if !cached.contains_key(&theme) {
                let bucket: Vec<PokemonId> = self
                    .rom
                    .pokemon_pool()
                    .by_type(self.rom.pokedex(), theme, no_legendaries)
                    .collect();
                cached.insert(theme, bucket);
            }
            let possible: Vec<PokemonId> = cached[&theme]
                .iter()
                .copied()
                .filter(|id| !global_banned.contains(id) && !local_banned.contains(id))
                .collect();
            if possible.len() >= min_size.max(1) {
                return Ok(possible);
            }
        }
        Err(RandomizerError::ConfigurationExhausted(
            "没有任何属性主题能提供足够的候选".to_string(),
        ))
    }

    // 无约束抽取：从候选池均匀抽，碰到禁用种族就重抽
    pub(crate) fn pick_entirely_random(
        &mut self,
        pool_list: &[PokemonId],
        global_banned: &[PokemonId],
        local_banned: &BTreeSet<PokemonId>,
    ) -> Result<PokemonId> {
        if pool_list.is_empty() {
            return Err(RandomizerError::ConfigurationExhausted(
                "候选池为空".to_string(),
            ));
        }
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let id = pool_list[self.rng.gen_range(0..pool_list.len())];
            if !global_banned.contains(&id) && !local_banned.contains(&id) {
                return Ok(id);
            }
        }
        Err(RandomizerError::ConfigurationExhausted(
            "候选池中找不到未被禁用的种族".to_string(),
        ))
    }
}
