// 全局一致映射策略
// 开发心理：先为整本图鉴建一张种族→种族的映射表，再套用到所有区域
// 同种族在全图任何地方都得到同一个替换，禁用种族映射为自身

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use rand::Rng;

use crate::core::config::WildPokemonRestrictionMod;
use crate::core::error::{RandomizerError, Result};
use crate::pokemon::PokemonId;
use crate::rom::RomHandler;

use super::WildPokemonModifier;

impl<'a, R: RomHandler> WildPokemonModifier<'a, R> {
    pub(crate) fn modify_global_mapping(&mut self) -> Result<()> {
        let use_tod = self.settings.use_time_based_encounters;
        let translate = self.build_global_translation()?;
        let mut current = self.rom.encounters(use_tod);

        // 区域处理顺序随机化，避免区域禁用兜底总是消耗同一段随机流
        let order = self.scrambled_order(current.len());
        for ai in order {
            let local_banned = current[ai].banned_pokemon.clone();
            for si in 0..current[ai].encounters.len() {
                let source = current[ai].encounters[si].pokemon;
                let mut mapped = translate.get(&source).copied().unwrap_or(source);
                if local_banned.contains(&mapped) {
                    // 全局映射值撞上区域禁用，只为这个槽位另抽一个
                    mapped = self.pick_area_override(mapped, &local_banned)?;
                }
                current[ai].encounters[si].pokemon = mapped;
            }
        }

        self.rom.set_encounters(use_tod, current);
        Ok(())
    }

    // 建全局映射表：候选池成员逐个配对，右侧用完就整池补充；
    // 禁用种族固定映射为自身，池外的目录成员最后补为恒等映射
    pub(crate) fn build_global_translation(&mut self) -> Result<BTreeMap<PokemonId, PokemonId>> {
        let no_legendaries = self.settings.block_wild_legendaries;
        let power_mode =
            self.settings.wild_restriction_mod == WildPokemonRestrictionMod::SimilarStrength;
        let global_banned = self.rom.banned_for_wild_encounters();

        let mut translate: BTreeMap<PokemonId, PokemonId> = BTreeMap::new();
        let mut remaining_left = self.list_pokemon(false);
        let mut remaining_right = self.list_pokemon(no_legendaries);

        for &banned in &global_banned {
            translate.insert(banned, banned);
            remaining_left.retain(|&id| id != banned);
            remaining_right.retain(|&id| id != banned);
        }

        while !remaining_left.is_empty() {
            // 右侧可能先于左侧用尽（排除传说后尤其如此），补充后仍为空才是死局
            if remaining_right.is_empty() {
                debug!("右侧候选用尽，整池补充后继续配对");
                remaining_right = self
                    .list_pokemon(no_legendaries)
                    .into_iter()
                    .filter(|id| !global_banned.contains(id))
                    .collect();
                if remaining_right.is_empty() {
                    return Err(RandomizerError::ConfigurationExhausted(
                        "全局映射没有任何可用的替换种族".to_string(),
                    ));
                }
            }

            let left = remaining_left.remove(self.rng.gen_range(0..remaining_left.len()));
            let right = if power_mode {
                if remaining_right.len() == 1 {
                    remaining_right[0]
                } else {
                    self.pick_wild_power_lvl_replacement(&remaining_right, left, true, None)?
                }
            } else {
                let mut picked =
                    remaining_right[self.rng.gen_range(0..remaining_right.len())];
                while picked == left && remaining_right.len() != 1 {
                    picked = remaining_right[self.rng.gen_range(0..remaining_right.len())];
                }
                picked
            };
            remaining_right.retain(|&id| id != right);
            translate.insert(left, right);
        }

        // 目录里没进候选池的种族保持原样，映射表对整本图鉴全覆盖
        for pk in self.rom.pokedex().all() {
            translate.entry(pk.number).or_insert(pk.number);
        }

        Ok(translate)
    }

    // 区域禁用兜底：从扣掉禁用的新鲜名单里抽，强度模式下仍按威力匹配
    fn pick_area_override(
        &mut self,
        current_pick: PokemonId,
        local_banned: &BTreeSet<PokemonId>,
    ) -> Result<PokemonId> {
        let no_legendaries = self.settings.block_wild_legendaries;
        let power_mode =
            self.settings.wild_restriction_mod == WildPokemonRestrictionMod::SimilarStrength;
        let global_banned = self.rom.banned_for_wild_encounters();

        let temp: Vec<PokemonId> = self
            .list_pokemon(no_legendaries)
            .into_iter()
            .filter(|id| !global_banned.contains(id) && !local_banned.contains(id))
            .collect();
        if temp.is_empty() {
            return Err(RandomizerError::ConfigurationExhausted(
                "区域禁用耗尽了全部候选".to_string(),
            ));
        }
        if power_mode {
            self.pick_wild_power_lvl_replacement(&temp, current_pick, false, None)
        } else {
            Ok(temp[self.rng.gen_range(0..temp.len())])
        }
    }
}
