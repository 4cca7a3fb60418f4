// 野生遭遇随机化
// 开发心理：一个修改器持有ROM接口、设置与RNG，按策略分派
// 设计原则：所有随机性都经过同一个显式传入的RNG，同种子必得同结果

pub mod area_mapping;
pub mod global_mapping;
pub mod random_mod;

use std::collections::BTreeSet;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::{Settings, WildPokemonMod};
use crate::core::error::{RandomizerError, Result};
use crate::pokemon::PokemonId;
use crate::rom::{EncounterSet, RomHandler};

// 威力指标的全域上界，窗口覆盖[0, MAX_POWER]仍无候选即判定耗尽
pub(crate) const MAX_POWER: i32 = 1530;

// 属性主题抽签与拒绝采样的重试上限
pub(crate) const MAX_TYPE_THEME_ATTEMPTS: usize = 10_000;
pub(crate) const MAX_REJECTION_ATTEMPTS: usize = 10_000;

// 野生遭遇修改器：借用ROM接口与RNG，一次modify()完成整轮重映射
pub struct WildPokemonModifier<'a, R: RomHandler> {
    rom: &'a mut R,
    settings: &'a Settings,
    rng: &'a mut StdRng,
}

impl<'a, R: RomHandler> WildPokemonModifier<'a, R> {
    pub fn new(rom: &'a mut R, settings: &'a Settings, rng: &'a mut StdRng) -> Self {
        Self { rom, settings, rng }
    }

    // 按设置分派到具体策略；出错时不回写，调用方拿到的ROM保持原样
    pub fn modify(&mut self) -> Result<()> {
        match self.settings.wild_pokemon_mod {
            WildPokemonMod::NoOp => {
                debug!("野生遭遇策略为NoOp，跳过");
                Ok(())
            }
            WildPokemonMod::Random => {
                info!("野生遭遇：逐槽随机，子模式{:?}", self.settings.wild_restriction_mod);
                self.modify_random()
            }
            WildPokemonMod::AreaMapping => {
                info!("野生遭遇：区域内一致映射，子模式{:?}", self.settings.wild_restriction_mod);
                self.modify_area_mapping()
            }
            WildPokemonMod::GlobalMapping => {
                info!("野生遭遇：全局一致映射，子模式{:?}", self.settings.wild_restriction_mod);
                self.modify_global_mapping()
            }
        }
    }

    // 候选池的当前视图，可选排除传说
    fn list_pokemon(&self, no_legendaries: bool) -> Vec<PokemonId> {
        let pool = self.rom.pokemon_pool();
        if no_legendaries {
            pool.by_legendary(self.rom.pokedex(), false).collect()
        } else {
            pool.all().to_vec()
        }
    }

    // 0..len的随机排列，遍历顺序与数据顺序解耦
    fn scrambled_order(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(self.rng);
        order
    }

    // 一个区域当前出现的全部种族
    fn pokemon_in_area(area: &EncounterSet) -> BTreeSet<PokemonId> {
        area.encounters.iter().map(|enc| enc.pokemon).collect()
    }

    // 强度相近替换：以当前种族的威力指标为中心开±10%窗口，
    // 候选不足3个时按威力的1/20逐轮加宽，最多加宽三轮；
    // 窗口已覆盖全域仍一无所获才报约束耗尽
    fn pick_wild_power_lvl_replacement(
        &mut self,
        candidates: &[PokemonId],
        current: PokemonId,
        ban_same: bool,
        used: Option<&[PokemonId]>,
    ) -> Result<PokemonId> {
        let dex = self.rom.pokedex();
        let current_power = dex.require(current)?.bst_for_power_levels();
        let step = (current_power / 20).max(1);
        let mut min_target = current_power - current_power / 10;
        let mut max_target = current_power + current_power / 10;

        let mut can_pick: Vec<PokemonId> = Vec::new();
        let mut expand_rounds = 0;
        while can_pick.is_empty() || (can_pick.len() < 3 && expand_rounds < 3) {
            for &id in candidates {
                let power = dex.require(id)?.bst_for_power_levels();
                if power < min_target || power > max_target {
                    continue;
                }
                if ban_same && id == current {
                    continue;
                }
                if used.map_or(false, |u| u.contains(&id)) {
                    continue;
                }
                if !can_pick.contains(&id) {
                    can_pick.push(id);
                }
            }
            if can_pick.is_empty() && min_target <= 0 && max_target >= MAX_POWER {
                return Err(RandomizerError::ConfigurationExhausted(format!(
                    "强度匹配失败：编号{}没有任何可用替换",
                    current
                )));
            }
            min_target -= step;
            max_target += step;
            expand_rounds += 1;
        }

        Ok(can_pick[self.rng.gen_range(0..can_pick.len())])
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::SeedableRng;

    use crate::core::config::{Settings, WildPokemonMod, WildPokemonRestrictionMod};
    use crate::pokemon::{EvolutionGraph, Pokemon, PokemonId, PokemonType};
    use crate::rom::{MemoryRomHandler, Pokedex};

    use super::*;

    pub fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    pub fn species(number: PokemonId, ptype: PokemonType, stat: u16) -> Pokemon {
        Pokemon {
            number,
            name: format!("宝可梦#{}", number),
            primary_type: ptype,
            secondary_type: None,
            hp: stat,
            attack: stat,
            defense: stat,
            spatk: stat,
            spdef: stat,
            speed: stat,
        }
    }

    // 编号1..=count的目录，全Normal属性、全同种族值
    pub fn uniform_dex(count: PokemonId) -> Pokedex {
        let list = (1..=count)
            .map(|n| species(n, PokemonType::Normal, 50))
            .collect();
        Pokedex::new(list, EvolutionGraph::new())
    }

    pub fn rom_with(dex: Pokedex, areas: Vec<EncounterSet>) -> MemoryRomHandler {
        MemoryRomHandler::new(dex, None).with_encounters(areas)
    }

    pub fn settings(
        mode: WildPokemonMod,
        restriction: WildPokemonRestrictionMod,
    ) -> Settings {
        Settings {
            wild_pokemon_mod: mode,
            wild_restriction_mod: restriction,
            ..Settings::default()
        }
    }
}
