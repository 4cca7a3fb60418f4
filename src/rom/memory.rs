// 内存目录提供方
// 开发心理：把整份目录与遭遇表放在内存里的RomHandler实现
// 供测试与上层装配使用，不涉及任何二进制容器解析

use log::info;

use crate::core::config::GenRestrictions;
use crate::pokemon::{PokemonId, PokemonPool};

use super::encounters::EncounterSet;
use super::{Pokedex, RomHandler};

#[derive(Debug, Clone)]
pub struct MemoryRomHandler {
    dex: Pokedex,
    pool: PokemonPool,
    banned: Vec<PokemonId>,
    // 基础遭遇表与依赖时间段的附加遭遇表
    encounters: Vec<EncounterSet>,
    time_encounters: Vec<EncounterSet>,
}

impl MemoryRomHandler {
    pub fn new(dex: Pokedex, restrictions: Option<&GenRestrictions>) -> Self {
        let pool = PokemonPool::build(&dex, restrictions);
        info!("内存ROM就绪：目录{}个种族，候选池{}个", dex.len(), pool.len());
        Self {
            dex,
            pool,
            banned: Vec::new(),
            encounters: Vec::new(),
            time_encounters: Vec::new(),
        }
    }

    pub fn with_banned(mut self, banned: Vec<PokemonId>) -> Self {
        self.banned = banned;
        self
    }

    pub fn with_encounters(mut self, areas: Vec<EncounterSet>) -> Self {
        self.encounters = areas;
        self
    }

    pub fn with_time_encounters(mut self, areas: Vec<EncounterSet>) -> Self {
        self.time_encounters = areas;
        self
    }

    // 限制配置变化时重建候选池
    pub fn rebuild_pool(&mut self, restrictions: Option<&GenRestrictions>) {
        self.pool = PokemonPool::build(&self.dex, restrictions);
    }
}

impl RomHandler for MemoryRomHandler {
    fn pokedex(&self) -> &Pokedex {
        &self.dex
    }

    fn pokemon_pool(&self) -> &PokemonPool {
        &self.pool
    }

    fn banned_for_wild_encounters(&self) -> Vec<PokemonId> {
        self.banned.clone()
    }

    fn encounters(&self, use_time_of_day: bool) -> Vec<EncounterSet> {
        let mut areas = self.encounters.clone();
        if use_time_of_day {
            areas.extend(self.time_encounters.iter().cloned());
        }
        areas
    }

    fn set_encounters(&mut self, use_time_of_day: bool, areas: Vec<EncounterSet>) {
        if use_time_of_day {
            let base_len = self.encounters.len();
            let mut areas = areas;
            let time_part = areas.split_off(base_len.min(areas.len()));
            self.encounters = areas;
            self.time_encounters = time_part;
        } else {
            self.encounters = areas;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::{EvolutionGraph, Pokemon, PokemonType};

    fn dex(count: PokemonId) -> Pokedex {
        let list = (1..=count)
            .map(|number| Pokemon {
                number,
                name: format!("宝可梦#{}", number),
                primary_type: PokemonType::Normal,
                secondary_type: None,
                hp: 50,
                attack: 50,
                defense: 50,
                spatk: 50,
                spdef: 50,
                speed: 50,
            })
            .collect();
        Pokedex::new(list, EvolutionGraph::new())
    }

    #[test]
    fn test_pool_built_on_construction() {
        let rom = MemoryRomHandler::new(dex(151), None);
        assert_eq!(rom.pokemon_pool().len(), 151);
    }

    #[test]
    fn test_rebuild_pool_after_config_change() {
        let mut rom = MemoryRomHandler::new(dex(251), None);
        assert_eq!(rom.pokemon_pool().len(), 251);
        let restrictions = GenRestrictions {
            allow_gen1: true,
            ..GenRestrictions::default()
        };
        rom.rebuild_pool(Some(&restrictions));
        assert_eq!(rom.pokemon_pool().len(), 151);
    }

    #[test]
    fn test_time_of_day_flag_controls_visible_areas() {
        let rom = MemoryRomHandler::new(dex(151), None)
            .with_encounters(vec![EncounterSet::new("白天草丛").with_slots(&[19], 3)])
            .with_time_encounters(vec![EncounterSet::new("夜间草丛").with_slots(&[163], 3)]);

        assert_eq!(rom.encounters(false).len(), 1);
        assert_eq!(rom.encounters(true).len(), 2);
    }

    #[test]
    fn test_set_encounters_splits_time_part_back() {
        let mut rom = MemoryRomHandler::new(dex(151), None)
            .with_encounters(vec![EncounterSet::new("白天草丛").with_slots(&[19], 3)])
            .with_time_encounters(vec![EncounterSet::new("夜间草丛").with_slots(&[16], 3)]);

        let mut areas = rom.encounters(true);
        areas[0].encounters[0].pokemon = 25;
        areas[1].encounters[0].pokemon = 41;
        rom.set_encounters(true, areas);

        assert_eq!(rom.encounters(false)[0].encounters[0].pokemon, 25);
        assert_eq!(rom.encounters(true)[1].encounters[0].pokemon, 41);
        assert_eq!(rom.encounters(true)[1].name, "夜间草丛");
    }

    #[test]
    fn test_set_encounters_base_only_keeps_time_part() {
        let mut rom = MemoryRomHandler::new(dex(151), None)
            .with_encounters(vec![EncounterSet::new("白天草丛").with_slots(&[19], 3)])
            .with_time_encounters(vec![EncounterSet::new("夜间草丛").with_slots(&[16], 3)]);

        let mut areas = rom.encounters(false);
        areas[0].encounters[0].pokemon = 25;
        rom.set_encounters(false, areas);

        assert_eq!(rom.encounters(false)[0].encounters[0].pokemon, 25);
        assert_eq!(rom.encounters(true)[1].encounters[0].pokemon, 16);
    }
}
