// 遭遇数据模型
// 开发心理：遭遇槽只持有种族编号，区域自带本地禁用名单
// 禁用名单用有序集合，遍历顺序必须确定

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::pokemon::PokemonId;

// 单个遭遇槽：当前指派的种族与等级区间
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub pokemon: PokemonId,
    pub level: u8,
    pub max_level: u8,
}

impl Encounter {
    pub fn new(pokemon: PokemonId, level: u8) -> Self {
        Self {
            pokemon,
            level,
            max_level: level,
        }
    }
}

// 遭遇集合（"区域"）：一组槽位加区域本地的种族禁用名单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSet {
    pub name: String,
    pub rate: i32,
    pub encounters: Vec<Encounter>,
    // 该区域内绝对不可指派的种族
    pub banned_pokemon: BTreeSet<PokemonId>,
}

impl EncounterSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rate: 0,
            encounters: Vec::new(),
            banned_pokemon: BTreeSet::new(),
        }
    }

    pub fn with_slots(mut self, species: &[PokemonId], level: u8) -> Self {
        for &id in species {
            self.encounters.push(Encounter::new(id, level));
        }
        self
    }

    pub fn with_banned(mut self, banned: &[PokemonId]) -> Self {
        self.banned_pokemon.extend(banned.iter().copied());
        self
    }
}
