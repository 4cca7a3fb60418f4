// 宝可梦种族数据模块
// 开发心理：目录加载后只读的种族记录，编号是唯一身份
// 相等、排序、哈希全部只看编号，方便在映射表和集合中使用

use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use super::types::PokemonType;

// 稳定的种族编号
pub type PokemonId = u16;

// 脱壳忍者被刻意压到1点HP，
// 强度匹配时要把它的威力指标向上修正
pub const CRIPPLED_HP_SPECIES: PokemonId = 292;

lazy_static! {
    // 前五世代的传说宝可梦编号集合
    static ref LEGENDARIES: HashSet<PokemonId> = [
        144, 145, 146, 150, 151, 243, 244, 245, 249, 250, 251, 377, 378, 379, 380, 381, 382, 383,
        384, 385, 386, 479, 480, 481, 482, 483, 484, 485, 486, 487, 488, 489, 490, 491, 492, 493,
        638, 639, 640, 641, 642, 643, 644, 645, 646, 647, 648, 649,
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub number: PokemonId,
    pub name: String,
    pub primary_type: PokemonType,
    pub secondary_type: Option<PokemonType>,
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub spatk: u16,
    pub spdef: u16,
    pub speed: u16,
}

impl Pokemon {
    pub fn has_type(&self, ptype: PokemonType) -> bool {
        self.primary_type == ptype || self.secondary_type == Some(ptype)
    }

    pub fn is_legendary(&self) -> bool {
        LEGENDARIES.contains(&self.number)
    }

    // 种族值总和
    pub fn bst(&self) -> i32 {
        (self.hp + self.attack + self.defense + self.spatk + self.spdef + self.speed) as i32
    }

    // 强度匹配用的威力指标
    pub fn bst_for_power_levels(&self) -> i32 {
        if self.number == CRIPPLED_HP_SPECIES {
            // 排除被压制的HP，再乘6/5补偿
            (self.attack + self.defense + self.spatk + self.spdef + self.speed) as i32 * 6 / 5
        } else {
            self.bst()
        }
    }
}

impl PartialEq for Pokemon {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl Eq for Pokemon {}

impl Hash for Pokemon {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
    }
}

impl PartialOrd for Pokemon {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pokemon {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number.cmp(&other.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(number: PokemonId, hp: u16, others: u16) -> Pokemon {
        Pokemon {
            number,
            name: format!("宝可梦#{}", number),
            primary_type: PokemonType::Normal,
            secondary_type: None,
            hp,
            attack: others,
            defense: others,
            spatk: others,
            spdef: others,
            speed: others,
        }
    }

    #[test]
    fn test_bst() {
        let pk = species(1, 45, 50);
        assert_eq!(pk.bst(), 45 + 50 * 5);
        assert_eq!(pk.bst_for_power_levels(), pk.bst());
    }

    #[test]
    fn test_crippled_hp_power_adjustment() {
        let pk = species(CRIPPLED_HP_SPECIES, 1, 90);
        // HP被排除，剩余450再乘6/5
        assert_eq!(pk.bst_for_power_levels(), 450 * 6 / 5);
        assert_ne!(pk.bst_for_power_levels(), pk.bst());
    }

    #[test]
    fn test_legendary_flag() {
        assert!(species(150, 106, 100).is_legendary());
        assert!(species(649, 71, 120).is_legendary());
        assert!(!species(25, 35, 50).is_legendary());
    }

    #[test]
    fn test_has_type() {
        let mut pk = species(1, 45, 50);
        pk.primary_type = PokemonType::Grass;
        pk.secondary_type = Some(PokemonType::Poison);
        assert!(pk.has_type(PokemonType::Grass));
        assert!(pk.has_type(PokemonType::Poison));
        assert!(!pk.has_type(PokemonType::Fire));
    }

    #[test]
    fn test_identity_is_number_only() {
        let a = species(7, 44, 50);
        let mut b = species(7, 80, 90);
        b.name = "别名".to_string();
        assert_eq!(a, b);
        assert!(species(7, 1, 1) < species(8, 1, 1));
    }
}
