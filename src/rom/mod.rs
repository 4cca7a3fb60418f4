// 目录提供方接口 - 引擎与ROM读写协作方之间的窄接口
// 开发心理：引擎核心不关心二进制容器怎么解析，只依赖这里的查询面
// 所有随机性经由调用方传入的RNG，接口本身不持有随机状态

pub mod encounters;
pub mod memory;

pub use encounters::{Encounter, EncounterSet};
pub use memory::MemoryRomHandler;

use std::collections::HashMap;

use log::warn;
use rand::rngs::StdRng;

use crate::core::error::{RandomizerError, Result};
use crate::pokemon::{EvolutionGraph, Pokemon, PokemonId, PokemonPool, PokemonType};

// 图鉴：有序种族目录、编号索引与进化关系图的唯一拥有者
#[derive(Debug, Clone)]
pub struct Pokedex {
    list: Vec<Pokemon>,
    index: HashMap<PokemonId, usize>,
    graph: EvolutionGraph,
}

impl Pokedex {
    pub fn new(list: Vec<Pokemon>, graph: EvolutionGraph) -> Self {
        let mut index = HashMap::with_capacity(list.len());
        for (pos, pk) in list.iter().enumerate() {
            if index.insert(pk.number, pos).is_some() {
                warn!("图鉴存在重复编号 {}，保留后出现的条目", pk.number);
            }
        }
        Self { list, index, graph }
    }

    pub fn get(&self, id: PokemonId) -> Option<&Pokemon> {
        self.index.get(&id).map(|&pos| &self.list[pos])
    }

    // 带错误的查询，供必须命中的路径使用
    pub fn require(&self, id: PokemonId) -> Result<&Pokemon> {
        self.get(id)
            .ok_or_else(|| RandomizerError::Data(format!("图鉴中不存在编号 {}", id)))
    }

    // 完整目录，加载顺序
    pub fn all(&self) -> &[Pokemon] {
        &self.list
    }

    pub fn graph(&self) -> &EvolutionGraph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

// ROM读写协作方必须实现的查询与回写接口
pub trait RomHandler {
    // 图鉴（目录+进化图）
    fn pokedex(&self) -> &Pokedex;

    // 本次会话的候选池，构建一次后缓存
    fn pokemon_pool(&self) -> &PokemonPool;

    // 全局禁止出现在野生遭遇中的种族
    fn banned_for_wild_encounters(&self) -> Vec<PokemonId>;

    // 随机抽取一种属性
    fn random_type(&self, rng: &mut StdRng) -> PokemonType {
        PokemonType::random(rng)
    }

    // 当前变体的全部遭遇集合，顺序稳定；标志决定是否包含时间段变体
    fn encounters(&self, use_time_of_day: bool) -> Vec<EncounterSet>;

    // 回写改动后的遭遇集合，顺序必须与取出时一致
    fn set_encounters(&mut self, use_time_of_day: bool, areas: Vec<EncounterSet>);
}
