// 进化关系图
// 开发心理：邻接表以编号为键，避免对象引用环
// 闭包遍历用显式访问集合与工作队列，图中即使有环也必须终止

use std::collections::{HashMap, VecDeque};

use indexmap::IndexSet;

use super::species::PokemonId;

// 有向进化边 from -> to 的双向邻接结构
#[derive(Debug, Clone, Default)]
pub struct EvolutionGraph {
    // "进化为"：from -> [to...]
    forward: HashMap<PokemonId, Vec<PokemonId>>,
    // "进化自"：to -> [from...]
    backward: HashMap<PokemonId, Vec<PokemonId>>,
}

impl EvolutionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, from: PokemonId, to: PokemonId) {
        self.forward.entry(from).or_default().push(to);
        self.backward.entry(to).or_default().push(from);
    }

    pub fn evolves_into(&self, id: PokemonId) -> &[PokemonId] {
        self.forward.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn evolves_from(&self, id: PokemonId) -> &[PokemonId] {
        self.backward.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    // 进化闭包：从起点沿两个方向能到达的全部种族（完整进化家族）
    // 起点自身只有在被某条边重新触达时才会出现在结果里
    pub fn family(&self, id: PokemonId) -> Vec<PokemonId> {
        let mut family: IndexSet<PokemonId> = IndexSet::new();
        let mut queue: VecDeque<PokemonId> = VecDeque::new();
        queue.push_back(id);

        while let Some(next) = queue.pop_front() {
            for &to in self.evolves_into(next) {
                if family.insert(to) {
                    queue.push_back(to);
                }
            }
            for &from in self.evolves_from(next) {
                if family.insert(from) {
                    queue.push_back(from);
                }
            }
        }

        family.into_iter().collect()
    }
}
