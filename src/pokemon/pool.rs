// 候选种族池
// 开发心理：一次会话构建一次，之后只读
// 插入顺序保持、自动去重，世代范围是固定常量而非配置项

use indexmap::IndexSet;
use log::debug;

use crate::core::config::GenRestrictions;
use crate::rom::Pokedex;

use super::species::PokemonId;
use super::types::PokemonType;

// 各世代的编号区间（闭区间）
pub const GEN_SPANS: [(PokemonId, PokemonId); 5] =
    [(1, 151), (152, 251), (252, 386), (387, 493), (494, 649)];

// 经世代限制筛选后的候选种族集合，保持目录顺序且无重复
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonPool {
    members: Vec<PokemonId>,
}

impl PokemonPool {
    // 按限制配置构建候选池；无限制时等于完整目录
    pub fn build(dex: &Pokedex, restrictions: Option<&GenRestrictions>) -> PokemonPool {
        let restrictions = match restrictions {
            Some(r) => r,
            None => {
                return PokemonPool {
                    members: dex.all().iter().map(|p| p.number).collect(),
                };
            }
        };

        // 区间超出目录实际规模的世代与关联一律静默跳过
        let fits = |span: (PokemonId, PokemonId)| dex.len() >= span.1 as usize;
        let mut picked: IndexSet<PokemonId> = IndexSet::new();

        if restrictions.allow_gen1 && fits(GEN_SPANS[0]) {
            add_span(&mut picked, dex, GEN_SPANS[0]);
            if restrictions.assoc_g1_g2 && fits(GEN_SPANS[1]) {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[0], GEN_SPANS[1]);
            }
            if restrictions.assoc_g1_g4 && fits(GEN_SPANS[3]) {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[0], GEN_SPANS[3]);
            }
        }

        if restrictions.allow_gen2 && fits(GEN_SPANS[1]) {
            add_span(&mut picked, dex, GEN_SPANS[1]);
            if restrictions.assoc_g2_g1 {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[1], GEN_SPANS[0]);
            }
            if restrictions.assoc_g2_g3 && fits(GEN_SPANS[2]) {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[1], GEN_SPANS[2]);
            }
            if restrictions.assoc_g2_g4 && fits(GEN_SPANS[3]) {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[1], GEN_SPANS[3]);
            }
        }

        if restrictions.allow_gen3 && fits(GEN_SPANS[2]) {
            add_span(&mut picked, dex, GEN_SPANS[2]);
            if restrictions.assoc_g3_g2 {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[2], GEN_SPANS[1]);
            }
            if restrictions.assoc_g3_g4 && fits(GEN_SPANS[3]) {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[2], GEN_SPANS[3]);
            }
        }

        if restrictions.allow_gen4 && fits(GEN_SPANS[3]) {
            add_span(&mut picked, dex, GEN_SPANS[3]);
            if restrictions.assoc_g4_g1 {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[3], GEN_SPANS[0]);
            }
            if restrictions.assoc_g4_g2 {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[3], GEN_SPANS[1]);
            }
            if restrictions.assoc_g4_g3 {
                add_evos_from_span(&mut picked, dex, GEN_SPANS[3], GEN_SPANS[2]);
            }
        }

        if restrictions.allow_gen5 && fits(GEN_SPANS[4]) {
            add_span(&mut picked, dex, GEN_SPANS[4]);
        }

        debug!("候选池构建完成，共{}个种族", picked.len());
        PokemonPool {
            members: picked.into_iter().collect(),
        }
    }

    // 全部成员，插入顺序
    pub fn all(&self) -> &[PokemonId] {
        &self.members
    }

    // 按传说标记筛选
    pub fn by_legendary<'a>(
        &'a self,
        dex: &'a Pokedex,
        legendary: bool,
    ) -> impl Iterator<Item = PokemonId> + 'a {
        self.members.iter().copied().filter(move |&id| {
            dex.get(id).map_or(false, |pk| pk.is_legendary() == legendary)
        })
    }

    // 按属性筛选（主属性或副属性匹配），可选排除传说
    pub fn by_type<'a>(
        &'a self,
        dex: &'a Pokedex,
        ptype: PokemonType,
        no_legendaries: bool,
    ) -> impl Iterator<Item = PokemonId> + 'a {
        self.members.iter().copied().filter(move |&id| {
            dex.get(id).map_or(false, |pk| {
                pk.has_type(ptype) && !(no_legendaries && pk.is_legendary())
            })
        })
    }

    pub fn contains(&self, id: PokemonId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

fn add_span(picked: &mut IndexSet<PokemonId>, dex: &Pokedex, span: (PokemonId, PokemonId)) {
    for pk in dex.all() {
        if pk.number >= span.0 && pk.number <= span.1 {
            picked.insert(pk.number);
        }
    }
}

// 把第一区间内已纳入种族的进化家族成员中落在第二区间的部分补进来
// 只扫描当前已纳入的种族，避免无界扩张；此前关联步骤新增的成员也参与扫描
fn add_evos_from_span(
    picked: &mut IndexSet<PokemonId>,
    dex: &Pokedex,
    first: (PokemonId, PokemonId),
    second: (PokemonId, PokemonId),
) {
    let mut to_add: IndexSet<PokemonId> = IndexSet::new();
    for &id in picked.iter() {
        if id < first.0 || id > first.1 {
            continue;
        }
        for member in dex.graph().family(id) {
            if member >= second.0 && member <= second.1 {
                to_add.insert(member);
            }
        }
    }
    for id in to_add {
        picked.insert(id);
    }
}
