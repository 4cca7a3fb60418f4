// 宝可梦数据模块 - 种族、属性、进化关系与候选池
// 开发心理：目录加载后全部只读，所有查询通过编号进行

pub mod evolution;
pub mod pool;
pub mod species;
pub mod types;

// 重新导出主要类型
pub use evolution::EvolutionGraph;
pub use pool::{PokemonPool, GEN_SPANS};
pub use species::{Pokemon, PokemonId};
pub use types::PokemonType;
