// 核心模块 - 随机化引擎基础设施
// 开发心理：建立稳固的基础架构，错误与配置是所有上层模块的共同依赖

pub mod config;
pub mod error;

// 重新导出核心类型
pub use config::{GenRestrictions, Settings, WildPokemonMod, WildPokemonRestrictionMod};
pub use error::{RandomizerError, Result};
