// 宝可梦野生遭遇随机化引擎入口
// 开发心理：确定性优先，所有随机性经由调用方的种子RNG
// 架构：配置驱动，ROM访问走窄接口，策略之间互不依赖

// 核心模块
pub mod core;
pub mod pokemon;
pub mod rom;
pub mod wild;

// 重新导出核心类型
pub use crate::core::config::{
    GenRestrictions, Settings, WildPokemonMod, WildPokemonRestrictionMod,
};
pub use crate::core::error::{RandomizerError, Result};
pub use crate::pokemon::{EvolutionGraph, Pokemon, PokemonId, PokemonPool, PokemonType};
pub use crate::rom::{Encounter, EncounterSet, MemoryRomHandler, Pokedex, RomHandler};
pub use crate::wild::WildPokemonModifier;

// 版本信息 - 使用默认值避免编译时环境变量依赖
pub const VERSION: &str = "0.1.0";
pub const NAME: &str = "pokerandom";

// 便利函数
pub fn init() -> Result<()> {
    // 初始化日志系统；重复初始化静默忽略，方便测试里多次调用
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "pokerandom=info");
    }

    let _ = env_logger::try_init();

    log::info!("野生遭遇随机化引擎初始化完成 v{}", VERSION);
    Ok(())
}
