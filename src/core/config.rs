// 随机化配置管理
// 开发心理：类型安全的配置模型，支持JSON加载保存与默认值
// 配置只描述"做什么"，策略实现读取配置决定"怎么做"

use serde::{Deserialize, Serialize};
use log::warn;

use crate::core::error::{RandomizerError, Result};

// 野生遭遇重映射策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildPokemonMod {
    // 不做任何修改
    NoOp,
    // 每个遭遇槽独立随机
    Random,
    // 区域内一致映射
    AreaMapping,
    // 全图鉴一致映射
    GlobalMapping,
}

impl Default for WildPokemonMod {
    fn default() -> Self {
        WildPokemonMod::NoOp
    }
}

// 策略子模式，约束替换种族的选取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WildPokemonRestrictionMod {
    // 无额外约束
    Unrestricted,
    // 尽量铺满整个候选池后才允许重复
    CatchEmAll,
    // 每个区域统一一个属性主题
    TypeThemeAreas,
    // 以种族值相近为准
    SimilarStrength,
}

impl Default for WildPokemonRestrictionMod {
    fn default() -> Self {
        WildPokemonRestrictionMod::Unrestricted
    }
}

// 世代限制：每个世代的纳入开关，以及跨世代的进化关联开关
// 关联 assoc_gX_gY 表示"已纳入的第X世代种族，其进化家族中落在第Y世代的成员也纳入"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenRestrictions {
    pub allow_gen1: bool,
    pub allow_gen2: bool,
    pub allow_gen3: bool,
    pub allow_gen4: bool,
    pub allow_gen5: bool,

    pub assoc_g1_g2: bool,
    pub assoc_g1_g4: bool,
    pub assoc_g2_g1: bool,
    pub assoc_g2_g3: bool,
    pub assoc_g2_g4: bool,
    pub assoc_g3_g2: bool,
    pub assoc_g3_g4: bool,
    pub assoc_g4_g1: bool,
    pub assoc_g4_g2: bool,
    pub assoc_g4_g3: bool,
}

impl GenRestrictions {
    pub fn any_generation_allowed(&self) -> bool {
        self.allow_gen1 || self.allow_gen2 || self.allow_gen3 || self.allow_gen4 || self.allow_gen5
    }
}

// 一次随机化会话的全部设置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub wild_pokemon_mod: WildPokemonMod,
    pub wild_restriction_mod: WildPokemonRestrictionMod,
    // 是否把依赖时间段的遭遇表也纳入处理
    pub use_time_based_encounters: bool,
    // 野生遭遇槽中排除传说宝可梦
    pub block_wild_legendaries: bool,
    #[serde(default)]
    pub gen_restrictions: Option<GenRestrictions>,
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // 启用了世代限制却没有任何世代被纳入时，候选池必然为空
    pub fn validate(&self) -> Result<()> {
        if let Some(restrictions) = &self.gen_restrictions {
            if !restrictions.any_generation_allowed() {
                return Err(RandomizerError::Config(
                    "世代限制启用但未纳入任何世代".to_string(),
                ));
            }
            if restrictions.assoc_g1_g4 && !restrictions.allow_gen1 {
                warn!("关联开关 assoc_g1_g4 在第一世代未纳入时不会生效");
            }
        }
        Ok(())
    }
}
